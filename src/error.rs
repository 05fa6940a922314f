use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Wrong marshal size.
    #[error("Wrong marshal size")]
    WrongMarshalSize,
    /// Packet contains an invalid header.
    #[error("Invalid header")]
    InvalidHeader,
    /// Packet received is too short.
    #[error("Packet too short")]
    PacketTooShort,
    /// Buffer is too short.
    #[error("Buffer too short to be written")]
    BufferTooShort,
    /// Wrong packet type.
    #[error("Wrong packet type")]
    WrongType,
    /// Packet is shorter than its header length claims.
    #[error("Packet length does not match header")]
    BadLength,
    /// Too many sources.
    #[error("too many sources")]
    TooManySources,
    /// Invalid packet version.
    #[error("Invalid packet version expected({expected}) actual({actual})")]
    BadVersion { expected: u8, actual: u8 },
    /// Invalid padding value.
    #[error("Invalid padding value expected({expected}) actual({actual})")]
    WrongPadding { expected: u8, actual: u8 },
    /// Wrong feedback message type.
    #[error("Wrong feedback message type expected({expected}) actual({actual})")]
    WrongFeedbackType { expected: u8, actual: u8 },
    /// Wrong payload type.
    #[error("Wrong payload type expected({expected}) actual({actual})")]
    WrongPayloadType { expected: u8, actual: u8 },
    /// Header length is too small.
    #[error("Header length is too small")]
    HeaderTooSmall,
    /// Media ssrc was not zero.
    #[error("Media SSRC must be 0")]
    SsrcMustBeZero,
    /// Missing REMB identifier.
    #[error("Missing REMB identifier")]
    MissingRembIdentifier,
    /// SSRC number and length mismatches.
    #[error("SSRC num and length do not match")]
    SsrcNumAndLengthMismatch,
    /// Invalid size or start index.
    #[error("Invalid size or startIndex")]
    InvalidSizeOrStartIndex,
    /// Bitrate is negative or cannot be represented.
    #[error("Invalid bitrate")]
    InvalidBitrate,
}

impl From<Error> for util::Error {
    fn from(e: Error) -> Self {
        util::Error::from_std(e)
    }
}

impl PartialEq<util::Error> for Error {
    fn eq(&self, other: &util::Error) -> bool {
        if let Some(down) = other.downcast_ref::<Error>() {
            return self == down;
        }
        false
    }
}
