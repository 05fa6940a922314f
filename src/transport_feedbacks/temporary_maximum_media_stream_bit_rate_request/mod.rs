
use std::any::Any;
use std::fmt;

use bytes::Buf;
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::header::*;
use crate::packet::*;
use crate::transport_feedbacks::tmmb;
pub use crate::transport_feedbacks::tmmb::TmmbEntry;

type Result<T> = std::result::Result<T, util::Error>;

/// The TemporaryMaximumMediaStreamBitRateRequest (TMMBR) asks the media senders
/// to limit their bit rate to the announced maximum.
///
/// ## Specifications
///
/// * [RFC 5104 §4.2.1]
///
/// [RFC 5104 §4.2.1]: https://www.rfc-editor.org/rfc/rfc5104.html#section-4.2.1
#[derive(Debug, PartialEq, Default, Clone)]
pub struct TemporaryMaximumMediaStreamBitRateRequest {
    /// SSRC of sender
    pub sender_ssrc: u32,

    /// Requested limits, one per media source
    pub entries: Vec<TmmbEntry>,
}

impl fmt::Display for TemporaryMaximumMediaStreamBitRateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        tmmb::fmt_entries(f, "TMMBR", self.sender_ssrc, &self.entries)
    }
}

impl Packet for TemporaryMaximumMediaStreamBitRateRequest {
    /// Header returns the Header associated with this packet.
    fn header(&self) -> Header {
        tmmb::header(FORMAT_TMMBR, &self.entries)
    }

    /// destination_ssrc returns the media SSRC of every entry, in order.
    fn destination_ssrc(&self) -> Vec<u32> {
        tmmb::destination_ssrc(&self.entries)
    }

    fn raw_size(&self) -> usize {
        tmmb::raw_size(&self.entries)
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }

    fn equal(&self, other: &(dyn Packet + Send + Sync)) -> bool {
        other
            .as_any()
            .downcast_ref::<TemporaryMaximumMediaStreamBitRateRequest>()
            .map_or(false, |a| self == a)
    }

    fn cloned(&self) -> Box<dyn Packet + Send + Sync> {
        Box::new(self.clone())
    }
}

impl MarshalSize for TemporaryMaximumMediaStreamBitRateRequest {
    fn marshal_size(&self) -> usize {
        self.raw_size()
    }
}

impl Marshal for TemporaryMaximumMediaStreamBitRateRequest {
    /// Marshal encodes the TMMBR packet in binary
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        tmmb::marshal_to(FORMAT_TMMBR, self.sender_ssrc, &self.entries, buf)
    }
}

impl Unmarshal for TemporaryMaximumMediaStreamBitRateRequest {
    /// Unmarshal decodes the TMMBR packet from binary
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let (sender_ssrc, entries) = tmmb::unmarshal(FORMAT_TMMBR, raw_packet)?;

        Ok(TemporaryMaximumMediaStreamBitRateRequest {
            sender_ssrc,
            entries,
        })
    }
}
