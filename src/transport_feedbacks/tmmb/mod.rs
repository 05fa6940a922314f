//! Body shared by TMMBR and TMMBN, RFC 5104 §4.2.1.1 and §4.2.2.1.
//!
//! The two messages only differ in the FMT value of their header, so the
//! FCI layout, the length bookkeeping and the validation live here.


use std::fmt;

use bytes::{Buf, BufMut};
use util::marshal::{Marshal, Unmarshal};

use crate::bitrate::*;
use crate::error::Error;
use crate::header::*;

type Result<T> = std::result::Result<T, util::Error>;

/// Sender SSRC plus the media source SSRC, which is always zero.
pub(crate) const TMMB_OFFSET: usize = SSRC_LENGTH * 2;
/// FCI SSRC, then MxTBR exponent/mantissa and the measured overhead.
pub(crate) const TMMB_ENTRY_LENGTH: usize = SSRC_LENGTH * 2;

/// TmmbEntry is a single FCI entry of a TMMBR or TMMBN packet.
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub struct TmmbEntry {
    /// SSRC of media source this entry applies to
    pub media_ssrc: u32,

    /// Maximum total media bit rate
    pub bitrate: f32,
}

pub(crate) fn raw_size(entries: &[TmmbEntry]) -> usize {
    HEADER_LENGTH + TMMB_OFFSET + entries.len() * TMMB_ENTRY_LENGTH
}

pub(crate) fn header(format: u8, entries: &[TmmbEntry]) -> Header {
    Header {
        padding: false,
        count: format,
        packet_type: PacketType::TransportSpecificFeedback,
        length: ((raw_size(entries) / 4) - 1) as u16,
    }
}

pub(crate) fn destination_ssrc(entries: &[TmmbEntry]) -> Vec<u32> {
    entries.iter().map(|e| e.media_ssrc).collect()
}

/// Writes header, sender SSRC, the zero media SSRC and every FCI entry.
pub(crate) fn marshal_to(
    format: u8,
    sender_ssrc: u32,
    entries: &[TmmbEntry],
    mut buf: &mut [u8],
) -> Result<usize> {
    /*
     *  0                   1                   2                   3
     *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
     * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
     * |V=2|P| FMT=3/4 |   PT = 205    |          length               |
     * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
     * |                  SSRC of packet sender                        |
     * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
     * |                  SSRC of media source (0)                     |
     * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
     * |                              SSRC                             |
     * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
     * | MxTBR Exp |  MxTBR Mantissa                 |Measured Overhead|
     * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
     * |  ...                                                          |
     */
    let size = raw_size(entries);
    if size / 4 - 1 > u16::MAX as usize {
        return Err(Error::TooManySources.into());
    }

    let buf_len = buf.remaining_mut();
    if buf_len < size {
        return Err(Error::BufferTooShort.into());
    }

    // Encode every bitrate first so a bad entry leaves buf untouched.
    let bitrates = entries
        .iter()
        .map(|entry| encode_bitrate(entry.bitrate))
        .collect::<crate::error::Result<Vec<_>>>()?;

    let h = header(format, entries);
    let n = h.marshal_to(buf)?;
    buf = &mut buf[n..];

    buf.put_u32(sender_ssrc);
    // https://www.rfc-editor.org/rfc/rfc5104.html#section-4.2.1.2
    buf.put_u32(0);

    for (entry, bitrate) in entries.iter().zip(&bitrates) {
        buf.put_u32(entry.media_ssrc);
        buf.put_slice(bitrate);
        // measured overhead
        buf.put_u8(0);
    }

    let written = buf_len - buf.remaining_mut();
    if written != size {
        return Err(Error::WrongMarshalSize.into());
    }

    Ok(written)
}

/// Reads a TMMBR/TMMBN packet whose header carries `format`, returning the sender SSRC
/// and the FCI entries. The number of entries follows from the header length.
pub(crate) fn unmarshal<B>(format: u8, raw_packet: &mut B) -> Result<(u32, Vec<TmmbEntry>)>
where
    B: Buf,
{
    let raw_packet_len = raw_packet.remaining();
    if raw_packet_len < HEADER_LENGTH + TMMB_OFFSET {
        return Err(Error::PacketTooShort.into());
    }

    let h = Header::unmarshal(raw_packet)?;

    let expected_size = h.packet_size();
    if raw_packet_len < expected_size {
        return Err(Error::BadLength.into());
    }

    if h.packet_type != PacketType::TransportSpecificFeedback || h.count != format {
        return Err(Error::WrongType.into());
    }

    // sender SSRC and media SSRC take two words on their own
    if (h.length as usize) < TMMB_OFFSET / 4 {
        return Err(Error::BadLength.into());
    }

    let sender_ssrc = raw_packet.get_u32();
    // media SSRC, always zero on the wire and not checked
    raw_packet.advance(SSRC_LENGTH);

    let entry_count = (h.length as usize - TMMB_OFFSET / 4) / (TMMB_ENTRY_LENGTH / 4);
    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        let media_ssrc = raw_packet.get_u32();
        let mut bitrate = [0u8; BITRATE_LENGTH];
        raw_packet.copy_to_slice(&mut bitrate);
        // measured overhead
        raw_packet.advance(1);

        entries.push(TmmbEntry {
            media_ssrc,
            bitrate: decode_bitrate(&bitrate),
        });
    }

    // An odd length leaves one trailing word that carries no entry.
    let consumed = HEADER_LENGTH + TMMB_OFFSET + entry_count * TMMB_ENTRY_LENGTH;
    raw_packet.advance(expected_size - consumed);

    Ok((sender_ssrc, entries))
}

pub(crate) fn fmt_entries(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    sender_ssrc: u32,
    entries: &[TmmbEntry],
) -> fmt::Result {
    writeln!(f, "{name} from {sender_ssrc:x}:")?;
    for (i, entry) in entries.iter().enumerate() {
        let (bitrate, unit) = bitrate_unit(entry.bitrate);
        writeln!(
            f,
            " entry {}: media={:x}, bitrate={:.2} {}/s",
            i, entry.media_ssrc, bitrate, unit
        )?;
    }
    Ok(())
}
