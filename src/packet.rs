use std::any::Any;
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use util::marshal::{Marshal, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::payload_feedbacks::receiver_estimated_maximum_bitrate::*;
use crate::raw_packet::*;
use crate::transport_feedbacks::temporary_maximum_media_stream_bit_rate_notification::*;
use crate::transport_feedbacks::temporary_maximum_media_stream_bit_rate_request::*;

type Result<T> = std::result::Result<T, util::Error>;

/// Packet represents an RTCP feedback packet carrying bitrate information
pub trait Packet: Marshal + Unmarshal + fmt::Display + fmt::Debug {
    fn header(&self) -> Header;
    fn destination_ssrc(&self) -> Vec<u32>;
    fn raw_size(&self) -> usize;
    fn as_any(&self) -> &(dyn Any + Send + Sync);
    fn equal(&self, other: &(dyn Packet + Send + Sync)) -> bool;
    fn cloned(&self) -> Box<dyn Packet + Send + Sync>;
}

impl PartialEq for dyn Packet + Send + Sync {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Clone for Box<dyn Packet + Send + Sync> {
    fn clone(&self) -> Box<dyn Packet + Send + Sync> {
        self.cloned()
    }
}

/// marshal takes an array of Packets and serializes them to a single buffer.
///
/// Errors are the crate's [`Error`] kinds carried in a `util::Error`, the same shape the
/// packet types return, so `Error::X == err` holds whichever layer failed.
pub fn marshal(packets: &[Box<dyn Packet + Send + Sync>]) -> Result<Bytes> {
    let mut out = BytesMut::new();
    for p in packets {
        let data = p.marshal()?;
        out.put(data);
    }
    Ok(out.freeze())
}

/// Unmarshal takes an entire udp datagram (which may consist of multiple RTCP packets) and
/// returns the unmarshaled packets it contains.
///
/// REMB, TMMBR and TMMBN are decoded into their own types, everything else is
/// returned as a [`RawPacket`].
pub fn unmarshal<B>(raw_data: &mut B) -> Result<Vec<Box<dyn Packet + Send + Sync>>>
where
    B: Buf,
{
    let mut packets = vec![];

    while raw_data.has_remaining() {
        let p = unmarshaller(raw_data)?;
        packets.push(p);
    }

    match packets.len() {
        // Empty Packet
        0 => Err(Error::InvalidHeader.into()),

        // Multiple Packet
        _ => Ok(packets),
    }
}

/// unmarshaller is a factory which pulls the first RTCP packet from a bytestream,
/// and returns it's parsed representation.
pub(crate) fn unmarshaller<B>(raw_data: &mut B) -> Result<Box<dyn Packet + Send + Sync>>
where
    B: Buf,
{
    let h = Header::unmarshal(raw_data)?;

    let length = (h.length as usize) * 4;
    if length > raw_data.remaining() {
        return Err(Error::PacketTooShort.into());
    }

    let mut in_packet = h.marshal()?.chain(raw_data.take(length));

    let p: Box<dyn Packet + Send + Sync> = match (h.packet_type, h.count) {
        (PacketType::TransportSpecificFeedback, FORMAT_TMMBR) => Box::new(
            TemporaryMaximumMediaStreamBitRateRequest::unmarshal(&mut in_packet)?,
        ),
        (PacketType::TransportSpecificFeedback, FORMAT_TMMBN) => Box::new(
            TemporaryMaximumMediaStreamBitRateNotification::unmarshal(&mut in_packet)?,
        ),
        (PacketType::PayloadSpecificFeedback, FORMAT_REMB) => {
            Box::new(ReceiverEstimatedMaximumBitrate::unmarshal(&mut in_packet)?)
        }
        _ => {
            log::trace!(
                "keeping {} packet with count {} as raw",
                h.packet_type,
                h.count
            );
            Box::new(RawPacket::unmarshal(&mut in_packet)?)
        }
    };

    // Whatever the packet left unread still belongs to it.
    if in_packet.has_remaining() {
        let rest = in_packet.remaining();
        in_packet.advance(rest);
    }

    Ok(p)
}
