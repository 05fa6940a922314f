#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! Package rtcp-feedback implements encoding and decoding of the RTCP feedback messages that
//! carry bitrate limits: REMB (draft-alvestrand-rmcat-remb), TMMBR and TMMBN (RFC 5104).
//!
//! A receiver uses REMB to tell a sender the total bitrate it estimates it can take across a
//! set of media streams. TMMBR asks a media sender to cap one stream at a given bitrate, and
//! TMMBN is the sender's notification of the set of limits it is currently honoring.
//!
//! All three messages store bitrates in the same 24-bit exponent/mantissa form, exposed in
//! [`bitrate`]. Other RTCP packets found in a compound datagram are kept as
//! [`raw_packet::RawPacket`].
//!
//! Decoding RTCP packets:
//!```nobuild
//!     let pkts = rtcp_feedback::packet::unmarshal(&mut rtcp_data)?;
//!
//!     for pkt in pkts {
//!         if let Some(e) = pkt
//!              .as_any()
//!              .downcast_ref::<ReceiverEstimatedMaximumBitrate>()
//!         {
//!             // ...
//!         }
//!     }
//!```
//!
//! Encoding RTCP packets:
//!```nobuild
//!     let pkt = TemporaryMaximumMediaStreamBitRateRequest {
//!         sender_ssrc,
//!         entries: vec![TmmbEntry { media_ssrc, bitrate: 1_000_000.0 }],
//!     };
//!
//!     let tmmbr_data = pkt.marshal()?;
//!     // ...
//!```

pub mod bitrate;
mod error;
pub mod header;
pub mod packet;
pub mod payload_feedbacks;
pub mod raw_packet;
pub mod transport_feedbacks;
mod util;

pub use error::Error;
