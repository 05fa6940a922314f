pub mod temporary_maximum_media_stream_bit_rate_notification;
pub mod temporary_maximum_media_stream_bit_rate_request;
mod tmmb;

pub use tmmb::TmmbEntry;
