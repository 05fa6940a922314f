pub mod receiver_estimated_maximum_bitrate;
