use bytes::Bytes;

use super::*;

#[test]
fn test_receiver_estimated_maximum_bitrate_marshal() {
    let input = ReceiverEstimatedMaximumBitrate {
        sender_ssrc: 1,
        bitrate: 8927168.0,
        ssrcs: vec![1215622422],
    };

    let expected = Bytes::from_static(&[
        143, 206, 0, 5, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 1, 26, 32, 223, 72, 116, 237, 22,
    ]);

    let output = input.marshal().unwrap();
    assert_eq!(output, expected);
}

#[test]
fn test_receiver_estimated_maximum_bitrate_unmarshal() {
    // Real data sent by Chrome while watching a 6Mb/s stream
    let mut input = Bytes::from_static(&[
        143, 206, 0, 5, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 1, 26, 32, 223, 72, 116, 237, 22,
    ]);

    // mantissa = []byte{26 & 3, 32, 223} = []byte{2, 32, 223} = 139487
    // exp = 26 >> 2 = 6
    // bitrate = 139487 * 2^6 = 139487 * 64 = 8927168 = 8.9 Mb/s
    let expected = ReceiverEstimatedMaximumBitrate {
        sender_ssrc: 1,
        bitrate: 8927168.0,
        ssrcs: vec![1215622422],
    };

    let packet = ReceiverEstimatedMaximumBitrate::unmarshal(&mut input).unwrap();
    assert_eq!(packet, expected);
    assert!(!input.has_remaining());
}

#[test]
fn test_receiver_estimated_maximum_bitrate_truncate() {
    let input = Bytes::from_static(&[
        143, 206, 0, 5, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 1, 26, 32, 223, 72, 116, 237, 22,
    ]);

    // Make sure that we're interpreting the bitrate correctly.
    // For the above example, we have:

    // mantissa = 139487
    // exp = 6
    // bitrate = 8927168

    let mut buf = input.clone();
    let mut packet = ReceiverEstimatedMaximumBitrate::unmarshal(&mut buf).unwrap();
    assert_eq!(packet.bitrate, 8927168.0);

    // Just verify marshal produces the same input.
    let output = packet.marshal().unwrap();
    assert_eq!(output, input);

    // If we subtract the bitrate by 1, we'll round down a lower mantissa
    packet.bitrate -= 1.0;

    // bitrate = 8927167
    // mantissa = 139486
    // exp = 6

    let mut output = packet.marshal().unwrap();
    assert_ne!(output, input);
    let expected = Bytes::from_static(&[
        143, 206, 0, 5, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 1, 26, 32, 222, 72, 116, 237, 22,
    ]);
    assert_eq!(output, expected);

    // Which if we actually unmarshal again, we'll find that it's actually decreased by 64 (which is 2^exp)
    // mantissa = 139486
    // exp = 6
    // bitrate = 8927104

    let packet = ReceiverEstimatedMaximumBitrate::unmarshal(&mut output).unwrap();
    assert_eq!(8927104.0, packet.bitrate);
}

#[test]
fn test_receiver_estimated_maximum_bitrate_overflow() {
    // Marshal a packet with the maximum possible bitrate.
    let packet = ReceiverEstimatedMaximumBitrate {
        bitrate: f32::MAX,
        ..Default::default()
    };

    // mantissa = 262143 = 0x3FFFF
    // exp = 63

    let expected = Bytes::from_static(&[
        143, 206, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 82, 69, 77, 66, 0, 255, 255, 255,
    ]);

    let output = packet.marshal().unwrap();
    assert_eq!(output, expected);

    // mantissa = 262143
    // exp = 63
    // bitrate = 0xFFFFC00000000000

    let mut buf = output;
    let packet = ReceiverEstimatedMaximumBitrate::unmarshal(&mut buf).unwrap();
    assert_eq!(packet.bitrate, f32::from_bits(0x67FFFFC0));

    // Make sure we marshal to the same result again.
    let output = packet.marshal().unwrap();
    assert_eq!(output, expected);

    // Finally, try unmarshalling one number higher than we used to be able to handle.
    let mut input = Bytes::from_static(&[
        143, 206, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 82, 69, 77, 66, 0, 188, 0, 0,
    ]);
    let packet = ReceiverEstimatedMaximumBitrate::unmarshal(&mut input).unwrap();
    assert_eq!(packet.bitrate, f32::from_bits(0x62800000));
}

#[test]
fn test_receiver_estimated_maximum_bitrate_size_grows_with_ssrcs() {
    let mut packet = ReceiverEstimatedMaximumBitrate {
        sender_ssrc: 1,
        bitrate: 0.0,
        ssrcs: vec![],
    };

    let output = packet.marshal().unwrap();
    assert_eq!(output.len(), 20);
    assert_eq!(&output[..8], &[143, 206, 0, 4, 0, 0, 0, 1]);
    assert_eq!(packet.header().length, 4);

    packet.ssrcs = vec![0x11111111, 0x22222222, 0x33333333];
    let output = packet.marshal().unwrap();
    assert_eq!(output.len(), 32);
    assert_eq!(packet.marshal_size(), 32);
    assert_eq!(packet.header().length, 7);
    assert_eq!(&output[2..4], &[0, 7]);
    assert_eq!(output[16], 3);
    assert_eq!(&output[20..24], &[0x11, 0x11, 0x11, 0x11]);
    assert_eq!(&output[28..32], &[0x33, 0x33, 0x33, 0x33]);
}

#[test]
fn test_receiver_estimated_maximum_bitrate_marshal_errors() {
    let negative = ReceiverEstimatedMaximumBitrate {
        bitrate: -1.0,
        ..Default::default()
    };
    let got = negative.marshal().unwrap_err();
    assert_eq!(Error::InvalidBitrate, got);

    let too_many = ReceiverEstimatedMaximumBitrate {
        ssrcs: vec![0; 256],
        ..Default::default()
    };
    let got = too_many.marshal().unwrap_err();
    assert_eq!(Error::TooManySources, got);

    let packet = ReceiverEstimatedMaximumBitrate {
        ssrcs: vec![1, 2],
        ..Default::default()
    };
    let mut buf = vec![0u8; packet.marshal_size() - 1];
    let got = packet.marshal_to(&mut buf).unwrap_err();
    assert_eq!(Error::BufferTooShort, got);

    let mut buf = vec![0u8; packet.marshal_size()];
    assert_eq!(packet.marshal_to(&mut buf).unwrap(), 28);
}

#[test]
fn test_receiver_estimated_maximum_bitrate_unmarshal_errors() {
    let tests = vec![
        (
            "too short",
            Bytes::from_static(&[143, 206, 0]),
            Error::PacketTooShort,
        ),
        (
            "bad version",
            Bytes::from_static(&[
                79, 206, 0, 4, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 0, 0, 0, 0,
            ]),
            Error::BadVersion {
                expected: 2,
                actual: 1,
            },
        ),
        (
            "padding set",
            Bytes::from_static(&[
                175, 206, 0, 4, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 0, 0, 0, 0,
            ]),
            Error::WrongPadding {
                expected: 0,
                actual: 1,
            },
        ),
        (
            "wrong feedback type",
            Bytes::from_static(&[
                135, 206, 0, 4, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 0, 0, 0, 0,
            ]),
            Error::WrongFeedbackType {
                expected: 15,
                actual: 7,
            },
        ),
        (
            "wrong payload type",
            Bytes::from_static(&[
                143, 205, 0, 4, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 0, 0, 0, 0,
            ]),
            Error::WrongPayloadType {
                expected: 206,
                actual: 205,
            },
        ),
        (
            "header too small",
            Bytes::from_static(&[
                143, 206, 0, 3, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 0, 0, 0, 0,
            ]),
            Error::HeaderTooSmall,
        ),
        (
            "length beyond buffer",
            Bytes::from_static(&[
                143, 206, 0, 5, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 1, 0, 0, 0,
            ]),
            Error::PacketTooShort,
        ),
        (
            "media ssrc not zero",
            Bytes::from_static(&[
                143, 206, 0, 4, 0, 0, 0, 1, 0, 0, 0, 9, 82, 69, 77, 66, 0, 0, 0, 0,
            ]),
            Error::SsrcMustBeZero,
        ),
        (
            "missing identifier",
            Bytes::from_static(&[
                143, 206, 0, 4, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 67, 0, 0, 0, 0,
            ]),
            Error::MissingRembIdentifier,
        ),
        (
            "ssrc count disagrees with length",
            Bytes::from_static(&[
                143, 206, 0, 4, 0, 0, 0, 1, 0, 0, 0, 0, 82, 69, 77, 66, 2, 0, 0, 0,
            ]),
            Error::SsrcNumAndLengthMismatch,
        ),
    ];

    for (name, data, want_error) in tests {
        let got = ReceiverEstimatedMaximumBitrate::unmarshal(&mut data.clone());
        let got_err = got.expect_err(name);
        assert_eq!(
            want_error, got_err,
            "Unmarshal {name}: err = {got_err:?}, want {want_error:?}",
        );
    }
}

#[test]
fn test_receiver_estimated_maximum_bitrate_roundtrip() {
    let packet = ReceiverEstimatedMaximumBitrate {
        sender_ssrc: 0x902f9e2e,
        bitrate: 8927168.0,
        ssrcs: vec![5, 5, 0xbc5e9a40],
    };

    let mut data = packet.marshal().unwrap();
    let decoded = ReceiverEstimatedMaximumBitrate::unmarshal(&mut data).unwrap();
    assert_eq!(decoded, packet);
    assert!(decoded.equal(&packet));
    assert_eq!(decoded.destination_ssrc(), vec![5, 5, 0xbc5e9a40]);
}

#[test]
fn test_receiver_estimated_maximum_bitrate_header() {
    let packet = ReceiverEstimatedMaximumBitrate {
        sender_ssrc: 1,
        bitrate: 1000.0,
        ssrcs: vec![1000],
    };

    assert_eq!(
        packet.header(),
        Header {
            padding: false,
            count: FORMAT_REMB,
            packet_type: PacketType::PayloadSpecificFeedback,
            length: 5,
        }
    );
}

#[test]
fn test_receiver_estimated_maximum_bitrate_string() {
    let packet = ReceiverEstimatedMaximumBitrate {
        sender_ssrc: 0x12345678,
        bitrate: 8927168.0,
        ssrcs: vec![],
    };

    assert_eq!(
        packet.to_string(),
        "ReceiverEstimatedMaximumBitrate 12345678 8.93 Mb/s"
    );
}
