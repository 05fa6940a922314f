
use crate::error::{Error, Result};
use crate::util::*;

/// Number of bytes a bitrate occupies on the wire.
pub const BITRATE_LENGTH: usize = 3;

const EXPONENT_BITS: u32 = 6;
const MANTISSA_BITS: u32 = 18;

/// Largest value the 6-bit exponent / 18-bit mantissa pair can hold, 0x3FFFFp+63.
pub const BITRATE_MAX: f32 = 0x3FFFF as f32 * (1u64 << 63) as f32;

/// IEEE754 single precision significand without the implicit leading bit.
const IEEE754_MANTISSA_MAX: u32 = 0x7FFFFF;

/// Keep a table of powers to units for fast conversion.
const BIT_UNITS: [&str; 7] = ["b", "Kb", "Mb", "Gb", "Tb", "Pb", "Eb"];

/// Packs a bitrate into the 24-bit exponent/mantissa form shared by REMB and TMMBR/TMMBN.
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Exp (6)  |          Mantissa (18)            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The value is rounded down to the nearest `mantissa * 2^exp`. Values at or above
/// [`BITRATE_MAX`] saturate; negative values and NaN are rejected.
pub fn encode_bitrate(bitrate: f32) -> Result<[u8; BITRATE_LENGTH]> {
    if bitrate.is_nan() || bitrate < 0.0 {
        return Err(Error::InvalidBitrate);
    }

    let mut bitrate = if bitrate >= BITRATE_MAX {
        BITRATE_MAX
    } else {
        bitrate
    };

    let mut exp = 0u32;
    while bitrate >= (1u32 << MANTISSA_BITS) as f32 {
        bitrate /= 2.0;
        exp += 1;
    }

    if exp >= (1 << EXPONENT_BITS) {
        return Err(Error::InvalidBitrate);
    }

    let mantissa = bitrate.floor() as u32;

    // a uint24 with a 6-bit exponent in front, big-endian.
    let packed = append_nbits_to_uint32(exp, MANTISSA_BITS, mantissa);
    Ok([(packed >> 16) as u8, (packed >> 8) as u8, packed as u8])
}

/// Unpacks a 24-bit exponent/mantissa bitrate into an `f32`.
///
/// The mantissa is promoted to an IEEE754 significand by shifting it up to the implicit
/// leading bit. A zero mantissa is not special cased, so the result then depends on the
/// exponent bits alone.
pub fn decode_bitrate(buf: &[u8; BITRATE_LENGTH]) -> f32 {
    // Get the 6-bit exponent value.
    let mut exp = get_nbits_from_byte(buf[0], 0, EXPONENT_BITS as u16) as u32;
    exp += 127; // bias for IEEE754
    exp += 23; // IEEE754 biases the decimal to the left, this format biases it to the right

    // The remaining 2-bits plus the next 16-bits are the mantissa.
    let mut mantissa = get_24bits_from_bytes(buf) & ((1 << MANTISSA_BITS) - 1);

    if mantissa != 0 {
        // ieee754 requires an implicit leading bit
        while (mantissa & (IEEE754_MANTISSA_MAX + 1)) == 0 {
            exp -= 1;
            mantissa <<= 1;
        }
    }

    // bitrate = mantissa * 2^exp
    f32::from_bits((exp << 23) | (mantissa & IEEE754_MANTISSA_MAX))
}

/// Scales a bitrate down by powers of 1000 and returns it with its unit, e.g. `(8.93, "Mb")`.
pub fn bitrate_unit(bitrate: f32) -> (f32, &'static str) {
    let mut bitrate = bitrate;
    let mut powers = 0;

    // Keep dividing the bitrate until it's under 1000
    while bitrate >= 1000.0 && powers < BIT_UNITS.len() - 1 {
        bitrate /= 1000.0;
        powers += 1;
    }

    (bitrate, BIT_UNITS[powers])
}
