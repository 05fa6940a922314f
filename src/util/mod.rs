
use crate::error::{Error, Result};

// set_nbits_of_uint16 will truncate the value to size, left-shift to start_index position and set
pub(crate) fn set_nbits_of_uint16(
    src: u16,
    size: u16,
    start_index: u16,
    mut val: u16,
) -> Result<u16> {
    if u32::from(start_index) + u32::from(size) > 16 {
        return Err(Error::InvalidSizeOrStartIndex);
    }

    if size == 0 {
        return Ok(src);
    }

    // truncate val to size bits
    val &= ((1u32 << size) - 1) as u16;

    Ok(src | (val << (16 - size - start_index)))
}

// append_nbits_to_uint32 will left-shift and append n bits of val
pub(crate) fn append_nbits_to_uint32(src: u32, n: u32, val: u32) -> u32 {
    if n == 0 {
        return src;
    }
    (src.checked_shl(n).unwrap_or(0)) | (val & (0xFFFFFFFF >> (32 - n)))
}

// get_nbits_from_byte get n bits from 1 byte, begin with a position
pub(crate) fn get_nbits_from_byte(b: u8, begin: u16, n: u16) -> u16 {
    let end_shift = 8 - (begin + n);
    let mask = (0xFFu16 >> begin) as u8 & (0xFFu16 << end_shift) as u8;
    (b & mask) as u16 >> end_shift
}

// get_24bits_from_bytes get 24bits from `[3]byte` slice
pub(crate) fn get_24bits_from_bytes(b: &[u8]) -> u32 {
    ((b[0] as u32) << 16) + ((b[1] as u32) << 8) + (b[2] as u32)
}
