//! LEB128 variable-length integers
//!
//! Length prefixes and variant tags use unsigned LEB128 capped at 32 bits
//! (at most 5 bytes on the wire). `varint32` values are zigzag-mapped onto
//! the unsigned encoding.

/// Faults from decoding a variable-length integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintFault {
    /// Input ended inside the encoding
    Truncated,
    /// Encoding carries bits beyond 32 or exceeds 5 bytes
    Overflow,
    /// Encoding is longer than the minimal form
    Overlong,
}

/// Appends the LEB128 encoding of `value`.
pub fn encode_varuint32(buf: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            buf.push(byte | 0x80);
        } else {
            buf.push(byte);
            return;
        }
    }
}

/// Appends the zigzag LEB128 encoding of `value`.
pub fn encode_varint32(buf: &mut Vec<u8>, value: i32) {
    let zigzag = ((value << 1) ^ (value >> 31)) as u32;
    encode_varuint32(buf, zigzag);
}

/// Decodes an LEB128 u32 from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_varuint32(bytes: &[u8]) -> Result<(u32, usize), VarintFault> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    let mut consumed = 0;

    loop {
        let byte = *bytes.get(consumed).ok_or(VarintFault::Truncated)?;
        consumed += 1;
        value |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            // A terminating zero group after a continuation byte means the
            // encoding is longer than the minimal form; the encoder never
            // produces it, so accepting it would break byte round trips.
            if byte == 0 && consumed > 1 {
                return Err(VarintFault::Overlong);
            }
            break;
        }
        shift += 7;
        if shift >= 35 {
            return Err(VarintFault::Overflow);
        }
    }

    u32::try_from(value)
        .map(|v| (v, consumed))
        .map_err(|_| VarintFault::Overflow)
}

/// Decodes a zigzag LEB128 i32 from the front of `bytes`.
pub fn decode_varint32(bytes: &[u8]) -> Result<(i32, usize), VarintFault> {
    let (zigzag, consumed) = decode_varuint32(bytes)?;
    let value = ((zigzag >> 1) as i32) ^ -((zigzag & 1) as i32);
    Ok((value, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_unsigned(value: u32) -> usize {
        let mut buf = Vec::new();
        encode_varuint32(&mut buf, value);
        let (decoded, consumed) = decode_varuint32(&buf).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, buf.len());
        buf.len()
    }

    #[test]
    fn test_unsigned_boundaries() {
        assert_eq!(roundtrip_unsigned(0), 1);
        assert_eq!(roundtrip_unsigned(0x7f), 1);
        assert_eq!(roundtrip_unsigned(0x80), 2);
        assert_eq!(roundtrip_unsigned(0x3fff), 2);
        assert_eq!(roundtrip_unsigned(0x4000), 3);
        assert_eq!(roundtrip_unsigned(u32::MAX), 5);
    }

    #[test]
    fn test_signed_zigzag() {
        for value in [0i32, 1, -1, 63, -64, i32::MAX, i32::MIN] {
            let mut buf = Vec::new();
            encode_varint32(&mut buf, value);
            let (decoded, consumed) = decode_varint32(&buf).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, buf.len());
        }
    }

    #[test]
    fn test_small_negatives_stay_small() {
        let mut buf = Vec::new();
        encode_varint32(&mut buf, -1);
        assert_eq!(buf, [0x01]);
    }

    #[test]
    fn test_truncated_rejected() {
        assert_eq!(decode_varuint32(&[]), Err(VarintFault::Truncated));
        assert_eq!(decode_varuint32(&[0x80]), Err(VarintFault::Truncated));
        assert_eq!(decode_varuint32(&[0xff, 0xff]), Err(VarintFault::Truncated));
    }

    #[test]
    fn test_overlong_rejected() {
        // 0 and 1 padded with a redundant continuation byte
        assert_eq!(decode_varuint32(&[0x80, 0x00]), Err(VarintFault::Overlong));
        assert_eq!(decode_varuint32(&[0x81, 0x00]), Err(VarintFault::Overlong));
        assert_eq!(
            decode_varuint32(&[0x80, 0x80, 0x00]),
            Err(VarintFault::Overlong)
        );
        // minimal single-zero-byte form stays valid
        assert_eq!(decode_varuint32(&[0x00]), Ok((0, 1)));
    }

    #[test]
    fn test_overflow_rejected() {
        // six continuation bytes
        assert_eq!(
            decode_varuint32(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]),
            Err(VarintFault::Overflow)
        );
        // fifth byte carries bits beyond 2^32
        assert_eq!(
            decode_varuint32(&[0xff, 0xff, 0xff, 0xff, 0x1f]),
            Err(VarintFault::Overflow)
        );
    }
}
