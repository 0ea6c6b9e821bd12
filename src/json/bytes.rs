//! Stateless byte and UTF-8 helpers shared by the parser and serializer.
//!
//! Everything here works on raw `u8` values so the parser never has to
//! build a `str` before it has validated the bytes itself.

/// Decode one ASCII hex digit (`0-9`, `a-f`, `A-F`) into its nibble value.
pub fn hex_decode(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Uppercase ASCII hex digit for the high nibble of `byte`.
pub fn hex_encode_high(byte: u8) -> u8 {
    nibble_to_hex(byte >> 4)
}

/// Uppercase ASCII hex digit for the low nibble of `byte`.
pub fn hex_encode_low(byte: u8) -> u8 {
    nibble_to_hex(byte & 0x0F)
}

fn nibble_to_hex(nibble: u8) -> u8 {
    if nibble < 10 {
        b'0' + nibble
    } else {
        b'A' + nibble - 10
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or 0 if `lead` is a
/// continuation byte or not a valid lead byte.
pub fn utf8_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        0
    }
}

/// Validate a complete UTF-8 sequence (lead byte included).
///
/// Rejects malformed continuation bytes, overlong encodings, surrogate
/// code points (U+D800..=U+DFFF) and anything above U+10FFFF.
pub fn utf8_validate(seq: &[u8]) -> bool {
    if seq.is_empty() || seq[1..].iter().any(|&b| b & 0xC0 != 0x80) {
        return false;
    }
    match *seq {
        [b0] => b0 & 0x80 == 0,
        [b0, b1] => {
            let code = (u32::from(b0 & 0x1F) << 6) | u32::from(b1 & 0x3F);
            code >= 0x80
        }
        [b0, b1, b2] => {
            let code = (u32::from(b0 & 0x0F) << 12)
                | (u32::from(b1 & 0x3F) << 6)
                | u32::from(b2 & 0x3F);
            (0x800..0xD800).contains(&code) || (0xE000..=0xFFFF).contains(&code)
        }
        [b0, b1, b2, b3] => {
            let code = (u32::from(b0 & 0x07) << 18)
                | (u32::from(b1 & 0x3F) << 12)
                | (u32::from(b2 & 0x3F) << 6)
                | u32::from(b3 & 0x3F);
            (0x1_0000..=0x10_FFFF).contains(&code)
        }
        _ => false,
    }
}

/// Append `code` to `buf` in UTF-8.
///
/// Surrogate code points and values above U+10FFFF are dropped: they have
/// no UTF-8 encoding and must never reach the output.
pub fn push_code_point(buf: &mut Vec<u8>, code: u32) {
    // Truncating casts below are intentional: each operand is masked to fit.
    if code <= 0x7F {
        buf.push(code as u8);
    } else if code <= 0x7FF {
        buf.push(0xC0 | (code >> 6) as u8);
        buf.push(0x80 | (code & 0x3F) as u8);
    } else if code <= 0xFFFF {
        if !(0xD800..=0xDFFF).contains(&code) {
            buf.push(0xE0 | (code >> 12) as u8);
            buf.push(0x80 | ((code >> 6) & 0x3F) as u8);
            buf.push(0x80 | (code & 0x3F) as u8);
        }
    } else if code <= 0x10_FFFF {
        buf.push(0xF0 | (code >> 18) as u8);
        buf.push(0x80 | ((code >> 12) & 0x3F) as u8);
        buf.push(0x80 | ((code >> 6) & 0x3F) as u8);
        buf.push(0x80 | (code & 0x3F) as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_decode() {
        assert_eq!(hex_decode(b'0'), Some(0));
        assert_eq!(hex_decode(b'9'), Some(9));
        assert_eq!(hex_decode(b'a'), Some(10));
        assert_eq!(hex_decode(b'F'), Some(15));
        assert_eq!(hex_decode(b'g'), None);
        assert_eq!(hex_decode(b' '), None);
    }

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex_encode_high(0x1B), b'1');
        assert_eq!(hex_encode_low(0x1B), b'B');
        assert_eq!(hex_encode_high(0xF0), b'F');
        assert_eq!(hex_encode_low(0x00), b'0');
    }

    #[test]
    fn test_utf8_len() {
        assert_eq!(utf8_len(b'a'), 1);
        assert_eq!(utf8_len(0xC3), 2);
        assert_eq!(utf8_len(0xE2), 3);
        assert_eq!(utf8_len(0xF0), 4);
        assert_eq!(utf8_len(0x80), 0);
        assert_eq!(utf8_len(0xF8), 0);
    }

    #[test]
    fn test_utf8_validate_accepts_well_formed() {
        for s in ["a", "é", "€", "𝄞", "\u{10FFFF}", "\u{E000}"] {
            assert!(utf8_validate(s.as_bytes()), "{s:?}");
        }
    }

    #[test]
    fn test_utf8_validate_rejects_overlong() {
        // '/' as C0 AF
        assert!(!utf8_validate(&[0xC0, 0xAF]));
        // U+007F as E0 81 BF
        assert!(!utf8_validate(&[0xE0, 0x81, 0xBF]));
        // U+FFFF as F0 8F BF BF
        assert!(!utf8_validate(&[0xF0, 0x8F, 0xBF, 0xBF]));
    }

    #[test]
    fn test_utf8_validate_rejects_surrogates_and_bad_continuations() {
        // U+D800 as ED A0 80
        assert!(!utf8_validate(&[0xED, 0xA0, 0x80]));
        assert!(!utf8_validate(&[0xC0, 0x00]));
        assert!(!utf8_validate(&[0xC3, 0x41]));
        // above U+10FFFF
        assert!(!utf8_validate(&[0xF4, 0x90, 0x80, 0x80]));
        assert!(!utf8_validate(&[]));
    }

    #[test]
    fn test_push_code_point() {
        for ch in ['\0', 'A', 'é', '€', '𝄞', '\u{10FFFF}'] {
            let mut buf = Vec::new();
            push_code_point(&mut buf, ch as u32);
            assert_eq!(buf, ch.to_string().as_bytes());
        }
    }

    #[test]
    fn test_push_code_point_drops_unencodable() {
        let mut buf = Vec::new();
        push_code_point(&mut buf, 0xD834);
        push_code_point(&mut buf, 0x11_0000);
        assert!(buf.is_empty());
    }
}
