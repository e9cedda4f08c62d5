//! Base-32 encoding (RFC 4648 alphabet, lowercase, no padding).
//!
//! Session tokens are rendered with this encoding so they are safe to drop
//! into a cookie or URL without escaping.

const ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Encode `data` as lowercase base-32 without `=` padding.
///
/// Output length is `ceil(len * 8 / 5)`; 20 input bytes give exactly 32
/// characters.
pub fn base32_lower_no_pad(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits: u8 = 0;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            let index = ((buffer >> bits) & 0x1f) as usize;
            out.push(ALPHABET[index] as char);
        }
        // Only the low `bits` bits are still pending.
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        let index = ((buffer << (5 - bits)) & 0x1f) as usize;
        out.push(ALPHABET[index] as char);
    }

    out
}
