//! Encoding and decoding of the JVM's modified UTF-8.
//!
//! Differences from standard UTF-8: NUL is written as `C0 80`, and
//! supplementary characters are written as a surrogate pair, each half as its
//! own three-byte sequence. Malformed input decodes to U+FFFD instead of
//! failing; the import heuristics reject such strings anyway.

const REPLACEMENT: char = '\u{FFFD}';

pub fn decode(bytes: &[u8]) -> String {
    // Most constants are plain ASCII or already valid UTF-8 without NUL
    // or surrogate encodings.
    if !bytes.iter().any(|&b| b == 0xC0 || b == 0xED || b == 0) {
        if let Ok(s) = std::str::from_utf8(bytes) {
            return s.to_string();
        }
    }

    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            0x01..=0x7F => {
                out.push(b as char);
                i += 1;
            }
            0xC0..=0xDF => match continuation(bytes, i + 1) {
                Some(c1) => {
                    let cp = ((b as u32 & 0x1F) << 6) | c1;
                    out.push(char::from_u32(cp).unwrap_or(REPLACEMENT));
                    i += 2;
                }
                None => {
                    out.push(REPLACEMENT);
                    i += 1;
                }
            },
            0xE0..=0xEF => match three_byte(bytes, i) {
                Some(high @ 0xD800..=0xDBFF) => {
                    match three_byte(bytes, i + 3) {
                        Some(low @ 0xDC00..=0xDFFF) => {
                            let cp = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(cp).unwrap_or(REPLACEMENT));
                            i += 6;
                        }
                        _ => {
                            out.push(REPLACEMENT);
                            i += 3;
                        }
                    }
                }
                Some(cp) => {
                    out.push(char::from_u32(cp).unwrap_or(REPLACEMENT));
                    i += 3;
                }
                None => {
                    out.push(REPLACEMENT);
                    i += 1;
                }
            },
            _ => {
                out.push(REPLACEMENT);
                i += 1;
            }
        }
    }
    out
}

pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c as u32 {
            0 => out.extend_from_slice(&[0xC0, 0x80]),
            0x01..=0x7F => out.push(c as u8),
            0x80..=0xFFFF => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let u = *unit as u32;
                    out.push(0xE0 | (u >> 12) as u8);
                    out.push(0x80 | ((u >> 6) & 0x3F) as u8);
                    out.push(0x80 | (u & 0x3F) as u8);
                }
            }
        }
    }
    out
}

fn continuation(bytes: &[u8], at: usize) -> Option<u32> {
    match bytes.get(at) {
        Some(&c) if c & 0xC0 == 0x80 => Some(c as u32 & 0x3F),
        _ => None,
    }
}

fn three_byte(bytes: &[u8], at: usize) -> Option<u32> {
    let lead = *bytes.get(at)?;
    if lead & 0xF0 != 0xE0 {
        return None;
    }
    let c1 = continuation(bytes, at + 1)?;
    let c2 = continuation(bytes, at + 2)?;
    Some(((lead as u32 & 0x0F) << 12) | (c1 << 6) | c2)
}
