use std::fmt::Write as _;
use std::io::{self, Write};

/// Big-endian load image: two bytes per word, no header.
pub fn to_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

pub fn write_image<W: Write>(out: &mut W, words: &[u16]) -> io::Result<()> {
    out.write_all(&to_bytes(words))
}

/// Eight words per row, each row prefixed with its word address.
pub fn hex_dump(words: &[u16]) -> String {
    let mut s = String::new();
    for (row, chunk) in words.chunks(8).enumerate() {
        let _ = write!(s, "{:04x}:", row * 8);
        for w in chunk {
            let _ = write!(s, " {w:04x}");
        }
        s.push('\n');
    }
    s
}
