use crate::error::EncodeError;
use crate::grammar::Datum;
use crate::word::to_word;

/// Packs characters two per word, high byte first. An odd count leaves the
/// low byte of the last word zero.
pub fn pack_string(s: &str) -> Result<Vec<u16>, EncodeError> {
    let bytes = s
        .chars()
        .map(|c| u8::try_from(c as u32).map_err(|_| EncodeError::CharOutOfRange(c)))
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(bytes
        .chunks(2)
        .map(|pair| {
            let hi = pair[0] as u16;
            let lo = pair.get(1).copied().unwrap_or(0) as u16;
            (hi << 8) | lo
        })
        .collect())
}

pub fn expand(items: &[Datum]) -> Result<Vec<u16>, EncodeError> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Datum::Number(n) => out.push(to_word(*n)?),
            Datum::Str(s) => out.extend(pack_string(s)?),
        }
    }
    Ok(out)
}
