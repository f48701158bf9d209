//! IFC GUID codec
//!
//! IFC stores its 128-bit GUIDs as 22 characters over a 64-symbol alphabet.
//! The first character carries the top 2 bits, each following character 6
//! bits. [`decompress`] turns that compact form into the canonical
//! `8-4-4-4-12` lowercase hex text used in output URIs.

use uuid::Uuid;

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

const COMPACT_LEN: usize = 22;

/// Offsets of the `-` separators in `8-4-4-4-12` text
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuidError {
    #[error("compact GUID must be 22 characters, got {0}")]
    Length(usize),

    #[error("invalid character {0:?} in compact GUID")]
    InvalidChar(char),

    /// First character above `3` would overflow 128 bits
    #[error("compact GUID out of range (first character {0:?})")]
    OutOfRange(char),

    #[error("malformed canonical GUID {0:?}")]
    Canonical(String),
}

fn symbol_index(c: char) -> Result<u128, GuidError> {
    ALPHABET
        .iter()
        .position(|&b| b as char == c)
        .map(|i| i as u128)
        .ok_or(GuidError::InvalidChar(c))
}

/// Decode a compact IFC GUID into canonical UUID text.
///
/// ```
/// assert_eq!(
///     lbd_convert::guid::decompress("2O2Fr$t4X7Zf8NOew3FLOH").unwrap(),
///     "9808fd7f-dc48-478e-9217-628e833d5611"
/// );
/// ```
pub fn decompress(compact: &str) -> Result<String, GuidError> {
    let len = compact.chars().count();
    if len != COMPACT_LEN {
        return Err(GuidError::Length(len));
    }

    let mut value: u128 = 0;
    for (i, c) in compact.chars().enumerate() {
        let index = symbol_index(c)?;
        if i == 0 && index > 3 {
            return Err(GuidError::OutOfRange(c));
        }
        value = (value << 6) | index;
    }

    Ok(Uuid::from_u128(value).hyphenated().to_string())
}

/// Encode canonical UUID text into a compact IFC GUID.
///
/// Only the hyphenated `8-4-4-4-12` form is accepted.
pub fn compress(canonical: &str) -> Result<String, GuidError> {
    let malformed = || GuidError::Canonical(canonical.to_string());
    let bytes = canonical.as_bytes();
    if bytes.len() != 36 || HYPHENS.iter().any(|&i| bytes[i] != b'-') {
        return Err(malformed());
    }
    let mut value = Uuid::try_parse(canonical)
        .map_err(|_| malformed())?
        .as_u128();

    let mut out = [0u8; COMPACT_LEN];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x3f) as usize];
        value >>= 6;
    }
    Ok(out.iter().map(|&b| b as char).collect())
}

/// True if `compact` decodes
pub fn is_valid(compact: &str) -> bool {
    decompress(compact).is_ok()
}
