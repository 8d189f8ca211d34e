//! Text decoding for input documents.
//!
//! Inputs are read once into memory and decoded with this order of preference:
//! - a byte-order mark (UTF-8, UTF-16 LE/BE) when present
//! - strict UTF-8
//! - the encoding guessed by chardetng, with replacement characters for
//!   anything that still fails to decode

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

const BINARY_SAMPLE_SIZE: usize = 8192;

/// Read and decode a text file.
///
/// Returns the decoded content and the lowercase name of the encoding used.
pub fn read_text_file(path: &Path) -> Result<(String, String)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes to a `String`, see the module docs for the strategy.
pub fn decode_bytes(bytes: &[u8]) -> (String, String) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (decoded.into_owned(), encoding.name().to_lowercase());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8".to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("decoding with {} replaced invalid sequences", used.name());
    }

    if used == UTF_8 {
        (decoded.into_owned(), "utf-8".to_string())
    } else {
        (decoded.into_owned(), used.name().to_lowercase())
    }
}

/// Heuristic binary check on the leading bytes of a file.
///
/// A null byte, or fewer than 70% printable ASCII bytes, marks the sample as
/// binary. Files that start with a UTF-16 BOM are text even though they
/// contain null bytes.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(BINARY_SAMPLE_SIZE)];
    if sample.is_empty() || Encoding::for_bom(sample).is_some() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => return false,
        // A multi-byte character cut off by the sample boundary.
        Err(err) if err.error_len().is_none() => return false,
        Err(_) => {}
    }

    let printable = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || b == b'\t' || b == b'\n' || b == b'\r')
        .count();
    (printable as f64 / sample.len() as f64) < 0.70
}

/// Check a file on disk with [`looks_binary`]. Unreadable files count as binary.
pub fn is_binary_file(path: &Path) -> bool {
    use std::io::Read;

    let mut sample = Vec::with_capacity(BINARY_SAMPLE_SIZE);
    match std::fs::File::open(path) {
        Ok(file) => match file.take(BINARY_SAMPLE_SIZE as u64).read_to_end(&mut sample) {
            Ok(_) => looks_binary(&sample),
            Err(_) => true,
        },
        Err(_) => true,
    }
}
