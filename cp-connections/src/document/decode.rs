//! Byte-to-text decoding.
//!
//! Encoding is chosen the way a browser picks it for a document without
//! transport metadata: a byte order mark wins, then a `<meta>` charset
//! declaration near the start, then UTF-8. Malformed sequences become
//! U+FFFD instead of failing the page.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use super::ParseError;

/// Bytes inspected for a charset declaration and for binary content.
const SNIFF_LEN: usize = 1024;

/// Decoded page text.
pub(super) struct Decoded<'a> {
    pub text: Cow<'a, str>,
    pub encoding: &'static Encoding,
}

/// Decode `bytes` to text, stripping any byte order mark.
pub(super) fn decode(bytes: &[u8]) -> Result<Decoded<'_>, ParseError> {
    let header = &bytes[..bytes.len().min(SNIFF_LEN)];

    let declared = match Encoding::for_bom(bytes) {
        Some(_) => None,
        None => {
            reject_binary(header)?;
            prescan(header)
        }
    };

    let (text, encoding, had_errors) = declared.unwrap_or(UTF_8).decode(bytes);
    if had_errors {
        debug!(
            encoding = encoding.name(),
            "Replaced malformed byte sequences"
        );
    }

    Ok(Decoded { text, encoding })
}

/// Control bytes that never appear in text (NUL, most C0 controls).
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

/// Fails when more than one in eight header bytes is a binary byte.
///
/// A stray control byte in an otherwise textual page is left to the HTML
/// parser, which recovers from it.
fn reject_binary(header: &[u8]) -> Result<(), ParseError> {
    let mut control = header
        .iter()
        .enumerate()
        .filter(|&(_, &b)| is_binary_byte(b));

    let Some((offset, _)) = control.next() else {
        return Ok(());
    };

    let count = 1 + control.count();
    if count * 8 > header.len() {
        Err(ParseError::Binary { offset })
    } else {
        Ok(())
    }
}

/// Encoding declared by the first `<meta>` tag carrying a charset.
///
/// Covers both `<meta charset=...>` and the
/// `<meta http-equiv="Content-Type" content="...; charset=...">` form.
fn prescan(header: &[u8]) -> Option<&'static Encoding> {
    let lower = header.to_ascii_lowercase();
    let mut rest = lower.as_slice();

    while let Some(start) = find(rest, b"<meta") {
        let tag = &rest[start + b"<meta".len()..];
        let end = tag.iter().position(|&b| b == b'>').unwrap_or(tag.len());
        if let Some(encoding) = charset_in(&tag[..end]) {
            // UTF-16 declarations in an ASCII-compatible prefix mean UTF-8.
            return Some(encoding.output_encoding());
        }
        rest = &tag[end..];
    }

    None
}

fn charset_in(tag: &[u8]) -> Option<&'static Encoding> {
    let at = find(tag, b"charset")?;
    let value = tag[at + b"charset".len()..]
        .trim_ascii_start()
        .strip_prefix(b"=")?
        .trim_ascii_start();
    let value = value
        .strip_prefix(b"\"")
        .or_else(|| value.strip_prefix(b"'"))
        .unwrap_or(value);
    let end = value
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(value.len());

    Encoding::for_label(&value[..end])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
