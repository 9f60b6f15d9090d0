//! Remark and keyword decoding
//!
//! Text fields in image metadata arrive in several encodings:
//!
//! - **Windows extended fields** (`XPComment`, `XPKeywords`): UTF-16LE byte
//!   buffers padded with NULs.
//! - **Captions and image descriptions**: often raw 8-bit text in a legacy
//!   multi-byte charset, surfaced by the decoder as one char per byte.
//! - **User comments**: byte buffers with an optional 8-byte character-code
//!   designation in front of the payload.
//!
//! The caption heuristic is best-effort: a string whose chars all fit in a
//! byte is re-read as UTF-8, then as GB18030, and kept as-is if both
//! strict decodes fail.

use super::error::DecodeError;
use super::tags::{TagDictionary, TagGroup, TagValue};
use crate::record::Keywords;
use encoding_rs::GB18030;

/// Separators used inside a Windows keyword field
const WINDOWS_KEYWORD_SEPARATORS: [char; 2] = [';', '；'];

/// Resolves canonical remark and keyword strings from a tag dictionary
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDecoder;

impl TagDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve the remark (free-text description) of a file
    ///
    /// Sources are consulted in order and the first non-empty result wins:
    /// Windows comment, press caption, image description, user comment.
    /// A source that fails to decode counts as empty.
    #[must_use]
    pub fn remark(&self, tags: &TagDictionary) -> String {
        let windows_comment = || {
            tags.get(TagGroup::Image, "XPComment")
                .map(|v| decode_windows_string(v, "XPComment"))
        };
        let caption = || {
            tags.first_of(&[(TagGroup::Press, "Caption"), (TagGroup::Press, "Caption/Abstract")])
                .map(|v| decode_caption(v, "Caption"))
        };
        let image_description = || {
            tags.first_of(&[
                (TagGroup::Image, "ImageDescription"),
                (TagGroup::Capture, "ImageDescription"),
            ])
            .map(|v| decode_caption(v, "ImageDescription"))
        };
        let user_comment = || tags.get(TagGroup::Capture, "UserComment").map(decode_user_comment);

        non_empty("XPComment", windows_comment())
            .or_else(|| non_empty("Caption", caption()))
            .or_else(|| non_empty("ImageDescription", image_description()))
            .or_else(|| non_empty("UserComment", user_comment()))
            .unwrap_or_default()
    }

    /// Resolve the keyword set of a file
    ///
    /// Windows keywords (split on `;` or `；`) come first, then press
    /// keywords (scalar or list), de-duplicated in first-seen order.
    #[must_use]
    pub fn keywords(&self, tags: &TagDictionary) -> Keywords {
        let mut keywords = Keywords::new();

        if let Some(value) = tags.get(TagGroup::Image, "XPKeywords") {
            let joined = absorb("XPKeywords", decode_windows_string(value, "XPKeywords"));
            keywords.extend(joined.split(WINDOWS_KEYWORD_SEPARATORS));
        }

        if let Some(value) = tags.get(TagGroup::Press, "Keywords") {
            for item in value.to_list() {
                keywords.insert(absorb("Keywords", decode_caption(item, "Keywords")));
            }
        }

        keywords
    }
}

/// Trimmed text of one remark source, or `None` if absent or blank
fn non_empty(field: &str, decoded: Option<Result<String, DecodeError>>) -> Option<String> {
    let text = absorb(field, decoded?);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Log a per-field decode failure and degrade it to an empty string
fn absorb(field: &str, result: Result<String, DecodeError>) -> String {
    result.unwrap_or_else(|e| {
        log::debug!("decoding {field} failed, treating as empty: {e}");
        String::new()
    })
}

/// Decode a Windows extended string field
///
/// Byte buffers are read as UTF-16LE; a dangling odd byte is ignored.
/// NUL characters are stripped and the result trimmed.
///
/// # Errors
/// Returns `DecodeError::UnsupportedValue` for numeric or date values.
pub fn decode_windows_string(value: &TagValue, field: &'static str) -> Result<String, DecodeError> {
    let text = match value {
        TagValue::Text(s) => s.clone(),
        TagValue::Bytes(bytes) => decode_utf16le(bytes),
        TagValue::List(items) => {
            let bytes: Option<Vec<u8>> = items
                .iter()
                .map(|item| match item {
                    TagValue::Integer(n) => u8::try_from(*n).ok(),
                    _ => None,
                })
                .collect();
            match bytes {
                Some(bytes) => decode_utf16le(&bytes),
                None => {
                    return Err(DecodeError::UnsupportedValue { field, kind: value.kind() });
                }
            }
        }
        other => return Err(DecodeError::UnsupportedValue { field, kind: other.kind() }),
    };
    Ok(strip_nuls(&text).trim().to_string())
}

fn decode_utf16le(bytes: &[u8]) -> String {
    if bytes.len() % 2 != 0 {
        log::debug!("UTF-16 buffer has odd length {}, ignoring last byte", bytes.len());
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Decode a caption-like field that may hold legacy 8-bit text
fn decode_caption(value: &TagValue, field: &'static str) -> Result<String, DecodeError> {
    match value {
        TagValue::Text(s) => Ok(decode_legacy_text(s)),
        TagValue::Bytes(bytes) => Ok(decode_legacy_text(&latin1_string(bytes))),
        TagValue::List(items) => items
            .first()
            .map_or_else(|| Ok(String::new()), |first| decode_caption(first, field)),
        other => Err(DecodeError::UnsupportedValue { field, kind: other.kind() }),
    }
}

/// Re-decode a string that may be raw bytes in a legacy multi-byte charset
///
/// Any char above U+00FF means the string is already proper Unicode and
/// it is returned unchanged. Otherwise each char is taken as one byte and
/// the byte sequence is strictly decoded as UTF-8, then as GB18030; if both
/// fail the input is returned unchanged.
#[must_use]
pub fn decode_legacy_text(text: &str) -> String {
    let bytes: Option<Vec<u8>> = text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect();
    let Some(bytes) = bytes else {
        return text.to_string();
    };

    if let Ok(utf8) = std::str::from_utf8(&bytes) {
        return utf8.to_string();
    }

    GB18030
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .map_or_else(|| text.to_string(), |decoded| decoded.into_owned())
}

/// Decode a comment buffer with an optional character-code designation
///
/// A buffer of at least 8 bytes whose byte 5 is zero carries an 8-byte
/// designation (e.g. `ASCII\0\0\0`) before the payload. The payload is
/// read as UTF-8 with NULs stripped.
#[must_use]
pub fn decode_prefixed_comment(bytes: &[u8]) -> String {
    let offset = if bytes.len() >= 8 && bytes[5] == 0 { 8 } else { 0 };
    strip_nuls(&String::from_utf8_lossy(&bytes[offset..]))
}

fn decode_user_comment(value: &TagValue) -> Result<String, DecodeError> {
    match value {
        TagValue::Bytes(bytes) => Ok(decode_prefixed_comment(bytes)),
        TagValue::Text(s) => Ok(strip_nuls(s)),
        other => Err(DecodeError::UnsupportedValue {
            field: "UserComment",
            kind: other.kind(),
        }),
    }
}

/// One char per byte, the way decoders surface undeclared 8-bit text
#[must_use]
pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn strip_nuls(text: &str) -> String {
    text.chars().filter(|c| *c != '\0').collect()
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod decoder_tests;
