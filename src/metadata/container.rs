//! Bridge from the metadata container readers to a [`TagDictionary`]
//!
//! Only the primary image's EXIF fields are kept, under the names the rest
//! of the crate asks for. Press fields come from the JPEG IPTC block.

use super::decoder::latin1_string;
use super::error::DecodeError;
use super::iptc;
use super::tags::{TagDictionary, TagGroup, TagValue};
use ::exif::{Context, Field, In, Reader, Value};
use std::io::Cursor;

/// Parse the metadata container at the start of an image file
///
/// # Errors
/// Returns `DecodeError::Container` if the bytes hold neither readable
/// EXIF nor an IPTC block (unsupported format, truncated or corrupt
/// container).
pub fn read_tag_dictionary(bytes: &[u8]) -> Result<TagDictionary, DecodeError> {
    let press = iptc::read_press_tags(bytes);
    let mut tags = match read_exif(bytes) {
        Ok(tags) => tags,
        Err(e) if !press.is_empty() => {
            log::debug!("no EXIF alongside IPTC block: {e}");
            TagDictionary::new()
        }
        Err(e) => return Err(e),
    };
    tags.merge(press);
    Ok(tags)
}

fn read_exif(bytes: &[u8]) -> Result<TagDictionary, DecodeError> {
    let exif = Reader::new().read_from_container(&mut Cursor::new(bytes))?;

    let mut tags = TagDictionary::new();
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        let Some((group, name)) = tag_name(field) else {
            continue;
        };
        if let Some(value) = convert_value(&field.value) {
            tags.insert(group, name, value);
        }
    }
    Ok(tags)
}

fn tag_name(field: &Field) -> Option<(TagGroup, &'static str)> {
    let named = match (field.tag.context(), field.tag.number()) {
        (Context::Tiff, 0x0100) => (TagGroup::Image, "ImageWidth"),
        (Context::Tiff, 0x0101) => (TagGroup::Image, "ImageHeight"),
        (Context::Tiff, 0x010E) => (TagGroup::Image, "ImageDescription"),
        (Context::Tiff, 0x010F) => (TagGroup::Image, "Make"),
        (Context::Tiff, 0x0110) => (TagGroup::Image, "Model"),
        (Context::Tiff, 0x0132) => (TagGroup::Image, "DateTime"),
        (Context::Tiff, 0x9C9C) => (TagGroup::Image, "XPComment"),
        (Context::Tiff, 0x9C9E) => (TagGroup::Image, "XPKeywords"),
        (Context::Exif, 0x829D) => (TagGroup::Capture, "FNumber"),
        (Context::Exif, 0x9003) => (TagGroup::Capture, "DateTimeOriginal"),
        (Context::Exif, 0x9286) => (TagGroup::Capture, "UserComment"),
        (Context::Exif, 0xA002) => (TagGroup::Capture, "ExifImageWidth"),
        (Context::Exif, 0xA003) => (TagGroup::Capture, "ExifImageHeight"),
        _ => return None,
    };
    Some(named)
}

fn convert_value(value: &Value) -> Option<TagValue> {
    match value {
        Value::Ascii(parts) => parts.first().map(|bytes| TagValue::Text(latin1_string(bytes))),
        Value::Byte(bytes) | Value::Undefined(bytes, _) => Some(TagValue::Bytes(bytes.clone())),
        Value::Short(v) => v.first().map(|n| TagValue::Integer(i64::from(*n))),
        Value::Long(v) => v.first().map(|n| TagValue::Integer(i64::from(*n))),
        Value::Rational(v) => v.first().map(|r| TagValue::Float(r.to_f64())),
        Value::Float(v) => v.first().map(|f| TagValue::Float(f64::from(*f))),
        Value::Double(v) => v.first().map(|f| TagValue::Float(*f)),
        _ => None,
    }
}
