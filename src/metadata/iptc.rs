//! Press caption and keywords from a JPEG's IPTC block
//!
//! The IPTC IIM datasets live in an APP13 segment, wrapped in a Photoshop
//! image resource (id `0x0404`). Only the application-record fields the
//! crate consumes are extracted; everything else is skipped.
//!
//! Values without a declared character set are kept as raw bytes so the
//! caption decoder can apply its legacy-charset heuristic.

use super::tags::{TagDictionary, TagGroup, TagValue};

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP13: u8 = 0xED;
/// Start of scan; no metadata segments follow
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;

const PHOTOSHOP_SIGNATURE: &[u8] = b"Photoshop 3.0\0";
const RESOURCE_SIGNATURE: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

const TAG_MARKER: u8 = 0x1C;
const ENVELOPE_RECORD: u8 = 1;
const APPLICATION_RECORD: u8 = 2;
const CODED_CHARACTER_SET: u8 = 90;
const KEYWORDS: u8 = 25;
const CAPTION: u8 = 120;
/// `ESC % G`, the UTF-8 designation in the coded character set dataset
const UTF8_DESIGNATION: &[u8] = b"\x1B%G";

/// Read the press group from the leading bytes of a JPEG file
///
/// Returns an empty dictionary when the bytes are not a JPEG or carry no
/// IPTC block. A block cut short by a partial read yields whatever
/// datasets were complete.
#[must_use]
pub fn read_press_tags(bytes: &[u8]) -> TagDictionary {
    let mut tags = TagDictionary::new();
    for segment in app13_segments(bytes) {
        let Some(resources) = segment.strip_prefix(PHOTOSHOP_SIGNATURE) else {
            continue;
        };
        if let Some(iim) = find_resource(resources, IPTC_RESOURCE_ID) {
            read_datasets(iim, &mut tags);
        }
    }
    tags
}

/// Payloads of the APP13 segments before the image data
fn app13_segments(bytes: &[u8]) -> Vec<&[u8]> {
    let mut segments = Vec::new();
    if !bytes.starts_with(&SOI) {
        return segments;
    }

    let mut pos = SOI.len();
    while let Some(&[0xFF, marker]) = bytes.get(pos..pos + 2) {
        match marker {
            // Fill byte before the real marker
            0xFF => {
                pos += 1;
                continue;
            }
            SOS | EOI => break,
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        let Some(length) = read_u16(bytes, pos + 2).map(usize::from) else {
            break;
        };
        if length < 2 {
            break;
        }
        let Some(payload) = bytes.get(pos + 4..pos + 2 + length) else {
            break;
        };
        if marker == APP13 {
            segments.push(payload);
        }
        pos += 2 + length;
    }
    segments
}

/// Data of the first Photoshop image resource with the given id
fn find_resource(mut resources: &[u8], id: u16) -> Option<&[u8]> {
    while let Some(rest) = resources.strip_prefix(RESOURCE_SIGNATURE) {
        let resource_id = read_u16(rest, 0)?;

        // Pascal-string name, padded to an even total length
        let name_len = usize::from(*rest.get(2)?);
        let name_total = (1 + name_len).next_multiple_of(2);
        let size_at = 2 + name_total;
        let size = usize::try_from(read_u32(rest, size_at)?).ok()?;
        let data_at = size_at + 4;
        let data = rest.get(data_at..data_at + size)?;

        if resource_id == id {
            return Some(data);
        }
        resources = rest.get(data_at + size.next_multiple_of(2)..)?;
    }
    None
}

/// Insert the caption and keyword datasets into `tags`
fn read_datasets(iim: &[u8], tags: &mut TagDictionary) {
    let mut utf8 = false;
    let mut keywords = Vec::new();
    let mut pos = 0;

    while let Some(&[TAG_MARKER, record, dataset]) = iim.get(pos..pos + 3) {
        let Some(declared) = read_u16(iim, pos + 3) else {
            break;
        };
        pos += 5;

        // Extended dataset: the low bits give the width of the real length
        let length = if declared & 0x8000 == 0 {
            usize::from(declared)
        } else {
            let width = usize::from(declared & 0x7FFF);
            let Some(len) = iim
                .get(pos..pos + width)
                .filter(|b| b.len() <= 4)
                .map(|b| b.iter().fold(0usize, |acc, byte| (acc << 8) | usize::from(*byte)))
            else {
                break;
            };
            pos += width;
            len
        };

        let Some(value) = iim.get(pos..pos + length) else {
            log::debug!("IPTC dataset {record}:{dataset} truncated");
            break;
        };
        pos += length;

        match (record, dataset) {
            (ENVELOPE_RECORD, CODED_CHARACTER_SET) => utf8 = value == UTF8_DESIGNATION,
            (APPLICATION_RECORD, CAPTION) => {
                tags.insert(TagGroup::Press, "Caption/Abstract", text_value(value, utf8));
            }
            (APPLICATION_RECORD, KEYWORDS) => keywords.push(text_value(value, utf8)),
            _ => {}
        }
    }

    if !keywords.is_empty() {
        tags.insert(TagGroup::Press, "Keywords", TagValue::List(keywords));
    }
}

fn text_value(value: &[u8], utf8: bool) -> TagValue {
    let trimmed = value.strip_suffix(&[0]).unwrap_or(value);
    if utf8 {
        TagValue::Text(String::from_utf8_lossy(trimmed).into_owned())
    } else {
        TagValue::Bytes(trimmed.to_vec())
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let pair = bytes.get(at..at + 2)?;
    Some(u16::from_be_bytes([pair[0], pair[1]]))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let quad = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]))
}
