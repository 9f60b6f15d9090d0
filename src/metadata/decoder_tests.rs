//! Unit tests for remark and keyword decoding

use super::*;

fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

#[test]
fn test_windows_string_strips_trailing_nuls() {
    let value = TagValue::Bytes(utf16le("工地巡查\0\0"));
    assert_eq!(decode_windows_string(&value, "XPComment").unwrap(), "工地巡查");
}

#[test]
fn test_windows_string_ignores_dangling_byte() {
    let mut bytes = utf16le("ok");
    bytes.push(0x41);
    let value = TagValue::Bytes(bytes);
    assert_eq!(decode_windows_string(&value, "XPComment").unwrap(), "ok");
}

#[test]
fn test_windows_string_accepts_integer_list() {
    let value = TagValue::List(utf16le("hi").into_iter().map(|b| TagValue::Integer(i64::from(b))).collect());
    assert_eq!(decode_windows_string(&value, "XPKeywords").unwrap(), "hi");
}

#[test]
fn test_windows_string_rejects_numbers() {
    let result = decode_windows_string(&TagValue::Integer(3), "XPComment");
    assert!(matches!(result, Err(DecodeError::UnsupportedValue { .. })));
}

#[test]
fn test_legacy_text_ascii_unchanged() {
    assert_eq!(decode_legacy_text("plain caption"), "plain caption");
}

#[test]
fn test_legacy_text_unicode_unchanged() {
    assert_eq!(decode_legacy_text("已经是中文"), "已经是中文");
}

#[test]
fn test_legacy_text_gb18030_bytes() {
    // "中文" in GBK
    let raw = latin1_string(&[0xD6, 0xD0, 0xCE, 0xC4]);
    assert_eq!(decode_legacy_text(&raw), "中文");
}

#[test]
fn test_legacy_text_utf8_bytes() {
    let raw = latin1_string("日本".as_bytes());
    assert_eq!(decode_legacy_text(&raw), "日本");
}

#[test]
fn test_legacy_text_invalid_falls_back() {
    // Lone lead byte is invalid in both UTF-8 and GB18030
    let raw = latin1_string(b"caf\xE9");
    assert_eq!(decode_legacy_text(&raw), "caf\u{e9}");
}

#[test]
fn test_prefixed_comment_with_designation() {
    assert_eq!(decode_prefixed_comment(b"ASCII\0\0\0hello world"), "hello world");
}

#[test]
fn test_prefixed_comment_without_designation() {
    assert_eq!(decode_prefixed_comment(b"hello\0"), "hello");
    assert_eq!(decode_prefixed_comment(b"short"), "short");
}

#[test]
fn test_remark_prefers_windows_comment() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "XPComment", utf16le("from windows"))
        .with(TagGroup::Press, "Caption", "from caption")
        .with(TagGroup::Image, "ImageDescription", "from description");
    assert_eq!(TagDecoder::new().remark(&tags), "from windows");
}

#[test]
fn test_remark_falls_through_empty_sources() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "XPComment", utf16le("\0\0"))
        .with(TagGroup::Press, "Caption", "   ")
        .with(TagGroup::Capture, "ImageDescription", "from description");
    assert_eq!(TagDecoder::new().remark(&tags), "from description");
}

#[test]
fn test_remark_caption_beats_image_description() {
    let tags = TagDictionary::new()
        .with(TagGroup::Press, "Caption/Abstract", "from caption")
        .with(TagGroup::Image, "ImageDescription", "from description")
        .with(TagGroup::Capture, "UserComment", b"ASCII\0\0\0from comment".to_vec());
    assert_eq!(TagDecoder::new().remark(&tags), "from caption");
}

#[test]
fn test_remark_image_description_beats_user_comment() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "ImageDescription", "from description")
        .with(TagGroup::Capture, "UserComment", b"ASCII\0\0\0from comment".to_vec());
    assert_eq!(TagDecoder::new().remark(&tags), "from description");
}

#[test]
fn test_remark_failed_source_does_not_abort() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "XPComment", 42_i64)
        .with(TagGroup::Capture, "UserComment", b"ASCII\0\0\0dust control".to_vec());
    assert_eq!(TagDecoder::new().remark(&tags), "dust control");
}

#[test]
fn test_remark_caption_abstract_alias() {
    let tags = TagDictionary::new().with(TagGroup::Press, "Caption/Abstract", "abstract");
    assert_eq!(TagDecoder::new().remark(&tags), "abstract");
}

#[test]
fn test_remark_missing_everywhere() {
    assert_eq!(TagDecoder::new().remark(&TagDictionary::new()), "");
}

#[test]
fn test_keywords_union_in_first_seen_order() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "XPKeywords", utf16le("road; dust；road\0"))
        .with(
            TagGroup::Press,
            "Keywords",
            TagValue::List(vec!["dust".into(), "crane".into(), "  ".into()]),
        );
    let keywords = TagDecoder::new().keywords(&tags);
    assert_eq!(keywords.as_slice(), ["road", "dust", "crane"]);
}

#[test]
fn test_keywords_scalar_press_value() {
    let tags = TagDictionary::new().with(TagGroup::Press, "Keywords", "single");
    assert_eq!(TagDecoder::new().keywords(&tags).as_slice(), ["single"]);
}

#[test]
fn test_keywords_bad_windows_field_keeps_press_keywords() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "XPKeywords", 1.5_f64)
        .with(TagGroup::Press, "Keywords", "kept");
    assert_eq!(TagDecoder::new().keywords(&tags).as_slice(), ["kept"]);
}
