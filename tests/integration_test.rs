//! Integration tests for photocat
//!
//! These tests write real image files into temporary directories and run the
//! complete import, grouping, search, export and clipboard workflows.

use chrono::{TimeZone, Utc};
use image::{ImageFormat, Rgb, RgbImage};
use photocat::catalog::{Catalog, RecordEdit};
use photocat::classify::{Classifier, GroupMode};
use photocat::clipboard::{self, ClipboardFormat};
use photocat::export::ExportDocument;
use photocat::metadata::{MetadataNormalizer, Zone};
use photocat::record::Dimensions;
use photocat::search::{SearchFilter, search_active};
use photocat::source::{FileSource, LocalFileSource, ScanLayout, grouping_key};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to write a solid-colour PNG
fn write_png(dir: &Path, relative: &str, w: u32, h: u32) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(w, h, Rgb([40, 90, 160])).save(&path).unwrap();
}

/// One IPTC application-record dataset
fn iptc_dataset(dataset: u8, value: &str) -> Vec<u8> {
    let mut out = vec![0x1C, 2, dataset];
    out.extend_from_slice(&u16::try_from(value.len()).unwrap().to_be_bytes());
    out.extend_from_slice(value.as_bytes());
    out
}

/// Helper function to write a JPEG with an IPTC caption and keywords
///
/// The APP13 segment goes right after SOI, the way photo tools write it.
fn write_jpeg_with_iptc(dir: &Path, name: &str, caption: &str, keywords: &[&str]) {
    let mut encoded = Vec::new();
    RgbImage::from_pixel(48, 32, Rgb([120, 120, 120]))
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .unwrap();

    let mut iim = Vec::new();
    for keyword in keywords {
        iim.extend(iptc_dataset(25, keyword));
    }
    iim.extend(iptc_dataset(120, caption));

    let mut payload = b"Photoshop 3.0\0".to_vec();
    payload.extend_from_slice(b"8BIM");
    payload.extend_from_slice(&0x0404u16.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&u32::try_from(iim.len()).unwrap().to_be_bytes());
    payload.extend_from_slice(&iim);
    if iim.len() % 2 == 1 {
        payload.push(0);
    }

    let mut jpeg = encoded[..2].to_vec();
    jpeg.extend_from_slice(&[0xFF, 0xED]);
    jpeg.extend_from_slice(&u16::try_from(payload.len() + 2).unwrap().to_be_bytes());
    jpeg.extend(payload);
    jpeg.extend_from_slice(&encoded[2..]);
    fs::write(dir.join(name), jpeg).unwrap();
}

/// Helper function to build a photo tree
///
/// ```text
/// root/
///   20200102_gate.png     64x48
///   crane.png             32x32
///   broken.jpg            not an image
///   notes.txt             ignored
///   north/IMG_0001.png    128x96
/// ```
fn setup_photos() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_png(root, "20200102_gate.png", 64, 48);
    write_png(root, "crane.png", 32, 32);
    write_png(root, "north/IMG_0001.png", 128, 96);
    fs::write(root.join("broken.jpg"), b"not really a jpeg").unwrap();
    fs::write(root.join("notes.txt"), b"site notes").unwrap();
    temp
}

fn import(root: &Path, layout: ScanLayout) -> Catalog {
    let normalizer = MetadataNormalizer::new(LocalFileSource::default()).with_zone(Zone::utc());
    let entries = normalizer.source().scan_children(root, layout).unwrap();
    let mut catalog = Catalog::new();
    catalog.import(&normalizer, entries, 2, |_, _| {}).unwrap();
    catalog
}

fn record_dims(catalog: &Catalog, name: &str) -> Dimensions {
    catalog.records().iter().find(|r| r.name == name).unwrap().dims
}

#[test]
fn test_import_decodes_dimensions_and_skips_other_files() {
    let temp = setup_photos();
    let catalog = import(temp.path(), ScanLayout::Flat);

    let mut names: Vec<_> = catalog.records().iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["20200102_gate.png", "IMG_0001.png", "broken.jpg", "crane.png"]);

    assert_eq!(record_dims(&catalog, "20200102_gate.png"), Dimensions { w: 64, h: 48 });
    assert_eq!(record_dims(&catalog, "IMG_0001.png"), Dimensions { w: 128, h: 96 });
    assert_eq!(record_dims(&catalog, "broken.jpg"), Dimensions::UNRESOLVED);

    for record in catalog.records() {
        assert!(record.thumbnail.starts_with("file://"));
        assert!(record.path.is_absolute());
        assert!(!record.capture_from_metadata);
        assert_eq!(record.capture_date, record.best_date);
    }
}

#[test]
fn test_import_reads_iptc_caption_and_keywords() {
    let temp = TempDir::new().unwrap();
    write_jpeg_with_iptc(temp.path(), "pour.jpg", "north gate pour", &["concrete", "pump", "concrete"]);
    write_png(temp.path(), "crane.png", 32, 32);

    let catalog = import(temp.path(), ScanLayout::Flat);
    let pour = catalog.records().iter().find(|r| r.name == "pour.jpg").unwrap();
    assert_eq!(pour.description, "north gate pour");
    assert_eq!(pour.keywords.as_slice(), ["concrete", "pump"]);
    assert_eq!(pour.dims, Dimensions { w: 48, h: 32 });

    let tags = catalog.groups(&Classifier::new(), GroupMode::Tags);
    assert_eq!(tags.count("pump"), 1);
    assert_eq!(tags.count("concrete"), 1);

    let hits = search_active(catalog.records(), &tags, None, &SearchFilter::query("PUMP"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "pour.jpg");
}

#[test]
fn test_file_name_date_wins_over_mtime() {
    let temp = setup_photos();
    let catalog = import(temp.path(), ScanLayout::Flat);
    let classifier = Classifier::new().with_zone(Zone::utc());

    let gate = catalog.records().iter().find(|r| r.name == "20200102_gate.png").unwrap();
    assert_eq!(gate.best_date, Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap().timestamp_millis());

    let years = catalog.groups(&classifier, GroupMode::Year);
    assert_eq!(years.count("2020"), 1);
    let days = catalog.groups(&classifier, GroupMode::Time);
    assert_eq!(days.count("2020-01-02"), 1);
}

#[test]
fn test_flat_and_nested_folder_groups() {
    let temp = setup_photos();
    let root_key = grouping_key(&temp.path().canonicalize().unwrap());
    let classifier = Classifier::new();

    let flat = import(temp.path(), ScanLayout::Flat);
    let groups = flat.groups(&classifier, GroupMode::Folder);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.count(&root_key), 4);

    let nested = import(temp.path(), ScanLayout::Nested);
    let groups = nested.groups(&classifier, GroupMode::Folder);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.count(&root_key), 3);
    assert_eq!(groups.count(&format!("{root_key}/north")), 1);
}

#[test]
fn test_type_groups_and_search_filters() {
    let temp = setup_photos();
    let catalog = import(temp.path(), ScanLayout::Flat);
    let classifier = Classifier::new();

    let types = catalog.groups(&classifier, GroupMode::Type);
    assert_eq!(types.keys().collect::<Vec<_>>(), ["JPG", "PNG"]);
    assert_eq!(types.count("PNG"), 3);

    let wide = search_active(catalog.records(), &types, Some("PNG"), &SearchFilter::new().min_width(64));
    let mut names: Vec<_> = wide.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["20200102_gate.png", "IMG_0001.png"]);

    let by_name = search_active(catalog.records(), &types, None, &SearchFilter::query("CRANE"));
    assert_eq!(by_name.len(), 1);

    let jpg_any_width = search_active(catalog.records(), &types, None, &SearchFilter::new().format("jpg"));
    assert_eq!(jpg_any_width.len(), 1);
    let jpg_wide = search_active(catalog.records(), &types, None, &SearchFilter::new().format("jpg").min_width(1));
    assert!(jpg_wide.is_empty());
}

#[test]
fn test_user_edits_feed_tag_and_remark_groups() {
    let temp = setup_photos();
    let mut catalog = import(temp.path(), ScanLayout::Flat);
    let classifier = Classifier::new();
    let id = catalog.records().iter().find(|r| r.name == "crane.png").unwrap().id;

    catalog
        .edit(
            id,
            RecordEdit {
                description: Some("  project_Phase2-2024_daily".to_string()),
                keywords: Some(vec!["road cleanup, dust suppression".to_string()]),
            },
        )
        .unwrap();

    let tags = catalog.groups(&classifier, GroupMode::Tags);
    assert_eq!(
        tags.keys().collect::<Vec<_>>(),
        ["dust suppression", "road cleanup", "road cleanup, dust suppression"]
    );

    let remarks = catalog.groups(&classifier, GroupMode::Remark);
    assert_eq!(remarks.keys().collect::<Vec<_>>(), ["2024", "Phase2", "daily", "project"]);

    let hits = search_active(catalog.records(), &tags, None, &SearchFilter::query("dust"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, id);
}

#[test]
fn test_export_document_written_to_disk() {
    let temp = setup_photos();
    let catalog = import(temp.path(), ScanLayout::Flat);
    let groups = catalog.groups(&Classifier::new(), GroupMode::Type);
    let out = temp.path().join("export").join("types.json");

    ExportDocument::new(&groups).save(&out).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["mode"], "type");
    assert_eq!(json["groups"][0]["groupName"], "JPG");
    assert_eq!(json["groups"][0]["files"], serde_json::json!(["broken.jpg"]));
    assert_eq!(json["groups"][1]["count"], 3);
    assert!(json["timestamp"].as_str().unwrap().contains('T'));
}

#[test]
fn test_clipboard_payload_from_catalog_paths() {
    let temp = setup_photos();
    let catalog = import(temp.path(), ScanLayout::Flat);
    let paths: Vec<_> = catalog.records().iter().map(|r| r.path.clone()).collect();

    let payload = clipboard::build(&paths, ClipboardFormat::UriList).unwrap();
    let text = String::from_utf8(payload.bytes).unwrap();
    assert_eq!(text.split("\r\n").count(), paths.len());
    assert!(text.split("\r\n").all(|uri| uri.starts_with("file:///")));

    let file_drop = clipboard::build(&paths, ClipboardFormat::WindowsFileDrop).unwrap();
    assert_eq!(&file_drop.bytes[16..20], &[1, 0, 0, 0]);
    assert!(file_drop.bytes.ends_with(&[0, 0, 0, 0]));
}

#[test]
fn test_reimport_keeps_identity() {
    let temp = setup_photos();
    let normalizer = MetadataNormalizer::new(LocalFileSource::default());
    let mut catalog = Catalog::new();

    let entries = normalizer.source().scan_children(temp.path(), ScanLayout::Flat).unwrap();
    catalog.import(&normalizer, entries, 20, |_, _| {}).unwrap();
    let ids: Vec<_> = catalog.records().iter().map(|r| r.id).collect();

    let entries = normalizer.source().scan_children(temp.path(), ScanLayout::Flat).unwrap();
    let summary = catalog.import(&normalizer, entries, 20, |_, _| {}).unwrap();

    assert_eq!(summary.added, 0);
    assert_eq!(summary.replaced, 4);
    assert_eq!(catalog.records().iter().map(|r| r.id).collect::<Vec<_>>(), ids);
}
