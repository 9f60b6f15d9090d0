//! Unit tests for timestamp resolution

use super::*;

fn utc_resolver() -> DateResolver {
    DateResolver::new(Zone::utc())
}

fn millis(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, hh, mm, ss).unwrap().timestamp_millis()
}

#[test]
fn test_file_name_date_compact() {
    let resolver = utc_resolver();
    assert_eq!(
        resolver.date_from_file_name("IMG_20230415_101010.jpg"),
        Some(millis(2023, 4, 15, 0, 0, 0))
    );
}

#[test]
fn test_file_name_date_separators() {
    let resolver = utc_resolver();
    let expected = Some(millis(2021, 12, 3, 0, 0, 0));
    assert_eq!(resolver.date_from_file_name("2021-12-03 site.png"), expected);
    assert_eq!(resolver.date_from_file_name("scan_2021_12_03.tif"), expected);
}

#[test]
fn test_file_name_date_rejects_bad_month_and_day() {
    let resolver = utc_resolver();
    assert_eq!(resolver.date_from_file_name("20231301.jpg"), None);
    assert_eq!(resolver.date_from_file_name("20230132.jpg"), None);
    assert_eq!(resolver.date_from_file_name("20230230.jpg"), None);
}

#[test]
fn test_file_name_without_date() {
    assert_eq!(utc_resolver().date_from_file_name("holiday.jpg"), None);
    assert_eq!(utc_resolver().date_from_file_name("19991231.jpg"), None);
}

#[test]
fn test_parse_exif_datetime_variants() {
    let full = parse_exif_datetime("2022:06:01 08:30:15").unwrap();
    assert_eq!(full.to_string(), "2022-06-01 08:30:15");

    let date_only = parse_exif_datetime("2022:06:01").unwrap();
    assert_eq!(date_only.to_string(), "2022-06-01 00:00:00");

    assert!(parse_exif_datetime("0000:00:00 00:00:00").is_err());
    assert!(parse_exif_datetime("").is_err());
    assert!(parse_exif_datetime("yesterday").is_err());
}

#[test]
fn test_capture_date_from_tags() {
    let tags = TagDictionary::new().with(TagGroup::Capture, "DateTimeOriginal", "2020:01:02 03:04:05");
    assert_eq!(utc_resolver().capture_date(&tags), Some(millis(2020, 1, 2, 3, 4, 5)));
}

#[test]
fn test_capture_date_prefers_original_over_modify_time() {
    let tags = TagDictionary::new()
        .with(TagGroup::Image, "DateTime", "2024:01:01 00:00:00")
        .with(TagGroup::Capture, "DateTimeOriginal", "2020:01:01 00:00:00");
    assert_eq!(utc_resolver().capture_date(&tags), Some(millis(2020, 1, 1, 0, 0, 0)));
}

#[test]
fn test_capture_date_invalid_is_discarded() {
    let tags = TagDictionary::new().with(TagGroup::Capture, "DateTimeOriginal", "not a date");
    assert_eq!(utc_resolver().capture_date(&tags), None);
}

#[test]
fn test_resolve_picks_minimum() {
    let resolved = utc_resolver().resolve(&DateCandidates {
        file_name: "IMG_20190101.jpg",
        last_modified: Some(millis(2023, 5, 5, 0, 0, 0)),
        capture: Some(millis(2019, 6, 1, 12, 0, 0)),
        birthtime: Some(millis(2023, 5, 4, 0, 0, 0)),
    });
    assert_eq!(resolved.best, millis(2019, 1, 1, 0, 0, 0));
    assert_eq!(resolved.capture, millis(2019, 6, 1, 12, 0, 0));
    assert!(resolved.capture_from_metadata);
}

#[test]
fn test_resolve_capture_defaults_to_best() {
    let resolved = utc_resolver().resolve(&DateCandidates {
        file_name: "photo.jpg",
        last_modified: Some(millis(2023, 5, 5, 0, 0, 0)),
        capture: None,
        birthtime: Some(millis(2022, 1, 1, 0, 0, 0)),
    });
    assert_eq!(resolved.best, millis(2022, 1, 1, 0, 0, 0));
    assert_eq!(resolved.capture, resolved.best);
    assert!(!resolved.capture_from_metadata);
}

#[test]
fn test_resolve_without_candidates_uses_now() {
    let before = Utc::now().timestamp_millis();
    let resolved = utc_resolver().resolve(&DateCandidates {
        file_name: "photo.jpg",
        last_modified: Some(0),
        ..DateCandidates::default()
    });
    let after = Utc::now().timestamp_millis();

    assert!(resolved.best >= before && resolved.best <= after);
    assert_eq!(resolved.capture, resolved.best);
}

#[test]
fn test_zone_local_date() {
    let zone = Zone::Fixed(FixedOffset::east_opt(8 * 3600).unwrap());
    // 20:00 UTC is already the next day at +08:00
    let instant = millis(2023, 3, 1, 20, 0, 0);
    assert_eq!(zone.local_date(instant).unwrap().to_string(), "2023-03-02");
    assert_eq!(Zone::utc().local_date(instant).unwrap().to_string(), "2023-03-01");
}
