//! Metadata normalization
//!
//! Turns one [`ScanEntry`] plus whatever metadata its bytes carry into a
//! canonical [`FileRecord`]. A file whose metadata cannot be read is still
//! emitted, with empty metadata fields, so it stays visible to the user.
//!
//! - [`tags`]: schema for the decoder's loosely typed output
//! - [`decoder`]: remark/keyword text decoding
//! - [`dates`]: `best_date` / `capture_date` resolution
//! - [`container`]: reads the EXIF container into a tag dictionary
//! - [`iptc`]: press caption and keywords from a JPEG's IPTC block

pub mod container;
pub mod dates;
pub mod decoder;
pub mod error;
pub mod iptc;
pub mod tags;

pub use dates::{DateCandidates, DateResolver, ResolvedDates, Zone};
pub use decoder::TagDecoder;
pub use error::DecodeError;
pub use tags::{TagDictionary, TagGroup, TagValue};

use crate::record::{CameraInfo, Dimensions, FileRecord, RecordId, ScanEntry, extension_of};
use crate::source::FileSource;
use rayon::prelude::*;

/// Width tags, in precedence order
const WIDTH_TAGS: [(TagGroup, &str); 2] = [
    (TagGroup::Capture, "ExifImageWidth"),
    (TagGroup::Image, "ImageWidth"),
];

/// Height tags, in precedence order
const HEIGHT_TAGS: [(TagGroup, &str); 2] = [
    (TagGroup::Capture, "ExifImageHeight"),
    (TagGroup::Image, "ImageHeight"),
];

/// Default number of leading bytes read for metadata extraction
pub const DEFAULT_PARTIAL_READ: usize = 256 * 1024;

/// Builds canonical records from scan entries
///
/// The host environment is reached only through the injected
/// [`FileSource`], so the same normalizer serves local disks and tests.
pub struct MetadataNormalizer<S> {
    source: S,
    decoder: TagDecoder,
    dates: DateResolver,
    partial_read: usize,
}

impl<S: FileSource> MetadataNormalizer<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            decoder: TagDecoder::new(),
            dates: DateResolver::default(),
            partial_read: DEFAULT_PARTIAL_READ,
        }
    }

    /// Use a specific time zone for wall-clock dates
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.dates = DateResolver::new(zone);
        self
    }

    /// Number of leading bytes handed to the metadata reader
    #[must_use]
    pub fn with_partial_read(mut self, bytes: usize) -> Self {
        self.partial_read = bytes;
        self
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Build the record for one entry, including the dimension fallback
    #[must_use]
    pub fn normalize(&self, entry: ScanEntry) -> FileRecord {
        let mut record = self.normalize_metadata(entry);
        self.resolve_missing_dimensions(&mut record);
        record
    }

    /// Build records for a batch, preserving input order
    ///
    /// Metadata is extracted for the whole batch first. Image decodes for
    /// files without dimension tags run afterwards, so a slow decode never
    /// holds up metadata extraction of the other files.
    #[must_use]
    pub fn normalize_batch(&self, entries: Vec<ScanEntry>) -> Vec<FileRecord> {
        let mut records: Vec<FileRecord> = entries
            .into_par_iter()
            .map(|entry| self.normalize_metadata(entry))
            .collect();

        records
            .par_iter_mut()
            .filter(|record| !record.dims.is_resolved())
            .for_each(|record| self.resolve_missing_dimensions(record));

        records
    }

    /// Build a record from metadata only; `dims` may stay unresolved
    #[must_use]
    pub fn normalize_metadata(&self, entry: ScanEntry) -> FileRecord {
        let tags = self.read_tags(&entry).unwrap_or_else(|e| {
            log::debug!("no metadata for {}: {e}", entry.path.display());
            TagDictionary::new()
        });
        self.build_record(entry, &tags)
    }

    /// Build a record from an already decoded tag dictionary
    #[must_use]
    pub fn build_record(&self, entry: ScanEntry, tags: &TagDictionary) -> FileRecord {
        let description = self.decoder.remark(tags);
        let keywords = self.decoder.keywords(tags);
        let dims = dimensions_from_tags(tags).unwrap_or(Dimensions::UNRESOLVED);
        let camera = camera_from_tags(tags);

        let capture = self.dates.capture_date(tags);
        let dates = self.dates.resolve(&DateCandidates {
            file_name: &entry.name,
            last_modified: Some(entry.last_modified),
            capture,
            birthtime: entry.birthtime,
        });

        let thumbnail = self.source.resolve_thumbnail_handle(&entry.path);

        FileRecord {
            id: RecordId::next(),
            extension: extension_of(&entry.name),
            birthtime: entry.birthtime.unwrap_or(entry.last_modified),
            name: entry.name,
            path: entry.path,
            parent: entry.parent,
            size: entry.size,
            last_modified: entry.last_modified,
            dims,
            description,
            keywords,
            camera,
            capture_date: dates.capture,
            capture_from_metadata: dates.capture_from_metadata,
            best_date: dates.best,
            thumbnail,
            ai_labels: None,
        }
    }

    /// Decode the image itself when no dimension tag was usable
    ///
    /// A permanent failure leaves the record at `{0, 0}`.
    pub fn resolve_missing_dimensions(&self, record: &mut FileRecord) {
        if record.dims.is_resolved() {
            return;
        }
        match self.source.decode_dimensions(&record.path) {
            Some(dims) => record.dims = dims,
            None => log::debug!("dimensions unavailable for {}", record.path.display()),
        }
    }

    fn read_tags(&self, entry: &ScanEntry) -> Result<TagDictionary, DecodeError> {
        let bytes = self.source.read_partial_bytes(&entry.path, self.partial_read)?;
        container::read_tag_dictionary(&bytes)
    }
}

/// Pixel dimensions from metadata, if both sides are present and positive
#[must_use]
pub fn dimensions_from_tags(tags: &TagDictionary) -> Option<Dimensions> {
    let w = tags.first_of(&WIDTH_TAGS)?.as_dimension()?;
    let h = tags.first_of(&HEIGHT_TAGS)?.as_dimension()?;
    Dimensions::new(w, h)
}

fn camera_from_tags(tags: &TagDictionary) -> CameraInfo {
    let text = |name: &str| {
        tags.first_of(&[(TagGroup::Image, name), (TagGroup::Capture, name)])
            .and_then(TagValue::as_text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    };
    CameraInfo {
        make: text("Make"),
        model: text("Model"),
        f_number: tags
            .get(TagGroup::Capture, "FNumber")
            .and_then(TagValue::as_f64)
            .filter(|f| f.is_finite() && *f > 0.0),
    }
}
