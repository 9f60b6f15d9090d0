//! photocat - metadata-driven photo cataloging
//!
//! This library imports image files, normalizes their embedded metadata into
//! canonical [`record::FileRecord`]s, groups them by folder, date, remark,
//! tag or type, and produces search results, JSON exports and native
//! clipboard payloads.
//!
//! # Pipeline
//!
//! 1. A [`source::FileSource`] lists image files and reads their first bytes
//! 2. [`metadata::MetadataNormalizer`] decodes the EXIF container, remarks,
//!    keywords, dimensions and dates into one record per file
//! 3. [`catalog::Catalog`] merges records batch by batch (copy-on-write)
//! 4. [`classify::Classifier`] rebuilds the group index from the full list
//! 5. [`search`], [`export`] and [`clipboard`] consume the records and groups

pub mod catalog;
pub mod classify;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod export;
pub mod metadata;
pub mod output;
pub mod record;
pub mod search;
pub mod source;

#[cfg(test)]
pub mod testing;

pub use catalog::CatalogError;
