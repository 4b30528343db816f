//! Core data models for NASA View
//!
//! This module contains the data types used throughout the application for
//! representing the Astronomy Picture of the Day and image library gallery
//! entries, plus the API clients that produce them.

pub mod apod;
pub mod gallery;

pub use apod::{ApodClient, ApodError};
pub use gallery::{GalleryClient, GalleryError, PAGE_SIZE};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single Astronomy Picture of the Day record
///
/// Mirrors the upstream APOD payload. `media_type` is kept as the raw string
/// the API sends ("image", "video", occasionally others) so an unexpected
/// value never fails deserialization; callers branch on `is_image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apod {
    /// Kind of media the record points at
    pub media_type: String,
    /// Location of the image (or video) itself
    pub url: String,
    /// Title of the picture
    pub title: String,
    /// Date the picture was featured
    pub date: NaiveDate,
    /// Longer-form description of the picture
    pub explanation: String,
}

impl Apod {
    /// Whether the record is a plain image (the API also serves videos)
    pub fn is_image(&self) -> bool {
        self.media_type == "image"
    }
}

/// One tile in the image library gallery
///
/// Flattened from the upstream search result shape, which nests the image
/// location and its metadata in separate per-item arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Location of the preview image
    pub href: String,
    /// Title of the image
    pub title: String,
    /// Longer description, when the archive has one
    pub description: Option<String>,
    /// When the image was added to the archive
    pub date_created: Option<DateTime<Utc>>,
}
