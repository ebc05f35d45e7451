//! Per-image annotation records and their persistence gateway.
//!
//! One record per image base name, stored in the save directory as
//! `<base>.json`. The session logic never interprets the geometry inside a
//! record; it only round-trips the payload between the canvas and disk.
//!
//! # File format
//!
//! ```json
//! {
//!   "image": { "file_name": "photo_01.png", "width": 1920, "height": 1080 },
//!   "annotations": {
//!     "regions": [
//!       { "id": 1, "label": "car",
//!         "shape": { "type": "bounding_box", "x": 10.0, "y": 20.0,
//!                    "width": 100.0, "height": 50.0 } }
//!     ]
//!   }
//! }
//! ```

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Geometry of one annotated region.
///
/// Opaque to the session core beyond serialization; the canvas produces and
/// consumes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box, top-left anchored.
    BoundingBox {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Closed polygon given by its vertices in order.
    Polygon { points: Vec<Point> },
}

/// One annotated region: a labeled shape with a per-image id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub label: String,
    pub shape: Shape,
}

/// The annotation payload of a record: every region on one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnnotationPayload {
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl AnnotationPayload {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Source-image metadata recorded alongside the annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BasicInfo {
    /// File name of the source image (with extension, no directory).
    pub file_name: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// A persisted per-image annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnnotationRecord {
    /// Basic info about the source image.
    #[serde(default)]
    pub image: BasicInfo,
    /// The annotation payload; defaults to empty when absent in the file.
    #[serde(default)]
    pub annotations: AnnotationPayload,
}

impl AnnotationRecord {
    /// Record the source image's file name and pixel dimensions.
    pub fn update_basic_info(&mut self, file_name: impl Into<String>, width: u32, height: u32) {
        self.image = BasicInfo {
            file_name: file_name.into(),
            width,
            height,
        };
    }

    /// Replace the annotation payload.
    pub fn update_annotations(&mut self, payload: AnnotationPayload) {
        self.annotations = payload;
    }
}

/// Persistence gateway for annotation records.
///
/// The session controller never touches record files directly; everything
/// goes through this seam so tests and alternative formats can substitute
/// their own storage.
pub trait RecordGateway {
    /// Path of the record file for `base_name` inside `dir`.
    fn record_path(&self, dir: &Path, base_name: &str) -> PathBuf;

    /// Whether a record file for `base_name` exists in `dir`.
    fn exists(&self, dir: &Path, base_name: &str) -> bool;

    /// Load the record for `base_name`, or an empty record if no file exists.
    fn open(&self, dir: &Path, base_name: &str) -> Result<AnnotationRecord, SessionError>;

    /// Write the record for `base_name`. Failures propagate to the caller.
    fn persist(
        &self,
        dir: &Path,
        base_name: &str,
        record: &AnnotationRecord,
    ) -> Result<(), SessionError>;

    /// Delete the record file for `base_name`, if it exists.
    fn remove(&self, dir: &Path, base_name: &str) -> Result<(), SessionError>;
}

/// Default gateway: one pretty-printed JSON file per image base name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordGateway;

impl RecordGateway for JsonRecordGateway {
    fn record_path(&self, dir: &Path, base_name: &str) -> PathBuf {
        dir.join(format!("{base_name}.json"))
    }

    fn exists(&self, dir: &Path, base_name: &str) -> bool {
        self.record_path(dir, base_name).is_file()
    }

    fn open(&self, dir: &Path, base_name: &str) -> Result<AnnotationRecord, SessionError> {
        let path = self.record_path(dir, base_name);
        if !path.is_file() {
            log::debug!("No record at {:?}, starting empty", path);
            return Ok(AnnotationRecord::default());
        }
        let json = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn persist(
        &self,
        dir: &Path,
        base_name: &str,
        record: &AnnotationRecord,
    ) -> Result<(), SessionError> {
        let path = self.record_path(dir, base_name);
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, json)?;
        log::info!(
            "Saved record {:?} ({} regions)",
            path,
            record.annotations.len()
        );
        Ok(())
    }

    fn remove(&self, dir: &Path, base_name: &str) -> Result<(), SessionError> {
        let path = self.record_path(dir, base_name);
        if path.is_file() {
            std::fs::remove_file(&path)?;
            log::info!("Removed record {:?}", path);
        }
        Ok(())
    }
}
