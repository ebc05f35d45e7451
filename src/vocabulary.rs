//! The shared label vocabulary of a save directory.
//!
//! One vocabulary file per save directory, listing the label names the whole
//! directory annotates with. The session keeps an in-memory copy and mirrors
//! it to the presentation collaborators whenever it changes.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the vocabulary inside a save directory.
///
/// The content is JSON, but the extension is deliberately not `.json`:
/// annotation records are stored as `<image base name>.json` in the same
/// directory, so a `.json` vocabulary file would collide with the record of
/// an image base-named like it.
pub const VOCABULARY_FILE_NAME: &str = "labels.vocab";

/// An ordered list of distinct label names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    /// Build a vocabulary from a list, dropping duplicates but keeping the
    /// first occurrence's position.
    pub fn from_labels(labels: Vec<String>) -> Self {
        let mut vocabulary = Self::default();
        for label in labels {
            vocabulary.push(label);
        }
        vocabulary
    }

    /// The labels, in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Append a label if it is not already present. Returns whether it was
    /// added.
    pub fn push(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.labels.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// Replace the whole list (deduplicated, order preserved).
    pub fn update(&mut self, labels: Vec<String>) {
        *self = Self::from_labels(labels);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Path of the vocabulary file inside `save_dir`.
pub fn vocabulary_path(save_dir: &Path) -> PathBuf {
    save_dir.join(VOCABULARY_FILE_NAME)
}

/// Read a vocabulary file. Fails with `NotFound` if the file is absent.
pub fn read(path: &Path) -> Result<LabelVocabulary, SessionError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write a vocabulary file.
pub fn write(path: &Path, vocabulary: &LabelVocabulary) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(vocabulary)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load the vocabulary of a save directory, or initialize an empty one and
/// persist it if the file does not exist yet.
pub fn load_or_init(save_dir: &Path) -> Result<LabelVocabulary, SessionError> {
    let path = vocabulary_path(save_dir);
    if path.is_file() {
        let vocabulary = read(&path)?;
        log::info!("Loaded {} labels from {:?}", vocabulary.len(), path);
        Ok(vocabulary)
    } else {
        let vocabulary = LabelVocabulary::default();
        write(&path, &vocabulary)?;
        log::info!("Initialized empty vocabulary at {:?}", path);
        Ok(vocabulary)
    }
}
