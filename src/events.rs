//! Outbound events and derived UI affordances.
//!
//! Instead of poking enable/disable flags at call sites, every operation ends
//! by projecting an [`Affordances`] snapshot from the session state and
//! emitting it as a typed event. Presentation collaborators consume the event
//! queue; nothing in the core depends on how they render it.

/// The annotation task a save directory is being labeled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskKind {
    #[default]
    ObjectDetection,
    Segmentation,
}

/// Which user actions are currently meaningful.
///
/// Derived from the session state by a pure projection, never mutated in
/// place: `navigation` follows the image list, `save`/`clear_annotation`
/// follow the loaded record, and `delete_annotation` additionally requires
/// the record to exist on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    /// Next/previous/select, file deletion, create/edit, zoom.
    pub navigation: bool,
    /// Persist the current annotations.
    pub save: bool,
    /// Clear all annotations on the current image.
    pub clear_annotation: bool,
    /// Delete the selected annotation object of a persisted record.
    pub delete_annotation: bool,
}

/// Typed events emitted by the session controller for presentation
/// collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The image list was rebuilt; display these entries in order.
    FileListUpdated(Vec<String>),
    /// The image list was cleared.
    FileListCleared,
    /// The entry at the current index was removed.
    CurrentEntryRemoved,
    /// The label vocabulary changed; mirror it everywhere labels are shown.
    LabelsChanged(Vec<String>),
    /// The set of enabled actions changed.
    AffordancesChanged(Affordances),
    /// The annotation task changed.
    TaskChanged(TaskKind),
}
