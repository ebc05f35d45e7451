//! Annotation interaction modes.

/// The session-wide interaction mode gating what the canvas is allowed to do.
///
/// Exactly one mode is active at a time. `Delete` and `Clear` are transient:
/// they trigger an immediate canvas-side effect and the session drops back to
/// `None` rather than keeping them armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationMode {
    /// No annotation interaction armed.
    #[default]
    None,
    /// Drawing a new annotation object.
    Create,
    /// Editing an existing object on subsequent canvas interaction.
    Edit,
    /// Deleting the selected object (applied immediately).
    Delete,
    /// Clearing all objects on the current image (applied immediately).
    Clear,
}

impl AnnotationMode {
    /// Whether this mode applies an immediate effect instead of persisting
    /// as a long-lived state.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Delete | Self::Clear)
    }

    /// Display name for logging and status UI.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Clear => "Clear",
        }
    }
}
