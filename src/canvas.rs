//! The canvas collaborator interface.
//!
//! The session controller drives a rendering surface through this trait and
//! queries it for the pieces of state only the surface knows: the annotation
//! payload as currently drawn, and the pixel dimensions of the displayed
//! image. Rendering itself is entirely outside this crate.

use crate::mode::AnnotationMode;
use crate::record::AnnotationPayload;
use std::path::Path;

/// Rendering surface driven by the session controller.
pub trait Canvas {
    /// Display the image at `path`.
    fn load_image(&mut self, path: &Path);

    /// Clear the displayed image and any drawn annotations.
    fn clear(&mut self);

    /// Notify the surface of an interaction mode change.
    fn set_mode(&mut self, mode: AnnotationMode);

    /// Display the annotations of a freshly loaded record.
    fn show_annotations(&mut self, payload: &AnnotationPayload);

    /// Mirror the label vocabulary for on-canvas label pickers.
    fn set_labels(&mut self, labels: &[String]);

    /// Delete the currently selected annotation object.
    fn delete_selected(&mut self);

    /// Remove every annotation object on the current image.
    fn clear_annotations(&mut self);

    fn zoom_in(&mut self);
    fn zoom_out(&mut self);
    fn zoom_fit(&mut self);

    /// The annotation payload as currently drawn, queried on save.
    fn current_annotations(&self) -> AnnotationPayload;

    /// Pixel dimensions of the displayed image, queried when a record is
    /// first created. `None` when no image is displayed.
    fn image_dimensions(&self) -> Option<(u32, u32)>;
}
