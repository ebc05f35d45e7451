//! Labelsmith - image annotation session core.
//!
//! The state machine and file/annotation synchronization engine behind an
//! image annotation tool: it matches images to annotation records by base
//! name, tracks the active image and interaction mode, and drives record
//! lifecycle (create, save, delete, reset) so the on-screen list, canvas,
//! label vocabulary, and persisted records never drift apart. Rendering,
//! image decoding, and window/dialog presentation live outside this crate,
//! behind the [`Canvas`] trait and the [`SessionEvent`] stream.

mod canvas;
mod error;
mod events;
mod mode;
mod names;
mod record;
mod scan;
mod session;
pub mod vocabulary;

pub use canvas::Canvas;
pub use error::SessionError;
pub use events::{Affordances, SessionEvent, TaskKind};
pub use mode::AnnotationMode;
pub use names::{base_name, matching};
pub use record::{
    AnnotationPayload, AnnotationRecord, BasicInfo, JsonRecordGateway, Point, RecordGateway,
    Region, Shape,
};
pub use scan::{ANNOTATION_EXTENSIONS, IMAGE_EXTENSIONS, list_files};
pub use session::{SessionController, SessionState};
pub use vocabulary::{LabelVocabulary, VOCABULARY_FILE_NAME};

