//! Session state and the controller that keeps it consistent.
//!
//! The controller owns three name-correlated collections: the image list
//! (paths plus base names), the annotation index (base names known to have a
//! persisted record, plus their file paths), and the label vocabulary. Every
//! operation leaves the parallel lists aligned, the current index valid or
//! sentinel, and the loaded record matching the displayed image. Presentation
//! collaborators observe the session through typed [`SessionEvent`]s; the
//! canvas is driven directly through the [`Canvas`] trait.

use crate::canvas::Canvas;
use crate::error::SessionError;
use crate::events::{Affordances, SessionEvent, TaskKind};
use crate::mode::AnnotationMode;
use crate::names;
use crate::record::{AnnotationRecord, RecordGateway};
use crate::scan;
use crate::vocabulary::{self, LabelVocabulary};
use std::path::PathBuf;

/// The record currently loaded for the selected image.
#[derive(Debug)]
struct LoadedRecord {
    /// Base name of the image the record belongs to.
    name: String,
    record: AnnotationRecord,
}

/// All mutable state of one annotation session.
///
/// Fields are private; the controller in this module is the sole writer.
#[derive(Debug, Default)]
pub struct SessionState {
    load_dir: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    image_paths: Vec<PathBuf>,
    image_names: Vec<String>,
    annotation_names: Vec<String>,
    annotation_paths: Vec<PathBuf>,
    current_index: Option<usize>,
    mode: AnnotationMode,
    loaded_record: Option<LoadedRecord>,
    labels: LabelVocabulary,
    task: TaskKind,
}

impl SessionState {
    pub fn load_dir(&self) -> Option<&PathBuf> {
        self.load_dir.as_ref()
    }

    pub fn save_dir(&self) -> Option<&PathBuf> {
        self.save_dir.as_ref()
    }

    pub fn image_paths(&self) -> &[PathBuf] {
        &self.image_paths
    }

    pub fn image_names(&self) -> &[String] {
        &self.image_names
    }

    pub fn annotation_names(&self) -> &[String] {
        &self.annotation_names
    }

    pub fn annotation_paths(&self) -> &[PathBuf] {
        &self.annotation_paths
    }

    /// The active image offset, or `None` when nothing is selected.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Base name of the active image, if any.
    pub fn current_name(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.image_names.get(i))
            .map(String::as_str)
    }

    pub fn image_count(&self) -> usize {
        self.image_paths.len()
    }

    pub fn mode(&self) -> AnnotationMode {
        self.mode
    }

    pub fn labels(&self) -> &LabelVocabulary {
        &self.labels
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    /// The record loaded for the active image, if any.
    pub fn loaded_record(&self) -> Option<&AnnotationRecord> {
        self.loaded_record.as_ref().map(|loaded| &loaded.record)
    }

    /// Base name the loaded record belongs to, if any.
    pub fn loaded_record_name(&self) -> Option<&str> {
        self.loaded_record.as_ref().map(|loaded| loaded.name.as_str())
    }

    /// Project the enabled-action set from the current state.
    ///
    /// This is the single place enablement is decided: navigation follows
    /// the image list, save/clear follow the loaded record, and deleting a
    /// persisted annotation additionally requires the record's name to be in
    /// the annotation index.
    pub fn affordances(&self) -> Affordances {
        let record_loaded = self.loaded_record.is_some();
        let record_persisted = self
            .loaded_record
            .as_ref()
            .is_some_and(|loaded| self.annotation_names.iter().any(|n| n == &loaded.name));
        Affordances {
            navigation: !self.image_paths.is_empty(),
            save: record_loaded,
            clear_annotation: record_loaded,
            delete_annotation: record_persisted,
        }
    }
}

/// Orchestrates one annotation session.
///
/// All methods run to completion on the caller's thread; the controller is
/// the sole writer of its state, so `&mut self` is the whole concurrency
/// story. Outbound events accumulate until [`drain_events`] is called.
///
/// [`drain_events`]: SessionController::drain_events
pub struct SessionController<C: Canvas, G: RecordGateway> {
    state: SessionState,
    canvas: C,
    gateway: G,
    events: Vec<SessionEvent>,
}

impl<C: Canvas, G: RecordGateway> SessionController<C, G> {
    pub fn new(canvas: C, gateway: G) -> Self {
        Self {
            state: SessionState::default(),
            canvas,
            gateway,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Take the outbound events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Open a directory of source images.
    ///
    /// `None` means the user cancelled the picker and is a no-op with prior
    /// state fully preserved. Otherwise the session is reset and repopulated
    /// with the images found in `dir`, in scan order.
    pub fn open_load_directory(&mut self, dir: Option<PathBuf>) -> Result<(), SessionError> {
        let Some(dir) = dir else {
            log::debug!("Load directory selection cancelled");
            return Ok(());
        };
        // Scan before resetting so a failed scan leaves the session intact.
        let image_paths = scan::list_files(&dir, scan::IMAGE_EXTENSIONS)?;
        log::info!("Found {} images in {:?}", image_paths.len(), dir);
        self.reset();

        self.state.image_names = image_paths.iter().map(|p| names::base_name(p)).collect();
        self.state.image_paths = image_paths;
        self.state.load_dir = Some(dir);

        self.emit(SessionEvent::FileListUpdated(self.display_names()));
        self.emit_affordances();
        Ok(())
    }

    /// Open the directory annotation records are saved to.
    ///
    /// Builds the annotation index from the records found in `dir`, loads or
    /// initializes the directory's label vocabulary, prunes the index to
    /// names that have a matching image, and re-synchronizes the currently
    /// displayed image so a record that now matches is loaded without
    /// re-navigation. `None` (cancelled picker) is a no-op.
    pub fn open_save_directory(&mut self, dir: Option<PathBuf>) -> Result<(), SessionError> {
        let Some(dir) = dir else {
            log::debug!("Save directory selection cancelled");
            return Ok(());
        };

        // The vocabulary file shares the directory but not the `.json`
        // extension, so the record scan cannot pick it up.
        let mut annotation_paths: Vec<PathBuf> =
            scan::list_files(&dir, scan::ANNOTATION_EXTENSIONS)?;
        let mut annotation_names: Vec<String> =
            annotation_paths.iter().map(|p| names::base_name(p)).collect();
        log::info!(
            "Found {} annotation files in {:?}",
            annotation_paths.len(),
            dir
        );

        let labels = vocabulary::load_or_init(&dir)?;
        self.state.labels = labels;
        self.canvas.set_labels(self.state.labels.labels());
        self.emit(SessionEvent::LabelsChanged(
            self.state.labels.labels().to_vec(),
        ));

        if !annotation_names.is_empty() && !self.state.image_names.is_empty() {
            let matched = names::matching(&annotation_names, &self.state.image_names);
            annotation_paths = matched
                .iter()
                .map(|name| self.gateway.record_path(&dir, name))
                .collect();
            log::debug!(
                "Pruned annotation index: {} of {} entries match an image",
                matched.len(),
                annotation_names.len()
            );
            annotation_names = matched;
        }
        self.state.annotation_names = annotation_names;
        self.state.annotation_paths = annotation_paths;
        self.state.save_dir = Some(dir);

        self.refresh_record_for_current()?;
        self.emit_affordances();
        Ok(())
    }

    /// Select the image at `index` (or clear the selection with `None`).
    ///
    /// Out-of-range indices collapse to the sentinel. A valid selection loads
    /// the image into the canvas and runs the record-presence check shared
    /// with [`next`]/[`previous`]: a known record is loaded and shown, an
    /// unknown one releases whatever was loaded.
    ///
    /// [`next`]: SessionController::next
    /// [`previous`]: SessionController::previous
    pub fn select_image(&mut self, index: Option<usize>) -> Result<(), SessionError> {
        let index = index.filter(|i| *i < self.state.image_paths.len());
        self.state.current_index = index;

        let Some(i) = index else {
            log::debug!("Selection cleared");
            self.state.loaded_record = None;
            self.state.mode = AnnotationMode::None;
            self.canvas.clear();
            self.emit_affordances();
            return Ok(());
        };

        let path = self.state.image_paths[i].clone();
        log::debug!("Selected image {} ({:?})", i, path);
        self.canvas.load_image(&path);
        self.refresh_record_for_current()?;
        self.emit_affordances();
        Ok(())
    }

    /// Advance to the next image, staying put at the end of the list.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.step(1)
    }

    /// Go back to the previous image, staying put at the start of the list.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Result<(), SessionError> {
        let len = self.state.image_paths.len();
        if len == 0 {
            log::warn!("Navigation requested with an empty image list");
            return Ok(());
        }
        let target = match self.state.current_index {
            // Nothing selected yet: either direction lands on the first image.
            None => 0,
            Some(i) => {
                let target = i as isize + delta;
                if target < 0 || target as usize >= len {
                    log::warn!("Navigation out of range (index {}, {} images)", i, len);
                    return Ok(());
                }
                target as usize
            }
        };
        self.select_image(Some(target))
    }

    /// Remove the active image from the session.
    ///
    /// Drops the entry from the image lists and, when a persisted annotation
    /// record exists for it, from the annotation index and from disk. The
    /// disk delete happens before the index mutation so a failure leaves the
    /// index still pointing at the real file. The selection moves to the
    /// entry now occupying the old position (or the new last entry, or the
    /// sentinel when the list emptied).
    pub fn delete_current_file(&mut self) -> Result<(), SessionError> {
        let Some(index) = self.state.current_index else {
            log::warn!("File delete requested with no image selected");
            return Ok(());
        };
        if index >= self.state.image_paths.len() {
            log::warn!("File delete requested with invalid index {}", index);
            return Ok(());
        }
        let name = self.state.image_names[index].clone();

        if let Some(pos) = self.state.annotation_names.iter().position(|n| n == &name) {
            if let Some(save_dir) = self.state.save_dir.clone() {
                if self.gateway.exists(&save_dir, &name) {
                    self.gateway.remove(&save_dir, &name)?;
                }
            }
            self.state.annotation_names.remove(pos);
            self.state.annotation_paths.remove(pos);
        }

        self.state.image_paths.remove(index);
        self.state.image_names.remove(index);
        self.state.loaded_record = None;
        log::info!("Removed {:?} from the session", name);
        self.emit(SessionEvent::CurrentEntryRemoved);

        let len = self.state.image_paths.len();
        let next = if len == 0 { None } else { Some(index.min(len - 1)) };
        self.select_image(next)
    }

    /// Arm Create mode and make sure a record exists for the active image.
    ///
    /// Fails if no save directory is selected or nothing is selected; when a
    /// record is already loaded it is reused, otherwise a fresh one is opened
    /// and stamped with the image's file name and pixel dimensions from the
    /// canvas.
    pub fn create_object(&mut self) -> Result<(), SessionError> {
        let Some(save_dir) = self.state.save_dir.clone() else {
            return Err(SessionError::SaveDirectoryNotSet);
        };
        let Some(index) = self
            .state
            .current_index
            .filter(|i| *i < self.state.image_paths.len())
        else {
            return Err(SessionError::NoImageSelected);
        };

        self.state.mode = AnnotationMode::Create;
        self.canvas.set_mode(AnnotationMode::Create);
        log::debug!("Annotation mode: {}", self.state.mode.name());

        if self.state.loaded_record.is_none() {
            let name = self.state.image_names[index].clone();
            let mut record = self.gateway.open(&save_dir, &name)?;
            let file_name = self.state.image_paths[index]
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
                .unwrap_or_else(|| name.clone());
            let (width, height) = self.canvas.image_dimensions().unwrap_or((0, 0));
            record.update_basic_info(file_name, width, height);
            self.state.loaded_record = Some(LoadedRecord { name, record });
        }

        self.emit_affordances();
        Ok(())
    }

    /// Arm Edit mode. The canvas applies the edit on subsequent interaction.
    pub fn edit_object(&mut self) {
        self.state.mode = AnnotationMode::Edit;
        self.canvas.set_mode(AnnotationMode::Edit);
        log::debug!("Annotation mode: {}", self.state.mode.name());
    }

    /// Delete the selected annotation object on the canvas.
    pub fn delete_annotation(&mut self) {
        self.apply_transient(AnnotationMode::Delete);
    }

    /// Clear every annotation object on the current image.
    pub fn clear_annotation(&mut self) {
        self.apply_transient(AnnotationMode::Clear);
    }

    fn apply_transient(&mut self, mode: AnnotationMode) {
        debug_assert!(mode.is_transient());
        self.state.mode = mode;
        self.canvas.set_mode(mode);
        match mode {
            AnnotationMode::Delete => self.canvas.delete_selected(),
            AnnotationMode::Clear => self.canvas.clear_annotations(),
            _ => {}
        }
        // Applied immediately; the mode does not stay armed.
        self.state.mode = AnnotationMode::None;
        self.canvas.set_mode(AnnotationMode::None);
        log::debug!("Applied {} to the canvas", mode.name());
    }

    /// Persist the current annotations.
    ///
    /// Pulls the payload from the canvas, writes the record through the
    /// gateway, and only after a successful write appends the image's name to
    /// the annotation index (idempotently). With nothing loaded this is a
    /// logged no-op.
    pub fn save(&mut self) -> Result<(), SessionError> {
        if self.state.loaded_record.is_none() {
            log::warn!("Save requested with no annotation record loaded");
            return Ok(());
        }
        let Some(save_dir) = self.state.save_dir.clone() else {
            log::warn!("Save requested with no save directory selected");
            return Ok(());
        };

        let payload = self.canvas.current_annotations();
        let Some(loaded) = self.state.loaded_record.as_mut() else {
            return Ok(());
        };
        // Write first: the cached record must never claim a payload that is
        // not on disk.
        let mut updated = loaded.record.clone();
        updated.update_annotations(payload);
        self.gateway.persist(&save_dir, &loaded.name, &updated)?;
        loaded.record = updated;

        match self
            .state
            .current_index
            .and_then(|i| self.state.image_names.get(i))
        {
            Some(current) => {
                if !self.state.annotation_names.iter().any(|n| n == current) {
                    let path = self.gateway.record_path(&save_dir, current);
                    self.state.annotation_names.push(current.clone());
                    self.state.annotation_paths.push(path);
                }
            }
            None => log::warn!("Invalid index, annotation lists not updated"),
        }

        self.emit_affordances();
        Ok(())
    }

    /// Reset the session to its pre-directory state.
    ///
    /// Clears both image lists, the annotation index, the save directory,
    /// the selection, the loaded record, and the interaction mode. The
    /// cached label vocabulary stays so presentation keeps showing it until
    /// a new save directory replaces it.
    pub fn reset(&mut self) {
        self.state = SessionState {
            task: self.state.task,
            labels: std::mem::take(&mut self.state.labels),
            ..SessionState::default()
        };
        self.emit(SessionEvent::FileListCleared);
        self.emit_affordances();
        log::info!("Session reset");
    }

    /// Record which annotation task this session is labeling for.
    pub fn set_task(&mut self, task: TaskKind) {
        self.state.task = task;
        self.emit(SessionEvent::TaskChanged(task));
        log::info!("Task: {:?}", task);
    }

    /// Replace the label vocabulary, mirror it to the canvas, and persist it
    /// if a save directory is selected.
    pub fn update_labels(&mut self, labels: Vec<String>) -> Result<(), SessionError> {
        self.state.labels.update(labels);
        if let Some(save_dir) = &self.state.save_dir {
            vocabulary::write(&vocabulary::vocabulary_path(save_dir), &self.state.labels)?;
        }
        self.canvas.set_labels(self.state.labels.labels());
        self.emit(SessionEvent::LabelsChanged(
            self.state.labels.labels().to_vec(),
        ));
        Ok(())
    }

    pub fn zoom_in(&mut self) {
        if self.state.affordances().navigation {
            self.canvas.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.state.affordances().navigation {
            self.canvas.zoom_out();
        }
    }

    pub fn zoom_fit(&mut self) {
        if self.state.affordances().navigation {
            self.canvas.zoom_fit();
        }
    }

    /// Record-presence check for the active image: load and show its record
    /// when the annotation index knows the name, release the loaded record
    /// otherwise. Shared by selection, navigation, and save-directory resync.
    fn refresh_record_for_current(&mut self) -> Result<(), SessionError> {
        let Some(index) = self.state.current_index else {
            return Ok(());
        };
        let Some(name) = self.state.image_names.get(index).cloned() else {
            log::warn!("Current index {} out of range", index);
            return Ok(());
        };

        let known = self.state.annotation_names.iter().any(|n| n == &name);
        if known {
            if let Some(save_dir) = self.state.save_dir.clone() {
                log::debug!("Record found for {:?}", name);
                let record = self.gateway.open(&save_dir, &name)?;
                self.canvas.show_annotations(&record.annotations);
                self.state.loaded_record = Some(LoadedRecord { name, record });
                return Ok(());
            }
        }
        self.state.loaded_record = None;
        Ok(())
    }

    fn display_names(&self) -> Vec<String> {
        self.state
            .image_paths
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    fn emit_affordances(&mut self) {
        let affordances = self.state.affordances();
        self.emit(SessionEvent::AffordancesChanged(affordances));
    }
}
