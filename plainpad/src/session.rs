//! Editor session: the document, preferences and recent files behind
//! the UI, driven by [`Command`]s and answering with [`Outcome`]s.
//!
//! The session never talks to the screen. Anything that needs a
//! window (file pickers, confirmations, error boxes) comes back as an
//! outcome for the app layer to render, and the user's answer returns
//! as another command.

use crate::document::Document;
use crate::prefs::{keys, Preferences};
use padcore::storage::{FileAccess, PrefStore, RecentFiles};
use std::path::PathBuf;
use std::time::Duration;

/// How often a dirty, file-bound document is saved in the background.
pub const AUTOSAVE_PERIOD: Duration = Duration::from_secs(60);

/// Everything the UI can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    /// Open a specific file, still honoring the dirty check.
    OpenPath(PathBuf),
    /// The open dialog picked a file.
    OpenPicked(PathBuf),
    Save,
    SaveAs,
    /// The save dialog picked a target.
    SavePicked(PathBuf),
    PickCancelled,
    DiscardConfirmed,
    DiscardCancelled,
    /// The buffer changed in the editor.
    Edited,
    AutosaveTick,
    ToggleTheme,
    SetFontFamily(String),
    SetFontSize(i32),
    ZoomIn,
    ZoomOut,
    ClearRecent,
}

/// What a confirmed discard should go on to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DiscardIntent {
    NewDocument,
    OpenDialog,
    OpenPath(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    IoError,
    Validation,
}

/// A message for the user, shown as a small modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn io(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::IoError, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Validation, message: message.into() }
    }
}

/// What the UI has to do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing further.
    Done,
    /// Show the open dialog.
    PickOpenPath,
    /// Show the save dialog.
    PickSavePath,
    /// Ask before throwing away unsaved edits.
    ConfirmDiscard,
    Notice(Notice),
    /// Preferences changed; restyle the UI.
    ApplyPrefs,
}

pub struct Session<F, P> {
    files: F,
    store: P,
    doc: Document,
    prefs: Preferences,
    recent: RecentFiles,
    pending_discard: Option<DiscardIntent>,
}

impl<F: FileAccess, P: PrefStore> Session<F, P> {
    /// Start a session, restoring the draft snapshot and stored
    /// preferences. A restored draft is not an unsaved edit until the
    /// user touches it.
    pub fn start(files: F, store: P) -> Self {
        let mut doc = Document::new();
        if let Some(draft) = store.get(keys::DRAFT) {
            doc.text = draft;
            doc.recount();
        }
        let prefs = Preferences::load(&store);
        let recent = RecentFiles::load(&store);
        Self {
            files,
            store,
            doc,
            prefs,
            recent,
            pending_discard: None,
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn recent(&self) -> &RecentFiles {
        &self.recent
    }

    /// The buffer, for the text widget. Report changes with
    /// [`Command::Edited`].
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.doc.text
    }

    pub fn apply(&mut self, cmd: Command) -> Outcome {
        match cmd {
            Command::New => {
                if self.doc.dirty {
                    self.pending_discard = Some(DiscardIntent::NewDocument);
                    return Outcome::ConfirmDiscard;
                }
                self.doc.reset();
                Outcome::Done
            }
            Command::Open => {
                if self.doc.dirty {
                    self.pending_discard = Some(DiscardIntent::OpenDialog);
                    return Outcome::ConfirmDiscard;
                }
                Outcome::PickOpenPath
            }
            Command::OpenPath(path) => {
                if self.doc.dirty {
                    self.pending_discard = Some(DiscardIntent::OpenPath(path));
                    return Outcome::ConfirmDiscard;
                }
                self.read_into_doc(path)
            }
            Command::OpenPicked(path) => self.read_into_doc(path),
            Command::Save => self.save(false),
            Command::SaveAs => Outcome::PickSavePath,
            Command::SavePicked(path) => self.write_doc(path),
            Command::PickCancelled => Outcome::Done,
            Command::DiscardConfirmed => match self.pending_discard.take() {
                Some(DiscardIntent::NewDocument) => {
                    self.doc.reset();
                    Outcome::Done
                }
                Some(DiscardIntent::OpenDialog) => Outcome::PickOpenPath,
                Some(DiscardIntent::OpenPath(path)) => self.read_into_doc(path),
                None => Outcome::Done,
            },
            Command::DiscardCancelled => {
                self.pending_discard = None;
                Outcome::Done
            }
            Command::Edited => {
                self.doc.dirty = true;
                self.doc.recount();
                self.store.set(keys::DRAFT, &self.doc.text);
                Outcome::Done
            }
            Command::AutosaveTick => self.save(true),
            Command::ToggleTheme => {
                self.prefs.toggle_theme(&mut self.store);
                Outcome::ApplyPrefs
            }
            Command::SetFontFamily(family) => {
                self.prefs.set_font_family(&mut self.store, family);
                Outcome::ApplyPrefs
            }
            Command::SetFontSize(size) => {
                self.prefs.set_font_size(&mut self.store, size);
                Outcome::ApplyPrefs
            }
            Command::ZoomIn => {
                self.prefs.zoom_in(&mut self.store);
                Outcome::ApplyPrefs
            }
            Command::ZoomOut => {
                self.prefs.zoom_out(&mut self.store);
                Outcome::ApplyPrefs
            }
            Command::ClearRecent => {
                self.recent.clear();
                self.recent.save(&mut self.store);
                Outcome::Done
            }
        }
    }

    /// Save the document. Autosaves only run for dirty, file-bound
    /// documents and never open a dialog.
    fn save(&mut self, autosave: bool) -> Outcome {
        if autosave {
            if !self.doc.dirty {
                return Outcome::Done;
            }
            return match self.doc.path.clone() {
                Some(path) => self.write_doc(path),
                None => Outcome::Done,
            };
        }

        // An empty untitled buffer has nothing worth naming a file for
        if self.doc.text.trim().is_empty() && self.doc.path.is_none() {
            return Outcome::Notice(Notice::validation("cannot save an empty document"));
        }

        match self.doc.path.clone() {
            Some(path) => self.write_doc(path),
            None => Outcome::PickSavePath,
        }
    }

    fn read_into_doc(&mut self, path: PathBuf) -> Outcome {
        match self.files.read_text(&path) {
            Ok(text) => {
                self.doc.load(path.clone(), text);
                self.remember(path);
                Outcome::Done
            }
            Err(err) => Outcome::Notice(Notice::io(format!("failed to open file: {}", err))),
        }
    }

    fn write_doc(&mut self, path: PathBuf) -> Outcome {
        match self.files.write_text(&path, &self.doc.text) {
            Ok(()) => {
                let newly_bound = self.doc.path.as_deref() != Some(path.as_path());
                self.doc.mark_saved(path.clone());
                self.store.remove(keys::DRAFT);
                if newly_bound {
                    self.remember(path);
                }
                Outcome::Done
            }
            Err(err) => Outcome::Notice(Notice::io(format!("failed to save file: {}", err))),
        }
    }

    fn remember(&mut self, path: PathBuf) {
        self.recent.remember(path);
        self.recent.save(&mut self.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padcore::storage::MemPrefStore;
    use std::collections::BTreeMap;
    use std::io;
    use std::path::Path;

    #[derive(Default)]
    struct FakeFiles {
        contents: BTreeMap<PathBuf, String>,
        writes: Vec<(PathBuf, String)>,
        fail_writes: bool,
    }

    impl FileAccess for FakeFiles {
        fn read_text(&self, path: &Path) -> io::Result<String> {
            self.contents
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write_text(&mut self, path: &Path, text: &str) -> io::Result<()> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.contents.insert(path.to_path_buf(), text.to_string());
            self.writes.push((path.to_path_buf(), text.to_string()));
            Ok(())
        }
    }

    fn session() -> Session<FakeFiles, MemPrefStore> {
        Session::start(FakeFiles::default(), MemPrefStore::new())
    }

    fn type_text(s: &mut Session<FakeFiles, MemPrefStore>, text: &str) {
        s.text_mut().push_str(text);
        s.apply(Command::Edited);
    }

    #[test]
    fn test_new_on_clean_document_resets_without_prompt() {
        let mut s = session();
        assert_eq!(s.apply(Command::New), Outcome::Done);
        assert!(s.doc().text.is_empty());
        assert!(!s.doc().dirty);
    }

    #[test]
    fn test_new_on_dirty_document_asks_first() {
        let mut s = session();
        type_text(&mut s, "precious words");

        assert_eq!(s.apply(Command::New), Outcome::ConfirmDiscard);
        assert_eq!(s.doc().text, "precious words");

        assert_eq!(s.apply(Command::DiscardConfirmed), Outcome::Done);
        assert!(s.doc().text.is_empty());
        assert!(!s.doc().dirty);
    }

    #[test]
    fn test_discard_cancelled_keeps_text() {
        let mut s = session();
        type_text(&mut s, "precious words");

        assert_eq!(s.apply(Command::New), Outcome::ConfirmDiscard);
        assert_eq!(s.apply(Command::DiscardCancelled), Outcome::Done);
        assert_eq!(s.doc().text, "precious words");
        assert!(s.doc().dirty);
    }

    #[test]
    fn test_open_on_dirty_document_asks_then_picks() {
        let mut s = session();
        type_text(&mut s, "unsaved");

        assert_eq!(s.apply(Command::Open), Outcome::ConfirmDiscard);
        assert_eq!(s.apply(Command::DiscardConfirmed), Outcome::PickOpenPath);
    }

    #[test]
    fn test_open_on_clean_document_picks_directly() {
        let mut s = session();
        assert_eq!(s.apply(Command::Open), Outcome::PickOpenPath);
    }

    #[test]
    fn test_open_picked_loads_and_forces_clean() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "from disk".to_string());

        let outcome = s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(s.doc().text, "from disk");
        assert_eq!(s.doc().path.as_deref(), Some(Path::new("/docs/a.txt")));
        assert!(!s.doc().dirty);
        assert_eq!(s.recent().paths, vec![PathBuf::from("/docs/a.txt")]);
    }

    #[test]
    fn test_open_failure_reports_and_keeps_state() {
        let mut s = session();
        type_text(&mut s, "still here");

        let outcome = s.apply(Command::OpenPicked(PathBuf::from("/docs/missing.txt")));
        match outcome {
            Outcome::Notice(notice) => {
                assert_eq!(notice.kind, NoticeKind::IoError);
                assert!(notice.message.starts_with("failed to open file:"));
            }
            other => panic!("expected notice, got {:?}", other),
        }
        assert_eq!(s.doc().text, "still here");
        assert!(s.recent().paths.is_empty());
    }

    #[test]
    fn test_open_path_honors_dirty_check() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/drop.md"), "dropped".to_string());
        type_text(&mut s, "working");

        let target = PathBuf::from("/docs/drop.md");
        assert_eq!(s.apply(Command::OpenPath(target)), Outcome::ConfirmDiscard);
        assert_eq!(s.apply(Command::DiscardConfirmed), Outcome::Done);
        assert_eq!(s.doc().text, "dropped");
        assert!(!s.doc().dirty);
    }

    #[test]
    fn test_save_unbound_prompts_then_writes() {
        let mut s = session();
        type_text(&mut s, "hello");

        assert_eq!(s.apply(Command::Save), Outcome::PickSavePath);

        let target = PathBuf::from("/docs/hello.txt");
        assert_eq!(s.apply(Command::SavePicked(target.clone())), Outcome::Done);
        assert_eq!(s.files.writes, vec![(target.clone(), "hello".to_string())]);
        assert_eq!(s.doc().path.as_deref(), Some(target.as_path()));
        assert!(!s.doc().dirty);
    }

    #[test]
    fn test_save_empty_unbound_is_rejected() {
        let mut s = session();
        let outcome = s.apply(Command::Save);
        match outcome {
            Outcome::Notice(notice) => {
                assert_eq!(notice.kind, NoticeKind::Validation);
                assert_eq!(notice.message, "cannot save an empty document");
            }
            other => panic!("expected notice, got {:?}", other),
        }

        // Whitespace counts as empty here
        type_text(&mut s, "   \n ");
        match s.apply(Command::Save) {
            Outcome::Notice(notice) => assert_eq!(notice.kind, NoticeKind::Validation),
            other => panic!("expected notice, got {:?}", other),
        }
        assert!(s.files.writes.is_empty());
    }

    #[test]
    fn test_save_bound_writes_in_place() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "v1".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        type_text(&mut s, " v2");

        assert_eq!(s.apply(Command::Save), Outcome::Done);
        assert_eq!(
            s.files.writes,
            vec![(PathBuf::from("/docs/a.txt"), "v1 v2".to_string())]
        );
        assert!(!s.doc().dirty);
    }

    #[test]
    fn test_save_empty_bound_is_allowed() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "old".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        s.text_mut().clear();
        s.apply(Command::Edited);

        assert_eq!(s.apply(Command::Save), Outcome::Done);
        assert_eq!(
            s.files.writes,
            vec![(PathBuf::from("/docs/a.txt"), String::new())]
        );
    }

    #[test]
    fn test_save_as_always_prompts() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "text".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));

        assert_eq!(s.apply(Command::SaveAs), Outcome::PickSavePath);

        let copy = PathBuf::from("/docs/b.txt");
        assert_eq!(s.apply(Command::SavePicked(copy.clone())), Outcome::Done);
        assert_eq!(s.doc().path.as_deref(), Some(copy.as_path()));
        assert_eq!(s.recent().paths[0], copy);
    }

    #[test]
    fn test_save_failure_keeps_dirty() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "v1".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        type_text(&mut s, " v2");
        s.files.fail_writes = true;

        match s.apply(Command::Save) {
            Outcome::Notice(notice) => {
                assert_eq!(notice.kind, NoticeKind::IoError);
                assert!(notice.message.starts_with("failed to save file:"));
            }
            other => panic!("expected notice, got {:?}", other),
        }
        assert!(s.doc().dirty);
    }

    #[test]
    fn test_autosave_requires_a_path() {
        let mut s = session();
        type_text(&mut s, "unbound");

        assert_eq!(s.apply(Command::AutosaveTick), Outcome::Done);
        assert!(s.files.writes.is_empty());
        assert!(s.doc().dirty);
    }

    #[test]
    fn test_autosave_writes_when_bound_and_dirty() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "v1".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        type_text(&mut s, " more");

        assert_eq!(s.apply(Command::AutosaveTick), Outcome::Done);
        assert_eq!(
            s.files.writes,
            vec![(PathBuf::from("/docs/a.txt"), "v1 more".to_string())]
        );
        assert!(!s.doc().dirty);
    }

    #[test]
    fn test_autosave_skips_clean_documents() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "v1".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));

        assert_eq!(s.apply(Command::AutosaveTick), Outcome::Done);
        assert!(s.files.writes.is_empty());
    }

    #[test]
    fn test_edit_mirrors_draft_snapshot() {
        let mut s = session();
        type_text(&mut s, "two words");

        assert!(s.doc().dirty);
        assert_eq!(s.doc().counts().words, 2);
        assert_eq!(s.store.get(keys::DRAFT).as_deref(), Some("two words"));
    }

    #[test]
    fn test_save_clears_draft_snapshot() {
        let mut s = session();
        type_text(&mut s, "keep me");
        s.apply(Command::Save);
        s.apply(Command::SavePicked(PathBuf::from("/docs/k.txt")));

        assert_eq!(s.store.get(keys::DRAFT), None);
    }

    #[test]
    fn test_draft_restored_on_start_without_dirty() {
        let mut store = MemPrefStore::new();
        store.set(keys::DRAFT, "left over");

        let s = Session::start(FakeFiles::default(), store);
        assert_eq!(s.doc().text, "left over");
        assert!(!s.doc().dirty);
        assert_eq!(s.doc().counts().words, 2);
    }

    #[test]
    fn test_zoom_commands_persist_and_clamp() {
        let mut s = session();

        assert_eq!(s.apply(Command::ZoomIn), Outcome::ApplyPrefs);
        assert_eq!(s.prefs().font_size, 20);
        assert_eq!(s.store.get(keys::FONT_SIZE).as_deref(), Some("20"));

        s.apply(Command::SetFontSize(48));
        s.apply(Command::ZoomIn);
        assert_eq!(s.prefs().font_size, 48);

        s.apply(Command::SetFontSize(12));
        s.apply(Command::ZoomOut);
        assert_eq!(s.prefs().font_size, 12);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut s = session();

        assert_eq!(s.apply(Command::ToggleTheme), Outcome::ApplyPrefs);
        assert_eq!(s.store.get(keys::THEME).as_deref(), Some("light"));

        s.apply(Command::ToggleTheme);
        assert_eq!(s.store.get(keys::THEME).as_deref(), Some("dark"));
    }

    #[test]
    fn test_clear_recent_empties_list_and_store() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "a".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        assert_eq!(s.recent().paths.len(), 1);

        assert_eq!(s.apply(Command::ClearRecent), Outcome::Done);
        assert!(s.recent().paths.is_empty());
        assert!(RecentFiles::load(&s.store).paths.is_empty());
    }

    #[test]
    fn test_autosave_does_not_reflush_recent_list() {
        let mut s = session();
        s.files
            .contents
            .insert(PathBuf::from("/docs/a.txt"), "v1".to_string());
        s.apply(Command::OpenPicked(PathBuf::from("/docs/a.txt")));
        s.apply(Command::ClearRecent);
        type_text(&mut s, " more");

        // Rewriting an already-bound path is not a new recent entry
        s.apply(Command::AutosaveTick);
        assert!(s.recent().paths.is_empty());
    }
}
