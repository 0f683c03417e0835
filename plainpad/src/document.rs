//! Document model: the text buffer plus where it lives on disk and
//! whether it has unsaved edits.

use std::path::{Path, PathBuf};

/// Word and character counts for the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub words: usize,
    pub chars: usize,
}

/// An open document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub text: String,
    pub path: Option<PathBuf>,
    pub dirty: bool,
    counts: Counts,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Back to an empty untitled document.
    pub fn reset(&mut self) {
        self.text.clear();
        self.path = None;
        self.dirty = false;
        self.recount();
    }

    /// Replace the buffer with text read from `path`. The document is
    /// clean afterwards.
    pub fn load(&mut self, path: PathBuf, text: String) {
        self.text = text;
        self.path = Some(path);
        self.dirty = false;
        self.recount();
    }

    /// Bind the document to `path` and mark it clean.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.dirty = false;
    }

    /// Recompute counts after the buffer changed. Words are
    /// whitespace-separated runs, so an all-whitespace buffer has
    /// none.
    pub fn recount(&mut self) {
        self.counts = Counts {
            words: self.text.split_whitespace().count(),
            chars: self.text.chars().count(),
        };
    }

    /// Filename without directory, or "untitled".
    pub fn file_title(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Title for the window chrome, starred when dirty.
    pub fn display_title(&self) -> String {
        if self.dirty {
            format!("{}*", self.file_title())
        } else {
            self.file_title()
        }
    }

    /// Initial filename for the save dialog.
    pub fn suggested_filename(&self) -> String {
        let mut name = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        if !name.ends_with(".txt") && !name.ends_with(".md") {
            name.push_str(".txt");
        }
        name
    }
}
