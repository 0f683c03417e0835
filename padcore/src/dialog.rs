//! In-app open/save dialog.
//!
//! Desktop file pickers are replaced by a small directory browser
//! rendered as a modal window: location row, directories-first
//! listing, filename input for saves. The caller keeps the dialog
//! around while it is open and reads the [`DialogChoice`] returned by
//! [`FileDialog::show`] each frame.

use crate::widgets::FileListItem;
use std::path::PathBuf;

/// What the dialog is being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Open,
    Save,
}

/// One row in the listing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Directory listing state behind the dialog.
#[derive(Debug, Clone)]
pub struct DirListing {
    pub dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected: Option<usize>,
    filter_extensions: Vec<String>,
}

impl DirListing {
    pub fn new(start_dir: PathBuf, filter_extensions: Vec<String>) -> Self {
        let mut listing = Self {
            dir: start_dir,
            entries: Vec::new(),
            selected: None,
            filter_extensions,
        };
        listing.refresh();
        listing
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected = None;

        // Parent directory entry
        if let Some(parent) = self.dir.parent() {
            self.entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files
                if name.starts_with('.') {
                    continue;
                }

                let is_dir = path.is_dir();

                if !is_dir && !self.filter_extensions.is_empty() {
                    let ext = path
                        .extension()
                        .map(|e| e.to_string_lossy().to_lowercase())
                        .unwrap_or_default();
                    if !self.filter_extensions.iter().any(|f| f.to_lowercase() == ext) {
                        continue;
                    }
                }

                let entry = FileEntry { name, path, is_dir };
                if entry.is_dir {
                    dirs.push(entry);
                } else {
                    files.push(entry);
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            // Directories first, then files
            self.entries.extend(dirs);
            self.entries.extend(files);
        }
    }

    pub fn enter(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }
}

/// What the dialog produced this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogChoice {
    /// Still open.
    Pending,
    /// The user picked a path.
    Picked(PathBuf),
    Cancelled,
}

/// Modal file chooser covering both open and save.
pub struct FileDialog {
    mode: DialogMode,
    listing: DirListing,
    filename: String,
}

impl FileDialog {
    /// Open-file dialog filtered to the given extensions.
    pub fn open_file(start_dir: PathBuf, extensions: &[&str]) -> Self {
        let filter = extensions.iter().map(|e| e.to_string()).collect();
        Self {
            mode: DialogMode::Open,
            listing: DirListing::new(start_dir, filter),
            filename: String::new(),
        }
    }

    /// Save-file dialog with an initial filename suggestion, unfiltered
    /// so the target directory shows everything already in it.
    pub fn save_file(start_dir: PathBuf, suggested: &str) -> Self {
        Self {
            mode: DialogMode::Save,
            listing: DirListing::new(start_dir, Vec::new()),
            filename: suggested.to_string(),
        }
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// Render the modal window; returns what the user decided.
    pub fn show(&mut self, ctx: &egui::Context) -> DialogChoice {
        let title = match self.mode {
            DialogMode::Open => "open document",
            DialogMode::Save => "save document",
        };
        let mut choice = DialogChoice::Pending;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.listing.dir.to_string_lossy().to_string());
                });

                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .show(ui, |ui| {
                        let entries = self.listing.entries.clone();
                        for (idx, entry) in entries.iter().enumerate() {
                            let selected = self.listing.selected == Some(idx);
                            let response = ui.add(
                                FileListItem::new(&entry.name, entry.is_dir).selected(selected),
                            );

                            if response.clicked() {
                                self.listing.selected = Some(idx);
                                if self.mode == DialogMode::Save && !entry.is_dir {
                                    self.filename = entry.name.clone();
                                }
                            }

                            if response.double_clicked() {
                                if entry.is_dir {
                                    self.listing.enter(entry.path.clone());
                                } else if self.mode == DialogMode::Open {
                                    choice = DialogChoice::Picked(entry.path.clone());
                                }
                            }
                        }
                    });

                if self.mode == DialogMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("filename:");
                        ui.text_edit_singleline(&mut self.filename);
                    });
                }

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        choice = DialogChoice::Cancelled;
                    }

                    let action_text = match self.mode {
                        DialogMode::Open => "open",
                        DialogMode::Save => "save",
                    };

                    if ui.button(action_text).clicked() {
                        match self.mode {
                            DialogMode::Open => {
                                if let Some(entry) = self.listing.selected_entry() {
                                    if !entry.is_dir {
                                        choice = DialogChoice::Picked(entry.path.clone());
                                    }
                                }
                            }
                            DialogMode::Save => {
                                if !self.filename.is_empty() {
                                    choice = DialogChoice::Picked(self.listing.dir.join(&self.filename));
                                }
                            }
                        }
                    }
                });
            });

        choice
    }
}
