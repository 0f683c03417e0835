//! The plainpad application shell: panels, menus, modals and the
//! wiring between egui and the session.

use crate::prefs::{FONT_FAMILIES, FONT_SIZE_MAX, FONT_SIZE_MIN, ZOOM_STEP};
use crate::session::{Command, Notice, NoticeKind, Outcome, Session, AUTOSAVE_PERIOD};
use padcore::dialog::{DialogChoice, DialogMode, FileDialog};
use padcore::repaint::FrameScheduler;
use padcore::storage::{documents_dir, JsonPrefStore, LocalFiles};
use padcore::theme::{editor_font, menu_bar, PadTheme};
use padcore::widgets::{status_bar, toolbar_separator};
use std::path::PathBuf;
use std::time::Instant;

/// Extensions offered by the open dialog and accepted on drag-drop.
const OPEN_EXTENSIONS: [&str; 2] = ["txt", "md"];

pub struct PlainPadApp {
    session: Session<LocalFiles, JsonPrefStore>,
    dialog: Option<FileDialog>,
    show_discard_confirm: bool,
    notice: Option<Notice>,
    show_about: bool,
    show_close_confirm: bool,
    close_confirmed: bool,
    focus_editor: bool,
    last_title: String,
    last_autosave: Instant,
    scheduler: FrameScheduler,
}

impl PlainPadApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = JsonPrefStore::open_default("plainpad");
        let session = Session::start(LocalFiles, store);
        PadTheme::default().apply(&cc.egui_ctx, session.prefs().theme);

        Self {
            session,
            dialog: None,
            show_discard_confirm: false,
            notice: None,
            show_about: false,
            show_close_confirm: false,
            close_confirmed: false,
            focus_editor: true,
            last_title: String::new(),
            last_autosave: Instant::now(),
            scheduler: FrameScheduler::new(),
        }
    }

    // ---------------------------------------------------------------
    // Command dispatch
    // ---------------------------------------------------------------

    /// Feed a command through the session and act on the outcome.
    fn run(&mut self, ctx: &egui::Context, cmd: Command) {
        let refocus = matches!(
            cmd,
            Command::New
                | Command::OpenPath(_)
                | Command::OpenPicked(_)
                | Command::DiscardConfirmed
                | Command::ToggleTheme
                | Command::SetFontFamily(_)
                | Command::SetFontSize(_)
                | Command::ZoomIn
                | Command::ZoomOut
        );

        let outcome = self.session.apply(cmd);
        self.handle_outcome(ctx, outcome);

        if refocus {
            self.focus_editor = true;
        }
    }

    fn handle_outcome(&mut self, ctx: &egui::Context, outcome: Outcome) {
        match outcome {
            Outcome::Done => {}
            Outcome::PickOpenPath => {
                self.dialog = Some(FileDialog::open_file(documents_dir(), &OPEN_EXTENSIONS));
            }
            Outcome::PickSavePath => {
                let suggested = self.session.doc().suggested_filename();
                self.dialog = Some(FileDialog::save_file(documents_dir(), &suggested));
            }
            Outcome::ConfirmDiscard => self.show_discard_confirm = true,
            Outcome::Notice(notice) => self.notice = Some(notice),
            Outcome::ApplyPrefs => {
                PadTheme::default().apply(ctx, self.session.prefs().theme);
            }
        }
    }

    fn modal_open(&self) -> bool {
        self.dialog.is_some()
            || self.show_discard_confirm
            || self.notice.is_some()
            || self.show_about
            || self.show_close_confirm
    }

    // ---------------------------------------------------------------
    // Input and timers
    // ---------------------------------------------------------------

    /// Consume shortcut key events before the editor sees them.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let mut cmds: Vec<Command> = Vec::new();

        ctx.input_mut(|i| {
            let events = std::mem::take(&mut i.events);
            for event in events {
                let mut handled = false;
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = &event
                {
                    if modifiers.command {
                        handled = true;
                        match key {
                            egui::Key::N => cmds.push(Command::New),
                            egui::Key::O => cmds.push(Command::Open),
                            egui::Key::S if modifiers.shift => cmds.push(Command::SaveAs),
                            egui::Key::S => cmds.push(Command::Save),
                            egui::Key::Plus | egui::Key::Equals => cmds.push(Command::ZoomIn),
                            egui::Key::Minus => cmds.push(Command::ZoomOut),
                            _ => handled = false,
                        }
                    }
                }
                if !handled {
                    i.events.push(event);
                }
            }
        });

        for cmd in cmds {
            self.run(ctx, cmd);
        }
    }

    /// Fire the autosave tick when due and schedule the next wakeup.
    fn pump_autosave(&mut self, ctx: &egui::Context) {
        let elapsed = self.last_autosave.elapsed();
        if elapsed >= AUTOSAVE_PERIOD {
            self.last_autosave = Instant::now();
            self.run(ctx, Command::AutosaveTick);
            self.scheduler.wake_within(AUTOSAVE_PERIOD);
        } else {
            self.scheduler.wake_within(AUTOSAVE_PERIOD - elapsed);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        for path in dropped {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if OPEN_EXTENSIONS.contains(&ext.as_str()) {
                self.run(ctx, Command::OpenPath(path));
                break;
            }
        }
    }

    // ---------------------------------------------------------------
    // UI rendering
    // ---------------------------------------------------------------

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let mut cmds: Vec<Command> = Vec::new();
        let theme = self.session.prefs().theme;

        menu_bar(ui, theme, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("new            ⌘N").clicked() {
                    cmds.push(Command::New);
                    ui.close_menu();
                }
                if ui.button("open…          ⌘O").clicked() {
                    cmds.push(Command::Open);
                    ui.close_menu();
                }
                ui.menu_button("open recent", |ui| {
                    if self.session.recent().paths.is_empty() {
                        ui.weak("empty");
                    } else {
                        for path in &self.session.recent().paths {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_else(|| path.to_string_lossy().to_string());
                            if ui.button(name).on_hover_text(path.to_string_lossy()).clicked() {
                                cmds.push(Command::OpenPath(path.clone()));
                                ui.close_menu();
                            }
                        }
                        ui.separator();
                        if ui.button("clear recent").clicked() {
                            cmds.push(Command::ClearRecent);
                            ui.close_menu();
                        }
                    }
                });
                ui.separator();
                if ui.button("save           ⌘S").clicked() {
                    cmds.push(Command::Save);
                    ui.close_menu();
                }
                if ui.button("save as…      ⇧⌘S").clicked() {
                    cmds.push(Command::SaveAs);
                    ui.close_menu();
                }
            });

            ui.menu_button("view", |ui| {
                if ui.button("zoom in        ⌘+").clicked() {
                    cmds.push(Command::ZoomIn);
                    ui.close_menu();
                }
                if ui.button("zoom out       ⌘-").clicked() {
                    cmds.push(Command::ZoomOut);
                    ui.close_menu();
                }
            });

            ui.menu_button("help", |ui| {
                if ui.button("about plainpad").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });

            toolbar_separator(ui);

            let theme_label = format!("theme: {}", theme.as_str());
            if ui.button(theme_label).on_hover_text("switch theme").clicked() {
                cmds.push(Command::ToggleTheme);
            }

            toolbar_separator(ui);

            let family = self.session.prefs().font_family.clone();
            egui::ComboBox::from_id_source("font_family")
                .selected_text(family.clone())
                .width(110.0)
                .show_ui(ui, |ui| {
                    for option in FONT_FAMILIES {
                        if ui.selectable_label(family == option, option).clicked() {
                            cmds.push(Command::SetFontFamily(option.to_string()));
                        }
                    }
                });

            let size = self.session.prefs().font_size;
            egui::ComboBox::from_id_source("font_size")
                .selected_text(size.to_string())
                .width(56.0)
                .show_ui(ui, |ui| {
                    for option in (FONT_SIZE_MIN..=FONT_SIZE_MAX).step_by(ZOOM_STEP as usize) {
                        if ui.selectable_label(size == option, option.to_string()).clicked() {
                            cmds.push(Command::SetFontSize(option));
                        }
                    }
                });
        });

        if !cmds.is_empty() {
            let ctx = ui.ctx().clone();
            for cmd in cmds {
                self.run(&ctx, cmd);
            }
        }
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let prefs = self.session.prefs();
        let font = editor_font(&prefs.font_family, prefs.font_size as f32);
        let mut edited = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::multiline(self.session.text_mut())
                        .font(font)
                        .desired_width(f32::INFINITY)
                        .desired_rows(30)
                        .lock_focus(true)
                        .frame(false),
                );

                if response.changed() {
                    edited = true;
                }

                if self.focus_editor && !self.modal_open() {
                    response.request_focus();
                    self.focus_editor = false;
                }
            });

        if edited {
            let ctx = ui.ctx().clone();
            self.run(&ctx, Command::Edited);
        }
    }

    fn process_dialog(&mut self, ctx: &egui::Context) {
        let (mode, choice) = match self.dialog.as_mut() {
            Some(dialog) => (dialog.mode(), dialog.show(ctx)),
            None => return,
        };

        match choice {
            DialogChoice::Pending => {}
            DialogChoice::Cancelled => {
                self.dialog = None;
                self.run(ctx, Command::PickCancelled);
                self.focus_editor = true;
            }
            DialogChoice::Picked(path) => {
                self.dialog = None;
                let cmd = match mode {
                    DialogMode::Open => Command::OpenPicked(path),
                    DialogMode::Save => Command::SavePicked(path),
                };
                self.run(ctx, cmd);
                self.focus_editor = true;
            }
        }
    }

    fn render_discard_confirm(&mut self, ctx: &egui::Context) {
        if !self.show_discard_confirm {
            return;
        }
        let mut decision: Option<Command> = None;

        egui::Window::new("discard changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("discard unsaved changes?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        decision = Some(Command::DiscardCancelled);
                    }
                    if ui.button("discard").clicked() {
                        decision = Some(Command::DiscardConfirmed);
                    }
                });
            });

        if let Some(cmd) = decision {
            self.show_discard_confirm = false;
            self.run(ctx, cmd);
        }
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let (title, message) = match &self.notice {
            Some(notice) => {
                let title = match notice.kind {
                    NoticeKind::IoError => "error",
                    NoticeKind::Validation => "notice",
                };
                (title, notice.message.clone())
            }
            None => return,
        };
        let mut dismissed = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("ok").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
            self.focus_editor = true;
        }
    }

    fn render_about(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        let mut dismissed = false;

        egui::Window::new("about")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("plainpad");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.label("a minimal plain-text editor");
                    ui.add_space(8.0);
                    if ui.button("ok").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.show_about = false;
            self.focus_editor = true;
        }
    }

    fn render_close_confirm(&mut self, ctx: &egui::Context) {
        if !self.show_close_confirm {
            return;
        }
        let mut close_without_saving = false;
        let mut cancel = false;
        let mut save_first = false;

        egui::Window::new("unsaved changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("you have unsaved changes.");
                ui.label("save before closing?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("don't save").clicked() {
                        close_without_saving = true;
                    }
                    if ui.button("cancel").clicked() {
                        cancel = true;
                    }
                    if ui.button("save").clicked() {
                        save_first = true;
                    }
                });
            });

        if close_without_saving {
            self.show_close_confirm = false;
            self.close_confirmed = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if cancel {
            self.show_close_confirm = false;
        } else if save_first {
            self.show_close_confirm = false;
            self.run(ctx, Command::Save);
            // A save that needed the dialog leaves the window open;
            // the user can close again once it finishes.
            if !self.session.doc().dirty {
                self.close_confirmed = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

impl eframe::App for PlainPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);
        self.pump_autosave(ctx);
        self.handle_dropped_files(ctx);

        let theme = self.session.prefs().theme;
        let palette = theme.palette();

        let title = self.session.doc().display_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!("{} - plainpad", title)));
            self.last_title = title;
        }

        egui::TopBottomPanel::top("menu_bar")
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.render_menu_bar(ui);
            });

        egui::TopBottomPanel::top("title_bar")
            .frame(PadTheme::title_bar_frame(theme))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(self.session.doc().display_title());
                });
            });

        let counts = self.session.doc().counts();
        let state = if self.session.doc().dirty { "unsaved" } else { "saved" };
        let status = format!("{} words, {} chars  |  {}", counts.words, counts.chars, state);
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                status_bar(ui, &status);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(palette.bg)
                    .inner_margin(egui::Margin::same(8.0)),
            )
            .show(ctx, |ui| {
                self.render_editor(ui);
            });

        self.process_dialog(ctx);
        self.render_discard_confirm(ctx);
        self.render_notice(ctx);
        self.render_about(ctx);
        self.render_close_confirm(ctx);

        if ctx.input(|i| i.viewport().close_requested())
            && self.session.doc().dirty
            && !self.close_confirmed
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_close_confirm = true;
        }

        self.scheduler.end_frame(ctx);
    }
}
