//! Shared widgets — flat rectangles, colors taken from the active visuals.

use egui::{Response, Ui, Widget};

/// Toolbar separator (vertical 1px line).
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            ui.visuals().widgets.noninteractive.bg_stroke,
        );
    }
}

/// Status bar: panel fill, 1px outline.
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(ui.visuals().panel_fill)
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(text);
        });
}

/// File list item for the open/save dialog.
/// Directories render with a trailing slash; the selected row gets the
/// selection fill.
pub struct FileListItem<'a> {
    name: &'a str,
    is_dir: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_dir: bool) -> Self {
        Self { name, is_dir, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for FileListItem<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().interact_selectable(&response, self.selected);
            let painter = ui.painter();

            if self.selected {
                painter.rect_filled(rect, 0.0, ui.visuals().selection.bg_fill);
            } else if response.hovered() {
                painter.rect_filled(rect, 0.0, visuals.bg_fill);
            }

            let label = if self.is_dir {
                format!("{}/", self.name)
            } else {
                self.name.to_string()
            };
            painter.text(
                egui::pos2(rect.min.x + 6.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                label,
                egui::FontId::proportional(12.0),
                visuals.text_color(),
            );
        }

        response
    }
}
