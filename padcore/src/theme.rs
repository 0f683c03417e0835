//! plainpad theme — flat panels, 1px outlines, light and dark.
//!
//! Both palettes share the same geometry (no rounding, hairline
//! strokes); only the colors swap. The editor's font preference is
//! resolved at the text-edit callsite via [`editor_font`], so the
//! chrome keeps its own sizes regardless of the editor font.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Which of the two palettes is active. The toggle is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Light,
    Dark,
}

impl ThemeKind {
    /// The other palette.
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }

    /// Stable name used as the stored preference value.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    /// Parse a stored preference value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeKind::Light),
            "dark" => Some(ThemeKind::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeKind::Light => Palette {
                bg: Color32::from_rgb(248, 248, 248),
                panel: Color32::from_rgb(255, 255, 255),
                text: Color32::from_rgb(24, 24, 24),
                outline: Color32::from_rgb(32, 32, 32),
                hover: Color32::from_rgb(235, 235, 235),
                selection: Color32::from_rgb(200, 200, 200),
            },
            ThemeKind::Dark => Palette {
                bg: Color32::from_rgb(24, 24, 24),
                panel: Color32::from_rgb(32, 32, 32),
                text: Color32::from_rgb(224, 224, 224),
                outline: Color32::from_rgb(160, 160, 160),
                hover: Color32::from_rgb(48, 48, 48),
                selection: Color32::from_rgb(80, 80, 80),
            },
        }
    }
}

/// The handful of colors a palette provides.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color32,
    pub panel: Color32,
    pub text: Color32,
    pub outline: Color32,
    pub hover: Color32,
    pub selection: Color32,
}

/// Theme configuration for plainpad windows.
pub struct PadTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for PadTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl PadTheme {
    /// Apply the theme with the given palette to an egui context.
    pub fn apply(&self, ctx: &egui::Context, kind: ThemeKind) {
        let p = kind.palette();
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = match kind {
            ThemeKind::Light => Visuals::light(),
            ThemeKind::Dark => Visuals::dark(),
        };

        visuals.window_fill = p.panel;
        visuals.panel_fill = p.panel;
        visuals.faint_bg_color = p.hover;
        visuals.extreme_bg_color = p.bg;
        visuals.override_text_color = Some(p.text);

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;

        visuals.window_stroke = Stroke::new(1.0, p.outline);

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = p.panel;
            ws.weak_bg_fill = p.panel;
            ws.bg_stroke = Stroke::new(1.0, p.outline);
            ws.fg_stroke = Stroke::new(1.0, p.text);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive);
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);

        visuals.widgets.hovered.bg_fill = p.hover;
        visuals.widgets.hovered.weak_bg_fill = p.hover;
        visuals.widgets.active.bg_fill = p.selection;
        visuals.widgets.active.weak_bg_fill = p.selection;

        visuals.selection.bg_fill = p.selection;
        visuals.selection.stroke = Stroke::new(1.0, p.outline);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Title bar: panel fill, 1px outline.
    pub fn title_bar_frame(kind: ThemeKind) -> egui::Frame {
        let p = kind.palette();
        egui::Frame::none()
            .fill(p.panel)
            .stroke(Stroke::new(1.0, p.outline))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// Menu bar styling helper.
pub fn menu_bar(ui: &mut egui::Ui, kind: ThemeKind, add_contents: impl FnOnce(&mut egui::Ui)) {
    let p = kind.palette();
    egui::Frame::none()
        .fill(p.panel)
        .stroke(Stroke::new(1.0, p.outline))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}

/// Map the stored font-family preference to a concrete egui font.
/// "monospace" selects the fixed-width face; anything else, including
/// the "default" sentinel, falls back to the proportional face.
pub fn editor_font(family: &str, size: f32) -> FontId {
    if family == "monospace" {
        FontId::monospace(size)
    } else {
        FontId::proportional(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_kind_round_trip() {
        assert_eq!(ThemeKind::parse("dark"), Some(ThemeKind::Dark));
        assert_eq!(ThemeKind::parse("light"), Some(ThemeKind::Light));
        assert_eq!(ThemeKind::parse("sepia"), None);
        assert_eq!(ThemeKind::parse(ThemeKind::Dark.as_str()), Some(ThemeKind::Dark));
    }

    #[test]
    fn test_toggle_is_binary() {
        assert_eq!(ThemeKind::Dark.toggled(), ThemeKind::Light);
        assert_eq!(ThemeKind::Dark.toggled().toggled(), ThemeKind::Dark);
    }

    #[test]
    fn test_editor_font_families() {
        assert_eq!(editor_font("monospace", 18.0).family, FontFamily::Monospace);
        assert_eq!(editor_font("default", 18.0).family, FontFamily::Proportional);
        assert_eq!(editor_font("Comic Sans", 18.0).family, FontFamily::Proportional);
        assert_eq!(editor_font("default", 18.0).size, 18.0);
    }
}
