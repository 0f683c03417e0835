//! padcore — shared library for the plainpad editor

pub mod dialog;
pub mod repaint;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use theme::{PadTheme, ThemeKind};
