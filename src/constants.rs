//! Fallback dialog defaults

/// Vertical distance between text baselines
pub const LINE_HEIGHT: u32 = 20;

/// Gap between window edge and content, and between content and buttons
pub const PADDING: u32 = 20;

/// Side of the square reserved for the icon
pub const ICON_SIZE: u32 = 36;

/// Gap between the icon and the text column
pub const ICON_SPACING: u32 = 10;

pub const BUTTON_HEIGHT: u32 = 30;
pub const BUTTON_WIDTH: u32 = 100;
pub const BUTTON_SPACING: u32 = 10;

/// Assumed advance of one character (no real font metrics in the fallback path)
pub const GLYPH_WIDTH: u32 = 10;

/// Core X font tried first (ISO 10646 so non-Latin labels render)
pub const PRIMARY_FONT: &str = "-misc-fixed-medium-r-normal--15-*-*-*-c-90-iso10646-1";

/// Alias every X server ships
pub const FALLBACK_FONT: &str = "fixed";

/// Core protocol limit on characters per text request
pub const MAX_TEXT_CHARS: usize = 255;

/// `_MOTIF_WM_HINTS` flag meaning "the decorations field is valid"
pub const MWM_HINTS_DECORATIONS: u32 = 1 << 1;

/// Number of 32-bit fields in a `_MOTIF_WM_HINTS` property
pub const MWM_HINTS_ELEMENTS: usize = 5;
