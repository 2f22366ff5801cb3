//! Repaints the whole dialog through session primitives

use super::{ButtonSpec, DialogRequest, DialogState, Icon, LayoutMetrics};
use crate::config::FontConfig;
use crate::error::{DialogError, Result};
use crate::platform::{Color, DisplaySession, Rect};
use tracing::{debug, warn};

const BACKGROUND: Color = Color::WHITE;
const FOREGROUND: Color = Color::BLACK;

/// Square colour and glyph for each icon
fn icon_style(icon: Icon) -> Option<(Color, &'static str)> {
    match icon {
        Icon::None => None,
        Icon::Info => Some((Color::rgb(0x1e, 0x6f, 0xd9), "i")),
        Icon::Warning => Some((Color::rgb(0xe6, 0xa1, 0x17), "!")),
        Icon::Error => Some((Color::rgb(0xd9, 0x30, 0x25), "x")),
        Icon::Question => Some((Color::rgb(0x1e, 0x6f, 0xd9), "?")),
        Icon::Stop => Some((Color::rgb(0xa0, 0x10, 0x10), "!")),
        Icon::Success => Some((Color::rgb(0x2e, 0x9e, 0x4f), "+")),
    }
}

pub struct Painter<'a> {
    fonts: &'a FontConfig,
    font_ready: bool,
}

impl<'a> Painter<'a> {
    pub fn new(fonts: &'a FontConfig) -> Self {
        Self {
            fonts,
            font_ready: false,
        }
    }

    /// Primary font, then the fallback, then give up
    fn ensure_font(&mut self, session: &mut dyn DisplaySession) -> Result<()> {
        if self.font_ready {
            return Ok(());
        }

        if session.load_font(&self.fonts.primary)? {
            debug!(font = %self.fonts.primary, "Loaded primary font");
        } else {
            warn!(font = %self.fonts.primary, fallback = %self.fonts.fallback, "Primary font unavailable");
            if !session.load_font(&self.fonts.fallback)? {
                return Err(DialogError::FontLoad {
                    primary: self.fonts.primary.clone(),
                    fallback: self.fonts.fallback.clone(),
                });
            }
        }

        self.font_ready = true;
        Ok(())
    }

    pub fn redraw(
        &mut self,
        session: &mut dyn DisplaySession,
        request: &DialogRequest,
        buttons: &ButtonSpec,
        layout: &LayoutMetrics,
        state: &DialogState,
    ) -> Result<()> {
        self.ensure_font(session)?;

        session.fill_rect(Rect::new(0, 0, layout.width, layout.height), BACKGROUND)?;

        if let (Some(rect), Some((color, glyph))) = (layout.icon, icon_style(request.icon)) {
            session.fill_rect(rect, color)?;
            let x = rect.x + rect.width as i32 / 2 - 4;
            let y = rect.y + rect.height as i32 / 2 + 5;
            session.draw_text(x, y, glyph, Color::WHITE, color)?;
        }

        for (line, baseline) in request.lines().iter().zip(&layout.line_baselines) {
            if !line.is_empty() {
                session.draw_text(layout.text_x, *baseline, line, FOREGROUND, BACKGROUND)?;
            }
        }

        for (i, (entry, geometry)) in buttons.iter().zip(&layout.buttons).enumerate() {
            let rect = geometry.rect;
            let (fill, ink) = if i == state.focused() {
                (FOREGROUND, BACKGROUND)
            } else {
                (BACKGROUND, FOREGROUND)
            };

            session.fill_rect(rect, fill)?;
            session.stroke_rect(rect, FOREGROUND)?;
            if i == state.focused() {
                let inner = Rect::new(
                    rect.x + 2,
                    rect.y + 2,
                    rect.width.saturating_sub(4),
                    rect.height.saturating_sub(4),
                );
                session.stroke_rect(inner, ink)?;
            }
            session.draw_text(geometry.label_x, geometry.baseline, &entry.label, ink, fill)?;
        }

        session.flush()
    }
}
