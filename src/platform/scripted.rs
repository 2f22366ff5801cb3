//! In-memory session that replays a fixed event script
//!
//! Records every primitive instead of drawing it, so the dialog loop can be
//! exercised without a display server. Test support only: built for this
//! crate's own tests and, outside them, behind the `test-support` feature.

use super::{Color, DisplaySession, Rect};
use crate::dialog::DialogEvent;
use crate::error::{DialogError, Result};
use std::collections::VecDeque;

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill { rect: Rect, color: Color },
    Stroke { rect: Rect, color: Color },
    Text { x: i32, y: i32, text: String, fg: Color, bg: Color },
    Flush,
}

#[derive(Debug, Default)]
pub struct ScriptedSession {
    events: VecDeque<DialogEvent>,
    /// `None` means every font name resolves
    fonts: Option<Vec<String>>,
    font_attempts: Vec<String>,
    ops: Vec<DrawOp>,
    closes: usize,
}

impl ScriptedSession {
    pub fn new(events: impl IntoIterator<Item = DialogEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Only these font names will load
    pub fn with_fonts(mut self, available: &[&str]) -> Self {
        self.fonts = Some(available.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every string drawn, in order
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Completed repaints (each ends with a flush)
    pub fn redraws(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Flush).count()
    }

    pub fn font_attempts(&self) -> Vec<String> {
        self.font_attempts.clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes
    }

    /// Events left unread
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl DisplaySession for ScriptedSession {
    fn next_event(&mut self) -> Result<DialogEvent> {
        self.events.pop_front().ok_or_else(|| DialogError::Protocol {
            op: "next_event",
            detail: "event script exhausted".to_string(),
        })
    }

    fn load_font(&mut self, name: &str) -> Result<bool> {
        self.font_attempts.push(name.to_string());
        Ok(match &self.fonts {
            Some(available) => available.iter().any(|f| f == name),
            None => true,
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Fill { rect, color });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Stroke { rect, color });
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color) -> Result<()> {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            fg,
            bg,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ops.push(DrawOp::Flush);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}
