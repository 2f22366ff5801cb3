//! Input state machine for the fallback dialog
//!
//! Pure state: events come in already decoded, transitions come out. The
//! runner decides what a transition means for the window.

use super::{ButtonSpec, LayoutMetrics, ResultCode};

/// Keys the dialog reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Other,
}

/// A native event decoded at the session boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// The window content must be repainted
    Expose,
    KeyPress { key: Key, shift: bool },
    /// Pointer button pressed at window coordinates
    ButtonPress { x: i32, y: i32 },
    /// Pointer moved to window coordinates
    Motion { x: i32, y: i32 },
    /// Anything the dialog has no use for
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    /// Window requested, first exposure not seen yet
    Opening,
    AwaitingInput,
    /// Result fixed; resources are being released
    Closing,
}

/// What the runner should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Redraw,
    Close(ResultCode),
}

/// Mutable state of one dialog while its event loop runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState {
    phase: DialogPhase,
    focused: usize,
    result: Option<ResultCode>,
}

impl Default for DialogState {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogState {
    pub fn new() -> Self {
        Self {
            phase: DialogPhase::Opening,
            focused: 0,
            result: None,
        }
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Index of the button Enter/Space would press
    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn result(&self) -> Option<ResultCode> {
        self.result
    }

    pub fn handle(
        &mut self,
        event: &DialogEvent,
        buttons: &ButtonSpec,
        layout: &LayoutMetrics,
    ) -> Transition {
        match self.phase {
            DialogPhase::Closing => Transition::Stay,
            DialogPhase::Opening => {
                if *event == DialogEvent::Expose {
                    self.phase = DialogPhase::AwaitingInput;
                    Transition::Redraw
                } else {
                    Transition::Stay
                }
            }
            DialogPhase::AwaitingInput => self.handle_input(event, buttons, layout),
        }
    }

    fn handle_input(
        &mut self,
        event: &DialogEvent,
        buttons: &ButtonSpec,
        layout: &LayoutMetrics,
    ) -> Transition {
        match *event {
            DialogEvent::Expose => Transition::Redraw,
            DialogEvent::KeyPress { key, shift } => match key {
                Key::Enter | Key::Space => match buttons.get(self.focused) {
                    Some(entry) => self.finish(entry.result),
                    None => Transition::Stay,
                },
                Key::Escape => match buttons.escape_result() {
                    Some(result) => self.finish(result),
                    None => Transition::Stay,
                },
                Key::Tab if !buttons.is_empty() => {
                    let count = buttons.len();
                    self.focused = if shift {
                        (self.focused + count - 1) % count
                    } else {
                        (self.focused + 1) % count
                    };
                    Transition::Redraw
                }
                _ => Transition::Stay,
            },
            DialogEvent::ButtonPress { x, y } => {
                match layout.hit_test(x, y).and_then(|i| buttons.get(i)) {
                    Some(entry) => self.finish(entry.result),
                    None => Transition::Stay,
                }
            }
            DialogEvent::Motion { x, y } => match layout.hit_test(x, y) {
                Some(i) if i != self.focused => {
                    self.focused = i;
                    Transition::Redraw
                }
                _ => Transition::Stay,
            },
            DialogEvent::Ignored => Transition::Stay,
        }
    }

    fn finish(&mut self, result: ResultCode) -> Transition {
        self.result = Some(result);
        self.phase = DialogPhase::Closing;
        Transition::Close(result)
    }
}
