//! Blocking event loop for one dialog over one session

use super::painter::Painter;
use super::{ButtonSpec, DialogRequest, DialogState, LayoutMetrics, ResultCode, Transition};
use crate::config::FontConfig;
use crate::error::Result;
use crate::platform::DisplaySession;
use tracing::{debug, info, warn};

/// Drive `session` until the user picks a button.
///
/// The session is closed on every exit path. An error from the loop takes
/// precedence over an error from closing.
pub fn run(
    session: &mut dyn DisplaySession,
    request: &DialogRequest,
    buttons: &ButtonSpec,
    layout: &LayoutMetrics,
    fonts: &FontConfig,
) -> Result<ResultCode> {
    let outcome = event_loop(session, request, buttons, layout, fonts);
    let closed = session.close();

    match (outcome, closed) {
        (Ok(result), Ok(())) => Ok(result),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "Teardown after failed dialog also failed");
            }
            Err(e)
        }
    }
}

fn event_loop(
    session: &mut dyn DisplaySession,
    request: &DialogRequest,
    buttons: &ButtonSpec,
    layout: &LayoutMetrics,
    fonts: &FontConfig,
) -> Result<ResultCode> {
    let mut state = DialogState::new();
    let mut painter = Painter::new(fonts);

    loop {
        let event = session.next_event()?;
        match state.handle(&event, buttons, layout) {
            Transition::Stay => {}
            Transition::Redraw => {
                debug!(?event, focused = state.focused(), "Redrawing dialog");
                painter.redraw(session, request, buttons, layout, &state)?;
            }
            Transition::Close(result) => {
                info!(?event, %result, "Dialog answered");
                return Ok(result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontConfig, LayoutConfig};
    use crate::dialog::{ButtonSet, DialogEvent, Icon, Key};
    use crate::error::DialogError;
    use crate::labels::{BuiltinLabels, LabelSource};
    use crate::platform::scripted::{DrawOp, ScriptedSession};

    fn fixture(set: ButtonSet) -> (DialogRequest, ButtonSpec, LayoutMetrics) {
        let request = DialogRequest::new("caption", "hello\nworld", set, Icon::Info);
        let spec = ButtonSpec::new(set, &BuiltinLabels.resolve("en"));
        let layout = LayoutMetrics::compute(&request, &spec, &LayoutConfig::default());
        (request, spec, layout)
    }

    #[test]
    fn test_session_closed_after_answer() {
        let (request, spec, layout) = fixture(ButtonSet::OkCancel);
        let mut session = ScriptedSession::new(vec![
            DialogEvent::Expose,
            DialogEvent::KeyPress { key: Key::Escape, shift: false },
        ]);

        let result = run(&mut session, &request, &spec, &layout, &FontConfig::default()).unwrap();
        assert_eq!(result, ResultCode::Cancel);
        assert_eq!(session.close_count(), 1);
    }

    #[test]
    fn test_first_exposure_draws_text_and_buttons() {
        let (request, spec, layout) = fixture(ButtonSet::OkCancel);
        let mut session = ScriptedSession::new(vec![
            DialogEvent::Expose,
            DialogEvent::KeyPress { key: Key::Enter, shift: false },
        ]);
        run(&mut session, &request, &spec, &layout, &FontConfig::default()).unwrap();

        let texts = session.texts();
        assert!(texts.contains(&"hello".to_string()));
        assert!(texts.contains(&"world".to_string()));
        assert!(texts.contains(&"Ok".to_string()));
        assert!(texts.contains(&"Cancel".to_string()));
        assert_eq!(session.redraws(), 1);
    }

    #[test]
    fn test_font_fallback_then_failure() {
        let (request, spec, layout) = fixture(ButtonSet::Ok);
        let fonts = FontConfig::default();

        let mut session = ScriptedSession::new(vec![
            DialogEvent::Expose,
            DialogEvent::KeyPress { key: Key::Enter, shift: false },
        ])
        .with_fonts(&[fonts.fallback.as_str()]);
        assert_eq!(
            run(&mut session, &request, &spec, &layout, &fonts).unwrap(),
            ResultCode::Confirm
        );
        assert_eq!(session.font_attempts(), vec![fonts.primary.clone(), fonts.fallback.clone()]);

        let mut session = ScriptedSession::new(vec![DialogEvent::Expose]).with_fonts(&[]);
        let err = run(&mut session, &request, &spec, &layout, &fonts).unwrap_err();
        assert!(matches!(err, DialogError::FontLoad { .. }));
        assert_eq!(session.close_count(), 1);
    }

    #[test]
    fn test_session_error_still_closes() {
        let (request, spec, layout) = fixture(ButtonSet::Ok);
        // Script runs dry before any answer
        let mut session = ScriptedSession::new(vec![DialogEvent::Expose]);
        let err = run(&mut session, &request, &spec, &layout, &FontConfig::default()).unwrap_err();
        assert!(matches!(err, DialogError::Protocol { .. }));
        assert_eq!(session.close_count(), 1);
    }

    #[test]
    fn test_focused_button_is_inverted() {
        let (request, spec, layout) = fixture(ButtonSet::YesNo);
        let mut session = ScriptedSession::new(vec![
            DialogEvent::Expose,
            DialogEvent::KeyPress { key: Key::Tab, shift: false },
            DialogEvent::KeyPress { key: Key::Enter, shift: false },
        ]);
        let result = run(&mut session, &request, &spec, &layout, &FontConfig::default()).unwrap();
        assert_eq!(result, ResultCode::No);
        assert_eq!(session.redraws(), 2);

        let no_rect = layout.buttons[1].rect;
        let last_fill = session
            .ops()
            .iter()
            .rev()
            .find_map(|op| match op {
                DrawOp::Fill { rect, color } if *rect == no_rect => Some(*color),
                _ => None,
            });
        assert_eq!(last_fill, Some(crate::platform::Color::BLACK));
    }
}
