// ── Win32 message box ─────────────────────────────────────────────────────────
//
// Windows already ships a modal message box, so there is no session here:
// MessageBoxW runs its own loop and its buttons are captioned by the OS in
// the user's language.

#![allow(unsafe_code)]

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::HWND,
        UI::WindowsAndMessaging::{
            MessageBoxW, IDCANCEL, IDNO, IDOK, IDYES, MB_ICONERROR, MB_ICONINFORMATION,
            MB_ICONQUESTION, MB_ICONWARNING, MB_OK, MB_OKCANCEL, MB_SETFOREGROUND, MB_YESNO,
            MESSAGEBOX_RESULT, MESSAGEBOX_STYLE,
        },
    },
};

use super::NativeBackend;
use crate::dialog::{ButtonSet, ButtonSpec, DialogRequest, Icon, ResultCode};
use crate::error::Result;
use tracing::info;

pub struct WindowsBackend;

fn style(buttons: ButtonSet, icon: Icon) -> MESSAGEBOX_STYLE {
    let buttons = match buttons {
        ButtonSet::Ok => MB_OK,
        ButtonSet::OkCancel => MB_OKCANCEL,
        ButtonSet::YesNo => MB_YESNO,
    };
    let icon = match icon {
        Icon::None => MESSAGEBOX_STYLE(0),
        Icon::Info | Icon::Success => MB_ICONINFORMATION,
        Icon::Warning => MB_ICONWARNING,
        Icon::Error | Icon::Stop => MB_ICONERROR,
        Icon::Question => MB_ICONQUESTION,
    };
    buttons | icon | MB_SETFOREGROUND
}

fn map_result(result: MESSAGEBOX_RESULT) -> ResultCode {
    match result {
        IDOK => ResultCode::Confirm,
        IDCANCEL => ResultCode::Cancel,
        IDYES => ResultCode::Yes,
        IDNO => ResultCode::No,
        _ => ResultCode::None,
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

impl NativeBackend for WindowsBackend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn show(&self, request: &DialogRequest, _buttons: &ButtonSpec) -> Result<ResultCode> {
        let text = wide(&request.text);
        let caption = wide(&request.caption);

        // SAFETY: both buffers are null-terminated UTF-16 and outlive the call.
        // HWND::default() (null) means the box has no owner window.
        let raw = unsafe {
            MessageBoxW(
                HWND::default(),
                PCWSTR(text.as_ptr()),
                PCWSTR(caption.as_ptr()),
                style(request.buttons, request.icon),
            )
        };

        let result = map_result(raw);
        info!(raw = raw.0, %result, "MessageBoxW returned");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_combines_buttons_and_icon() {
        let s = style(ButtonSet::YesNo, Icon::Question);
        assert_eq!(s.0 & MB_YESNO.0, MB_YESNO.0);
        assert_eq!(s.0 & MB_ICONQUESTION.0, MB_ICONQUESTION.0);
    }

    #[test]
    fn test_unknown_return_is_none() {
        assert_eq!(map_result(IDOK), ResultCode::Confirm);
        assert_eq!(map_result(IDNO), ResultCode::No);
        assert_eq!(map_result(MESSAGEBOX_RESULT(0)), ResultCode::None);
    }
}
