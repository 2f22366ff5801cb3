// ── macOS message box ─────────────────────────────────────────────────────────
//
// NSAlert runs its own modal loop, like MessageBoxW. AppKit only allows it on
// the main thread, so a call from anywhere else fails with NotMainThread
// instead of showing anything. The async API always runs on a worker thread.

use objc2::MainThreadMarker;
use objc2_app_kit::{
    NSAlert, NSAlertFirstButtonReturn, NSAlertStyle, NSApplication, NSImage, NSModalResponse,
};
use objc2_foundation::NSString;

use super::NativeBackend;
use crate::dialog::{ButtonSpec, DialogRequest, Icon, ResultCode};
use crate::error::{DialogError, Result};
use tracing::{info, warn};

pub struct MacOsBackend;

/// Result of the button NSAlert reported; buttons are numbered from 1000 in the order they were added
fn map_response(response: NSModalResponse, buttons: &ButtonSpec) -> ResultCode {
    usize::try_from(response - NSAlertFirstButtonReturn)
        .ok()
        .and_then(|index| buttons.get(index))
        .map_or(ResultCode::None, |entry| entry.result)
}

fn style(icon: Icon) -> NSAlertStyle {
    match icon {
        Icon::Error | Icon::Stop => NSAlertStyle::Critical,
        Icon::Warning => NSAlertStyle::Warning,
        _ => NSAlertStyle::Informational,
    }
}

/// System image shown in place of the application icon
fn image_name(icon: Icon) -> Option<&'static str> {
    match icon {
        Icon::None => None,
        Icon::Info => Some("NSInfo"),
        Icon::Warning => Some("NSCaution"),
        Icon::Error => Some("NSCritical"),
        Icon::Question => Some("NSHelp"),
        Icon::Stop => Some("NSStopProgressTemplate"),
        Icon::Success => Some("NSMenuOnStateTemplate"),
    }
}

impl NativeBackend for MacOsBackend {
    fn name(&self) -> &'static str {
        "nsalert"
    }

    fn show(&self, request: &DialogRequest, buttons: &ButtonSpec) -> Result<ResultCode> {
        let mtm = MainThreadMarker::new().ok_or(DialogError::NotMainThread("NSAlert"))?;

        // Without this the alert can open behind other apps
        #[allow(deprecated)]
        NSApplication::sharedApplication(mtm).activateIgnoringOtherApps(true);

        let alert = NSAlert::new(mtm);
        alert.setMessageText(&NSString::from_str(&request.caption));
        alert.setInformativeText(&NSString::from_str(&request.text));
        alert.setAlertStyle(style(request.icon));

        if let Some(name) = image_name(request.icon) {
            match NSImage::imageNamed(&NSString::from_str(name)) {
                Some(image) => alert.setIcon(Some(&image)),
                None => warn!(image = name, "System image not found, keeping app icon"),
            }
        }

        for entry in buttons.iter() {
            alert.addButtonWithTitle(&NSString::from_str(&entry.label));
        }

        let response = alert.runModal();
        let result = map_response(response, buttons);
        info!(response, %result, "NSAlert returned");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ButtonSet;
    use crate::labels::{BuiltinLabels, LabelSource};

    fn spec(set: ButtonSet) -> ButtonSpec {
        ButtonSpec::new(set, &BuiltinLabels.resolve("en"))
    }

    #[test]
    fn test_responses_follow_button_order() {
        let yes_no = spec(ButtonSet::YesNo);
        assert_eq!(map_response(1000, &yes_no), ResultCode::Yes);
        assert_eq!(map_response(1001, &yes_no), ResultCode::No);

        let ok_cancel = spec(ButtonSet::OkCancel);
        assert_eq!(map_response(1000, &ok_cancel), ResultCode::Confirm);
        assert_eq!(map_response(1001, &ok_cancel), ResultCode::Cancel);
    }

    #[test]
    fn test_unknown_response_is_none() {
        let ok = spec(ButtonSet::Ok);
        assert_eq!(map_response(1001, &ok), ResultCode::None);
        assert_eq!(map_response(1002, &ok), ResultCode::None);
        assert_eq!(map_response(-1000, &ok), ResultCode::None);
    }

    #[test]
    fn test_error_icons_are_critical() {
        assert_eq!(style(Icon::Stop), NSAlertStyle::Critical);
        assert_eq!(style(Icon::Warning), NSAlertStyle::Warning);
        assert_eq!(image_name(Icon::None), None);
    }

    #[test]
    fn test_worker_thread_is_refused() {
        // The test harness runs tests off the main thread
        let request = DialogRequest::new("c", "t", ButtonSet::Ok, Icon::Info);
        let handle = std::thread::spawn(move || MacOsBackend.show(&request, &spec(ButtonSet::Ok)));
        let err = handle.join().unwrap().unwrap_err();
        assert!(matches!(err, DialogError::NotMainThread("NSAlert")));
    }
}
