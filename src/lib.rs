//! Native message box used when the GUI toolkit is not running
//!
//! On X11 the dialog is drawn by hand over the core protocol; on Windows it
//! is the system `MessageBoxW` and on macOS an `NSAlert`. [`MessageBox`] picks
//! between the toolkit and these fallbacks.

pub mod config;
pub mod constants;
pub mod dialog;
pub mod error;
pub mod labels;
pub mod msgbox;
pub mod platform;

pub use config::Config;
pub use dialog::{ButtonSet, ButtonSpec, DialogRequest, Icon, ResultCode};
pub use error::{DialogError, Result};
pub use labels::{BuiltinLabels, LabelSource, Labels};
pub use msgbox::{MessageBox, ToolkitPresenter};
