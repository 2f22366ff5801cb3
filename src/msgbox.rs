//! Message box dispatcher
//!
//! Uses the GUI toolkit when one is registered and ready, and the native
//! fallback for the current OS otherwise. Each asynchronous call runs on its
//! own thread and resolves once the user answers; there is no cancellation.
//! On macOS that thread is never the main thread, so only the blocking calls
//! can reach NSAlert.

use crate::config::Config;
use crate::dialog::{ButtonSet, ButtonSpec, DialogRequest, Icon, ResultCode};
use crate::error::{DialogError, Result};
use crate::labels::{detect_locale, BuiltinLabels, LabelSource, Labels};
use crate::platform::{self, NativeBackend};
use std::future::Future;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// The managed GUI path, as seen from here.
pub trait ToolkitPresenter: Send + Sync {
    /// Whether the toolkit is initialised enough to show a window
    fn is_ready(&self) -> bool;

    fn present(&self, request: &DialogRequest, buttons: &ButtonSpec) -> Result<ResultCode>;
}

#[derive(Clone)]
pub struct MessageBox {
    config: Config,
    labels: Arc<dyn LabelSource>,
    toolkit: Option<Arc<dyn ToolkitPresenter>>,
    /// Chosen per OS at call time when unset
    native: Option<Arc<dyn NativeBackend>>,
}

impl MessageBox {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            labels: Arc::new(BuiltinLabels),
            toolkit: None,
            native: None,
        }
    }

    pub fn with_labels(mut self, labels: Arc<dyn LabelSource>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_toolkit(mut self, toolkit: Arc<dyn ToolkitPresenter>) -> Self {
        self.toolkit = Some(toolkit);
        self
    }

    pub fn with_native_backend(mut self, backend: Arc<dyn NativeBackend>) -> Self {
        self.native = Some(backend);
        self
    }

    pub fn locale(&self) -> String {
        detect_locale(self.config.locale.tag.as_deref())
    }

    /// Labels for the active locale, resolved now
    pub fn labels(&self) -> Labels {
        self.labels.resolve(&self.locale())
    }

    /// Show `request` on the calling thread and block until it is answered
    pub fn show_request(&self, request: &DialogRequest) -> Result<ResultCode> {
        let labels = self.labels();
        let buttons = ButtonSpec::new(request.buttons, &labels);

        if let Some(toolkit) = self.toolkit.as_ref().filter(|t| t.is_ready()) {
            info!(caption = %request.caption, "Showing dialog through toolkit");
            return toolkit.present(request, &buttons);
        }

        let backend = match &self.native {
            Some(backend) => Arc::clone(backend),
            None => platform::native_backend(&self.config)?,
        };
        info!(backend = backend.name(), caption = %request.caption, "Toolkit not ready, using native dialog");
        backend.show(request, &buttons)
    }

    /// Blocking variant of [`MessageBox::show_async`]
    pub fn show(&self, caption: &str, text: &str, buttons: ButtonSet, icon: Icon) -> Result<ResultCode> {
        self.show_request(&DialogRequest::new(caption, text, buttons, icon))
    }

    pub async fn show_async(
        &self,
        caption: &str,
        text: &str,
        buttons: ButtonSet,
        icon: Icon,
    ) -> Result<ResultCode> {
        self.spawn(DialogRequest::new(caption, text, buttons, icon)).await
    }

    /// Report `err` in an Ok-only dialog with the Stop icon.
    ///
    /// The location line names the caller of this method.
    #[track_caller]
    pub fn show_error(&self, err: &anyhow::Error) -> impl Future<Output = Result<ResultCode>> {
        let location = Location::caller();
        let labels = self.labels();
        let request = DialogRequest::new(
            labels.error_occurred.clone(),
            describe_error(err, &labels, Some(location)),
            ButtonSet::Ok,
            Icon::Stop,
        );
        self.spawn(request)
    }

    /// Run one request on a dedicated worker thread
    fn spawn(&self, request: DialogRequest) -> impl Future<Output = Result<ResultCode>> {
        let (tx, rx) = oneshot::channel();
        let this = self.clone();

        let spawned = thread::Builder::new()
            .name("msgbox-dialog".to_string())
            .spawn(move || {
                let outcome = this.show_request(&request);
                // Receiver gone means nobody is waiting any more
                let _ = tx.send(outcome);
            });

        async move {
            if let Err(e) = spawned {
                return Err(DialogError::protocol("spawn dialog thread", e));
            }
            debug!("Waiting for dialog worker");
            rx.await.unwrap_or(Err(DialogError::WorkerLost))
        }
    }
}

/// Body text for an error report.
///
/// The first line carries the error itself, then where it was reported, then
/// one line per underlying cause.
pub fn describe_error(err: &anyhow::Error, labels: &Labels, location: Option<&Location<'_>>) -> String {
    let mut lines = vec![format!("{}: {}", labels.exception, err)];

    if let Some(location) = location {
        let file = Path::new(location.file())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.file().to_string());
        lines.push(format!("{}: {}:{}", labels.location, file, location.line()));
    }

    for cause in err.chain().skip(1) {
        lines.push(format!("{}: {}", labels.message, cause));
    }

    lines.join("\n")
}
