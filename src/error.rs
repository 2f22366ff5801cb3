//! Error taxonomy for a single dialog invocation
//!
//! Every failure aborts the invocation it happened in; nothing is retried.

/// Every error a dialog invocation can produce.
#[derive(Debug)]
pub enum DialogError {
    /// The display server could not be reached. No window was shown.
    Connection(String),

    /// Neither the primary nor the fallback font name resolved.
    FontLoad {
        primary: String,
        fallback: String,
    },

    /// A button set or icon name that the renderer does not know.
    UnsupportedConfiguration(String),

    /// Any other native call failed after the connection was up.
    Protocol {
        /// Short name of the failing operation, for display purposes.
        op: &'static str,
        detail: String,
    },

    /// No native backend exists for this operating system.
    UnsupportedPlatform(&'static str),

    /// The backend can only run on the process main thread and was called elsewhere.
    NotMainThread(&'static str),

    /// The worker thread ended without reporting a result.
    WorkerLost,
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(detail) => write!(f, "cannot open display: {detail}"),
            Self::FontLoad { primary, fallback } => {
                write!(f, "failed to load font '{primary}' or fallback '{fallback}'")
            }
            Self::UnsupportedConfiguration(what) => write!(f, "unsupported configuration: {what}"),
            Self::Protocol { op, detail } => write!(f, "{op} failed: {detail}"),
            Self::UnsupportedPlatform(os) => {
                write!(f, "no native message box available on '{os}'")
            }
            Self::NotMainThread(backend) => {
                write!(f, "the {backend} dialog must be shown from the main thread")
            }
            Self::WorkerLost => write!(f, "dialog worker exited without a result"),
        }
    }
}

impl std::error::Error for DialogError {}

impl DialogError {
    pub(crate) fn protocol(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Protocol {
            op,
            detail: err.to_string(),
        }
    }
}

#[cfg(feature = "x11")]
impl From<x11rb::errors::ConnectError> for DialogError {
    fn from(e: x11rb::errors::ConnectError) -> Self {
        Self::Connection(e.to_string())
    }
}

#[cfg(feature = "x11")]
impl From<x11rb::errors::ConnectionError> for DialogError {
    fn from(e: x11rb::errors::ConnectionError) -> Self {
        Self::protocol("x11 request", e)
    }
}

#[cfg(feature = "x11")]
impl From<x11rb::errors::ReplyError> for DialogError {
    fn from(e: x11rb::errors::ReplyError) -> Self {
        Self::protocol("x11 reply", e)
    }
}

#[cfg(feature = "x11")]
impl From<x11rb::errors::ReplyOrIdError> for DialogError {
    fn from(e: x11rb::errors::ReplyOrIdError) -> Self {
        Self::protocol("x11 id allocation", e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;
