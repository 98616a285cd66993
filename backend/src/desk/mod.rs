//! Desks: controllers behind the user-facing actions.
//!
//! A desk turns a button press into an AI call and keeps the visible result
//! in a [`Panel`]. Failures never escape a desk; they become a message on
//! the panel and the refresh loop is unaffected.
//!
//! Requests read a snapshot once and send exactly that data; the result is
//! tagged with the snapshot generation it was computed from. When requests
//! overlap on one panel, only the most recently issued one may publish.

pub mod blog;
pub mod cex;
pub mod dex;
pub mod image;

use adapters::gemini::AiError;
use parking_lot::Mutex;
use tracing::debug;

pub use blog::{BlogDesk, BlogPost};
pub use cex::CexDesk;
pub use dex::DexDesk;
pub use image::{GeneratedImage, ImageDesk};

/// AI text pinned to the snapshot it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub text: String,
    pub generation: u64,
    pub generated_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Failed(m) => Some(m),
            _ => None,
        }
    }
}

/// Handle for one in-flight request on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

struct PanelInner<T> {
    latest: u64,
    state: PanelState<T>,
}

/// Result slot of a desk with latest-request-wins semantics.
pub struct Panel<T> {
    inner: Mutex<PanelInner<T>>,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(PanelInner {
                latest: 0,
                state: PanelState::Idle,
            }),
        }
    }
}

impl<T: Clone> Panel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request: clears the previous result and supersedes any
    /// request still in flight.
    pub fn begin(&self) -> Ticket {
        let mut g = self.inner.lock();
        g.latest += 1;
        g.state = PanelState::Loading;
        Ticket(g.latest)
    }

    /// Publishes an outcome. Returns `false` when a newer request was issued
    /// meanwhile; the outcome is then dropped.
    pub fn finish(&self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        let mut g = self.inner.lock();
        if ticket.0 != g.latest {
            debug!(
                ticket = ticket.0,
                latest = g.latest,
                "stale completion discarded"
            );
            return false;
        }

        g.state = match outcome {
            Ok(v) => PanelState::Ready(v),
            Err(message) => PanelState::Failed(message),
        };
        true
    }

    pub fn state(&self) -> PanelState<T> {
        self.inner.lock().state.clone()
    }
}

/// Text shown to the user for a failed AI call.
pub fn user_message(err: &AiError) -> String {
    match err {
        AiError::NotConfigured => err.to_string(),
        AiError::Remote(m) => format!("Error: {m}"),
        AiError::MalformedResponse(_) | AiError::Encode(_) => {
            format!("Error: the AI returned an unexpected answer ({err})")
        }
    }
}
