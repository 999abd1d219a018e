//! Download controller for the mini-app page
//!
//! The controller reads the URL the user typed, validates it trivially,
//! issues one request to `/api/download`, renders the outcome into a
//! [`ViewState`], and hands a finished artifact's link to the host.
//!
//! It owns three things for the lifetime of a page session:
//! - the view model ([`ViewState`]) a front end renders,
//! - the session state ([`Session`]) of the last successful download,
//! - its capabilities: a [`HostEnvironment`] and a [`DownloadApi`].
//!
//! ```text
//! Idle ──submit──▶ Submitting ──▶ Success ─┐
//!   ▲                        └──▶ Failed  ─┤
//!   └──────────── guard released ◀─────────┘
//! ```
//!
//! `submit` takes `&mut self`, so one controller never has two submissions
//! in flight.

mod host;
mod messages;
mod transport;
mod view;


pub use host::{HostEnvironment, ImpactStyle, NotificationKind, ThemeParams};
pub use messages::Messages;
pub use transport::{
    DOWNLOAD_ENDPOINT, DownloadApi, FILE_ENDPOINT, HttpDownloadApi, artifact_url,
};
pub use view::{DEFAULT_BACKGROUND, StatusKind, StatusLine, ViewState, format_megabytes};

use crate::error::ValidationError;
use crate::types::DownloadResponse;
use view::BusyGuard;

/// Key that submits from the URL field
pub const SUBMIT_KEY: &str = "Enter";

/// The artifact of the last successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionArtifact {
    /// Server-side artifact id
    pub file_id: String,
    /// URL that was submitted to produce it
    pub video_url: String,
}

/// Session state: empty until a submission succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    artifact: Option<SessionArtifact>,
}

impl Session {
    /// Artifact of the last successful submission
    pub fn artifact(&self) -> Option<&SessionArtifact> {
        self.artifact.as_ref()
    }

    /// Current artifact id
    pub fn file_id(&self) -> Option<&str> {
        self.artifact.as_ref().map(|a| a.file_id.as_str())
    }

    /// URL of the last successful submission
    pub fn video_url(&self) -> Option<&str> {
        self.artifact.as_ref().map(|a| a.video_url.as_str())
    }
}

/// Which branch a submission took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input failed local validation; no request was sent
    Rejected(ValidationError),
    /// The server stored an artifact
    Ready {
        /// Id of the stored artifact
        file_id: String,
    },
    /// The server answered with `success: false`; carries the shown message
    ServerError(String),
    /// No usable response; carries the shown message
    TransportError(String),
}

/// Check the raw field text and return the trimmed URL
///
/// The scheme check is a case-insensitive `http://` / `https://` prefix
/// test; anything deeper is the server's job.
pub fn validate_input(raw: &str) -> Result<&str, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !has_http_scheme(url) {
        return Err(ValidationError::BadScheme);
    }
    Ok(url)
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Controller for one page session
pub struct DownloadController<H, A> {
    host: H,
    api: A,
    view: ViewState,
    session: Session,
    messages: Messages,
}

impl<H, A> DownloadController<H, A>
where
    H: HostEnvironment,
    A: DownloadApi,
{
    /// Create the controller and initialize the host with English messages
    pub fn new(host: H, api: A) -> Self {
        Self::with_messages(host, api, Messages::default())
    }

    /// Create the controller with a specific message table
    ///
    /// Expands the app, signals readiness, and takes the background color
    /// from the host theme.
    pub fn with_messages(host: H, api: A, messages: Messages) -> Self {
        host.expand();
        host.ready();

        let background_color = host
            .theme_params()
            .bg_color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());

        Self {
            host,
            api,
            view: ViewState {
                background_color,
                ..Default::default()
            },
            session: Session::default(),
            messages,
        }
    }

    /// Current view model
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The host this controller talks to
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The transport this controller uses
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the URL field text (what the user typed)
    pub fn set_url_input(&mut self, text: impl Into<String>) {
        self.view.url_input = text.into();
    }

    /// Show a status message
    pub fn render_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.view.render_status(message, kind);
    }

    /// Key press inside the URL field
    ///
    /// [`SUBMIT_KEY`] runs the same path as [`DownloadController::activate`];
    /// other keys do nothing and return `None`.
    pub async fn on_key_press(&mut self, key: &str) -> Option<SubmitOutcome> {
        if key == SUBMIT_KEY {
            Some(self.activate().await)
        } else {
            None
        }
    }

    /// Primary control activated: submit the URL field's current text
    pub async fn activate(&mut self) -> SubmitOutcome {
        let input = self.view.url_input.clone();
        self.submit(&input).await
    }

    /// Submit a URL for download
    ///
    /// Validation failures never reach the network. Otherwise the view is
    /// held in the loading state for exactly the duration of the request and
    /// released on every exit path.
    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let url = match validate_input(raw) {
            Ok(url) => url,
            Err(reason) => {
                let message = match reason {
                    ValidationError::Empty => self.messages.empty_url.clone(),
                    ValidationError::BadScheme => self.messages.bad_scheme.clone(),
                };
                self.view.render_status(message, StatusKind::Error);
                self.host.notification_occurred(NotificationKind::Error);
                tracing::debug!(%reason, "Rejected URL input");
                return SubmitOutcome::Rejected(reason);
            }
        };

        let Self {
            host,
            api,
            view,
            session,
            messages,
        } = self;

        let mut view = BusyGuard::acquire(view);
        host.impact_occurred(ImpactStyle::Light);

        match api.request_download(url).await {
            Ok(DownloadResponse {
                success: true,
                file_id: Some(file_id),
                title,
                size,
                ..
            }) => {
                session.artifact = Some(SessionArtifact {
                    file_id: file_id.clone(),
                    video_url: url.to_string(),
                });

                view.video_title = title.unwrap_or_else(|| messages.untitled.clone());
                view.video_size = size
                    .map(|bytes| messages.size_line(&format_megabytes(bytes)))
                    .unwrap_or_default();
                view.result_visible = true;
                view.render_status(messages.ready.clone(), StatusKind::Success);
                host.notification_occurred(NotificationKind::Success);

                SubmitOutcome::Ready { file_id }
            }
            Ok(response) => {
                let message = messages.server_error(response.error.as_deref());
                view.render_status(message.clone(), StatusKind::Error);
                host.notification_occurred(NotificationKind::Error);
                SubmitOutcome::ServerError(message)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Download request failed");
                let message = messages.transport_error(&e.to_string());
                view.render_status(message.clone(), StatusKind::Error);
                host.notification_occurred(NotificationKind::Error);
                SubmitOutcome::TransportError(message)
            }
        }
    }

    /// Hand the current artifact's link to the host
    ///
    /// Does nothing and returns `None` before the first successful
    /// submission. Returns the opened URL otherwise. The session stays open.
    pub fn open_artifact(&mut self) -> Option<String> {
        let file_id = self.session.file_id()?;
        let url = artifact_url(&self.host.origin(), file_id);

        self.host.notification_occurred(NotificationKind::Success);
        self.view
            .render_status(self.messages.opening_file.clone(), StatusKind::Success);
        self.host.open_link(&url);

        Some(url)
    }
}
