//! View model owned by the download controller

use std::ops::{Deref, DerefMut};

/// Background color used when the host theme does not set one
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Category of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Positive or informational message
    Success,
    /// Failure message
    Error,
}

impl StatusKind {
    /// Style tag applied to the status region
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "status success",
            Self::Error => "status error",
        }
    }
}

/// A visible status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Text shown to the user
    pub message: String,
    /// Category tag
    pub kind: StatusKind,
}

/// Everything the page shows, as data
///
/// A front end renders this after every controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Current text of the URL field
    pub url_input: String,
    /// Whether the primary control can be activated
    pub submit_enabled: bool,
    /// Whether the control's label is shown
    pub label_visible: bool,
    /// Whether the loading indicator is shown
    pub loader_visible: bool,
    /// Whether the result panel is shown
    pub result_visible: bool,
    /// Title in the result panel
    pub video_title: String,
    /// Size line in the result panel
    pub video_size: String,
    /// Status region; `None` means hidden
    pub status: Option<StatusLine>,
    /// Page background color
    pub background_color: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            submit_enabled: true,
            label_visible: true,
            loader_visible: false,
            result_visible: false,
            video_title: String::new(),
            video_size: String::new(),
            status: None,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl ViewState {
    /// Set the status text and category and make it visible
    pub fn render_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusLine {
            message: message.into(),
            kind,
        });
    }

    /// Whether a submission is in flight
    pub fn is_loading(&self) -> bool {
        self.loader_visible
    }
}

/// Loading state held for the duration of one request
///
/// Acquiring disables the primary control, swaps its label for the loading
/// indicator and hides the previous result and status. Dropping restores the
/// control and label and hides the indicator, on every exit path.
pub(crate) struct BusyGuard<'a> {
    view: &'a mut ViewState,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn acquire(view: &'a mut ViewState) -> Self {
        view.submit_enabled = false;
        view.label_visible = false;
        view.loader_visible = true;
        view.result_visible = false;
        view.status = None;
        Self { view }
    }
}

impl Deref for BusyGuard<'_> {
    type Target = ViewState;

    fn deref(&self) -> &ViewState {
        self.view
    }
}

impl DerefMut for BusyGuard<'_> {
    fn deref_mut(&mut self) -> &mut ViewState {
        self.view
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.submit_enabled = true;
        self.view.label_visible = true;
        self.view.loader_visible = false;
    }
}

/// Bytes as megabytes with two decimals (`10485760` → `"10.00"`)
pub fn format_megabytes(bytes: f64) -> String {
    format!("{:.2}", bytes / 1024.0 / 1024.0)
}
