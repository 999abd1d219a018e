//! Host environment capabilities consumed by the controller
//!
//! The controller runs inside a messenger's web-app chrome. Everything it
//! needs from that chrome goes through [`HostEnvironment`], so tests can use
//! a recording fake and other front ends can supply their own host.

/// Strength of an impact haptic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    /// A light tap
    Light,
    /// A medium tap
    Medium,
    /// A heavy tap
    Heavy,
    /// A rigid, sharp tap
    Rigid,
    /// A soft, dull tap
    Soft,
}

impl ImpactStyle {
    /// Name the host API expects
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Rigid => "rigid",
            Self::Soft => "soft",
        }
    }
}

/// Kind of a notification haptic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Something failed
    Error,
    /// Something succeeded
    Success,
    /// Something needs attention
    Warning,
}

impl NotificationKind {
    /// Name the host API expects
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

/// Theme parameters published by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeParams {
    /// Page background color (`#rrggbb`), if the host sets one
    pub bg_color: Option<String>,
}

/// Capabilities the controller needs from its host
///
/// Methods take `&self`; implementations that record calls use interior
/// mutability.
pub trait HostEnvironment {
    /// Expand the app to the full viewport
    fn expand(&self);

    /// Tell the host the app is ready to be shown
    fn ready(&self);

    /// Current theme parameters
    fn theme_params(&self) -> ThemeParams;

    /// Origin of the page the app was loaded from (`scheme://host[:port]`)
    fn origin(&self) -> String;

    /// Emit an impact haptic
    fn impact_occurred(&self, style: ImpactStyle);

    /// Emit a notification haptic
    fn notification_occurred(&self, kind: NotificationKind);

    /// Hand a URL to the host's link opener
    fn open_link(&self, url: &str);
}
