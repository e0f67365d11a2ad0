//! Notifications, routes and confirmations

use std::fmt;

/// Title of every failure notification.
pub const FAILURE_TITLE: &str = "Oops...";

/// Text of every failure notification.
pub const FAILURE_TEXT: &str = "something went wrong. try again";

/// A message for the notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The action succeeded.
    Success { title: String, text: Option<String> },
    /// The action failed; the host may retry or navigate away.
    Error { title: String, text: String },
}

impl Notification {
    /// Creates a success notification with a title only.
    pub fn success(title: impl Into<String>) -> Self {
        Self::Success {
            title: title.into(),
            text: None,
        }
    }

    /// Creates a success notification with a title and a text.
    pub fn success_with_text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Success {
            title: title.into(),
            text: Some(text.into()),
        }
    }

    /// The generic failure notification.
    pub fn failure() -> Self {
        Self::Error {
            title: FAILURE_TITLE.to_string(),
            text: FAILURE_TEXT.to_string(),
        }
    }

    /// Returns `true` for error notifications.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// A path for the router to navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    /// Creates a route from a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path.
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user's answer to a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Result of a screen action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Message to surface, if any.
    pub notification: Option<Notification>,
    /// Where to navigate next, if anywhere.
    pub route: Option<Route>,
}

impl Outcome {
    /// An outcome with nothing to show.
    pub fn none() -> Self {
        Self::default()
    }

    /// An outcome that only shows a notification.
    pub fn notify(notification: Notification) -> Self {
        Self {
            notification: Some(notification),
            route: None,
        }
    }

    /// Adds a route to navigate to.
    pub fn then_navigate(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    /// Returns `true` if the action failed.
    pub fn is_error(&self) -> bool {
        self.notification.as_ref().is_some_and(Notification::is_error)
    }
}
