//! Attempt outcomes surfaced by the classifier.

use std::fmt;

/// Terminal result of one login attempt. Exactly one variant holds per
/// attempt; the classifier never returns anything weaker than this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(SuccessEvidence),
    Failure(FailureReason),
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// What convinced the classifier the attempt succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessEvidence {
    /// A top-level heading containing "welcome" confirmed the landing page.
    WelcomeHeading(String),
    /// The browser left the login page; the landing URL is the evidence.
    /// Lenient on purpose: navigation away is sufficient even without a
    /// recognizable heading.
    UrlChanged(String),
}

/// Why the attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The login form never appeared within the wait deadline.
    FormNotFound,
    /// The target rendered an explicit rejection message.
    ServerError(String),
    /// Neither a redirect nor an error was observed within the deadline.
    NoResponse,
    /// The wait resolved but the page was in no recognizable terminal state.
    Unknown,
}

impl fmt::Display for SuccessEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WelcomeHeading(text) => write!(f, "welcome heading \"{}\"", text),
            Self::UrlChanged(url) => write!(f, "redirected to {}", url),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormNotFound => write!(f, "login form not found"),
            Self::ServerError(message) => write!(f, "server error: {}", message),
            Self::NoResponse => write!(f, "no response"),
            Self::Unknown => write!(f, "unknown result"),
        }
    }
}
