//! The browser control seam consumed by the classifier and runners.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// How to address an element on the page under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Match on the `name` attribute.
    Name(String),
    /// Match a CSS selector.
    Css(String),
    /// Match a tag name.
    Tag(String),
}

impl Locator {
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::Tag(value.into())
    }
}

/// Control surface over one live browser page.
///
/// Element absence is data here, not an error: `is_present` and
/// `element_text` answer "absent" instead of failing, and `wait_present`
/// reports whether the element appeared before the deadline. Implementations
/// return `Err` only for driver-level faults (dead session, transport).
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// Navigate the page to `url`.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Immediate find-or-absent query.
    async fn is_present(&self, locator: &Locator) -> Result<bool>;

    /// Wait up to `timeout` for an element matching `locator` to appear.
    async fn wait_present(&self, locator: &Locator, timeout: Duration) -> Result<bool>;

    /// Clear the first matching element, then type `value` into it.
    async fn set_value(&self, locator: &Locator, value: &str) -> Result<()>;

    /// Click the first matching element.
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// URL the page is currently on.
    async fn current_url(&self) -> Result<String>;

    /// Text of the first matching element, `None` when absent.
    async fn element_text(&self, locator: &Locator) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_build_the_expected_variant() {
        assert_eq!(Locator::name("username"), Locator::Name("username".to_string()));
        assert_eq!(Locator::css("p.error"), Locator::Css("p.error".to_string()));
        assert_eq!(Locator::tag("h1"), Locator::Tag("h1".to_string()));
    }
}
