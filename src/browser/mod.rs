//! Browser control: the handle abstraction, the WebDriver-backed session,
//! and the bounded wait primitives.

mod handle;
pub mod wait;
mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

pub use handle::{BrowserHandle, Locator};
pub use wait::WaitPolicy;
pub use webdriver::{LaunchOptions, WebDriverSession};
