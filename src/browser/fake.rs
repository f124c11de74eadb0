//! Scripted in-memory browser handle for classifier and runner tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::handle::{BrowserHandle, Locator};
use crate::error::{CredprobeError, Result};

/// What the fake target exposes and how it reacts to a submitted form.
#[derive(Debug, Clone)]
pub struct PageScript {
    /// Username/password inputs render on the login page.
    pub has_form: bool,
    /// A clickable submit button renders.
    pub has_submit: bool,
    /// URL the page moves to once submitted; `None` keeps the login URL.
    pub post_submit_url: Option<String>,
    /// Only this username is accepted; others keep the login URL.
    pub accept_username: Option<String>,
    /// Error element text rendered after a rejected submit.
    pub error_text: Option<String>,
    /// Render the error element but make its text unreadable.
    pub error_without_text: bool,
    /// `h1` text on the landing page.
    pub heading: Option<String>,
}

impl Default for PageScript {
    fn default() -> Self {
        Self {
            has_form: true,
            has_submit: true,
            post_submit_url: None,
            accept_username: None,
            error_text: None,
            error_without_text: false,
            heading: None,
        }
    }
}

#[derive(Debug, Default)]
struct PageState {
    current_url: String,
    submitted: bool,
    filled_usernames: Vec<String>,
    filled_passwords: Vec<String>,
}

pub struct FakeBrowser {
    script: PageScript,
    state: Mutex<PageState>,
}

impl FakeBrowser {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            state: Mutex::new(PageState::default()),
        }
    }

    /// Usernames typed into the form, in order.
    pub fn filled_usernames(&self) -> Vec<String> {
        self.state.lock().unwrap().filled_usernames.clone()
    }

    /// Passwords typed into the form, in order.
    pub fn filled_passwords(&self) -> Vec<String> {
        self.state.lock().unwrap().filled_passwords.clone()
    }

    fn accepted(&self, state: &PageState) -> bool {
        match &self.script.accept_username {
            Some(expected) => state.filled_usernames.last() == Some(expected),
            None => true,
        }
    }

    fn navigated(&self, state: &PageState) -> bool {
        state.submitted && self.script.post_submit_url.is_some() && self.accepted(state)
    }

    fn error_visible(&self, state: &PageState) -> bool {
        state.submitted && (self.script.error_text.is_some() || self.script.error_without_text)
    }
}

#[async_trait]
impl BrowserHandle for FakeBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.current_url = url.to_string();
        state.submitted = false;
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(match locator {
            Locator::Name(name) if name == "username" || name == "password" => {
                self.script.has_form
            }
            Locator::Css(css) if css == "button[type=submit]" => self.script.has_submit,
            Locator::Css(css) if css == "p.error" => self.error_visible(&state),
            Locator::Tag(tag) if tag == "h1" => {
                state.submitted && self.script.heading.is_some()
            }
            _ => false,
        })
    }

    async fn wait_present(&self, locator: &Locator, _timeout: Duration) -> Result<bool> {
        // The scripted page never materializes elements over time; the wait
        // collapses to the immediate query.
        self.is_present(locator).await
    }

    async fn set_value(&self, locator: &Locator, value: &str) -> Result<()> {
        if !self.script.has_form {
            return Err(CredprobeError::BrowserOperation(
                "no such element".to_string(),
            ));
        }
        let mut state = self.state.lock().unwrap();
        match locator {
            Locator::Name(name) if name == "username" => {
                state.filled_usernames.push(value.to_string());
            }
            Locator::Name(name) if name == "password" => {
                state.filled_passwords.push(value.to_string());
                // Without a submit button the form submits implicitly.
                if !self.script.has_submit {
                    state.submitted = true;
                }
            }
            other => {
                return Err(CredprobeError::BrowserOperation(format!(
                    "unexpected fill target: {:?}",
                    other
                )));
            }
        }
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        if matches!(locator, Locator::Css(css) if css == "button[type=submit]")
            && self.script.has_submit
        {
            self.state.lock().unwrap().submitted = true;
            Ok(())
        } else {
            Err(CredprobeError::BrowserOperation(format!(
                "nothing clickable at {:?}",
                locator
            )))
        }
    }

    async fn current_url(&self) -> Result<String> {
        let state = self.state.lock().unwrap();
        if self.navigated(&state) {
            Ok(self.script.post_submit_url.clone().unwrap_or_default())
        } else {
            Ok(state.current_url.clone())
        }
    }

    async fn element_text(&self, locator: &Locator) -> Result<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(match locator {
            Locator::Css(css) if css == "p.error" => {
                if self.error_visible(&state) {
                    // error_without_text models a node whose text read fails.
                    self.script.error_text.clone()
                } else {
                    None
                }
            }
            Locator::Tag(tag) if tag == "h1" => {
                if state.submitted {
                    self.script.heading.clone()
                } else {
                    None
                }
            }
            _ => None,
        })
    }
}
