//! Login attempt classifier.
//!
//! Drives one credential pair through the target's login form and decides,
//! from racing page-state signals, whether the attempt succeeded, failed for
//! a known reason, or timed out inconclusively. Submission on a
//! server-rendered login page resolves either by a redirect or by an inline
//! error, so the post-submit wait is a single disjunction over both signals
//! under one deadline. The asymmetry is deliberate: navigation away from the
//! login URL is sufficient success evidence on its own, while failure
//! requires explicit error text.

use tracing::debug;

use crate::browser::{wait, BrowserHandle, Locator, WaitPolicy};
use crate::outcome::{AttemptOutcome, FailureReason, SuccessEvidence};

// Target contract: what the login page must expose to be classifiable.
const USERNAME_INPUT: &str = "username";
const PASSWORD_INPUT: &str = "password";
const SUBMIT_BUTTON: &str = "button[type=submit]";
const ERROR_ELEMENT: &str = "p.error";
const HEADING: &str = "h1";
const WELCOME_MARKER: &str = "welcome";

/// Which post-submit signal resolved first.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SubmitSignal {
    /// The page URL changed away from the login URL.
    Navigated(String),
    /// An error element rendered in place.
    ErrorVisible,
}

/// Run one login attempt and classify its outcome.
///
/// Infallible by contract: every driver fault inside the attempt is
/// converted locally into a `Failure` variant, so a single bad attempt can
/// never abort a campaign.
pub async fn attempt(
    handle: &dyn BrowserHandle,
    base_url: &str,
    username: &str,
    password: &str,
    policy: &WaitPolicy,
) -> AttemptOutcome {
    let login_url = login_url(base_url);

    if let Err(e) = handle.goto(&login_url).await {
        debug!("navigation to {} failed: {}", login_url, e);
        return AttemptOutcome::Failure(FailureReason::NoResponse);
    }

    // The form renders asynchronously; wait for the username field rather
    // than polling from the caller.
    match handle
        .wait_present(&Locator::name(USERNAME_INPUT), policy.timeout)
        .await
    {
        Ok(true) => {}
        Ok(false) => return AttemptOutcome::Failure(FailureReason::FormNotFound),
        Err(e) => {
            debug!("username field lookup failed: {}", e);
            return AttemptOutcome::Failure(FailureReason::FormNotFound);
        }
    }

    // The password field is assumed to render alongside the username field;
    // no second wait.
    if let Err(e) = fill_form(handle, username, password).await {
        debug!("form fill failed: {}", e);
        return AttemptOutcome::Failure(FailureReason::FormNotFound);
    }

    submit_form(handle).await;

    match wait_for_resolution(handle, &login_url, policy).await {
        Ok(Some(SubmitSignal::Navigated(landing_url))) => {
            classify_navigation(handle, landing_url).await
        }
        Ok(Some(SubmitSignal::ErrorVisible)) => classify_error(handle).await,
        Ok(None) => AttemptOutcome::Failure(FailureReason::NoResponse),
        Err(e) => {
            debug!("post-submit wait failed: {}", e);
            AttemptOutcome::Failure(FailureReason::NoResponse)
        }
    }
}

async fn fill_form(
    handle: &dyn BrowserHandle,
    username: &str,
    password: &str,
) -> crate::Result<()> {
    handle
        .set_value(&Locator::name(USERNAME_INPUT), username)
        .await?;
    handle
        .set_value(&Locator::name(PASSWORD_INPUT), password)
        .await?;
    Ok(())
}

/// Click the submit control when there is one. Its absence (or a failed
/// click) is non-fatal: the form still submits implicitly.
async fn submit_form(handle: &dyn BrowserHandle) {
    let submit = Locator::css(SUBMIT_BUTTON);
    match handle.is_present(&submit).await {
        Ok(true) => {
            if let Err(e) = handle.click(&submit).await {
                debug!("submit click failed, relying on implicit submit: {}", e);
            }
        }
        Ok(false) => debug!("no submit button, relying on implicit submit"),
        Err(e) => debug!("submit lookup failed, relying on implicit submit: {}", e),
    }
}

/// One shared deadline over the two ways a submission can resolve. The
/// navigation condition is listed first, which gives it precedence when both
/// signals hold in the same poll round.
async fn wait_for_resolution(
    handle: &dyn BrowserHandle,
    login_url: &str,
    policy: &WaitPolicy,
) -> crate::Result<Option<SubmitSignal>> {
    let navigated: wait::Condition<'_, SubmitSignal> = Box::new(move || {
        Box::pin(async move {
            let current = handle.current_url().await?;
            Ok((!same_page(&current, login_url)).then_some(SubmitSignal::Navigated(current)))
        })
    });
    let error_visible: wait::Condition<'_, SubmitSignal> = Box::new(move || {
        Box::pin(async move {
            Ok(handle
                .is_present(&Locator::css(ERROR_ELEMENT))
                .await?
                .then_some(SubmitSignal::ErrorVisible))
        })
    });

    wait::first_of(&[navigated, error_visible], policy).await
}

/// The URL changed: success. A welcome heading upgrades the evidence, but a
/// missing or unreadable heading never downgrades a navigation to failure.
async fn classify_navigation(handle: &dyn BrowserHandle, landing_url: String) -> AttemptOutcome {
    match handle.element_text(&Locator::tag(HEADING)).await {
        Ok(Some(text)) if text.to_lowercase().contains(WELCOME_MARKER) => {
            debug!("welcome heading confirmed: {}", text);
            AttemptOutcome::Success(SuccessEvidence::WelcomeHeading(text))
        }
        _ => AttemptOutcome::Success(SuccessEvidence::UrlChanged(landing_url)),
    }
}

/// The URL did not change: read the error element. The wait can fire on a
/// signal that has gone stale by the time we read it; that is `Unknown`.
async fn classify_error(handle: &dyn BrowserHandle) -> AttemptOutcome {
    match handle.element_text(&Locator::css(ERROR_ELEMENT)).await {
        Ok(Some(message)) => AttemptOutcome::Failure(FailureReason::ServerError(message)),
        _ => AttemptOutcome::Failure(FailureReason::Unknown),
    }
}

fn login_url(base_url: &str) -> String {
    format!("{}/login", base_url.trim_end_matches('/'))
}

fn same_page(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
