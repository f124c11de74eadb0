//! WebDriver-backed browser session.
//!
//! Owns the whole browser stack for one run: locates a `chromedriver` binary
//! on `PATH`, spawns it, waits for its status endpoint to come up, and
//! connects a `thirtyfour` session to it. The session is acquired once at
//! startup and must be released with [`WebDriverSession::close`]; the spawned
//! driver process is additionally kill-on-drop so a panic cannot leak it.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tokio::process::{Child, Command};
use tokio::time::{sleep, Instant};

use super::handle::{BrowserHandle, Locator};
use crate::error::{CredprobeError, Result};

/// Port the spawned chromedriver listens on. Chromedriver's conventional
/// default; the session is local-only.
const CHROMEDRIVER_PORT: u16 = 9515;

/// How long to wait for the driver's status endpoint after spawning.
const DRIVER_READY_TIMEOUT: Duration = Duration::from_secs(10);
const DRIVER_READY_POLL: Duration = Duration::from_millis(200);

/// Poll cadence for [`BrowserHandle::wait_present`].
const PRESENCE_POLL: Duration = Duration::from_millis(100);

/// Browser startup options taken at process start.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub headless: bool,
}

/// One live browser plus the chromedriver process backing it.
pub struct WebDriverSession {
    driver: WebDriver,
    chromedriver: Option<Child>,
}

impl WebDriverSession {
    /// Spawn chromedriver and open a browser session against it.
    ///
    /// This is the only fatal acquisition in the program: every failure here
    /// (no binary, driver never ready, capabilities rejected) aborts the run.
    pub async fn launch(options: &LaunchOptions) -> Result<Self> {
        let binary = which::which("chromedriver").map_err(|_| {
            CredprobeError::DriverNotFound(
                "chromedriver not found on PATH. Install it (or your distro's \
                 chromium-driver package) and make sure it matches your browser version."
                    .to_string(),
            )
        })?;
        tracing::debug!("using chromedriver at {}", binary.display());

        let mut child = Command::new(&binary)
            .arg(format!("--port={}", CHROMEDRIVER_PORT))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let status_url = format!("http://127.0.0.1:{}/status", CHROMEDRIVER_PORT);
        if let Err(e) = wait_until_ready(&mut child, &status_url).await {
            let _ = child.kill().await;
            return Err(e);
        }

        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--window-size=1200,800")?;
        if options.headless {
            caps.add_arg("--headless=new")?;
            caps.add_arg("--disable-gpu")?;
            caps.add_arg("--no-sandbox")?;
        }

        let endpoint = format!("http://127.0.0.1:{}", CHROMEDRIVER_PORT);
        let driver = match WebDriver::new(&endpoint, caps).await {
            Ok(driver) => driver,
            Err(e) => {
                let _ = child.kill().await;
                return Err(e.into());
            }
        };

        Ok(Self {
            driver,
            chromedriver: Some(child),
        })
    }

    /// Quit the browser and reap the chromedriver process.
    ///
    /// The driver process is killed even when quitting the WebDriver session
    /// fails; the first error is still reported.
    pub async fn close(mut self) -> Result<()> {
        let quit = self.driver.quit().await;
        if let Some(mut child) = self.chromedriver.take() {
            let _ = child.kill().await;
        }
        quit.map_err(Into::into)
    }
}

/// Poll the driver's status endpoint until it answers, the process dies, or
/// the startup deadline passes.
async fn wait_until_ready(child: &mut Child, status_url: &str) -> Result<()> {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let deadline = Instant::now() + DRIVER_READY_TIMEOUT;
    loop {
        if let Ok(Some(status)) = child.try_wait() {
            return Err(CredprobeError::DriverUnreachable(format!(
                "{} (process exited: {})",
                status_url, status
            )));
        }

        if let Ok(response) = client.get(status_url).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }

        if Instant::now() >= deadline {
            return Err(CredprobeError::DriverUnreachable(status_url.to_string()));
        }
        sleep(DRIVER_READY_POLL).await;
    }
}

fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::Name(name) => By::Name(name.clone()),
        Locator::Css(selector) => By::Css(selector.clone()),
        Locator::Tag(tag) => By::Tag(tag.clone()),
    }
}

#[async_trait]
impl BrowserHandle for WebDriverSession {
    async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> Result<bool> {
        // find_all makes absence an empty result instead of a driver error.
        Ok(!self.driver.find_all(to_by(locator)).await?.is_empty())
    }

    async fn wait_present(&self, locator: &Locator, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_present(locator).await? {
                return Ok(true);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            sleep(PRESENCE_POLL.min(deadline - now)).await;
        }
    }

    async fn set_value(&self, locator: &Locator, value: &str) -> Result<()> {
        let element = self.driver.find(to_by(locator)).await?;
        element.clear().await?;
        element.send_keys(value).await?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        self.driver.find(to_by(locator)).await?.click().await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn element_text(&self, locator: &Locator) -> Result<Option<String>> {
        match self.driver.find_all(to_by(locator)).await?.into_iter().next() {
            Some(element) => Ok(Some(element.text().await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locators_map_to_the_matching_by() {
        assert_eq!(
            format!("{:?}", to_by(&Locator::name("username"))),
            format!("{:?}", By::Name("username".to_string()))
        );
        assert_eq!(
            format!("{:?}", to_by(&Locator::css("p.error"))),
            format!("{:?}", By::Css("p.error".to_string()))
        );
    }

    #[tokio::test]
    #[ignore] // Requires chromedriver on PATH
    async fn launch_navigate_and_close() {
        let session = WebDriverSession::launch(&LaunchOptions { headless: true })
            .await
            .unwrap();
        session.goto("about:blank").await.unwrap();
        let url = session.current_url().await.unwrap();
        assert!(url.contains("blank"));
        session.close().await.unwrap();
    }
}
