//! Scenario driver: the steps every crossword scenario is built from.
//!
//! # Responsibilities
//! - Open the application and point its backend at the stub server
//! - Keyboard and form helpers (clear a field, type, press keys)
//! - Waits bounded by the configured timeout
//!
//! # Design Decisions
//! - A wait polls until its condition holds or the deadline passes
//! - Element misses inside a wait count as "not yet", outside a wait as failure

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::config::ScenarioConfig;
use crate::scenario::browser::{Browser, Locator};
use crate::scenario::keys::backspaces;
use crate::scenario::ScenarioError;

/// Id of the element the application mounts into.
pub const APP_ROOT: &str = "app";

/// Drives one browser session through crossword scenarios.
pub struct ScenarioDriver<B: Browser> {
    browser: B,
    app_url: String,
    backend_url: String,
    backend_override_hook: String,
    leave_confirm_hook: String,
    timeout: Duration,
    poll_interval: Duration,
}

impl<B: Browser> ScenarioDriver<B> {
    /// `backend_url` is the stub server's base URL.
    pub fn new(browser: B, config: &ScenarioConfig, backend_url: impl Into<String>) -> Self {
        Self {
            browser,
            app_url: config.app_url.clone(),
            backend_url: backend_url.into(),
            backend_override_hook: config.backend_override_hook.clone(),
            leave_confirm_hook: config.leave_confirm_hook.clone(),
            timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load the application, wait for it to mount, then redirect its backend
    /// calls to the stub and turn off the leave-page prompt.
    pub async fn open_app(&self) -> Result<(), ScenarioError> {
        self.browser.navigate(&self.app_url).await?;
        self.wait_for_element(&Locator::id(APP_ROOT)).await?;

        self.browser
            .execute(
                &hook_call(&self.backend_override_hook),
                vec![Value::String(self.backend_url.clone())],
            )
            .await?;
        self.browser
            .execute(&hook_call(&self.leave_confirm_hook), Vec::new())
            .await?;

        tracing::info!(
            app_url = %self.app_url,
            backend_url = %self.backend_url,
            "Application opened against stub backend"
        );
        Ok(())
    }

    /// Poll `probe` until it yields a value or the timeout passes.
    async fn poll<T, F, Fut>(&self, condition: &str, mut probe: F) -> Result<T, ScenarioError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, ScenarioError>>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            match probe().await {
                Ok(Some(value)) => return Ok(value),
                Ok(None) | Err(ScenarioError::ElementNotFound(_)) => {}
                Err(e) => return Err(e),
            }

            if Instant::now() >= deadline {
                tracing::warn!(condition, timeout = ?self.timeout, "Wait timed out");
                return Err(ScenarioError::WaitTimeout {
                    condition: condition.to_string(),
                    timeout: self.timeout,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    pub async fn wait_for_element(&self, locator: &Locator) -> Result<B::Element, ScenarioError> {
        let browser = &self.browser;
        self.poll(&format!("element {locator}"), move || async move {
            browser.find(locator).await.map(Some)
        })
        .await
    }

    /// Wait until exactly `expected` elements match.
    pub async fn wait_for_count(
        &self,
        locator: &Locator,
        expected: usize,
    ) -> Result<Vec<B::Element>, ScenarioError> {
        let browser = &self.browser;
        self.poll(
            &format!("{expected} elements matching {locator}"),
            move || async move {
                let found = browser.find_all(locator).await?;
                Ok::<_, ScenarioError>((found.len() == expected).then_some(found))
            },
        )
        .await
    }

    /// Wait until the texts of all matches equal `expected`, in order.
    pub async fn wait_for_texts(
        &self,
        locator: &Locator,
        expected: &[String],
    ) -> Result<(), ScenarioError> {
        let condition = format!("{locator} to read {expected:?}");
        self.poll(&condition, move || async move {
            let texts = self.texts(locator).await?;
            Ok::<_, ScenarioError>((texts == expected).then_some(()))
        })
        .await
    }

    /// Wait until the `value` of all matches equal `expected`, in order.
    pub async fn wait_for_values(
        &self,
        locator: &Locator,
        expected: &[String],
    ) -> Result<(), ScenarioError> {
        let condition = format!("{locator} to hold {expected:?}");
        self.poll(&condition, move || async move {
            let values = self.values(locator).await?;
            Ok::<_, ScenarioError>((values == expected).then_some(()))
        })
        .await
    }

    /// Wait until the focused element matches `locator`.
    pub async fn wait_for_focus(&self, locator: &Locator) -> Result<(), ScenarioError> {
        self.poll(&format!("focus on {locator}"), move || async move {
            Ok::<_, ScenarioError>(self.focus_matches(locator).await?.then_some(()))
        })
        .await
    }

    async fn focus_matches(&self, locator: &Locator) -> Result<bool, ScenarioError> {
        let focused = self.browser.focused().await?;
        let matches = match locator {
            Locator::Id(id) => {
                self.browser.attribute(&focused, "id").await?.as_deref() == Some(id.as_str())
            }
            Locator::Class(class) => self
                .browser
                .attribute(&focused, "class")
                .await?
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class.as_str())),
            Locator::Tag(tag) => self
                .browser
                .property(&focused, "tagName")
                .await?
                .is_some_and(|name| name.eq_ignore_ascii_case(tag)),
            Locator::Css(css) => {
                let result = self
                    .browser
                    .execute(
                        "return document.activeElement !== null && document.activeElement.matches(arguments[0]);",
                        vec![Value::String(css.clone())],
                    )
                    .await?;
                result.as_bool().unwrap_or(false)
            }
        };
        Ok(matches)
    }

    /// Id of the focused element, if it has one.
    pub async fn focused_id(&self) -> Result<Option<String>, ScenarioError> {
        let focused = self.browser.focused().await?;
        self.browser.attribute(&focused, "id").await
    }

    /// Erase an input by sending one backspace per character of its value.
    pub async fn clear_text(&self, element: &B::Element) -> Result<(), ScenarioError> {
        let value = self
            .browser
            .property(element, "value")
            .await?
            .unwrap_or_default();
        if value.is_empty() {
            return Ok(());
        }
        self.browser.send_keys(element, &backspaces(&value)).await
    }

    /// Replace the contents of the input at `locator` with `text`.
    pub async fn set_input(&self, locator: &Locator, text: &str) -> Result<(), ScenarioError> {
        let element = self.browser.find(locator).await?;
        self.clear_text(&element).await?;
        self.browser.send_keys(&element, text).await?;
        tracing::debug!(locator = %locator, text, "Input set");
        Ok(())
    }

    pub async fn click(&self, locator: &Locator) -> Result<(), ScenarioError> {
        let element = self.browser.find(locator).await?;
        self.browser.click(&element).await
    }

    /// Send keys to whatever has focus.
    pub async fn press(&self, keys: &str) -> Result<(), ScenarioError> {
        let focused = self.browser.focused().await?;
        self.browser.send_keys(&focused, keys).await
    }

    pub async fn texts(&self, locator: &Locator) -> Result<Vec<String>, ScenarioError> {
        let mut texts = Vec::new();
        for element in self.browser.find_all(locator).await? {
            texts.push(self.browser.text(&element).await?);
        }
        Ok(texts)
    }

    pub async fn values(&self, locator: &Locator) -> Result<Vec<String>, ScenarioError> {
        let mut values = Vec::new();
        for element in self.browser.find_all(locator).await? {
            values.push(
                self.browser
                    .property(&element, "value")
                    .await?
                    .unwrap_or_default(),
            );
        }
        Ok(values)
    }

    /// End the browser session.
    pub async fn finish(self) -> Result<(), ScenarioError> {
        self.browser.quit().await
    }
}

/// Script calling a page hook with the script's own arguments.
fn hook_call(hook: &str) -> String {
    format!("return {hook}(...arguments);")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::fake::{FakeBrowser, FakeElement};
    use crate::scenario::keys::{shift_tab, Key};

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            poll_interval_ms: 10,
            ..ScenarioConfig::default()
        }
    }

    fn driver(browser: FakeBrowser) -> ScenarioDriver<FakeBrowser> {
        ScenarioDriver::new(browser, &config(), "http://127.0.0.1:8079")
            .with_timeout(Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_open_app_runs_hooks_in_order() {
        let browser = FakeBrowser::new(vec![FakeElement::new("app")]);
        let driver = driver(browser);
        driver.open_app().await.unwrap();

        let browser = driver.browser();
        assert_eq!(browser.visited(), vec!["http://localhost:8081/".to_string()]);
        assert_eq!(
            browser.scripts(),
            vec![
                (
                    "return window.setBackendUrl(...arguments);".to_string(),
                    vec![Value::String("http://127.0.0.1:8079".into())]
                ),
                (
                    "return window.disableLeaveConfirmation(...arguments);".to_string(),
                    vec![]
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_app_times_out_without_root() {
        let driver = driver(FakeBrowser::new(vec![]));
        let err = driver.open_app().await.unwrap_err();
        match err {
            ScenarioError::WaitTimeout { condition, timeout } => {
                assert_eq!(condition, "element #app");
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(driver.browser().scripts().is_empty());
    }

    #[tokio::test]
    async fn test_find_outside_wait_fails_fast() {
        let driver = driver(FakeBrowser::new(vec![]));
        let err = driver.click(&Locator::id("solve")).await.unwrap_err();
        assert!(matches!(err, ScenarioError::ElementNotFound(css) if css == "#solve"));
    }

    #[tokio::test]
    async fn test_set_input_clears_existing_value() {
        let browser = FakeBrowser::new(vec![FakeElement::new("width").with_value("15")]);
        let driver = driver(browser);

        driver.set_input(&Locator::id("width"), "3").await.unwrap();

        assert_eq!(driver.values(&Locator::id("width")).await.unwrap(), vec!["3"]);
        let sent = driver.browser().sent_keys();
        assert_eq!(sent[0], Key::Backspace.repeat(2));
        assert_eq!(sent[1], "3");
    }

    #[tokio::test]
    async fn test_clear_empty_input_sends_nothing() {
        let browser = FakeBrowser::new(vec![FakeElement::new("height")]);
        let driver = driver(browser);
        let element = driver.browser().find(&Locator::id("height")).await.unwrap();

        driver.clear_text(&element).await.unwrap();
        assert!(driver.browser().sent_keys().is_empty());
    }

    #[tokio::test]
    async fn test_focus_moves_with_tab_and_shift_tab() {
        let browser = FakeBrowser::new(vec![
            FakeElement::new("width"),
            FakeElement::new("height"),
            FakeElement::new("c0").with_class("cell"),
        ]);
        let driver = driver(browser);

        driver.click(&Locator::id("width")).await.unwrap();
        driver.press(&Key::Tab.to_string()).await.unwrap();
        driver.wait_for_focus(&Locator::id("height")).await.unwrap();

        driver.press(&Key::Tab.to_string()).await.unwrap();
        driver.wait_for_focus(&Locator::class("cell")).await.unwrap();

        driver.press(&shift_tab()).await.unwrap();
        assert_eq!(driver.focused_id().await.unwrap().as_deref(), Some("height"));
    }

    #[tokio::test]
    async fn test_wait_for_count_times_out() {
        let browser = FakeBrowser::new(vec![FakeElement::new("c0").with_class("cell")]);
        let driver = driver(browser);

        let found = driver.wait_for_count(&Locator::class("cell"), 1).await.unwrap();
        assert_eq!(found.len(), 1);

        let err = driver.wait_for_count(&Locator::class("cell"), 9).await.unwrap_err();
        assert!(matches!(err, ScenarioError::WaitTimeout { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_texts() {
        let browser = FakeBrowser::new(vec![
            FakeElement::new("w0").with_class("word").with_text("HMM"),
            FakeElement::new("w1").with_class("word").with_text("HNN"),
        ]);
        let driver = driver(browser);

        let expected = vec!["HMM".to_string(), "HNN".to_string()];
        driver.wait_for_texts(&Locator::class("word"), &expected).await.unwrap();

        let reversed = vec!["HNN".to_string(), "HMM".to_string()];
        assert!(driver
            .wait_for_texts(&Locator::class("word"), &reversed)
            .await
            .is_err());
    }
}
