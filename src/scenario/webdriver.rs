//! WebDriver-backed browser (chromedriver or any W3C endpoint).

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Value};

use crate::config::ScenarioConfig;
use crate::scenario::browser::{Browser, Locator};
use crate::scenario::ScenarioError;

/// A WebDriver session.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Open a new session against `config.webdriver_url`.
    pub async fn connect(config: &ScenarioConfig) -> Result<Self, ScenarioError> {
        let mut args = vec!["--disable-gpu", "--window-size=1280,1024"];
        if config.headless {
            args.push("--headless=new");
        }

        let mut caps = serde_json::map::Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| ScenarioError::Session(e.to_string()))?;

        tracing::info!(
            webdriver_url = %config.webdriver_url,
            headless = config.headless,
            "Browser session started"
        );
        Ok(Self { client })
    }

    fn fantoccini_locator<'a>(css: &'a str, locator: &'a Locator) -> fantoccini::Locator<'a> {
        match locator {
            Locator::Id(id) => fantoccini::Locator::Id(id),
            _ => fantoccini::Locator::Css(css),
        }
    }
}

fn command_error(e: CmdError) -> ScenarioError {
    ScenarioError::Browser(e.to_string())
}

/// A missing element is something waits can retry; anything else is fatal.
fn find_error(css: String, e: CmdError) -> ScenarioError {
    if e.is_no_such_element() {
        ScenarioError::ElementNotFound(css)
    } else {
        command_error(e)
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<(), ScenarioError> {
        tracing::debug!(url, "Navigating");
        self.client.goto(url).await.map_err(command_error)
    }

    async fn find(&self, locator: &Locator) -> Result<Element, ScenarioError> {
        let css = locator.to_css();
        match self.client.find(Self::fantoccini_locator(&css, locator)).await {
            Ok(element) => Ok(element),
            Err(e) => Err(find_error(css, e)),
        }
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, ScenarioError> {
        let css = locator.to_css();
        self.client
            .find_all(Self::fantoccini_locator(&css, locator))
            .await
            .map_err(command_error)
    }

    async fn send_keys(&self, element: &Element, keys: &str) -> Result<(), ScenarioError> {
        element.send_keys(keys).await.map_err(command_error)
    }

    async fn click(&self, element: &Element) -> Result<(), ScenarioError> {
        element.click().await.map_err(command_error)
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>, ScenarioError> {
        element.attr(name).await.map_err(command_error)
    }

    async fn property(&self, element: &Element, name: &str) -> Result<Option<String>, ScenarioError> {
        element.prop(name).await.map_err(command_error)
    }

    async fn text(&self, element: &Element) -> Result<String, ScenarioError> {
        element.text().await.map_err(command_error)
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, ScenarioError> {
        self.client.execute(script, args).await.map_err(command_error)
    }

    async fn focused(&self) -> Result<Element, ScenarioError> {
        self.client.active_element().await.map_err(command_error)
    }

    async fn quit(&self) -> Result<(), ScenarioError> {
        self.client.clone().close().await.map_err(command_error)
    }
}
