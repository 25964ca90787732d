//! The browser capability scenarios are written against.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::scenario::ScenarioError;

/// How to find an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(String),
    Class(String),
    Tag(String),
    Css(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Locator::Class(class.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Locator::Tag(tag.into())
    }

    /// Equivalent CSS selector.
    pub fn to_css(&self) -> String {
        match self {
            Locator::Id(id) => format!("#{id}"),
            Locator::Class(class) => format!(".{class}"),
            Locator::Tag(tag) => tag.clone(),
            Locator::Css(css) => css.clone(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// A live browser page that can be driven.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Handle to an element on the current page.
    type Element: Clone + Send + Sync;

    async fn navigate(&self, url: &str) -> Result<(), ScenarioError>;

    /// First match, or `ScenarioError::ElementNotFound`.
    async fn find(&self, locator: &Locator) -> Result<Self::Element, ScenarioError>;

    /// All matches in document order; empty when nothing matches.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, ScenarioError>;

    /// Type into an element. WebDriver key code points are honored.
    async fn send_keys(&self, element: &Self::Element, keys: &str) -> Result<(), ScenarioError>;

    async fn click(&self, element: &Self::Element) -> Result<(), ScenarioError>;

    /// Content attribute as written in the markup.
    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, ScenarioError>;

    /// Live DOM property, e.g. the current `value` of an input.
    async fn property(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, ScenarioError>;

    async fn text(&self, element: &Self::Element) -> Result<String, ScenarioError>;

    /// Run `script` in the page; `args` are visible as `arguments`.
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, ScenarioError>;

    /// The element that currently has keyboard focus.
    async fn focused(&self) -> Result<Self::Element, ScenarioError>;

    /// End the session.
    async fn quit(&self) -> Result<(), ScenarioError>;
}
