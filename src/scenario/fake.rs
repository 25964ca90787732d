//! In-memory browser for driver and scenario tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::scenario::browser::{Browser, Locator};
use crate::scenario::keys::Key;
use crate::scenario::ScenarioError;

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub value: String,
    pub text: String,
}

impl FakeElement {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: "input".to_string(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    fn matches(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Id(id) => &self.id == id,
            Locator::Class(class) => self.classes.contains(class),
            Locator::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Locator::Css(css) => {
                if let Some(id) = css.strip_prefix('#') {
                    self.id == id
                } else if let Some(class) = css.strip_prefix('.') {
                    self.classes.iter().any(|c| c == class)
                } else {
                    !css.is_empty() && self.tag.eq_ignore_ascii_case(css)
                }
            }
        }
    }
}

/// What the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
    Input(String),
    Click(String),
}

type Reactor = Box<dyn Fn(&mut Vec<FakeElement>, &FakeEvent) + Send + Sync>;

#[derive(Default)]
struct Page {
    elements: Vec<FakeElement>,
    focused: Option<usize>,
    visited: Vec<String>,
    scripts: Vec<(String, Vec<Value>)>,
    sent_keys: Vec<String>,
}

/// Elements are addressed by their id, which is stable across re-renders.
pub struct FakeBrowser {
    page: Mutex<Page>,
    reactor: Option<Reactor>,
}

impl FakeBrowser {
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self {
            page: Mutex::new(Page {
                elements,
                ..Page::default()
            }),
            reactor: None,
        }
    }

    /// Re-render the page after input or clicks.
    pub fn with_reactor(
        mut self,
        reactor: impl Fn(&mut Vec<FakeElement>, &FakeEvent) + Send + Sync + 'static,
    ) -> Self {
        self.reactor = Some(Box::new(reactor));
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.page.lock().unwrap().visited.clone()
    }

    pub fn scripts(&self) -> Vec<(String, Vec<Value>)> {
        self.page.lock().unwrap().scripts.clone()
    }

    pub fn sent_keys(&self) -> Vec<String> {
        self.page.lock().unwrap().sent_keys.clone()
    }

    fn with_element<T>(
        &self,
        id: &str,
        f: impl FnOnce(&FakeElement) -> T,
    ) -> Result<T, ScenarioError> {
        let page = self.page.lock().unwrap();
        page.elements
            .iter()
            .find(|e| e.id == id)
            .map(f)
            .ok_or_else(|| ScenarioError::Browser(format!("stale element {id}")))
    }

    fn react(&self, page: &mut Page, event: FakeEvent) {
        if let Some(reactor) = &self.reactor {
            let focused_id = page.focused.map(|i| page.elements[i].id.clone());
            reactor(&mut page.elements, &event);
            page.focused = focused_id.and_then(|id| page.elements.iter().position(|e| e.id == id));
        }
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Element = String;

    async fn navigate(&self, url: &str) -> Result<(), ScenarioError> {
        self.page.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> Result<String, ScenarioError> {
        let page = self.page.lock().unwrap();
        page.elements
            .iter()
            .find(|e| e.matches(locator))
            .map(|e| e.id.clone())
            .ok_or_else(|| ScenarioError::ElementNotFound(locator.to_css()))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<String>, ScenarioError> {
        let page = self.page.lock().unwrap();
        Ok(page
            .elements
            .iter()
            .filter(|e| e.matches(locator))
            .map(|e| e.id.clone())
            .collect())
    }

    async fn send_keys(&self, element: &String, keys: &str) -> Result<(), ScenarioError> {
        let mut page = self.page.lock().unwrap();
        let Some(mut current) = page.elements.iter().position(|e| &e.id == element) else {
            return Err(ScenarioError::Browser(format!("stale element {element}")));
        };
        page.sent_keys.push(keys.to_string());
        page.focused = Some(current);

        let mut shift = false;
        for c in keys.chars() {
            match Key::from_code_point(c) {
                Some(Key::Shift) => shift = true,
                Some(Key::Null) => shift = false,
                Some(Key::Backspace) => {
                    page.elements[current].value.pop();
                }
                Some(Key::Tab) => {
                    let len = page.elements.len();
                    current = if shift { (current + len - 1) % len } else { (current + 1) % len };
                    page.focused = Some(current);
                }
                Some(_) => {}
                None => page.elements[current].value.push(c),
            }
        }

        let id = page.elements[current].id.clone();
        self.react(&mut page, FakeEvent::Input(id));
        Ok(())
    }

    async fn click(&self, element: &String) -> Result<(), ScenarioError> {
        let mut page = self.page.lock().unwrap();
        let Some(index) = page.elements.iter().position(|e| &e.id == element) else {
            return Err(ScenarioError::Browser(format!("stale element {element}")));
        };
        page.focused = Some(index);
        self.react(&mut page, FakeEvent::Click(element.clone()));
        Ok(())
    }

    async fn attribute(&self, element: &String, name: &str) -> Result<Option<String>, ScenarioError> {
        self.with_element(element, |e| match name {
            "id" if !e.id.is_empty() => Some(e.id.clone()),
            "class" if !e.classes.is_empty() => Some(e.classes.join(" ")),
            _ => None,
        })
    }

    async fn property(&self, element: &String, name: &str) -> Result<Option<String>, ScenarioError> {
        self.with_element(element, |e| match name {
            "value" => Some(e.value.clone()),
            "tagName" => Some(e.tag.to_ascii_uppercase()),
            _ => None,
        })
    }

    async fn text(&self, element: &String) -> Result<String, ScenarioError> {
        self.with_element(element, |e| e.text.clone())
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, ScenarioError> {
        self.page
            .lock()
            .unwrap()
            .scripts
            .push((script.to_string(), args));
        Ok(Value::Null)
    }

    async fn focused(&self) -> Result<String, ScenarioError> {
        let page = self.page.lock().unwrap();
        page.focused
            .map(|i| page.elements[i].id.clone())
            .ok_or_else(|| ScenarioError::ElementNotFound("document.activeElement".into()))
    }

    async fn quit(&self) -> Result<(), ScenarioError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_locator_matching() {
        let element = FakeElement::new("width").with_class("size");
        assert!(element.matches(&Locator::Css("#width".into())));
        assert!(element.matches(&Locator::Css(".size".into())));
        assert!(element.matches(&Locator::Css("input".into())));
        assert!(!element.matches(&Locator::Css("".into())));
        assert!(!element.matches(&Locator::Css("é".into())));
    }
}
