use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategy used to find an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum By {
    Id,
    Name,
    #[serde(rename = "xpath")]
    XPath,
    Css,
    LinkText,
}

impl By {
    pub fn as_str(&self) -> &'static str {
        match self {
            By::Id => "id",
            By::Name => "name",
            By::XPath => "xpath",
            By::Css => "css",
            By::LinkText => "link_text",
        }
    }
}

/// A (strategy, selector) pair identifying one DOM element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub by: By,
    pub value: String,
}

/// Selector in the form the W3C WebDriver find-element endpoints expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct W3cSelector {
    pub using: &'static str,
    pub value: String,
}

impl Locator {
    pub fn new(by: By, value: impl Into<String>) -> Self {
        Locator {
            by,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(By::Id, value)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(By::Name, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(By::XPath, value)
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(By::Css, value)
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(By::LinkText, value)
    }

    /// Translate into a W3C selector. WebDriver has no id/name strategies, so
    /// those become CSS attribute selectors.
    pub fn to_w3c(&self) -> W3cSelector {
        match self.by {
            By::Id => W3cSelector {
                using: "css selector",
                value: attribute_selector("id", &self.value),
            },
            By::Name => W3cSelector {
                using: "css selector",
                value: attribute_selector("name", &self.value),
            },
            By::XPath => W3cSelector {
                using: "xpath",
                value: self.value.clone(),
            },
            By::Css => W3cSelector {
                using: "css selector",
                value: self.value.clone(),
            },
            By::LinkText => W3cSelector {
                using: "link text",
                value: self.value.clone(),
            },
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.by.as_str(), self.value)
    }
}

/// Build `[attr="value"]` with the value escaped for a double-quoted CSS string.
pub fn attribute_selector(attr: &str, value: &str) -> String {
    format!("[{}=\"{}\"]", attr, escape_css_string(value))
}

fn escape_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}
