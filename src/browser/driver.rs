use std::fmt;

use crate::browser::locator::Locator;
use crate::error::SessionError;

/// Driver-issued reference to a live element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Primitives a page object needs from a browser session.
///
/// Every call blocks until the browser reports completion. Implementations
/// must not retry: a failed lookup or interaction is returned as-is.
pub trait Driver {
    /// Load `url` in the current window.
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Resolve `locator` to exactly one element. Zero matches is
    /// [`SessionError::NotFound`], several is [`SessionError::AmbiguousLocator`].
    fn find(&mut self, locator: &Locator) -> Result<ElementId, SessionError>;

    fn click(&mut self, element: &ElementId) -> Result<(), SessionError>;

    /// Type `text` into the element.
    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), SessionError>;

    /// Choose the `<option>` of a `<select>` whose value attribute equals `value`.
    fn select_by_value(&mut self, element: &ElementId, value: &str) -> Result<(), SessionError>;

    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, SessionError>;

    /// Rendered text of the element.
    fn text(&mut self, element: &ElementId) -> Result<String, SessionError>;

    fn is_displayed(&mut self, element: &ElementId) -> Result<bool, SessionError>;
}
