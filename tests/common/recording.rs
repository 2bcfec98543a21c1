use std::collections::{HashMap, HashSet};

use registration_page::browser::driver::{Driver, ElementId};
use registration_page::browser::locator::Locator;
use registration_page::error::SessionError;
use registration_page::page::fields::Field;

/// One call received by the recording driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Navigate(String),
    Find(Locator),
    Click(String),
    SendKeys(String, String),
    SelectByValue(String, String),
    Attribute(String, String),
    Text(String),
    IsDisplayed(String),
}

/// Driver double that records every call and answers from a fake DOM.
///
/// With [`RecordingDriver::with_all_fields`] each default locator resolves to
/// an element whose id is the field name, so tests can assert on `"city"`
/// rather than on selectors.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub calls: Vec<Call>,
    elements: HashMap<Locator, ElementId>,
    ambiguous: HashMap<Locator, usize>,
    texts: HashMap<ElementId, String>,
    attributes: HashMap<(ElementId, String), String>,
    not_interactable: HashSet<ElementId>,
}

impl RecordingDriver {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_all_fields() -> Self {
        let mut driver = Self::default();
        for field in Field::ALL {
            driver
                .elements
                .insert(field.default_locator(), ElementId::new(field.name()));
        }
        driver
    }

    pub fn with_element(mut self, locator: Locator, id: &str) -> Self {
        self.elements.insert(locator, ElementId::new(id));
        self
    }

    pub fn without_field(mut self, field: Field) -> Self {
        self.elements.remove(&field.default_locator());
        self
    }

    pub fn with_ambiguous(mut self, locator: Locator, count: usize) -> Self {
        self.ambiguous.insert(locator, count);
        self
    }

    pub fn with_text(mut self, id: &str, text: &str) -> Self {
        self.texts.insert(ElementId::new(id), text.to_string());
        self
    }

    pub fn with_attribute(mut self, id: &str, name: &str, value: &str) -> Self {
        self.attributes
            .insert((ElementId::new(id), name.to_string()), value.to_string());
        self
    }

    pub fn not_interactable(mut self, id: &str) -> Self {
        self.not_interactable.insert(ElementId::new(id));
        self
    }

    /// Calls other than lookups: what the page actually did to the browser.
    pub fn actions(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Find(_) | Call::Attribute(..)))
            .cloned()
            .collect()
    }

    pub fn finds(&self) -> Vec<Locator> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Find(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }

    /// Element ids that received keystrokes, in order.
    pub fn typed_into(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SendKeys(id, _) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    fn check_interactable(&self, element: &ElementId, command: &str) -> Result<(), SessionError> {
        if self.not_interactable.contains(element) {
            return Err(SessionError::Interaction {
                command: command.into(),
                message: "element not interactable".into(),
            });
        }
        Ok(())
    }
}

impl Driver for RecordingDriver {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.calls.push(Call::Navigate(url.to_string()));
        Ok(())
    }

    fn find(&mut self, locator: &Locator) -> Result<ElementId, SessionError> {
        self.calls.push(Call::Find(locator.clone()));
        if let Some(count) = self.ambiguous.get(locator) {
            return Err(SessionError::AmbiguousLocator {
                locator: locator.to_string(),
                count: *count,
            });
        }
        self.elements
            .get(locator)
            .cloned()
            .ok_or_else(|| SessionError::not_found(locator))
    }

    fn click(&mut self, element: &ElementId) -> Result<(), SessionError> {
        self.check_interactable(element, "click")?;
        self.calls.push(Call::Click(element.to_string()));
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), SessionError> {
        self.check_interactable(element, "send_keys")?;
        self.calls
            .push(Call::SendKeys(element.to_string(), text.to_string()));
        Ok(())
    }

    fn select_by_value(&mut self, element: &ElementId, value: &str) -> Result<(), SessionError> {
        self.check_interactable(element, "select_by_value")?;
        self.calls
            .push(Call::SelectByValue(element.to_string(), value.to_string()));
        Ok(())
    }

    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, SessionError> {
        self.calls
            .push(Call::Attribute(element.to_string(), name.to_string()));
        Ok(self
            .attributes
            .get(&(element.clone(), name.to_string()))
            .cloned())
    }

    fn text(&mut self, element: &ElementId) -> Result<String, SessionError> {
        self.calls.push(Call::Text(element.to_string()));
        Ok(self.texts.get(element).cloned().unwrap_or_default())
    }

    fn is_displayed(&mut self, element: &ElementId) -> Result<bool, SessionError> {
        self.calls.push(Call::IsDisplayed(element.to_string()));
        Ok(true)
    }
}
