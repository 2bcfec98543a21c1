use crate::browser::driver::{Driver, ElementId};
use crate::browser::locator::Locator;
use crate::error::PageError;
use crate::page::fields::Field;

/// A resolved element handed back to test code for inspection.
///
/// Borrows the page's driver, so it must be dropped before the page is used
/// again.
pub struct Element<'p, D: Driver> {
    driver: &'p mut D,
    field: Field,
    locator: Locator,
    id: ElementId,
}

impl<'p, D: Driver> Element<'p, D> {
    pub(crate) fn new(driver: &'p mut D, field: Field, locator: Locator, id: ElementId) -> Self {
        Element {
            driver,
            field,
            locator,
            id,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn text(&mut self) -> Result<String, PageError> {
        self.driver
            .text(&self.id)
            .map_err(|e| PageError::from_session(self.field, &self.locator, e))
    }

    pub fn attribute(&mut self, name: &str) -> Result<Option<String>, PageError> {
        self.driver
            .attribute(&self.id, name)
            .map_err(|e| PageError::from_session(self.field, &self.locator, e))
    }

    pub fn is_displayed(&mut self) -> Result<bool, PageError> {
        self.driver
            .is_displayed(&self.id)
            .map_err(|e| PageError::from_session(self.field, &self.locator, e))
    }
}
