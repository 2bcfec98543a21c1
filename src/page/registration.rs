use tracing::info;

use crate::browser::driver::{Driver, ElementId};
use crate::browser::locator::Locator;
use crate::config::{ConfigSource, keys};
use crate::error::{PageError, SessionError};
use crate::page::element::Element;
use crate::page::fields::{Field, LocatorTable};

/// Text fields filled by [`RegistrationPage::fill_registration_form`], in
/// fill order, with the configuration key each one reads.
pub const REGISTRATION_FIELDS: [(Field, &str); 9] = [
    (Field::Password, keys::PASSWORD),
    (Field::FirstName, keys::FIRST_NAME),
    (Field::LastName, keys::LAST_NAME),
    (Field::Company, keys::COMPANY),
    (Field::Address, keys::ADDRESS),
    (Field::State, keys::STATE),
    (Field::City, keys::CITY),
    (Field::ZipCode, keys::ZIP),
    (Field::MobileNumber, keys::MOBILE),
];

/// Birth date dropdowns: day, month, year.
pub const BIRTH_DATE_FIELDS: [(Field, &str); 3] = [
    (Field::BirthDay, keys::BIRTH_DAY),
    (Field::BirthMonth, keys::BIRTH_MONTH),
    (Field::BirthYear, keys::BIRTH_YEAR),
];

/// Page object for the signup / account registration form.
///
/// Borrows the browser session and the configuration for its lifetime.
/// Locators are looked up each time an action runs; a failed lookup or
/// interaction aborts the action and is returned unchanged in meaning.
/// The page enforces no call order.
pub struct RegistrationPage<'a, D: Driver, C: ConfigSource> {
    driver: &'a mut D,
    config: &'a C,
    locators: LocatorTable,
}

impl<'a, D: Driver, C: ConfigSource> RegistrationPage<'a, D, C> {
    pub fn new(driver: &'a mut D, config: &'a C) -> Self {
        Self::with_locators(driver, config, LocatorTable::default())
    }

    pub fn with_locators(driver: &'a mut D, config: &'a C, locators: LocatorTable) -> Self {
        RegistrationPage {
            driver,
            config,
            locators,
        }
    }

    pub fn locators(&self) -> &LocatorTable {
        &self.locators
    }

    pub fn locator(&self, field: Field) -> &Locator {
        self.locators.get(field)
    }

    /// Resolve every field in `fields` now, failing on the first one that is
    /// not on the current page.
    pub fn ensure_present(&mut self, fields: &[Field]) -> Result<(), PageError> {
        for field in fields {
            self.resolve(*field)?;
        }
        Ok(())
    }

    /// Open the base URL from configuration.
    pub fn navigate_to_base(&mut self) -> Result<(), PageError> {
        let url = self.config.value(keys::BASE_URL)?;
        info!("Entering Url: {}", url);
        self.driver
            .navigate(&url)
            .map_err(|source| PageError::Navigation { url, source })
    }

    pub fn open_signup_menu(&mut self) -> Result<(), PageError> {
        info!("Clicking the Signup/Login link");
        self.act(Field::SignupMenu, |driver, id| driver.click(id))
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), PageError> {
        info!("Entering username: {}", name);
        self.act(Field::NameInput, |driver, id| driver.send_keys(id, name))
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), PageError> {
        info!("Entering email: {}", email);
        self.act(Field::EmailInput, |driver, id| driver.send_keys(id, email))
    }

    /// Click the button that opens the full registration form.
    pub fn submit_signup(&mut self) -> Result<(), PageError> {
        info!("Clicking the Signup button.");
        self.act(Field::SignupButton, |driver, id| driver.click(id))
    }

    pub fn select_gender_title(&mut self) -> Result<(), PageError> {
        self.act(Field::Title, |driver, id| {
            let value = driver.attribute(id, "value")?;
            info!("Selecting title : {}", value.as_deref().unwrap_or_default());
            driver.click(id)
        })
    }

    /// Type `value` into the element bound to `field`.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), PageError> {
        if field == Field::Password {
            info!(%field, "Filling field");
        } else {
            info!(%field, "Filling field with value: {}", value);
        }
        self.act(field, |driver, id| driver.send_keys(id, value))
    }

    /// Fill password, names, company, address, state, city, zip and mobile
    /// from configuration, in that order. Stops at the first failure; fields
    /// already filled stay filled.
    pub fn fill_registration_form(&mut self) -> Result<(), PageError> {
        info!("Starting to fill the form.");
        for (field, key) in REGISTRATION_FIELDS {
            let value = self.config.value(key)?;
            self.set_field(field, &value)?;
            info!("Filled {} field.", field);
        }
        Ok(())
    }

    /// Select the option of the dropdown bound to `field` whose value
    /// attribute is `value`.
    pub fn select_from_dropdown(&mut self, field: Field, value: &str) -> Result<(), PageError> {
        self.act(field, |driver, id| driver.select_by_value(id, value))?;
        info!(%field, "Selected dropdown value: {}", value);
        Ok(())
    }

    pub fn set_birth_date(&mut self) -> Result<(), PageError> {
        for (field, key) in BIRTH_DATE_FIELDS {
            let value = self.config.value(key)?;
            self.select_from_dropdown(field, &value)?;
        }
        info!("Filled birthdate field.");
        Ok(())
    }

    pub fn select_country(&mut self) -> Result<(), PageError> {
        let country = self.config.value(keys::COUNTRY)?;
        self.select_from_dropdown(Field::Country, &country)?;
        info!("Filled country field.");
        info!("Form filling completed.");
        Ok(())
    }

    /// Click "Create Account".
    pub fn submit_registration(&mut self) -> Result<(), PageError> {
        self.act(Field::CreateButton, |driver, id| driver.click(id))?;
        info!("Clicked create button");
        Ok(())
    }

    /// Element holding the "Account Created" confirmation.
    pub fn confirmation_message(&mut self) -> Result<Element<'_, D>, PageError> {
        self.element(Field::ConfirmationMessage)
    }

    /// Element holding the error shown on the signup panel.
    pub fn error_message(&mut self) -> Result<Element<'_, D>, PageError> {
        self.element(Field::ErrorMessage)
    }

    fn resolve(&mut self, field: Field) -> Result<ElementId, PageError> {
        let locator = self.locators.get(field);
        self.driver
            .find(locator)
            .map_err(|e| PageError::from_session(field, locator, e))
    }

    fn element(&mut self, field: Field) -> Result<Element<'_, D>, PageError> {
        let id = self.resolve(field)?;
        let locator = self.locators.get(field).clone();
        Ok(Element::new(&mut *self.driver, field, locator, id))
    }

    /// Resolve `field` and run one interaction against it.
    fn act<T, F>(&mut self, field: Field, op: F) -> Result<T, PageError>
    where
        F: FnOnce(&mut D, &ElementId) -> Result<T, SessionError>,
    {
        let id = self.resolve(field)?;
        let locator = self.locators.get(field);
        op(&mut *self.driver, &id).map_err(|e| PageError::from_session(field, locator, e))
    }
}
