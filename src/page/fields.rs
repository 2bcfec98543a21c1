use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::browser::locator::Locator;
use crate::error::ConfigError;

/// Every element the registration page binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    SignupMenu,
    NameInput,
    EmailInput,
    SignupButton,
    Title,
    Password,
    BirthDay,
    BirthMonth,
    BirthYear,
    FirstName,
    LastName,
    Company,
    Address,
    Country,
    State,
    City,
    ZipCode,
    MobileNumber,
    CreateButton,
    ConfirmationMessage,
    ErrorMessage,
}

impl Field {
    pub const ALL: [Field; 21] = [
        Field::SignupMenu,
        Field::NameInput,
        Field::EmailInput,
        Field::SignupButton,
        Field::Title,
        Field::Password,
        Field::BirthDay,
        Field::BirthMonth,
        Field::BirthYear,
        Field::FirstName,
        Field::LastName,
        Field::Company,
        Field::Address,
        Field::Country,
        Field::State,
        Field::City,
        Field::ZipCode,
        Field::MobileNumber,
        Field::CreateButton,
        Field::ConfirmationMessage,
        Field::ErrorMessage,
    ];

    /// Name used in config overrides and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Field::SignupMenu => "signupMenu",
            Field::NameInput => "nameInput",
            Field::EmailInput => "emailInput",
            Field::SignupButton => "signupButton",
            Field::Title => "title",
            Field::Password => "password",
            Field::BirthDay => "birthDay",
            Field::BirthMonth => "birthMonth",
            Field::BirthYear => "birthYear",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Company => "company",
            Field::Address => "address",
            Field::Country => "country",
            Field::State => "state",
            Field::City => "city",
            Field::ZipCode => "zipCode",
            Field::MobileNumber => "mobileNumber",
            Field::CreateButton => "createButton",
            Field::ConfirmationMessage => "confirmationMessage",
            Field::ErrorMessage => "errorMessage",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Locator declared for this field on the live signup page.
    pub fn default_locator(&self) -> Locator {
        match self {
            Field::SignupMenu => {
                Locator::xpath("//ul[@class='nav navbar-nav']/li/a[text()=' Signup / Login']")
            }
            Field::NameInput => Locator::name("name"),
            Field::EmailInput => Locator::xpath("//input[@data-qa='signup-email']"),
            Field::SignupButton => Locator::xpath("//button[@data-qa='signup-button']"),
            Field::Title => Locator::id("id_gender1"),
            Field::Password => Locator::id("password"),
            Field::BirthDay => Locator::id("days"),
            Field::BirthMonth => Locator::id("months"),
            Field::BirthYear => Locator::id("years"),
            Field::FirstName => Locator::id("first_name"),
            Field::LastName => Locator::id("last_name"),
            Field::Company => Locator::id("company"),
            Field::Address => Locator::id("address1"),
            Field::Country => Locator::id("country"),
            Field::State => Locator::id("state"),
            Field::City => Locator::id("city"),
            Field::ZipCode => Locator::id("zipcode"),
            Field::MobileNumber => Locator::id("mobile_number"),
            Field::CreateButton => Locator::xpath("//button[@data-qa='create-account']"),
            Field::ConfirmationMessage => Locator::xpath("//h2[@class='title text-center']/b"),
            Field::ErrorMessage => Locator::xpath("//div[@class='signup-form']//p"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field to locator bindings for one page object. Always holds an entry for
/// every [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorTable {
    bindings: HashMap<Field, Locator>,
}

impl Default for LocatorTable {
    fn default() -> Self {
        LocatorTable {
            bindings: Field::ALL
                .iter()
                .map(|f| (*f, f.default_locator()))
                .collect(),
        }
    }
}

impl LocatorTable {
    /// Default bindings with some entries replaced.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (Field, Locator)>,
    {
        let mut table = Self::default();
        table.bindings.extend(overrides);
        table
    }

    /// Apply overrides keyed by field name, as they appear in a config file.
    pub fn from_named_overrides(overrides: &BTreeMap<String, Locator>) -> Result<Self, ConfigError> {
        let resolved = overrides
            .iter()
            .map(|(name, locator)| {
                Field::from_name(name)
                    .map(|field| (field, locator.clone()))
                    .ok_or_else(|| ConfigError::UnknownField(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_overrides(resolved))
    }

    pub fn get(&self, field: Field) -> &Locator {
        // every field is inserted by Default and never removed
        &self.bindings[&field]
    }

    /// Bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &Locator)> {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}
