//! Page object for a web shop's account registration form, driven through a
//! W3C WebDriver session.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use registration_page::browser::webdriver::{Capabilities, WebDriverSession};
//! use registration_page::config::TestData;
//! use registration_page::page::RegistrationPage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = TestData::new().with("baseUrl", "https://automationexercise.com");
//! let mut session = WebDriverSession::start(
//!     "http://localhost:9515",
//!     Capabilities::default(),
//!     Duration::from_secs(30),
//! )?;
//!
//! let mut page = RegistrationPage::new(&mut session, &data);
//! page.navigate_to_base()?;
//! page.open_signup_menu()?;
//! page.set_name("Jane")?;
//! page.set_email("jane@example.test")?;
//! page.submit_signup()?;
//! let message = page.error_message()?.text()?;
//! println!("{}", message);
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod page;

pub use browser::driver::{Driver, ElementId};
pub use browser::locator::{By, Locator};
pub use config::{ConfigSource, TestData};
pub use error::{ConfigError, PageError, SessionError};
pub use page::{Element, Field, LocatorTable, RegistrationPage};
