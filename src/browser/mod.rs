pub mod driver;
pub mod locator;
pub mod webdriver;
