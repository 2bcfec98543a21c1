#![allow(dead_code)]

pub mod logs;
pub mod recording;
pub mod stub_server;

use registration_page::config::{TestData, keys};

/// Values for every recognized key.
pub fn full_data() -> TestData {
    TestData::new()
        .with(keys::BASE_URL, "https://example.test")
        .with(keys::PASSWORD, "s3cret!")
        .with(keys::FIRST_NAME, "Jane")
        .with(keys::LAST_NAME, "Doe")
        .with(keys::COMPANY, "Acme")
        .with(keys::ADDRESS, "1 Main St")
        .with(keys::STATE, "Ontario")
        .with(keys::CITY, "Toronto")
        .with(keys::ZIP, "M5V 2T6")
        .with(keys::MOBILE, "+1 555 0100")
        .with(keys::BIRTH_DAY, "7")
        .with(keys::BIRTH_MONTH, "3")
        .with(keys::BIRTH_YEAR, "1990")
        .with(keys::COUNTRY, "Canada")
}
