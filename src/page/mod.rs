pub mod element;
pub mod fields;
pub mod registration;

pub use element::Element;
pub use fields::{Field, LocatorTable};
pub use registration::RegistrationPage;
