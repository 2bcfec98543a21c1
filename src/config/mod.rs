pub mod source;

pub use source::{ConfigSource, RawData, TestData, keys};
