pub mod names;
pub mod request;
pub mod serde_utils;
pub mod xml;
