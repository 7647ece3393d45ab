// Database models

pub mod custom_connector;

pub use custom_connector::*;
