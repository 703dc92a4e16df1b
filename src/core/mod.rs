pub mod domain;
pub mod logger;

pub use domain::*;
