pub mod acceptance;
pub mod eligibility;
pub mod exclusion;
pub mod gender;
pub mod models;
pub mod schema;

mod error;

pub use error::{Error, Result};
