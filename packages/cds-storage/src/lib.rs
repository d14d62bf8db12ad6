pub mod keys;
pub mod kv;
pub mod memory;
pub mod records;
pub mod redis_store;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
