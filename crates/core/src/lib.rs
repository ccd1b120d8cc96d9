pub mod analytics;
pub mod application;
pub mod cleaning;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

pub use error::{DashboardLoadError, Error, FetchError};
pub use ports::Result;
