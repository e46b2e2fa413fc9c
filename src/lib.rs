pub mod client;
pub mod config;
pub mod cover;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod retry;
pub mod storage;
pub mod tagger;
pub mod templates;

pub use config::Config;
pub use error::{BlinkistError, Result};
pub use fetcher::{Fetcher, RunReport};
