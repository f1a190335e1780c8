// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod paragraph;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod word_budget;

pub use engine::SessionEngine;
pub use error::{Error, Result};
pub use session::{Session, SessionConfig, Status};
