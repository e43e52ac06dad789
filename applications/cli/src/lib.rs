//! VibeBeat command-line client
//!
//! Wires the libraries together behind an explicit [`AppState`]: REST client,
//! catalog and playlist mirrors, playback controller and local session.

pub mod config;
pub mod error;
pub mod state;
pub mod transport;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use state::AppState;
pub use transport::LoggingTransport;
