mod client;
mod config;
mod connection;
mod error;
mod session;
pub use client::*;
pub use config::*;
pub use connection::*;
pub use error::*;
pub use session::*;
