//! url_expander library: follow shortened links to their destination
//!
//! Resolves a URL by walking its HTTP redirect chain with HEAD requests,
//! bounded by a total time budget and a redirect ceiling, and reports either
//! the destination or a numeric transport error code.
//!
//! # Example
//!
//! ```no_run
//! use url_expander::{resolve, ClientHandle, Config, ResolutionRequest, ResolutionResult};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut handle = ClientHandle::new(&Config::default())?;
//! let request = ResolutionRequest::new("bit.ly/example", 2000, 5)?;
//!
//! match resolve(&mut handle, &request).await {
//!     ResolutionResult::Success { expanded_url, .. } => println!("{}", expanded_url),
//!     ResolutionResult::Failure { error_code, .. } => eprintln!("{}", error_code),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. A single handle serves one request
//! at a time; share it across tasks only behind a lock.

#![warn(missing_docs)]

pub mod config;
pub mod dispatch;
pub mod error_handling;
pub mod initialization;
pub mod resolve;
pub mod transport;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{RequestError, TransportCode};
pub use resolve::{resolve, ResolutionRequest, ResolutionResult};
pub use transport::ClientHandle;
