//! # WHOIS Lookup Library
//!
//! A minimal WHOIS client:
//! - Derives the server from the top-level label (`com.whois-servers.net`)
//! - Sends the domain over plaintext TCP port 43 and reads until the server closes
//! - Optionally follows a `Registrar WHOIS Server:` referral and appends its answer
//!
//! ## Quick Start
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let result = whois_lookup::whois("example.com", true, None).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```
//!
//! Timeouts, the port and the directory host come from [`WhoisConfig`]:
//!
//! ```no_run
//! use std::time::Duration;
//! use whois_lookup::{WhoisClient, WhoisConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = WhoisConfig::default().with_read_timeout(Duration::from_secs(5));
//!     let client = WhoisClient::new(config);
//!     let result = client.whois("example.org", false, Some("whois.pir.org")).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod services;

pub use config::WhoisConfig;
pub use error::{Result, WhoisError};
pub use services::{Connector, QueryExecutor, Referral, TcpConnector, WhoisClient};

/// Look up `domain` with the default configuration over TCP.
///
/// `server` overrides the derived `<tld>.whois-servers.net`; an empty string
/// counts as absent.
pub async fn whois(domain: &str, chase_referral: bool, server: Option<&str>) -> Result<String> {
    WhoisClient::default().whois(domain, chase_referral, server).await
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn author() -> &'static str {
    env!("CARGO_PKG_AUTHORS")
}

pub fn license() -> &'static str {
    env!("CARGO_PKG_LICENSE")
}
