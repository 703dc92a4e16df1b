use std::time::Duration;

use clap::Parser;

// WHOIS directory defaults
pub const WHOIS_DIRECTORY_HOST: &str = "whois-servers.net";
pub const WHOIS_PORT: u16 = 43;
pub const CONNECT_TIMEOUT_SECONDS: u64 = 15;
pub const READ_TIMEOUT_SECONDS: u64 = 20;

/// Settings for a single lookup.
///
/// The read timeout applies to each line read, not the whole response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisConfig {
    pub directory_host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            directory_host: WHOIS_DIRECTORY_HOST.to_string(),
            port: WHOIS_PORT,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECONDS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECONDS),
        }
    }
}

impl WhoisConfig {
    pub fn with_directory_host(mut self, host: impl Into<String>) -> Self {
        self.directory_host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "A minimal WHOIS lookup client")]
pub struct Cli {
    /// Domain to look up
    pub domain: String,

    /// WHOIS server to query instead of the derived <tld>.whois-servers.net
    pub server: Option<String>,

    /// Follow a "Registrar WHOIS Server:" referral and append its answer
    #[arg(short, long)]
    pub referral: bool,

    /// WHOIS port
    #[arg(short, long, default_value_t = WHOIS_PORT)]
    pub port: u16,

    /// Suffix used to derive the default server from the top-level label
    #[arg(long, default_value = WHOIS_DIRECTORY_HOST)]
    pub directory_host: String,

    /// Connect timeout in seconds
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECONDS)]
    pub connect_timeout: u64,

    /// Per-line read timeout in seconds
    #[arg(long, default_value_t = READ_TIMEOUT_SECONDS)]
    pub read_timeout: u64,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Format log output for journald
    #[arg(long)]
    pub journald: bool,
}

impl Cli {
    pub fn whois_config(&self) -> WhoisConfig {
        WhoisConfig::default()
            .with_directory_host(self.directory_host.clone())
            .with_port(self.port)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
            .with_read_timeout(Duration::from_secs(self.read_timeout))
    }
}
