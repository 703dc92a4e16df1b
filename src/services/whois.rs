use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{lookup_host, TcpStream};

use crate::config::WhoisConfig;
use crate::core::default_server;
use crate::error::{Result, WhoisError};
use crate::{log_debug, log_warn};

/// Opens the byte stream a query runs over.
///
/// The production implementation dials TCP; tests substitute doubles that
/// record the dial target or refuse specific hosts.
#[async_trait]
pub trait Connector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    async fn connect(&self, host: &str, port: u16, timeout: Duration) -> io::Result<Self::Stream>;
}

/// Dials IPv4 TCP, trying each resolved address in turn under one deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
        match tokio::time::timeout(timeout, connect_ipv4(host, port)).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connection to {}:{} timed out", host, port),
            )),
        }
    }
}

async fn connect_ipv4(host: &str, port: u16) -> io::Result<TcpStream> {
    let mut last_error = None;

    for addr in lookup_host((host, port)).await?.filter(SocketAddr::is_ipv4) {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                if let Err(e) = stream.set_nodelay(true) {
                    log_warn!("Failed to set TCP_NODELAY on {}: {}", addr, e);
                }
                return Ok(stream);
            }
            Err(e) => {
                log_debug!("Connect to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, format!("no IPv4 address found for {}", host))
    }))
}

/// Runs one query against one WHOIS server.
#[derive(Debug, Clone)]
pub struct QueryExecutor<C = TcpConnector> {
    config: WhoisConfig,
    connector: C,
}

impl QueryExecutor<TcpConnector> {
    pub fn new(config: WhoisConfig) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> QueryExecutor<C> {
    pub fn with_connector(config: WhoisConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Send `domain` to `server` (or the derived default) and read until EOF.
    ///
    /// A read error or per-line timeout discards whatever was received.
    /// The bytes are collected verbatim and decoded once at the end; bytes
    /// that are not valid UTF-8 (e.g. Latin-1 answers) become U+FFFD.
    pub async fn query(&self, domain: &str, server: Option<&str>) -> Result<String> {
        let server = match server.filter(|s| !s.is_empty()) {
            Some(server) => server.to_string(),
            None => default_server(domain, &self.config.directory_host)?,
        };

        log_debug!("Querying WHOIS server {}:{} for {}", server, self.config.port, domain);

        let stream = self
            .connector
            .connect(&server, self.config.port, self.config.connect_timeout)
            .await
            .map_err(WhoisError::Connect)?;

        let response = exchange(stream, domain, self.config.read_timeout).await?;
        log_debug!("Received {} bytes from {}", response.len(), server);

        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

async fn exchange<S>(mut stream: S, domain: &str, read_timeout: Duration) -> Result<Vec<u8>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let query = format!("{}\r\n", domain);
    stream.write_all(query.as_bytes()).await.map_err(WhoisError::Write)?;
    stream.flush().await.map_err(WhoisError::Write)?;

    let mut reader = BufReader::new(stream);
    let mut response = Vec::new();

    // The deadline is renewed for every line
    loop {
        match tokio::time::timeout(read_timeout, reader.read_until(b'\n', &mut response)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(WhoisError::Read(e)),
            Err(_) => {
                log_debug!("Read timed out after {} bytes", response.len());
                return Err(WhoisError::Read(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("read timed out after {:?}", read_timeout),
                )));
            }
        }
    }

    Ok(response)
}
