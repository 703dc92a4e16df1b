//! Test doubles for the query path: an in-process WHOIS server and a
//! connector that records dial targets before redirecting to it.

use std::collections::HashSet;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadBuf};
use tokio::net::{TcpListener, TcpStream};

use super::whois::Connector;

/// What the fake server does with one accepted connection.
pub enum Reply {
    /// Write the text, then close.
    Close(&'static str),
    /// Write the text, then hold the connection open without sending more.
    Stall(&'static str),
    /// Write each line after waiting `interval`, then close.
    Trickle {
        lines: &'static [&'static str],
        interval: Duration,
    },
}

/// Serves one scripted reply per accepted connection, in order.
pub struct FakeWhoisServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeWhoisServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let queries = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&queries);
        tokio::spawn(async move {
            for reply in replies {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let (read_half, mut write_half) = stream.into_split();

                let mut line = String::new();
                let _ = BufReader::new(read_half).read_line(&mut line).await;
                recorded.lock().unwrap().push(line);

                match reply {
                    Reply::Close(text) => {
                        let _ = write_half.write_all(text.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                    }
                    Reply::Stall(text) => {
                        let _ = write_half.write_all(text.as_bytes()).await;
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                    Reply::Trickle { lines, interval } => {
                        for line in lines {
                            tokio::time::sleep(interval).await;
                            if write_half.write_all(line.as_bytes()).await.is_err() {
                                break;
                            }
                        }
                        let _ = write_half.shutdown().await;
                    }
                }
            }
        });

        Self { addr, queries }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Query lines received so far, terminators included.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

/// Records every `(host, port)` it is asked to dial and connects to a fixed
/// local address instead. Hosts marked as refused fail without dialing.
#[derive(Clone)]
pub struct RecordingConnector {
    target: SocketAddr,
    refused: HashSet<String>,
    dials: Arc<Mutex<Vec<(String, u16)>>>,
}

impl RecordingConnector {
    pub fn new(target: SocketAddr) -> Self {
        Self {
            target,
            refused: HashSet::new(),
            dials: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn refusing(mut self, host: &str) -> Self {
        self.refused.insert(host.to_string());
        self
    }

    pub fn dials(&self) -> Vec<(String, u16)> {
        self.dials.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for RecordingConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: u16, _timeout: Duration) -> io::Result<TcpStream> {
        self.dials.lock().unwrap().push((host.to_string(), port));
        if self.refused.contains(host) {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"));
        }
        TcpStream::connect(self.target).await
    }
}

/// A connected stream that rejects every write and reads as closed.
pub struct BrokenWriteStream;

impl AsyncRead for BrokenWriteStream {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for BrokenWriteStream {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Hands out a [`BrokenWriteStream`] for every dial.
pub struct BrokenWriteConnector;

#[async_trait]
impl Connector for BrokenWriteConnector {
    type Stream = BrokenWriteStream;

    async fn connect(&self, _host: &str, _port: u16, _timeout: Duration) -> io::Result<BrokenWriteStream> {
        Ok(BrokenWriteStream)
    }
}
