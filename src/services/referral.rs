use crate::config::WhoisConfig;
use crate::core::normalize_domain;
use crate::error::{Result, WhoisError};
use crate::{log_debug, log_info};

use super::whois::{Connector, QueryExecutor, TcpConnector};

/// Label that introduces the registrar's own WHOIS server in a response.
pub const REFERRAL_MARKER: &str = "Registrar WHOIS Server:";

/// Outcome of scanning a response for a registrar referral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referral {
    Server(String),
    MarkerNotFound,
    /// The marker is present but nothing follows it on its line.
    EmptyValue,
}

/// Find the first referral marker and parse the rest of its line.
///
/// Carriage returns are dropped and surrounding whitespace trimmed. A marker
/// on the final, unterminated line takes the remainder of the text.
pub fn find_referral(text: &str) -> Referral {
    let Some(start) = text.find(REFERRAL_MARKER) else {
        return Referral::MarkerNotFound;
    };

    let rest = &text[start + REFERRAL_MARKER.len()..];
    let line = rest.split('\n').next().unwrap_or_default();
    let server = line.replace('\r', "");
    let server = server.trim();

    if server.is_empty() {
        Referral::EmptyValue
    } else {
        Referral::Server(server.to_string())
    }
}

/// Looks up a domain and optionally follows the registrar referral.
///
/// Every call is independent; a client can be shared between tasks.
#[derive(Debug, Clone)]
pub struct WhoisClient<C = TcpConnector> {
    executor: QueryExecutor<C>,
}

impl WhoisClient<TcpConnector> {
    pub fn new(config: WhoisConfig) -> Self {
        Self {
            executor: QueryExecutor::new(config),
        }
    }
}

impl Default for WhoisClient<TcpConnector> {
    fn default() -> Self {
        Self::new(WhoisConfig::default())
    }
}

impl<C: Connector> WhoisClient<C> {
    pub fn with_connector(config: WhoisConfig, connector: C) -> Self {
        Self {
            executor: QueryExecutor::with_connector(config, connector),
        }
    }

    /// Query `domain`, then append the referred registrar's answer when
    /// `chase_referral` is set and the first answer names one.
    ///
    /// A failed referral query fails the whole lookup; the first answer is
    /// not returned on its own.
    pub async fn whois(&self, domain: &str, chase_referral: bool, server: Option<&str>) -> Result<String> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return Err(WhoisError::EmptyDomain);
        }

        let mut result = self.executor.query(&domain, server).await?;

        let referral = match find_referral(&result) {
            Referral::Server(referral) => referral,
            Referral::MarkerNotFound => return Ok(result),
            Referral::EmptyValue => {
                log_debug!("Empty registrar referral for {}", domain);
                return Ok(result);
            }
        };

        if !chase_referral {
            log_debug!("Not following referral to {} for {}", referral, domain);
            return Ok(result);
        }

        log_info!("Following referral to {} for {}", referral, domain);
        let referred = self.executor.query(&domain, Some(&referral)).await?;
        result.push_str(&referred);

        Ok(result)
    }
}
