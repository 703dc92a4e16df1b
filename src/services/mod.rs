pub mod referral;
pub mod whois;

#[cfg(test)]
mod testing;

pub use referral::{find_referral, Referral, WhoisClient, REFERRAL_MARKER};
pub use whois::{Connector, QueryExecutor, TcpConnector};
