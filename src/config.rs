//! Card configuration - built by the embedding app, or loaded from env / JSON.

use crate::errors::{CardError, CardResult};
use crate::wallet::Network;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EXPLORER_URL: &str = "https://mempool.space";
pub const DEFAULT_TOAST_CAPACITY: usize = 32;
/// Upper bound on buffered toasts; the broadcast channel allocates this many slots up front.
pub const MAX_TOAST_CAPACITY: usize = 4096;

pub const ENV_EXPLORER_URL: &str = "WALLETCARD_EXPLORER_URL";
pub const ENV_TOAST_CAPACITY: &str = "WALLETCARD_TOAST_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub explorer_url: String,
    pub toast_capacity: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self { explorer_url: DEFAULT_EXPLORER_URL.into(), toast_capacity: DEFAULT_TOAST_CAPACITY }
    }
}

impl CardConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_explorer(mut self, url: impl Into<String>) -> Self { self.explorer_url = url.into(); self }
    pub fn with_toast_capacity(mut self, capacity: usize) -> Self { self.toast_capacity = capacity; self }

    /// Defaults overridden by `WALLETCARD_*` variables. Empty values are ignored.
    pub fn from_env() -> CardResult<Self> {
        let mut config = Self::default();
        if let Some(url) = std::env::var(ENV_EXPLORER_URL).ok().filter(|s| !s.is_empty()) {
            config.explorer_url = url;
        }
        if let Some(raw) = std::env::var(ENV_TOAST_CAPACITY).ok().filter(|s| !s.is_empty()) {
            config.toast_capacity = raw
                .parse()
                .map_err(|e| CardError::Config(format!("{}={}: {}", ENV_TOAST_CAPACITY, raw, e)))?;
        }
        config.validate()
    }

    pub fn from_file(path: &Path) -> CardResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CardError::Config(format!("read {}: {}", path.display(), e)))?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| CardError::Config(format!("json {}: {}", path.display(), e)))?;
        config.validate()
    }

    /// Reject values the toast feed cannot be built from.
    pub fn validate(self) -> CardResult<Self> {
        if !(1..=MAX_TOAST_CAPACITY).contains(&self.toast_capacity) {
            return Err(CardError::Config(format!(
                "toast_capacity {} out of range 1..={}",
                self.toast_capacity, MAX_TOAST_CAPACITY
            )));
        }
        if self.explorer_url.trim().is_empty() {
            return Err(CardError::Config("explorer_url is empty".into()));
        }
        Ok(self)
    }

    /// Block-explorer link for a transaction on `network`.
    ///
    /// `explorer_url` is the mainnet root of a mempool-style explorer; testnet
    /// links insert `/testnet` after it, so it should not already name a network.
    pub fn tx_link(&self, network: Network, txid: &str) -> String {
        let base = self.explorer_url.trim_end_matches('/');
        match network {
            Network::Mainnet => format!("{}/tx/{}", base, txid),
            Network::Testnet => format!("{}/testnet/tx/{}", base, txid),
        }
    }

    /// Headline of the send toast ("View on mempool.space").
    pub fn explorer_title(&self) -> String {
        let rest = self.explorer_url.split_once("://").map_or(self.explorer_url.as_str(), |(_, rest)| rest);
        let host = rest.split('/').next().unwrap_or(rest);
        format!("View on {}", host)
    }
}

/// Load `KEY=value` lines from a dotenv file without overriding variables already set.
pub fn load_dotenv(path: &Path) {
    let Ok(contents) = std::fs::read_to_string(path) else { return };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && std::env::var(key.trim()).is_err() {
                std::env::set_var(key.trim(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_follow_network() {
        let config = CardConfig::new();
        assert_eq!(config.tx_link(Network::Mainnet, "ab"), "https://mempool.space/tx/ab");
        assert_eq!(config.tx_link(Network::Testnet, "ab"), "https://mempool.space/testnet/tx/ab");
        assert_eq!(config.explorer_title(), "View on mempool.space");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let config = CardConfig::new().with_explorer("https://explorer.example/");
        assert_eq!(config.tx_link(Network::Mainnet, "ff"), "https://explorer.example/tx/ff");
        assert_eq!(config.explorer_title(), "View on explorer.example");
    }

    #[test]
    fn title_names_host_only() {
        let config = CardConfig::new().with_explorer("https://mempool.example/mirror/");
        assert_eq!(config.explorer_title(), "View on mempool.example");
        assert_eq!(config.tx_link(Network::Testnet, "ab"), "https://mempool.example/mirror/testnet/tx/ab");
        assert_eq!(CardConfig::new().with_explorer("explorer.local").explorer_title(), "View on explorer.local");
    }

    #[test]
    fn capacity_must_fit_the_feed() {
        assert!(CardConfig::new().validate().is_ok());
        assert!(CardConfig::new().with_toast_capacity(MAX_TOAST_CAPACITY).validate().is_ok());
        assert!(matches!(CardConfig::new().with_toast_capacity(0).validate(), Err(CardError::Config(_))));
        assert!(matches!(
            CardConfig::new().with_toast_capacity(MAX_TOAST_CAPACITY + 1).validate(),
            Err(CardError::Config(_))
        ));
    }
}
