//! Supported wallets and networks.

use crate::errors::{CardError, CardResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Browser wallets a card can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletId { Unisat, Oyl, Leather, Xverse }

impl WalletId {
    pub const ALL: [WalletId; 4] = [WalletId::Unisat, WalletId::Oyl, WalletId::Leather, WalletId::Xverse];

    pub fn as_str(&self) -> &'static str {
        match self { WalletId::Unisat => "unisat", WalletId::Oyl => "oyl", WalletId::Leather => "leather", WalletId::Xverse => "xverse" }
    }

    /// Card title.
    pub fn title(&self) -> String { self.as_str().to_ascii_uppercase() }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for WalletId {
    type Err = CardError;

    fn from_str(value: &str) -> CardResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unisat" => Ok(WalletId::Unisat),
            "oyl" => Ok(WalletId::Oyl),
            "leather" => Ok(WalletId::Leather),
            "xverse" => Ok(WalletId::Xverse),
            _ => Err(CardError::UnknownWallet(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network { #[default] Mainnet, Testnet }

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self { Network::Mainnet => "mainnet", Network::Testnet => "testnet" }
    }

    /// Label used on the switch button ("Switch to Mainnet").
    pub fn label(&self) -> &'static str {
        match self { Network::Mainnet => "Mainnet", Network::Testnet => "Testnet" }
    }

    pub fn toggled(&self) -> Network {
        match self { Network::Mainnet => Network::Testnet, Network::Testnet => Network::Mainnet }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Network {
    type Err = CardError;

    fn from_str(value: &str) -> CardResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(CardError::UnknownNetwork(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_ids_parse_case_insensitively() {
        for id in WalletId::ALL {
            assert_eq!(id.as_str().parse::<WalletId>().unwrap(), id);
            assert_eq!(id.title().parse::<WalletId>().unwrap(), id);
        }
        assert_eq!("phantom".parse::<WalletId>(), Err(CardError::UnknownWallet("phantom".into())));
    }

    #[test]
    fn network_toggle_flips() {
        assert_eq!(Network::Mainnet.toggled(), Network::Testnet);
        assert_eq!(Network::Testnet.toggled(), Network::Mainnet);
        assert_eq!("bitcoin".parse::<Network>().unwrap(), Network::Mainnet);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&WalletId::Xverse).unwrap(), "\"xverse\"");
        assert_eq!(serde_json::from_str::<Network>("\"testnet\"").unwrap(), Network::Testnet);
    }
}
