//! Provider - the external wallet capability a card drives.
//!
//! The card never talks to a wallet extension itself. Everything that touches
//! keys, transactions or networks goes through [`WalletProvider`]; the provider
//! owns the session and publishes changes through its [`SessionHandle`](crate::SessionHandle).
//!
//! | Call | Returns |
//! |------|---------|
//! | `connect(id)` | session switches to `id` |
//! | `disconnect()` | session cleared |
//! | `send_payment(address, sats)` | txid |
//! | `sign_message(payload)` | signature |
//! | `sign_psbt(payload)` | signed PSBT |
//! | `switch_network(network)` | session network changes |

mod demo;

use crate::wallet::{Network, WalletId};
use anyhow::Result;
use async_trait::async_trait;

pub use demo::{CallKind, DemoProvider, ProviderCall};

#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn connect(&self, wallet: WalletId) -> Result<()>;
    async fn disconnect(&self) -> Result<()>;
    async fn send_payment(&self, address: &str, amount_sat: u64) -> Result<String>;
    async fn sign_message(&self, message: &str) -> Result<String>;
    async fn sign_psbt(&self, psbt: &str) -> Result<String>;
    async fn switch_network(&self, network: Network) -> Result<()>;
}
