//! Session - the provider-owned wallet session and the shared handle cards read it through.
//!
//! ```text
//! provider ──update()──► SessionHandle ──snapshot()──► WalletCard::render()
//!                              │
//!                              └──subscribe()──► re-render on every change
//! ```

use crate::wallet::{Network, WalletId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const UPDATE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub confirmed: u64,
    pub unconfirmed: u64,
    pub total: u64,
}

impl Balance {
    pub fn new(confirmed: u64, unconfirmed: u64) -> Self {
        Self { confirmed, unconfirmed, total: confirmed.saturating_add(unconfirmed) }
    }
}

/// Which wallet extensions were detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub unisat: bool,
    pub oyl: bool,
    pub leather: bool,
    pub xverse: bool,
}

impl Capabilities {
    pub fn all() -> Self { Self { unisat: true, oyl: true, leather: true, xverse: true } }

    pub fn has(&self, wallet: WalletId) -> bool {
        match wallet { WalletId::Unisat => self.unisat, WalletId::Oyl => self.oyl, WalletId::Leather => self.leather, WalletId::Xverse => self.xverse }
    }

    pub fn set(&mut self, wallet: WalletId, detected: bool) {
        match wallet {
            WalletId::Unisat => self.unisat = detected,
            WalletId::Oyl => self.oyl = detected,
            WalletId::Leather => self.leather = detected,
            WalletId::Xverse => self.xverse = detected,
        }
    }

    pub fn with(mut self, wallet: WalletId, detected: bool) -> Self { self.set(wallet, detected); self }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub active_provider: Option<WalletId>,
    pub network: Network,
    pub balance: Option<Balance>,
    pub payment_address: Option<String>,
    pub capabilities: Capabilities,
}

impl SessionSnapshot {
    pub fn is_active(&self, wallet: WalletId) -> bool { self.active_provider == Some(wallet) }

    pub fn total_sats(&self) -> u64 { self.balance.map(|b| b.total).unwrap_or(0) }
}

/// Shared session context. Clones share the same snapshot and update channel.
#[derive(Clone)]
pub struct SessionHandle {
    snapshot: Arc<RwLock<SessionSnapshot>>,
    sender: broadcast::Sender<SessionSnapshot>,
}

impl Default for SessionHandle {
    fn default() -> Self { Self::new(SessionSnapshot::default()) }
}

impl SessionHandle {
    pub fn new(initial: SessionSnapshot) -> Self {
        let (sender, _) = broadcast::channel(UPDATE_CAPACITY);
        Self { snapshot: Arc::new(RwLock::new(initial)), sender }
    }

    /// Current snapshot (copied out; callers never hold the lock).
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Apply a change and publish the resulting snapshot.
    pub fn update<F: FnOnce(&mut SessionSnapshot)>(&self, change: F) -> SessionSnapshot {
        let next = {
            let mut guard = self.snapshot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            change(&mut *guard);
            guard.clone()
        };
        tracing::debug!(active = ?next.active_provider, network = %next.network, "session updated");
        let _ = self.sender.send(next.clone());
        next
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionSnapshot> { self.sender.subscribe() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_are_keyed_by_wallet() {
        let caps = Capabilities::default().with(WalletId::Xverse, true);
        assert!(caps.has(WalletId::Xverse));
        assert!(!caps.has(WalletId::Unisat));
        assert!(WalletId::ALL.into_iter().all(|w| Capabilities::all().has(w)));
        assert!(!Capabilities::all().with(WalletId::Oyl, false).has(WalletId::Oyl));
    }

    #[test]
    fn snapshot_parses_partial_json() {
        let s: SessionSnapshot = serde_json::from_str(r#"{"active_provider":"oyl","capabilities":{"oyl":true}}"#).unwrap();
        assert!(s.is_active(WalletId::Oyl));
        assert_eq!(s.network, Network::Mainnet);
        assert_eq!(s.balance, None);
        assert_eq!(s.total_sats(), 0);
    }

    #[test]
    fn update_publishes_to_subscribers() {
        let handle = SessionHandle::default();
        let mut rx = handle.subscribe();
        let shared = handle.clone();
        shared.update(|s| s.network = Network::Testnet);

        let published = rx.try_recv().unwrap();
        assert_eq!(published.network, Network::Testnet);
        assert_eq!(handle.snapshot().network, Network::Testnet);
    }

    #[test]
    fn balance_total_is_sum() {
        assert_eq!(Balance::new(1_000, 500).total, 1_500);
    }
}
