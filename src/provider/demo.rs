//! DemoProvider - in-process stand-in for a browser wallet.
//!
//! Keeps a session, records every call, and can be told to fail the next call
//! of a given kind. No keys, no signing, no network.

use super::WalletProvider;
use crate::session::{Balance, SessionHandle, SessionSnapshot};
use crate::wallet::{Network, WalletId};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind { Connect, Disconnect, SendPayment, SignMessage, SignPsbt, SwitchNetwork }

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ProviderCall {
    Connect { wallet: WalletId },
    Disconnect,
    SendPayment { address: String, amount_sat: u64 },
    SignMessage { message: String },
    SignPsbt { psbt: String },
    SwitchNetwork { network: Network },
}

impl ProviderCall {
    pub fn kind(&self) -> CallKind {
        match self {
            ProviderCall::Connect { .. } => CallKind::Connect,
            ProviderCall::Disconnect => CallKind::Disconnect,
            ProviderCall::SendPayment { .. } => CallKind::SendPayment,
            ProviderCall::SignMessage { .. } => CallKind::SignMessage,
            ProviderCall::SignPsbt { .. } => CallKind::SignPsbt,
            ProviderCall::SwitchNetwork { .. } => CallKind::SwitchNetwork,
        }
    }
}

pub struct DemoProvider {
    session: SessionHandle,
    funding: Balance,
    calls: Mutex<Vec<ProviderCall>>,
    failures: Mutex<HashMap<CallKind, String>>,
    tx_counter: AtomicU64,
}

impl DemoProvider {
    /// `funding` is the balance a wallet shows once connected.
    pub fn new(session: SessionHandle, funding: Balance) -> Self {
        Self { session, funding, calls: Mutex::new(Vec::new()), failures: Mutex::new(HashMap::new()), tx_counter: AtomicU64::new(0) }
    }

    pub fn session(&self) -> SessionHandle { self.session.clone() }

    /// Make the next call of `kind` reject with `message`.
    pub fn fail_next(&self, kind: CallKind, message: impl Into<String>) {
        self.failures.lock().unwrap_or_else(|p| p.into_inner()).insert(kind, message.into());
    }

    pub fn calls(&self) -> Vec<ProviderCall> { self.calls.lock().unwrap_or_else(|p| p.into_inner()).clone() }

    pub fn calls_of(&self, kind: CallKind) -> Vec<ProviderCall> { self.calls().into_iter().filter(|c| c.kind() == kind).collect() }

    fn record(&self, call: ProviderCall) -> Result<()> {
        let kind = call.kind();
        self.calls.lock().unwrap_or_else(|p| p.into_inner()).push(call);
        match self.failures.lock().unwrap_or_else(|p| p.into_inner()).remove(&kind) {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }

    fn active(&self) -> Result<(WalletId, SessionSnapshot)> {
        let snapshot = self.session.snapshot();
        let wallet = snapshot.active_provider.ok_or_else(|| anyhow!("No wallet connected"))?;
        Ok((wallet, snapshot))
    }
}

fn demo_address(wallet: WalletId, network: Network) -> String {
    let hrp = match network { Network::Mainnet => "bc", Network::Testnet => "tb" };
    format!("{}1q{}demo{}", hrp, wallet.as_str(), "0".repeat(24))
}

#[async_trait]
impl WalletProvider for DemoProvider {
    async fn connect(&self, wallet: WalletId) -> Result<()> {
        self.record(ProviderCall::Connect { wallet })?;
        if !self.session.snapshot().capabilities.has(wallet) {
            return Err(anyhow!("{} is not installed", wallet.title()));
        }
        let funding = self.funding;
        self.session.update(|s| {
            s.active_provider = Some(wallet);
            s.payment_address = Some(demo_address(wallet, s.network));
            s.balance = Some(funding);
        });
        tracing::info!(%wallet, "demo wallet connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.record(ProviderCall::Disconnect)?;
        self.session.update(|s| {
            s.active_provider = None;
            s.payment_address = None;
            s.balance = None;
        });
        Ok(())
    }

    async fn send_payment(&self, address: &str, amount_sat: u64) -> Result<String> {
        self.record(ProviderCall::SendPayment { address: address.to_string(), amount_sat })?;
        let (wallet, snapshot) = self.active()?;
        if snapshot.total_sats() < amount_sat {
            return Err(anyhow!("Insufficient funds"));
        }
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let txid = format!("{:0>64x}", n);
        tracing::info!(%wallet, %txid, amount_sat, "demo payment");
        Ok(txid)
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        self.record(ProviderCall::SignMessage { message: message.to_string() })?;
        let (wallet, _) = self.active()?;
        Ok(format!("demo-sig:{}:{}", wallet.as_str(), message))
    }

    async fn sign_psbt(&self, psbt: &str) -> Result<String> {
        self.record(ProviderCall::SignPsbt { psbt: psbt.to_string() })?;
        let (wallet, _) = self.active()?;
        Ok(format!("demo-psbt:{}:{}", wallet.as_str(), psbt))
    }

    async fn switch_network(&self, network: Network) -> Result<()> {
        self.record(ProviderCall::SwitchNetwork { network })?;
        let (wallet, _) = self.active()?;
        self.session.update(|s| {
            s.network = network;
            s.payment_address = Some(demo_address(wallet, network));
        });
        Ok(())
    }
}
