//! WalletCard - one card per wallet: derive what to show, dispatch what the user clicked.
//!
//! Every action follows the same shape:
//!
//! ```text
//! click ─► gate (available? connected?) ─► provider call ─► Ok  ─► success effect
//!              │                                        └─► Err ─► one error toast
//!              └─► disabled: ignored, nothing called, nothing shown
//! ```
//!
//! Failures are caught here and turned into notifications; no action returns an
//! error to its caller. Actions hold no lock and do not cancel each other.

use crate::config::CardConfig;
use crate::errors::{CardError, CardResult};
use crate::notify::{Notice, Notifier};
use crate::provider::WalletProvider;
use crate::session::{SessionHandle, SessionSnapshot};
use crate::view::{CardView, DisplayState};
use crate::wallet::{Network, WalletId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Fixed demo payment, sent to the wallet's own payment address.
pub const SEND_AMOUNT_SATS: u64 = 1_500;

pub type SignatureCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action { Toggle, Connect, Disconnect, Send, SignMessage, SignPsbt, SwitchNetwork }

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Toggle => "toggle",
            Action::Connect => "connect",
            Action::Disconnect => "disconnect",
            Action::Send => "send",
            Action::SignMessage => "sign_message",
            Action::SignPsbt => "sign_psbt",
            Action::SwitchNetwork => "switch_network",
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "toggle" => Ok(Action::Toggle),
            "connect" => Ok(Action::Connect),
            "disconnect" => Ok(Action::Disconnect),
            "send" => Ok(Action::Send),
            "sign_message" | "sign" => Ok(Action::SignMessage),
            "sign_psbt" | "psbt" => Ok(Action::SignPsbt),
            "switch_network" | "switch" => Ok(Action::SwitchNetwork),
            _ => Err(format!("Unknown action: {}", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Provider call succeeded. Carries the txid / signature when there is one.
    Done(Option<String>),
    /// Button was disabled; nothing happened.
    Ignored,
    /// Failed and was shown to the user as one error notification.
    Failed(CardError),
}

impl ActionOutcome {
    pub fn is_done(&self) -> bool { matches!(self, ActionOutcome::Done(_)) }
}

#[derive(Clone)]
pub struct WalletCard {
    wallet: WalletId,
    session: SessionHandle,
    provider: Arc<dyn WalletProvider>,
    notifier: Arc<dyn Notifier>,
    on_signature: SignatureCallback,
    config: CardConfig,
}

impl WalletCard {
    pub fn new(
        wallet: WalletId,
        session: SessionHandle,
        provider: Arc<dyn WalletProvider>,
        notifier: Arc<dyn Notifier>,
        on_signature: SignatureCallback,
    ) -> Self {
        Self { wallet, session, provider, notifier, on_signature, config: CardConfig::default() }
    }

    pub fn with_config(mut self, config: CardConfig) -> Self { self.config = config; self }

    pub fn wallet(&self) -> WalletId { self.wallet }

    pub fn display(&self) -> DisplayState { DisplayState::derive(self.wallet, &self.session.snapshot()) }

    pub fn render(&self) -> CardView { CardView::render(self.wallet, &self.session.snapshot()) }

    /// Session changes to re-render on.
    pub fn watch(&self) -> broadcast::Receiver<SessionSnapshot> { self.session.subscribe() }

    /// Run `action` as if its button were clicked.
    pub async fn dispatch(&self, action: Action) -> ActionOutcome {
        let display = self.display();
        let enabled = match action {
            Action::Toggle => display.can_toggle(),
            Action::Connect => display.can_toggle() && !display.is_connected,
            Action::Disconnect => display.can_toggle() && display.is_connected,
            Action::Send | Action::SignMessage | Action::SignPsbt | Action::SwitchNetwork => display.can_act(),
        };
        if !enabled {
            tracing::debug!(wallet = %self.wallet, action = action.as_str(), "action disabled, ignored");
            return ActionOutcome::Ignored;
        }

        let result = match action {
            Action::Toggle if display.is_connected => self.disconnect().await.map(|_| None),
            Action::Toggle | Action::Connect => self.connect().await.map(|_| None),
            Action::Disconnect => self.disconnect().await.map(|_| None),
            Action::Send => self.send().await.map(Some),
            Action::SignMessage => self.sign_message().await.map(Some),
            Action::SignPsbt => self.sign_psbt().await.map(Some),
            Action::SwitchNetwork => self.switch_network().await.map(|n| Some(n.as_str().to_string())),
        };

        match result {
            Ok(value) => ActionOutcome::Done(value),
            Err(err) => {
                tracing::warn!(wallet = %self.wallet, action = action.as_str(), error = %err, "action failed");
                self.notifier.error(&err.to_string());
                ActionOutcome::Failed(err)
            }
        }
    }

    async fn connect(&self) -> CardResult<()> {
        self.provider.connect(self.wallet).await.map_err(CardError::provider)
    }

    async fn disconnect(&self) -> CardResult<()> {
        self.provider.disconnect().await.map_err(CardError::provider)
    }

    async fn send(&self) -> CardResult<String> {
        let session = self.session.snapshot();
        let available = session.total_sats();
        if available < SEND_AMOUNT_SATS {
            return Err(CardError::InsufficientFunds { required: SEND_AMOUNT_SATS, available });
        }
        let address = session.payment_address.as_deref().ok_or(CardError::MissingPaymentAddress)?;

        let txid = self.provider.send_payment(address, SEND_AMOUNT_SATS).await.map_err(CardError::provider)?;
        let link = self.config.tx_link(session.network, &txid);
        tracing::info!(wallet = %self.wallet, %txid, "payment sent");
        self.notifier.success(Notice::new(self.config.explorer_title(), txid.clone()).with_link(link));
        Ok(txid)
    }

    async fn sign_message(&self) -> CardResult<String> {
        let signature = self.provider.sign_message(self.wallet.as_str()).await.map_err(CardError::provider)?;
        tracing::debug!(wallet = %self.wallet, %signature, "message signed");
        (self.on_signature)(signature.clone());
        Ok(signature)
    }

    async fn sign_psbt(&self) -> CardResult<String> {
        let signed = self.provider.sign_psbt(self.wallet.as_str()).await.map_err(CardError::provider)?;
        tracing::debug!(wallet = %self.wallet, "psbt signed");
        Ok(signed)
    }

    async fn switch_network(&self) -> CardResult<Network> {
        let target = self.session.snapshot().network.toggled();
        self.provider.switch_network(target).await.map_err(CardError::provider)?;
        Ok(target)
    }
}

/// One card per supported wallet, all sharing the same session and provider.
pub fn deck(
    session: &SessionHandle,
    provider: Arc<dyn WalletProvider>,
    notifier: Arc<dyn Notifier>,
    on_signature: SignatureCallback,
    config: &CardConfig,
) -> Vec<WalletCard> {
    WalletId::ALL
        .into_iter()
        .map(|wallet| {
            WalletCard::new(wallet, session.clone(), provider.clone(), notifier.clone(), on_signature.clone())
                .with_config(config.clone())
        })
        .collect()
}
