//! View - what a card shows, derived purely from (wallet, snapshot).

use crate::format::display_amount;
use crate::session::SessionSnapshot;
use crate::wallet::WalletId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub is_connected: bool,
    pub is_available: bool,
    pub confirmed_display: String,
    pub unconfirmed_display: String,
    pub total_display: String,
}

impl DisplayState {
    pub fn derive(wallet: WalletId, session: &SessionSnapshot) -> Self {
        let is_connected = session.is_active(wallet);
        let balance = session.balance;
        Self {
            is_connected,
            is_available: session.capabilities.has(wallet),
            confirmed_display: display_amount(balance.map(|b| b.confirmed), is_connected),
            unconfirmed_display: display_amount(balance.map(|b| b.unconfirmed), is_connected),
            total_display: display_amount(balance.map(|b| b.total), is_connected),
        }
    }

    /// Connect/disconnect toggle.
    pub fn can_toggle(&self) -> bool { self.is_available }

    /// Send, sign message, sign PSBT, switch network.
    pub fn can_act(&self) -> bool { self.is_available && self.is_connected }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant { Default, Secondary, Success, Destructive }

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub variant: Variant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub variant: Variant,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub wallet: WalletId,
    pub title: String,
    pub badge: Badge,
    pub toggle: Button,
    pub balances: Vec<String>,
    pub actions: Vec<Button>,
    pub display: DisplayState,
}

impl CardView {
    pub fn render(wallet: WalletId, session: &SessionSnapshot) -> Self {
        let display = DisplayState::derive(wallet, session);
        let connected = display.is_connected;

        let badge = if connected {
            Badge { label: "Connected", variant: Variant::Success }
        } else {
            Badge { label: "Disconnected", variant: Variant::Secondary }
        };
        let toggle = Button {
            label: if connected { "Disconnect" } else { "Connect" }.into(),
            variant: if connected { Variant::Destructive } else { Variant::Default },
            enabled: display.can_toggle(),
        };

        let action = |label: String| Button {
            label,
            variant: if connected { Variant::Default } else { Variant::Secondary },
            enabled: display.can_act(),
        };
        let actions = vec![
            action("Send BTC".into()),
            action("Sign Message".into()),
            action("Sign PSBT".into()),
            action(format!("Switch to {}", session.network.toggled().label())),
        ];

        let balances = vec![
            format!("{} unconfirmed", display.unconfirmed_display),
            format!("{} confirmed", display.confirmed_display),
            format!("{} total", display.total_display),
        ];

        Self { wallet, title: wallet.title(), badge, toggle, balances, actions, display }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PLACEHOLDER;
    use crate::session::{Balance, Capabilities};
    use crate::wallet::Network;

    fn session(active: Option<WalletId>, balance: Option<Balance>) -> SessionSnapshot {
        SessionSnapshot { active_provider: active, balance, capabilities: Capabilities::all(), ..Default::default() }
    }

    #[test]
    fn connected_iff_active_provider_matches() {
        for wallet in WalletId::ALL {
            for active in WalletId::ALL.iter().copied().map(Some).chain([None]) {
                let d = DisplayState::derive(wallet, &session(active, None));
                assert_eq!(d.is_connected, active == Some(wallet));
            }
        }
    }

    #[test]
    fn disconnected_hides_every_balance() {
        for balance in [None, Some(Balance::default()), Some(Balance::new(u64::MAX / 2, 7))] {
            let d = DisplayState::derive(WalletId::Unisat, &session(Some(WalletId::Xverse), balance));
            assert_eq!(d.confirmed_display, PLACEHOLDER);
            assert_eq!(d.unconfirmed_display, PLACEHOLDER);
            assert_eq!(d.total_display, PLACEHOLDER);
        }
    }

    #[test]
    fn connected_shows_btc() {
        let d = DisplayState::derive(WalletId::Oyl, &session(Some(WalletId::Oyl), Some(Balance::new(150_000_000, 0))));
        assert_eq!(d.confirmed_display, "1.5");
        assert_eq!(d.unconfirmed_display, "0");
        assert_eq!(d.total_display, "1.5");
    }

    #[test]
    fn unavailable_wallet_disables_everything() {
        let mut s = session(None, None);
        s.capabilities = Capabilities::default();
        let view = CardView::render(WalletId::Leather, &s);
        assert!(!view.toggle.enabled);
        assert!(view.actions.iter().all(|b| !b.enabled));
    }

    #[test]
    fn available_but_inactive_can_only_connect() {
        let view = CardView::render(WalletId::Leather, &session(Some(WalletId::Unisat), None));
        assert_eq!(view.toggle.label, "Connect");
        assert!(view.toggle.enabled);
        assert!(view.actions.iter().all(|b| !b.enabled && b.variant == Variant::Secondary));
        assert_eq!(view.badge.label, "Disconnected");
    }

    #[test]
    fn connected_card_layout() {
        let mut s = session(Some(WalletId::Xverse), Some(Balance::new(100_000_000, 50_000_000)));
        s.network = Network::Testnet;
        let view = CardView::render(WalletId::Xverse, &s);
        assert_eq!(view.title, "XVERSE");
        assert_eq!(view.badge, Badge { label: "Connected", variant: Variant::Success });
        assert_eq!(view.toggle.label, "Disconnect");
        assert_eq!(view.toggle.variant, Variant::Destructive);
        assert_eq!(view.balances, vec!["0.5 unconfirmed", "1 confirmed", "1.5 total"]);
        let labels: Vec<_> = view.actions.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Send BTC", "Sign Message", "Sign PSBT", "Switch to Mainnet"]);
        assert!(view.actions.iter().all(|b| b.enabled));
    }
}
