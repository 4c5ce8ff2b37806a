//! Walletcard: one card per Bitcoin browser wallet. Reads the session, dispatches clicks.
//!
//! # Architecture
//!
//! ```text
//! WalletCard (one per WalletId)
//!   │
//!   ├── render()   ◄── SessionHandle (shared, provider-owned snapshot)
//!   │                     └── subscribe() → re-render on change
//!   │
//!   ├── dispatch() ──► WalletProvider (connect, send, sign, switch...)
//!   │                     └── DemoProvider (in-process simulation)
//!   │
//!   └── failures  ──► Notifier (ToastFeed, LogNotifier)
//! ```
//!
//! # Actions
//!
//! | Action | Enabled when | Provider call |
//! |--------|--------------|---------------|
//! | connect / disconnect | wallet detected | `connect(id)` / `disconnect()` |
//! | send | detected + active | `send_payment(own address, 1500)` |
//! | sign message | detected + active | `sign_message(id)` |
//! | sign PSBT | detected + active | `sign_psbt(id)` |
//! | switch network | detected + active | `switch_network(other network)` |
//!
//! # Features
//!
//! - `native` - tokio runtime, log subscriber, CLI (default)
//! - `wasm` - wasm-bindgen bindings for rendering cards in the browser
//!
//! # Usage
//!
//! ```ignore
//! use walletcard::*;
//! use std::sync::Arc;
//!
//! let session = SessionHandle::new(SessionSnapshot { capabilities: Capabilities::all(), ..Default::default() });
//! let provider = Arc::new(DemoProvider::new(session.clone(), Balance::new(2_000, 0)));
//! let card = WalletCard::new(WalletId::Unisat, session, provider, Arc::new(LogNotifier), Arc::new(|sig| println!("{sig}")));
//!
//! card.dispatch(Action::Connect).await;
//! card.dispatch(Action::Send).await;
//! println!("{:?}", card.render().balances);
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod card;
pub mod config;
pub mod errors;
pub mod format;
pub mod notify;
pub mod provider;
pub mod session;
pub mod view;
pub mod wallet;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use card::{deck, Action, ActionOutcome, SignatureCallback, WalletCard, SEND_AMOUNT_SATS};
pub use config::CardConfig;
pub use errors::{CardError, CardResult};
pub use format::{sats_to_btc, PLACEHOLDER};
pub use notify::{Level, LogNotifier, Notice, Notification, Notifier, ToastFeed};
pub use provider::{CallKind, DemoProvider, ProviderCall, WalletProvider};
pub use session::{Balance, Capabilities, SessionHandle, SessionSnapshot};
pub use view::{CardView, DisplayState, Variant};
pub use wallet::{Network, WalletId};
