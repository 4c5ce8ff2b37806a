//! Browser bindings: render cards from a session object handed over by JS.
//!
//! ```js
//! import init, { renderCard } from "walletcard";
//! await init();
//! const view = renderCard("unisat", { active_provider: "unisat", capabilities: { unisat: true } });
//! ```

use crate::format::sats_to_btc;
use crate::session::SessionSnapshot;
use crate::view::CardView;
use crate::wallet::WalletId;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = "renderCard")]
pub fn render_card(wallet: &str, session: JsValue) -> Result<JsValue, JsValue> {
    let wallet: WalletId = wallet.parse().map_err(|e: crate::CardError| JsValue::from_str(&e.to_string()))?;
    let snapshot: SessionSnapshot = if session.is_undefined() || session.is_null() {
        SessionSnapshot::default()
    } else {
        serde_wasm_bindgen::from_value(session).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    to_js(&CardView::render(wallet, &snapshot))
}

#[wasm_bindgen(js_name = "formatSats")]
pub fn format_sats(sats: f64) -> Result<String, JsValue> {
    if !sats.is_finite() || sats < 0.0 || sats.fract() != 0.0 {
        return Err(JsValue::from_str(&format!("not a satoshi amount: {}", sats)));
    }
    Ok(sats_to_btc(sats as u64))
}

#[wasm_bindgen(js_name = "supportedWallets")]
pub fn supported_wallets() -> Result<JsValue, JsValue> {
    to_js(&WalletId::ALL)
}
