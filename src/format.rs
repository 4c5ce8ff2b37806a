//! Satoshi amounts as display strings.

pub const SATS_PER_BTC: u64 = 100_000_000;

/// Shown in place of any balance on a card whose wallet is not the active one.
pub const PLACEHOLDER: &str = "--";

/// `150_000_000` -> `"1.5"`. Integer arithmetic only, trailing zeros trimmed.
pub fn sats_to_btc(amount_sat: u64) -> String {
    let whole = amount_sat / SATS_PER_BTC;
    let frac = amount_sat % SATS_PER_BTC;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:08}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Balance line value: placeholder unless connected, `0` when there is no balance yet.
pub fn display_amount(amount_sat: Option<u64>, connected: bool) -> String {
    if !connected {
        return PLACEHOLDER.to_string();
    }
    sats_to_btc(amount_sat.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_sats_to_btc() {
        assert_eq!(sats_to_btc(150_000_000), "1.5");
        assert_eq!(sats_to_btc(100_000_000), "1");
        assert_eq!(sats_to_btc(1_500), "0.000015");
        assert_eq!(sats_to_btc(1), "0.00000001");
        assert_eq!(sats_to_btc(0), "0");
        assert_eq!(sats_to_btc(2_100_000_000_000_000), "21000000");
    }

    #[test]
    fn disconnected_always_placeholder() {
        for amount in [None, Some(0), Some(1), Some(u64::MAX)] {
            assert_eq!(display_amount(amount, false), PLACEHOLDER);
        }
        assert_eq!(display_amount(None, true), "0");
        assert_eq!(display_amount(Some(250_000_000), true), "2.5");
    }
}
