//! Property-based tests using proptest.
//!
//! Pricing bounds and monotonicity, and selection invariants over random
//! chains.

use proptest::prelude::*;

use cc_options::models::{call_price, discounted_intrinsic};
use cc_options::prelude::*;
use cc_options::selection::price_selection;

// --- Pricing ---

proptest! {
    /// Call value sits between discounted intrinsic and spot
    #[test]
    fn call_price_is_bounded(
        spot in 10.0_f64..500.0,
        moneyness in 0.7_f64..1.3,
        rate in 0.0_f64..0.08,
        vol in 0.01_f64..1.5,
        time in 1.0_f64 / 365.0..2.0,
    ) {
        let strike = spot * moneyness;
        let price = call_price(spot, strike, rate, vol, time);
        let floor = discounted_intrinsic(spot, strike, rate, time);

        prop_assert!(price >= 0.0);
        prop_assert!(price >= floor - 1e-9, "price {} below intrinsic {}", price, floor);
        prop_assert!(price <= spot + 1e-9);
    }

    /// More volatility never lowers the price
    #[test]
    fn call_price_non_decreasing_in_vol(
        spot in 10.0_f64..500.0,
        moneyness in 0.7_f64..1.3,
        rate in 0.0_f64..0.08,
        vol in 0.01_f64..1.0,
        bump in 0.001_f64..0.5,
        time in 1.0_f64 / 365.0..1.0,
    ) {
        let strike = spot * moneyness;
        let low = call_price(spot, strike, rate, vol, time);
        let high = call_price(spot, strike, rate, vol + bump, time);
        prop_assert!(high >= low - 1e-9, "{} -> {}", low, high);
    }

    /// A higher strike never raises the price
    #[test]
    fn call_price_non_increasing_in_strike(
        spot in 10.0_f64..500.0,
        moneyness in 0.7_f64..1.3,
        step in 0.01_f64..20.0,
        rate in 0.0_f64..0.08,
        vol in 0.01_f64..1.0,
        time in 1.0_f64 / 365.0..1.0,
    ) {
        let strike = spot * moneyness;
        let lower = call_price(spot, strike, rate, vol, time);
        let higher = call_price(spot, strike + step, rate, vol, time);
        prop_assert!(higher <= lower + 1e-9, "{} -> {}", lower, higher);
    }

    /// Zero volatility prices the discounted payoff exactly
    #[test]
    fn zero_vol_is_discounted_intrinsic(
        spot in 10.0_f64..500.0,
        moneyness in 0.5_f64..1.5,
        rate in 0.0_f64..0.08,
        time in 0.0_f64..2.0,
    ) {
        let strike = spot * moneyness;
        let expected = (spot - strike * (-rate * time).exp()).max(0.0);
        prop_assert_eq!(call_price(spot, strike, rate, 0.0, time), expected);
    }
}

// --- Selection ---

fn arb_quote() -> impl Strategy<Value = OptionQuote> {
    (
        50.0_f64..150.0,
        prop::option::of(0.0_f64..10.0),
        prop::option::of(0.0_f64..10.0),
        prop::option::of(0.0_f64..10.0),
        prop::option::of(0_u64..2000),
        prop::option::of(0_u64..500),
    )
        .prop_map(|(strike, bid, ask, last, oi, vol)| OptionQuote {
            strike: Some((strike * 2.0).round() / 2.0),
            bid,
            ask,
            last,
            open_interest: oi,
            volume: vol,
            implied_vol: None,
        })
}

fn arb_mode() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![
        Just(SelectionMode::Atm),
        Just(SelectionMode::Itm),
        Just(SelectionMode::Both),
    ]
}

proptest! {
    /// ITM selection never returns a strike above spot
    #[test]
    fn itm_strike_at_or_below_spot(
        chain in prop::collection::vec(arb_quote(), 0..40),
        spot in 50.0_f64..150.0,
    ) {
        if let Some(sel) = ContractSelector::new().select(&chain, spot, SelectionMode::Itm) {
            prop_assert!(sel.strike() <= spot, "strike {} above spot {}", sel.strike(), spot);
        }
    }

    /// Same chain, spot and mode always give the same quote
    #[test]
    fn selection_is_deterministic(
        chain in prop::collection::vec(arb_quote(), 0..40),
        spot in 50.0_f64..150.0,
        mode in arb_mode(),
        relaxed in any::<bool>(),
    ) {
        let config = if relaxed { SelectionConfig::relaxed() } else { SelectionConfig::strict() };
        let selector = ContractSelector::with_config(config);
        let first = selector.select(&chain, spot, mode);
        let second = selector.select(&chain, spot, mode);
        prop_assert_eq!(first, second);
    }

    /// Any selected quote comes from the chain and carries a price
    #[test]
    fn selection_has_a_price(
        chain in prop::collection::vec(arb_quote(), 1..40),
        spot in 50.0_f64..150.0,
        mode in arb_mode(),
    ) {
        if let Some(sel) = ContractSelector::new().select(&chain, spot, mode) {
            prop_assert!(chain.contains(&sel.quote));
            prop_assert!(sel.quote.has_any_price());
            prop_assert_eq!(sel.mode, mode);
        }
    }

    /// A priced position's stored return matches a recomputation
    #[test]
    fn premium_return_recomputes(
        chain in prop::collection::vec(arb_quote(), 1..40),
        spot in 50.0_f64..150.0,
        mode in arb_mode(),
    ) {
        let selected = ContractSelector::new().select(&chain, spot, mode);
        if let Some(pos) = selected.and_then(|s| price_selection(s, spot)) {
            prop_assert!(pos.mid.is_finite() && pos.mid >= 0.0);
            let again = premium_return_pct(pos.strike(), pos.spot, pos.mid);
            prop_assert!((again - pos.premium_return_pct).abs() < 1e-9);
        }
    }

    /// Mid never leaves the range of the positive inputs
    #[test]
    fn mid_within_inputs(
        bid in prop::option::of(0.0_f64..20.0),
        ask in prop::option::of(0.0_f64..20.0),
        last in prop::option::of(0.0_f64..20.0),
    ) {
        let inputs: Vec<f64> = [bid, ask, last].into_iter().flatten().filter(|v| *v > 0.0).collect();
        match mid_price(bid, ask, last) {
            Some(mid) => {
                let lo = inputs.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = inputs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(mid >= lo && mid <= hi);
            }
            None => prop_assert!(inputs.is_empty()),
        }
    }
}
