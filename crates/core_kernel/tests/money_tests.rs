//! Money behavior across the public API

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

#[test]
fn display_uses_symbol_and_minor_unit_precision() {
    let rent = Money::new(dec!(1250.5), Currency::USD);
    assert_eq!(rent.to_string(), "$1250.50");

    let yen = Money::new(dec!(98000), Currency::JPY);
    assert_eq!(yen.to_string(), "¥98000");
}

#[test]
fn round_to_currency_drops_internal_precision() {
    let m = Money::new(dec!(33.3333), Currency::USD);
    assert_eq!(m.round_to_currency().amount(), dec!(33.33));
}

#[test]
fn checked_sub_across_currencies_fails() {
    let a = Money::new(dec!(10), Currency::PHP);
    let b = Money::new(dec!(10), Currency::SGD);
    assert!(matches!(
        a.checked_sub(&b),
        Err(MoneyError::CurrencyMismatch { .. })
    ));
}

#[test]
fn serde_round_trip_preserves_amount() {
    let m = Money::new(dec!(2000.00), Currency::USD);
    let json = serde_json::to_string(&m).unwrap();
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}
