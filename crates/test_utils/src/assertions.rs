//! Custom assertion helpers for domain types

use core_kernel::Money;
use domain_billing::bill::Bill;
use rust_decimal::Decimal;

/// Asserts a money value equals the expected decimal amount
#[track_caller]
pub fn assert_amount(money: Money, expected: Decimal) {
    assert_eq!(
        money.amount(),
        expected,
        "expected {} {}, got {}",
        money.currency(),
        expected,
        money
    );
}

/// Asserts a money value is exactly zero
#[track_caller]
pub fn assert_zero(money: Money) {
    assert!(money.is_zero(), "expected zero, got {}", money);
}

/// Asserts a bill's stored total matches the derivation from its components
#[track_caller]
pub fn assert_bill_conserved(bill: &Bill) {
    let derived = domain_billing::charges::total(&bill.components());
    assert_eq!(
        bill.total, derived,
        "bill {} total {} diverges from derived {}",
        bill.id, bill.total, derived
    );
}
