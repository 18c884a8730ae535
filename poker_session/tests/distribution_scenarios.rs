//! Chip distribution scenarios.
//!
//! Every successful distribution must be worth exactly the amount requested
//! (within one cent); anything else must come back as an error.

use poker_session::chips::{ChipDistributor, ChipSet, Denomination, DistributionError, distribute};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn chip_set(face_values: &[Decimal]) -> ChipSet {
    ChipSet::new(
        face_values
            .iter()
            .enumerate()
            .map(|(i, face)| Denomination::new(i as u32 + 1, *face, "#000", format!("chip{i}")))
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_simple_buy_in_scenario() {
    let chips = chip_set(&[dec!(0.25), dec!(0.5), dec!(1), dec!(10)]);
    let stack = distribute(dec!(37.00), &chips).unwrap();

    assert_eq!(chips.value_of(&stack).unwrap(), dec!(37.00));
    assert_eq!(stack.iter().count(), 4, "every denomination is listed");
}

#[test]
fn test_unreachable_amount_scenario() {
    let chips = chip_set(&[dec!(10)]);
    let err = distribute(dec!(15.00), &chips).unwrap_err();
    assert!(
        matches!(err, DistributionError::DistributionUnreachable { .. }),
        "15 is not a multiple of 10, got {err:?}"
    );
}

#[test]
fn test_common_buy_ins_on_default_chips() {
    let chips = ChipSet::default();
    let amounts = vec![
        dec!(0.25),
        dec!(0.75),
        dec!(1),
        dec!(5.50),
        dec!(20),
        dec!(37),
        dec!(50),
        dec!(100),
        dec!(250.75),
        dec!(1000),
    ];

    for amount in amounts {
        let stack = distribute(amount, &chips)
            .unwrap_or_else(|e| panic!("{amount} should be distributable: {e}"));
        assert_eq!(
            chips.value_of(&stack).unwrap(),
            amount,
            "stack for {amount} is worth {}",
            chips.value_of(&stack).unwrap()
        );
    }
}

#[test]
fn test_larger_buy_ins_show_variety() {
    let chips = ChipSet::default();
    for amount in [dec!(20), dec!(50), dec!(100)] {
        let stack = distribute(amount, &chips).unwrap();
        let colors = stack.iter().filter(|(_, count)| *count > 0).count();
        assert!(
            colors >= 3,
            "{amount} was paid with only {colors} chip color(s): {stack:?}"
        );
    }
}

#[test]
fn test_casino_chip_set() {
    let chips = chip_set(&[dec!(1), dec!(5), dec!(25), dec!(100), dec!(500)]);
    for amount in [dec!(1), dec!(7), dec!(99), dec!(1234), dec!(10000)] {
        let stack = distribute(amount, &chips).unwrap();
        assert_eq!(chips.value_of(&stack).unwrap(), amount);
    }
}

#[test]
fn test_amount_below_smallest_chip() {
    let chips = chip_set(&[dec!(5), dec!(25)]);
    assert!(matches!(
        distribute(dec!(3), &chips),
        Err(DistributionError::DistributionUnreachable { .. })
    ));
}

#[test]
fn test_greedy_fallback_does_not_search() {
    // 9 = 3 + 3 + 3, but a single greedy pass takes the 5 first
    let chips = chip_set(&[dec!(3), dec!(5)]);
    assert!(matches!(
        distribute(dec!(9), &chips),
        Err(DistributionError::DistributionUnreachable { .. })
    ));
}

#[test]
fn test_wider_tolerance_accepts_near_miss() {
    let chips = chip_set(&[dec!(0.25), dec!(1)]);
    let strict = ChipDistributor::default();
    assert!(strict.distribute(dec!(10.10), &chips).is_err());

    let loose = ChipDistributor::default().with_tolerance(dec!(0.10));
    let stack = loose.distribute(dec!(10.10), &chips).unwrap();
    assert_eq!(chips.value_of(&stack).unwrap(), dec!(10.00));
}
