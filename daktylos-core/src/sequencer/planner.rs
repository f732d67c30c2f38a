//! Value-to-keypress planner
//!
//! `set_value` produces the full key press sequence as data; it never
//! touches hardware. The executor (firmware) drains a plan to
//! completion before the next tick, so `shown` and `op` are committed
//! while the plan is generated and stay consistent with the physical
//! display.

use heapless::Vec;

use super::op::{Op, Place};
use crate::keys::Key;

/// Plan capacity.
///
/// A retarget within the ±999.99 display range fits in one plan
/// (reset, four shortcut places at up to 9 keys each, and an exact
/// top place stay under the bound). Larger deltas are split across
/// successive replans by `run_op`.
pub const MAX_PLAN_KEYS: usize = 64;

/// An ordered key press sequence
pub type KeyPlan = Vec<Key, MAX_PLAN_KEYS>;

/// A value to put on the display
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// Plain decimal number, two displayed decimals
    Decimal(f32),
    /// Wall clock rendered as `h.mm`
    Clock { hour: u8, minute: u8 },
}

/// Digit sequencer state
///
/// `shown` is the fixed-point (centi-unit) value the planner believes
/// the calculator currently displays. It is advanced step by step as
/// `=` presses are planned, so even a plan built around a clear-retry
/// matches the physical display press for press.
#[derive(Debug, Clone)]
pub struct Sequencer {
    op: Op,
    shown: i32,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Create a sequencer with an unknown display
    pub fn new() -> Self {
        Self {
            op: Op::Unset,
            shown: 0,
        }
    }

    /// Centi-unit value the planner believes is displayed
    pub fn shown_centi(&self) -> i32 {
        self.shown
    }

    /// Currently primed operation
    pub fn op(&self) -> Op {
        self.op
    }

    /// Force a known zero display: `CA` then `=`
    pub fn clear(&mut self) -> KeyPlan {
        let mut plan = KeyPlan::new();
        self.clear_into(&mut plan);
        plan
    }

    /// Plan the key presses that bring the display to `target`
    ///
    /// The first call after construction (or `clear`) starts from a
    /// `CA =` reset so the display state is known. An identical target
    /// yields an empty plan.
    pub fn set_value(&mut self, target: Target) -> KeyPlan {
        let mut plan = KeyPlan::new();
        if self.op == Op::Unset {
            self.clear_into(&mut plan);
        }
        match target {
            Target::Decimal(value) => self.plan_decimal(round_centi(value), &mut plan),
            Target::Clock { hour, minute } => self.plan_clock(hour, minute, &mut plan),
        }
        plan
    }

    fn clear_into(&mut self, plan: &mut KeyPlan) {
        let _ = plan.push(Key::ClearAll);
        let _ = plan.push(Key::Equals);
        self.op = Op::Cleared;
        self.shown = 0;
    }

    /// Flat decimal: walk the places low to high, recomputing the
    /// remaining delta each time so shortcut sign flips carry upward.
    /// The highest place takes the exact quotient, since there is no
    /// place above it to absorb a carry.
    fn plan_decimal(&mut self, target_centi: i32, plan: &mut KeyPlan) {
        for place in Place::ALL {
            let diff = target_centi - self.shown;
            if diff == 0 {
                break;
            }
            let top = place == Place::Hundred;
            let digit = if top {
                diff / place.centi()
            } else {
                (diff / place.centi()) % 10
            };
            self.step_place(digit, place, !top, plan);
        }
    }

    /// One place: pick increment or decrement, whichever needs fewer
    /// `=` presses. With `shortcut`, needing +9 is done as -1 with the
    /// next place up absorbing the borrow.
    fn step_place(&mut self, digit: i32, place: Place, shortcut: bool, plan: &mut KeyPlan) {
        if digit == 0 {
            return;
        }
        let mut count = digit.unsigned_abs();
        let mut positive = digit > 0;
        if shortcut && count > 5 {
            count = 10 - count;
            positive = !positive;
        }
        let op = if positive {
            Op::Add(place)
        } else {
            Op::Sub(place)
        };
        self.run_op(op, count, plan);
    }

    /// Wall clock: mixed radix. Minutes carry into hours at 100 on the
    /// display (the calculator is decimal), hours wrap at 24. Hours are
    /// emitted first with the minute carry pre-accounted; a total that
    /// would show 24 hours restarts from a cleared display, which
    /// always fits. The shorter-path shortcut never applies here.
    fn plan_clock(&mut self, hour: u8, minute: u8, plan: &mut KeyPlan) {
        for _ in 0..2 {
            let cur_hour = self.shown.div_euclid(100);
            let cur_minute = self.shown.rem_euclid(100);
            let minute_diff = (minute as i32 - cur_minute).rem_euclid(100);
            let carry = (cur_minute + minute_diff) / 100;
            let hour_diff = (hour as i32 - carry - cur_hour).rem_euclid(24);

            if cur_hour + hour_diff + carry >= 24 {
                self.clear_into(plan);
                continue;
            }

            self.run_op(Op::Add(Place::Ten), (hour_diff / 10) as u32, plan);
            self.run_op(Op::Add(Place::One), (hour_diff % 10) as u32, plan);
            self.run_op(Op::Add(Place::Deci), (minute_diff / 10) as u32, plan);
            self.run_op(Op::Add(Place::Centi), (minute_diff % 10) as u32, plan);
            break;
        }
    }

    /// Prime `op` if it is not already primed, then press `=` that many
    /// times. Priming costs a fixed key sequence once; every repeat in
    /// the same mode is a single key.
    ///
    /// Presses that do not fit the plan are not planned and do not
    /// advance `shown`; the next replan picks up the remaining delta.
    fn run_op(&mut self, op: Op, times: u32, plan: &mut KeyPlan) {
        if times == 0 {
            return;
        }
        let (Some(sign), Some(place)) = (op.sign_key(), op.place()) else {
            return;
        };
        let mut room = MAX_PLAN_KEYS - plan.len();
        if self.op != op {
            let priming = 1 + place.digit_keys().len();
            if room < priming + 1 {
                return;
            }
            let _ = plan.push(sign);
            for &key in place.digit_keys() {
                let _ = plan.push(key);
            }
            self.op = op;
            room -= priming;
        }
        for _ in 0..times.min(room as u32) {
            let _ = plan.push(Key::Equals);
            self.shown += op.step_centi();
        }
    }
}

/// Round a display value to centi-units, away from zero on ties
fn round_centi(value: f32) -> i32 {
    let scaled = value * 100.0;
    if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equals_count(plan: &KeyPlan) -> usize {
        plan.iter().filter(|&&k| k == Key::Equals).count()
    }

    fn priming_count(plan: &KeyPlan) -> usize {
        plan.iter()
            .filter(|&&k| k == Key::Plus || k == Key::Minus)
            .count()
    }

    #[test]
    fn test_first_value_starts_from_clear() {
        let mut seq = Sequencer::new();
        let plan = seq.set_value(Target::Decimal(0.0));
        assert_eq!(&plan[..], &[Key::ClearAll, Key::Equals]);
        assert_eq!(seq.shown_centi(), 0);
        assert_eq!(seq.op(), Op::Cleared);
    }

    #[test]
    fn test_idempotent_replan_emits_nothing() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Decimal(23.5));
        let second = seq.set_value(Target::Decimal(23.5));
        assert!(second.is_empty());
        assert_eq!(seq.shown_centi(), 2350);
    }

    #[test]
    fn test_decimal_round_trip() {
        let mut seq = Sequencer::new();
        for value in [0.05f32, 1.0, 99.99, 0.0, -3.21, 450.0] {
            seq.set_value(Target::Decimal(value));
            let expected = if value >= 0.0 {
                (value * 100.0 + 0.5) as i32
            } else {
                (value * 100.0 - 0.5) as i32
            };
            assert_eq!(seq.shown_centi(), expected, "value {}", value);
        }
    }

    #[test]
    fn test_nine_uses_shortcut_not_nine_presses() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Decimal(0.0));
        // 0 -> 0.09: ones place goes -1 (one press), tens place +1
        // absorbs the borrow. Never nine presses of +0.01.
        let plan = seq.set_value(Target::Decimal(0.09));
        assert_eq!(equals_count(&plan), 2);
        assert_eq!(priming_count(&plan), 2);
        assert_eq!(plan[0], Key::Minus);
        assert_eq!(seq.shown_centi(), 9);
    }

    #[test]
    fn test_six_inverts_four_does_not() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Decimal(0.0));
        // +4 is four presses of +0.01
        let plan = seq.set_value(Target::Decimal(0.04));
        assert_eq!(equals_count(&plan), 4);
        assert_eq!(plan[0], Key::Plus);

        // +6 from there is four presses of -0.01 and one of +0.1,
        // never six presses in one direction
        let plan = seq.set_value(Target::Decimal(0.10));
        assert_eq!(equals_count(&plan), 5);
        assert!(plan.contains(&Key::Minus));
        assert_eq!(seq.shown_centi(), 10);
    }

    #[test]
    fn test_mode_amortization_across_calls() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Clock { hour: 0, minute: 0 });

        // Three one-minute bumps prime +0.01 exactly once
        let mut primings = 0;
        for minute in 1..=3u8 {
            let plan = seq.set_value(Target::Clock { hour: 0, minute });
            primings += priming_count(&plan);
            assert_eq!(equals_count(&plan), 1);
        }
        assert_eq!(primings, 1);
    }

    #[test]
    fn test_clock_zero_to_0130() {
        let mut seq = Sequencer::new();
        let plan = seq.set_value(Target::Clock { hour: 1, minute: 30 });
        assert_eq!(
            &plan[..],
            &[
                Key::ClearAll,
                Key::Equals,
                // +1 hour
                Key::Plus,
                Key::One,
                Key::Equals,
                // +10 minutes, three times
                Key::Plus,
                Key::Dot,
                Key::One,
                Key::Equals,
                Key::Equals,
                Key::Equals,
            ]
        );
        assert_eq!(seq.shown_centi(), 130);
    }

    #[test]
    fn test_minute_carry_into_hour() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Clock { hour: 8, minute: 59 });
        // 8:59 -> 9:00 is 41 minutes of addition; the display carry
        // at .100 supplies the hour, so no hour keys are pressed.
        let plan = seq.set_value(Target::Clock { hour: 9, minute: 0 });
        assert_eq!(equals_count(&plan), 5); // 4 x ten-minutes + 1 minute
        assert!(!plan.contains(&Key::ClearAll));
        assert_eq!(seq.shown_centi(), 900);
    }

    #[test]
    fn test_midnight_wrap_restarts_from_clear() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Clock { hour: 23, minute: 59 });
        let plan = seq.set_value(Target::Clock { hour: 0, minute: 0 });
        // Additive wrap would display 24.00; must clear instead.
        assert_eq!(&plan[..], &[Key::ClearAll, Key::Equals]);
        assert_eq!(seq.shown_centi(), 0);
    }

    #[test]
    fn test_backward_hour_wraps_or_resets() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Clock { hour: 23, minute: 0 });
        // 23:00 -> 22:59 would need 23 added hours; total reaches 24
        // so the plan restarts from zero and rebuilds 22:59.
        let plan = seq.set_value(Target::Clock { hour: 22, minute: 59 });
        assert_eq!(plan[0], Key::ClearAll);
        assert_eq!(seq.shown_centi(), 2259);
    }

    #[test]
    fn test_shown_never_updated_without_a_plan() {
        let mut seq = Sequencer::new();
        seq.set_value(Target::Decimal(5.0));
        let before = seq.shown_centi();
        let plan = seq.set_value(Target::Decimal(5.0));
        assert!(plan.is_empty());
        assert_eq!(seq.shown_centi(), before);
    }

    #[test]
    fn test_plan_fits_capacity() {
        // Largest flat-decimal jump touching all places
        let mut seq = Sequencer::new();
        let plan = seq.set_value(Target::Decimal(555.55));
        assert!(plan.len() < MAX_PLAN_KEYS);
        assert_eq!(seq.shown_centi(), 55_555);
    }

    #[test]
    fn test_oversized_target_spills_to_next_replan() {
        // 100000 needs ~1000 presses of +100, far beyond one plan.
        let mut seq = Sequencer::new();
        let first = seq.set_value(Target::Decimal(100_000.0));
        assert_eq!(first.len(), MAX_PLAN_KEYS);
        // `shown` covers only the presses that were planned; one of
        // the equals is the reset, the rest are +100 steps.
        assert_eq!(
            seq.shown_centi(),
            (equals_count(&first) as i32 - 1) * 10_000
        );

        let mut total_equals = equals_count(&first);
        for _ in 0..100 {
            let plan = seq.set_value(Target::Decimal(100_000.0));
            if plan.is_empty() {
                break;
            }
            assert!(plan.len() <= MAX_PLAN_KEYS);
            total_equals += equals_count(&plan);
        }
        assert_eq!(seq.shown_centi(), 10_000_000);
        assert_eq!(total_equals, 1001); // reset, then 1000 x +100
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_decimal_round_trip(values in proptest::collection::vec(-99_999i32..=99_999, 1..8)) {
                let mut seq = Sequencer::new();
                for centi in values {
                    let value = centi as f32 / 100.0;
                    seq.set_value(Target::Decimal(value));
                    // Recompute the rounding the planner applies
                    let expect = if value >= 0.0 {
                        (value * 100.0 + 0.5) as i32
                    } else {
                        (value * 100.0 - 0.5) as i32
                    };
                    prop_assert_eq!(seq.shown_centi(), expect);
                }
            }

            #[test]
            fn prop_clock_round_trip(targets in proptest::collection::vec((0u8..24, 0u8..60), 1..8)) {
                let mut seq = Sequencer::new();
                for (hour, minute) in targets {
                    seq.set_value(Target::Clock { hour, minute });
                    prop_assert_eq!(seq.shown_centi(), hour as i32 * 100 + minute as i32);
                }
            }

            #[test]
            fn prop_replan_is_empty(hour in 0u8..24, minute in 0u8..60) {
                let mut seq = Sequencer::new();
                seq.set_value(Target::Clock { hour, minute });
                let again = seq.set_value(Target::Clock { hour, minute });
                prop_assert!(again.is_empty());
            }
        }
    }
}
