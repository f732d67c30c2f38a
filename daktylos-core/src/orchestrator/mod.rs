//! Display orchestrator
//!
//! The per-tick glue: asks the channel bank what to show, turns it
//! into a sequencer target, and derives the indicator feedback
//! pattern from the result.

pub mod feedback;

pub use feedback::FeedbackPattern;

use crate::mux::{ChannelBank, Unit};
use crate::sequencer::{KeyPlan, Sequencer, Target};

/// A wall-clock reading from the external time source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Owns the sequencer and the latest feedback pattern
pub struct Orchestrator {
    sequencer: Sequencer,
    pattern: FeedbackPattern,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            sequencer: Sequencer::new(),
            pattern: FeedbackPattern::Steady,
        }
    }

    /// Latest derived feedback pattern
    pub fn pattern(&self) -> FeedbackPattern {
        self.pattern
    }

    /// Access to the sequencer, for a forced re-clear on manual reset
    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    /// One display update
    ///
    /// Returns the key plan to execute, or `None` when there is
    /// nothing to do: the display already matches, the current
    /// channel has no data, or the clock channel has no time fix yet.
    pub fn tick(&mut self, bank: &ChannelBank, time: Option<WallTime>) -> Option<KeyPlan> {
        let current = bank.current();
        let (target, unit, value) = if current == 0 {
            let t = time?;
            let target = Target::Clock {
                hour: t.hour,
                minute: t.minute,
            };
            (target, Unit::Clock, 0.0)
        } else {
            let ch = bank.channel(current);
            if !ch.is_available() {
                return None;
            }
            (Target::Decimal(ch.value()), ch.unit().clone(), ch.value())
        };

        let plan = self.sequencer.set_value(target);
        self.pattern =
            FeedbackPattern::derive(&unit, value, self.sequencer.shown_centi(), time);

        if plan.is_empty() {
            None
        } else {
            Some(plan)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MuxConfig;
    use crate::keys::Key;
    use daktylos_protocol::ChannelMessage;

    fn setup() -> (Orchestrator, ChannelBank) {
        (Orchestrator::new(), ChannelBank::new(MuxConfig::default()))
    }

    fn at(hour: u8, minute: u8, second: u8) -> Option<WallTime> {
        Some(WallTime {
            hour,
            minute,
            second,
        })
    }

    #[test]
    fn test_no_time_fix_skips_clock_tick() {
        let (mut orch, bank) = setup();
        assert!(orch.tick(&bank, None).is_none());
    }

    #[test]
    fn test_first_clock_tick_plans_from_clear() {
        let (mut orch, bank) = setup();
        let plan = orch.tick(&bank, at(1, 30, 0)).unwrap();
        assert_eq!(plan[0], Key::ClearAll);
        // Unchanged time on the next tick plans nothing
        assert!(orch.tick(&bank, at(1, 30, 1)).is_none());
    }

    #[test]
    fn test_sensor_channel_planned_as_decimal() {
        let (mut orch, mut bank) = setup();
        bank.receive(&ChannelMessage::new(2, 23.5, "°C"), 0).unwrap();
        let plan = orch.tick(&bank, at(12, 0, 0));
        assert!(plan.is_some());
        assert_eq!(orch.sequencer_mut().shown_centi(), 2350);
    }

    #[test]
    fn test_hour_chime_pattern_window() {
        let (mut orch, bank) = setup();
        orch.tick(&bank, at(13, 0, 0));
        assert_eq!(orch.pattern(), FeedbackPattern::HourChime);
        orch.tick(&bank, at(13, 0, 5));
        assert_eq!(orch.pattern(), FeedbackPattern::Steady);
    }

    #[test]
    fn test_timer_pattern_tracks_urgency() {
        let (mut orch, mut bank) = setup();
        for (value, pattern) in [
            (120.0, FeedbackPattern::TimerCalm),
            (45.0, FeedbackPattern::TimerNotice),
            (12.0, FeedbackPattern::TimerWarn),
            (7.0, FeedbackPattern::TimerUrgent),
            (2.0, FeedbackPattern::TimerCritical),
            (0.0, FeedbackPattern::TimerExpired),
        ] {
            bank.receive(&ChannelMessage::new(3, value, "timer"), 0)
                .unwrap();
            if bank.current() != 3 {
                bank.advance();
            }
            orch.tick(&bank, at(12, 0, 0));
            assert_eq!(orch.pattern(), pattern, "timer value {}", value);
        }
    }

    #[test]
    fn test_clock_repdigit_pattern() {
        let (mut orch, bank) = setup();
        orch.tick(&bank, at(11, 11, 30));
        assert_eq!(orch.pattern(), FeedbackPattern::Repdigit);
        // The full-hour chime still takes its window
        orch.tick(&bank, at(11, 0, 0));
        assert_eq!(orch.pattern(), FeedbackPattern::HourChime);
    }

    #[test]
    fn test_repdigit_pattern() {
        let (mut orch, mut bank) = setup();
        bank.receive(&ChannelMessage::new(2, 222.22, "°C"), 0).unwrap();
        orch.tick(&bank, at(12, 0, 0));
        assert_eq!(orch.pattern(), FeedbackPattern::Repdigit);
    }
}
