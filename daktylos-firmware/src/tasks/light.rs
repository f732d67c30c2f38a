//! Indicator light task
//!
//! Renders the current feedback pattern as an LED animation. Runs on
//! its own schedule with no blocking dependency on the controller:
//! it just polls the shared pattern byte every frame.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;
use portable_atomic::Ordering;

use daktylos_core::orchestrator::FeedbackPattern;

use crate::channels::FEEDBACK_PATTERN;

/// Animation frame period
const FRAME_MS: u64 = 20;

/// Full brightness compare value (default PWM top)
const MAX_LEVEL: u16 = 0xffff;

/// Light task - polls the pattern byte and animates the LED
#[embassy_executor::task]
pub async fn light_task(mut led: Pwm<'static>) {
    info!("Light task started");

    let mut cfg = PwmConfig::default();
    let mut phase_ms: u64 = 0;

    loop {
        let pattern = FeedbackPattern::from_u8(FEEDBACK_PATTERN.load(Ordering::Relaxed));
        cfg.compare_b = level_for(pattern, phase_ms);
        led.set_config(&cfg);

        Timer::after_millis(FRAME_MS).await;
        phase_ms = phase_ms.wrapping_add(FRAME_MS);
    }
}

/// Brightness for one animation frame
fn level_for(pattern: FeedbackPattern, phase_ms: u64) -> u16 {
    match pattern {
        FeedbackPattern::Steady => breathe(phase_ms, 4_000),
        FeedbackPattern::HourChime => blink(phase_ms, 200),
        FeedbackPattern::TimerCalm => blink(phase_ms, 1_000),
        FeedbackPattern::TimerNotice => blink(phase_ms, 600),
        FeedbackPattern::TimerWarn => blink(phase_ms, 400),
        FeedbackPattern::TimerUrgent => blink(phase_ms, 250),
        FeedbackPattern::TimerCritical => blink(phase_ms, 120),
        FeedbackPattern::TimerExpired => MAX_LEVEL,
        FeedbackPattern::Repdigit => blink(phase_ms, 80),
    }
}

/// Triangle ramp up and down over `period_ms`
fn breathe(phase_ms: u64, period_ms: u64) -> u16 {
    let pos = phase_ms % period_ms;
    let half = period_ms / 2;
    let ramp = if pos < half { pos } else { period_ms - pos };
    (ramp * MAX_LEVEL as u64 / half) as u16
}

/// Hard on/off with equal halves of `period_ms`
fn blink(phase_ms: u64, period_ms: u64) -> u16 {
    if phase_ms % period_ms < period_ms / 2 {
        MAX_LEVEL
    } else {
        0
    }
}
