//! Front button task
//!
//! Debounces the single front button and classifies presses by hold
//! time: short press advances the channel rotation, a hold of one
//! second or more resets to the clock.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Timer};

use daktylos_protocol::InputEvent;

use crate::channels::INPUT_CHANNEL;

/// Debounce settle time
const DEBOUNCE_MS: u64 = 30;

/// Button task - emits one event per completed press
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if button.is_high() {
            // Bounce, not a press
            continue;
        }

        let pressed_at = Instant::now();
        button.wait_for_rising_edge().await;
        let held_ms = pressed_at.elapsed().as_millis();
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;

        let event = InputEvent::from_press_ms(held_ms);
        debug!("Button: {:?} ({} ms)", event, held_ms);
        if INPUT_CHANNEL.try_send(event).is_err() {
            warn!("Input channel full, dropping event");
        }
    }
}
