//! Tick task for time-based updates
//!
//! Provides the periodic pulse that drives channel expiry, rotation,
//! and the display pipeline. A key sequence in flight blocks the
//! controller across several tick periods; the signal only keeps the
//! most recent timestamp, so missed ticks collapse into one.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 10;

/// Signal to notify the controller of a tick, payload is uptime ms
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis());
    }
}
