//! Main controller task
//!
//! The single owner of all display state: channel bank, orchestrator,
//! and the pusher table. Receives button events, bridge messages, and
//! tick signals; executing a key plan blocks this task for the full
//! press timing, which is fine - a fresh target is simply picked up
//! on the next tick after the plan drains.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::{Instant, Timer};
use portable_atomic::Ordering;

use daktylos_core::config::MuxConfig;
use daktylos_core::keys::{Keymap, PUSHER_COUNT};
use daktylos_core::mux::ChannelBank;
use daktylos_core::orchestrator::{Orchestrator, WallTime};
use daktylos_core::sequencer::KeyPlan;
use daktylos_drivers::Pusher;
use daktylos_protocol::{InputEvent, Message, TimeSync};

use crate::channels::{FEEDBACK_PATTERN, INPUT_CHANNEL, MESSAGE_CHANNEL};
use crate::servo::PwmServo;
use crate::tasks::tick::TICK_SIGNAL;

/// Wall clock derived from the last bridge sync
///
/// Between syncs the clock free-runs on the monotonic timer; a fresh
/// sync simply replaces the base. No sync yet means no clock.
struct ClockSource {
    sync: Option<TimeSync>,
    synced_at: Instant,
}

impl ClockSource {
    fn new() -> Self {
        Self {
            sync: None,
            synced_at: Instant::MIN,
        }
    }

    fn update(&mut self, sync: TimeSync) {
        self.sync = Some(sync);
        self.synced_at = Instant::now();
    }

    fn current(&self) -> Option<WallTime> {
        let sync = self.sync?;
        let base =
            sync.hour as u64 * 3_600 + sync.minute as u64 * 60 + sync.second as u64;
        let total = (base + self.synced_at.elapsed().as_secs()) % 86_400;
        Some(WallTime {
            hour: (total / 3_600) as u8,
            minute: (total % 3_600 / 60) as u8,
            second: (total % 60) as u8,
        })
    }
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut pushers: [Pusher<PwmServo<'static>>; PUSHER_COUNT]) {
    info!("Controller task started");

    let mut bank = ChannelBank::new(MuxConfig::default());
    let mut orchestrator = Orchestrator::new();
    let mut clock = ClockSource::new();

    loop {
        match select3(
            INPUT_CHANNEL.receive(),
            MESSAGE_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
        )
        .await
        {
            Either3::First(event) => match event {
                InputEvent::Advance => {
                    debug!("Advance to next channel");
                    bank.advance();
                }
                InputEvent::Reset => {
                    info!("Manual reset to clock");
                    bank.reset();
                    // Re-establish a known zero display
                    let plan = orchestrator.sequencer_mut().clear();
                    execute_plan(&mut pushers, &plan).await;
                }
            },

            Either3::Second(msg) => match msg {
                Message::Channel(value) => {
                    let now_ms = Instant::now().as_millis();
                    if let Err(e) = bank.receive(&value, now_ms) {
                        warn!("Rejected channel message: {:?}", e);
                    }
                }
                Message::Time(sync) => {
                    trace!("Time sync: {:02}:{:02}:{:02}", sync.hour, sync.minute, sync.second);
                    clock.update(sync);
                }
            },

            Either3::Third(now_ms) => {
                bank.tick(now_ms);
                if let Some(plan) = orchestrator.tick(&bank, clock.current()) {
                    execute_plan(&mut pushers, &plan).await;
                }
                FEEDBACK_PATTERN.store(orchestrator.pattern().as_u8(), Ordering::Relaxed);
            }
        }
    }
}

/// Run one key plan to completion
///
/// Each key is a full two-phase press on its pusher; the plan is
/// never abandoned part way, so the sequencer's view of the display
/// stays truthful.
async fn execute_plan(
    pushers: &mut [Pusher<PwmServo<'static>>; PUSHER_COUNT],
    plan: &KeyPlan,
) {
    for &key in plan.iter() {
        let slot = Keymap::slot(key);
        let pusher = &mut pushers[slot.pusher];
        trace!("Press '{}'", key.label());
        if let Err(e) = pusher.start_press(slot.side) {
            warn!("Servo rejected press: {:?}", e);
            continue;
        }
        Timer::after_millis(pusher.press_ms()).await;
        if let Err(e) = pusher.release() {
            warn!("Servo rejected release: {:?}", e);
        }
        Timer::after_millis(pusher.release_ms()).await;
    }
}
