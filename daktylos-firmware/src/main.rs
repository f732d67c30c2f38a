//! Daktylos - Calculator-Clock Firmware
//!
//! Main firmware binary for the RP2040-based calculator clock. Four
//! servo "fingers" rest between the keys of an unmodified pocket
//! calculator and type on it so the display shows a rotating set of
//! values: wall clock, countdown timer, wireless sensor readings.
//!
//! Named after the Greek "daktylos" (finger).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use daktylos_core::config::PusherConfig;
use daktylos_core::keys::PUSHER_COUNT;
use daktylos_drivers::Pusher;

use crate::servo::{servo_pwm_config, PwmServo};

mod channels;
mod servo;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Per-pusher calibration
///
/// Trim squares each horn on its key pair; the offsets are how far
/// the horn has to tilt to bottom a key out. Tuned on the bench with
/// the calibration walk-through.
const PUSHER_CONFIGS: [PusherConfig; PUSHER_COUNT] = [
    // pusher 0: = / +
    PusherConfig {
        trim_deg: -2,
        a_offset_deg: 10,
        b_offset_deg: 10,
        press_ms: 150,
        release_ms: 150,
    },
    // pusher 1: . / 0
    PusherConfig {
        trim_deg: 0,
        a_offset_deg: 10,
        b_offset_deg: 11,
        press_ms: 150,
        release_ms: 150,
    },
    // pusher 2: 1 / CA
    PusherConfig {
        trim_deg: 1,
        a_offset_deg: 11,
        b_offset_deg: 10,
        press_ms: 150,
        release_ms: 150,
    },
    // pusher 3: (unused) / -
    PusherConfig {
        trim_deg: 0,
        a_offset_deg: 10,
        b_offset_deg: 10,
        press_ms: 150,
        release_ms: 150,
    },
];

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Daktylos firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Servo PWM outputs, one slice channel per pusher.
    // Pin assignments are board-specific: servos on GPIO 0/2/4/6.
    let pwm_cfg = servo_pwm_config();
    let servos = [
        PwmServo::new(Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, pwm_cfg.clone())),
        PwmServo::new(Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_cfg.clone())),
        PwmServo::new(Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm_cfg.clone())),
        PwmServo::new(Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, pwm_cfg.clone())),
    ];

    let [s0, s1, s2, s3] = servos;
    let mut pushers: [Pusher<PwmServo<'static>>; PUSHER_COUNT] = [
        Pusher::new(s0, PUSHER_CONFIGS[0]),
        Pusher::new(s1, PUSHER_CONFIGS[1]),
        Pusher::new(s2, PUSHER_CONFIGS[2]),
        Pusher::new(s3, PUSHER_CONFIGS[3]),
    ];
    for pusher in &mut pushers {
        // A key we cannot physically press makes the whole device
        // useless; fail loudly at startup rather than mid-sequence.
        pusher.begin().unwrap();
    }
    info!("Pushers initialized at rest");

    // UART to the wireless bridge (receive only)
    let uart_config = UartConfig::default(); // 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_16, p.PIN_17, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();
    info!("Bridge UART initialized");

    // Front button, active low
    let button = Input::new(p.PIN_14, Pull::Up);

    // Indicator LED on the onboard pin (PWM for brightness ramps)
    let led = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_25, Default::default());

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::transport_rx_task(rx)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner.spawn(tasks::light_task(led)).unwrap();
    spawner.spawn(tasks::controller_task(pushers)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
