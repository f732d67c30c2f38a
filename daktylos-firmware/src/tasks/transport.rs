//! Bridge UART receive task
//!
//! Receives the line protocol from the wireless bridge and forwards
//! parsed messages to the controller. Malformed lines are logged and
//! dropped; they never desynchronize the stream or reach the
//! controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use daktylos_protocol::LineBuffer;

use crate::channels::MESSAGE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Transport RX task - reassembles and parses bridge lines
#[embassy_executor::task]
pub async fn transport_rx_task(mut rx: BufferedUartRx) {
    info!("Transport RX task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    match lines.feed(byte) {
                        Ok(Some(msg)) => {
                            debug!("Bridge message: {:?}", msg);
                            // Drop if the controller is behind
                            if MESSAGE_CHANNEL.try_send(msg).is_err() {
                                warn!("Message channel full, dropping message");
                            }
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Bad bridge line: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
