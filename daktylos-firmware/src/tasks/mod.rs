//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod controller;
pub mod light;
pub mod tick;
pub mod transport;

pub use button::button_task;
pub use controller::controller_task;
pub use light::light_task;
pub use tick::tick_task;
pub use transport::transport_rx_task;
