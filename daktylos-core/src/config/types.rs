//! Configuration type definitions
//!
//! Per-pusher calibration and multiplexer timing windows. Pin
//! assignments belong to the hardware-binding layer, not here.

/// Per-pusher calibration constants
///
/// Angles are offsets from the 90 degree servo midpoint. The A key sits
/// on the negative side of the swing, the B key on the positive side.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PusherConfig {
    /// Trim added to every position to square the horn on the key
    pub trim_deg: i16,
    /// Swing toward the A key, degrees below midpoint
    pub a_offset_deg: i16,
    /// Swing toward the B key, degrees above midpoint
    pub b_offset_deg: i16,
    /// Hold time at the pressed position
    pub press_ms: u16,
    /// Settle time after returning to rest
    pub release_ms: u16,
}

impl Default for PusherConfig {
    fn default() -> Self {
        Self {
            trim_deg: 0,
            a_offset_deg: 10,
            b_offset_deg: 10,
            press_ms: 150,
            release_ms: 150,
        }
    }
}

/// Multiplexer timing windows
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxConfig {
    /// Channel data older than this is invalidated (ms)
    pub invalid_interval_ms: u64,
    /// Quiet period before auto-rotation kicks in (ms)
    pub rounding_interval_ms: u64,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            invalid_interval_ms: 60 * 60 * 1000,
            rounding_interval_ms: 30 * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pusher_timing() {
        let cfg = PusherConfig::default();
        assert_eq!(cfg.press_ms, 150);
        assert_eq!(cfg.release_ms, 150);
    }

    #[test]
    fn test_default_mux_windows() {
        let cfg = MuxConfig::default();
        assert_eq!(cfg.invalid_interval_ms, 3_600_000);
        assert_eq!(cfg.rounding_interval_ms, 30_000);
    }
}
