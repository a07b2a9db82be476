//! Haptic effect descriptions.
//!
//! A [`HapticEffect`] is a self-contained command: the kind of effect, how
//! long it lasts and the parameters of that kind. Three presets ship:
//!
//! | Preset | Kind | Parameters | Duration |
//! |--------|------|------------|----------|
//! | Strong | rumble | strong 0xFFFF, weak 0 | 500 ms |
//! | Weak | rumble | strong 0, weak 0xFFFF | 500 ms |
//! | Sine | periodic | sine, period 100 ms, magnitude 0x4000 | 2000 ms |

use std::time::Duration;

/// Periodic waveform shapes understood by the kernel force-feedback API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Triangle,
    Sine,
    SawUp,
    SawDown,
}

/// One force-feedback effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticEffect {
    /// Two-motor rumble.
    Rumble {
        strong_magnitude: u16,
        weak_magnitude: u16,
        duration: Duration,
    },
    /// Periodic waveform.
    Periodic {
        waveform: Waveform,
        /// Time between peaks.
        period: Duration,
        magnitude: i16,
        offset: i16,
        phase: u16,
        duration: Duration,
    },
}

impl HapticEffect {
    /// Large motor at full magnitude for half a second.
    #[must_use]
    pub fn strong_rumble() -> Self {
        Self::Rumble {
            strong_magnitude: 0xFFFF,
            weak_magnitude: 0x0000,
            duration: Duration::from_millis(500),
        }
    }

    /// Small motor at full magnitude for half a second.
    #[must_use]
    pub fn weak_rumble() -> Self {
        Self::Rumble {
            strong_magnitude: 0x0000,
            weak_magnitude: 0xFFFF,
            duration: Duration::from_millis(500),
        }
    }

    /// Two seconds of pulsing sine wave.
    #[must_use]
    pub fn sine() -> Self {
        Self::Periodic {
            waveform: Waveform::Sine,
            period: Duration::from_millis(100),
            magnitude: 0x4000,
            offset: 0,
            phase: 0,
            duration: Duration::from_millis(2000),
        }
    }

    /// How long the effect plays.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Self::Rumble { duration, .. } | Self::Periodic { duration, .. } => *duration,
        }
    }

    /// Duration in the millisecond units of the kernel replay field,
    /// saturating at `u16::MAX`.
    #[must_use]
    pub fn replay_length_ms(&self) -> u16 {
        millis_u16(self.duration())
    }
}

/// Converts a duration to whole milliseconds, saturating at `u16::MAX`.
#[must_use]
pub fn millis_u16(duration: Duration) -> u16 {
    u16::try_from(duration.as_millis()).unwrap_or(u16::MAX)
}
