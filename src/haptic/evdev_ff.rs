//! Kernel force-feedback backend built on evdev.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use evdev::{
    Device, FFEffect, FFEffectData, FFEffectKind, FFEnvelope, FFReplay, FFTrigger, FFWaveform,
};
use tracing::debug;

use super::effect::{millis_u16, HapticEffect, Waveform};
use super::{EffectId, HapticBackend, HapticDevice};

/// Opens `/dev/input/event*` nodes for force feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvdevHapticBackend;

impl HapticBackend for EvdevHapticBackend {
    fn open(&self, path: &Path) -> io::Result<Box<dyn HapticDevice>> {
        let device = Device::open(path)?;
        debug!(
            "Opened {} for force feedback ({})",
            path.display(),
            device.name().unwrap_or("unnamed device")
        );
        Ok(Box::new(EvdevHapticDevice {
            device,
            uploaded: HashMap::new(),
        }))
    }
}

/// An open evdev node with the effects uploaded through it.
///
/// The kernel erases an effect when its [`FFEffect`] handle drops, so erasing
/// is removing the handle from the map. Closing the device drops the rest.
struct EvdevHapticDevice {
    device: Device,
    uploaded: HashMap<EffectId, FFEffect>,
}

impl HapticDevice for EvdevHapticDevice {
    fn upload(&mut self, effect: &HapticEffect) -> io::Result<EffectId> {
        let handle = self.device.upload_ff_effect(effect_data(effect))?;
        let id = handle.id();
        self.uploaded.insert(id, handle);
        Ok(id)
    }

    fn play(&mut self, id: EffectId) -> io::Result<()> {
        self.uploaded
            .get_mut(&id)
            .ok_or_else(|| unknown_effect(id))?
            .play(1)
    }

    fn erase(&mut self, id: EffectId) -> io::Result<()> {
        self.uploaded
            .remove(&id)
            .map(drop)
            .ok_or_else(|| unknown_effect(id))
    }
}

fn unknown_effect(id: EffectId) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("effect {} was not uploaded", id),
    )
}

fn waveform(waveform: Waveform) -> FFWaveform {
    match waveform {
        Waveform::Square => FFWaveform::Square,
        Waveform::Triangle => FFWaveform::Triangle,
        Waveform::Sine => FFWaveform::Sine,
        Waveform::SawUp => FFWaveform::SawUp,
        Waveform::SawDown => FFWaveform::SawDown,
    }
}

/// Kernel description of `effect`: no direction, no trigger button, starts
/// immediately and runs for the effect duration.
fn effect_data(effect: &HapticEffect) -> FFEffectData {
    let kind = match *effect {
        HapticEffect::Rumble {
            strong_magnitude,
            weak_magnitude,
            ..
        } => FFEffectKind::Rumble {
            strong_magnitude,
            weak_magnitude,
        },
        HapticEffect::Periodic {
            waveform: shape,
            period,
            magnitude,
            offset,
            phase,
            ..
        } => FFEffectKind::Periodic {
            waveform: waveform(shape),
            period: millis_u16(period),
            magnitude,
            offset,
            phase,
            envelope: FFEnvelope {
                attack_length: 0,
                attack_level: 0,
                fade_length: 0,
                fade_level: 0,
            },
        },
    };

    FFEffectData {
        direction: 0,
        trigger: FFTrigger {
            button: 0,
            interval: 0,
        },
        replay: FFReplay {
            length: effect.replay_length_ms(),
            delay: 0,
        },
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rumble_effect_data() {
        let data = effect_data(&HapticEffect::strong_rumble());
        assert_eq!(data.direction, 0);
        assert_eq!(data.replay.length, 500);
        assert_eq!(data.replay.delay, 0);
        match data.kind {
            FFEffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            } => {
                assert_eq!(strong_magnitude, 0xFFFF);
                assert_eq!(weak_magnitude, 0);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_sine_effect_data() {
        let data = effect_data(&HapticEffect::sine());
        assert_eq!(data.replay.length, 2000);
        match data.kind {
            FFEffectKind::Periodic {
                waveform,
                period,
                magnitude,
                offset,
                phase,
                ..
            } => {
                assert!(matches!(waveform, FFWaveform::Sine));
                assert_eq!(period, 100);
                assert_eq!(magnitude, 0x4000);
                assert_eq!(offset, 0);
                assert_eq!(phase, 0);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_node_fails() {
        let result = EvdevHapticBackend.open(Path::new("/dev/input/event-does-not-exist"));
        assert!(result.is_err());
    }

    #[test]
    #[ignore] // Requires a controller with force feedback on /dev/input/event7
    fn test_play_on_real_device() {
        let mut device = EvdevHapticBackend
            .open(Path::new("/dev/input/event7"))
            .expect("open device");
        let id = device.upload(&HapticEffect::weak_rumble()).expect("upload");
        device.play(id).expect("play");
        std::thread::sleep(HapticEffect::weak_rumble().duration());
        device.erase(id).expect("erase");
    }
}
