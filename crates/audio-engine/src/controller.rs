//! Best-effort volume and mute control.
//!
//! Every operation here may fail on a given machine (missing permissions,
//! missing OS facilities). Failures surface as [`Unavailable`] and never
//! touch device switching.

use audio_backend::{AudioBackend, VolumeLevel};
use tracing::debug;

use crate::Unavailable;

/// Volume and mute operations over an [`AudioBackend`].
#[derive(Debug)]
pub struct Controller<'a, B: ?Sized> {
    /// Backend that owns the real state.
    backend: &'a B,
}

impl<'a, B: AudioBackend + ?Sized> Controller<'a, B> {
    /// Wrap a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Current output volume.
    pub fn volume(&self) -> Result<VolumeLevel, Unavailable> {
        self.backend.volume().map_err(|err| {
            debug!(%err, "volume read failed");
            Unavailable::Volume
        })
    }

    /// Set the output volume, clamping `level` into `[0, 100]` first.
    ///
    /// Returns the level that was applied.
    pub fn set_volume(&self, level: i64) -> Result<VolumeLevel, Unavailable> {
        let level = VolumeLevel::clamped(level);
        self.backend
            .set_volume(level)
            .map(|()| level)
            .map_err(|err| {
                debug!(%err, %level, "volume write failed");
                Unavailable::Volume
            })
    }

    /// Change the output volume by `delta`, clamped into `[0, 100]`.
    ///
    /// Without a readable baseline nothing is written.
    pub fn adjust_volume(&self, delta: i64) -> Result<VolumeLevel, Unavailable> {
        let current = self.volume().map_err(|_| Unavailable::VolumeBaseline)?;
        let target = current.offset(delta);
        debug!(%current, delta, %target, "adjust volume");
        self.set_volume(i64::from(target.get()))
    }

    /// Current mute flag (`true` = muted).
    pub fn mute_state(&self) -> Result<bool, Unavailable> {
        self.backend.muted().map_err(|err| {
            debug!(%err, "mute read failed");
            Unavailable::Mute
        })
    }

    /// Flip the mute flag and return the new state.
    pub fn toggle_mute(&self) -> Result<bool, Unavailable> {
        let muted = !self.mute_state()?;
        self.backend.set_muted(muted).map_err(|err| {
            debug!(%err, muted, "mute write failed");
            Unavailable::MuteToggle
        })?;
        Ok(muted)
    }
}
