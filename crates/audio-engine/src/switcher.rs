//! Switching the active output device by (possibly imprecise) name.

use audio_backend::AudioBackend;
use tracing::{debug, info};

use crate::{MatchKind, Result, resolve};

/// Outcome of a successful switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Switched {
    /// The device that is now active.
    pub device: String,
    /// How the device was found; `None` when the query named it verbatim.
    pub matched: Option<MatchKind>,
}

impl Switched {
    /// True when the device was found by resolution rather than given verbatim.
    pub fn was_resolved(&self) -> bool {
        self.matched.is_some()
    }
}

/// Make the device best matching `query` the active output.
///
/// The device list is fetched fresh. A query equal to a device name byte for
/// byte is selected without resolution. A failing select call is returned as
/// is; the device set changed under us and retrying would be guesswork.
pub fn switch_to<B: AudioBackend + ?Sized>(backend: &B, query: &str) -> Result<Switched> {
    let devices = backend.list_output_devices()?;
    let (device, matched) = if devices.iter().any(|d| d == query) {
        debug!(query, "verbatim device name");
        (query.to_string(), None)
    } else {
        let resolved = resolve(query, &devices)?;
        (resolved.name.to_string(), Some(resolved.kind))
    };
    backend.select_device(&device)?;
    info!(device = %device, ?matched, "switched output device");
    Ok(Switched { device, matched })
}
