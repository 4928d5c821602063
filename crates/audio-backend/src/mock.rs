//! In-memory test doubles (enabled with the `test-utils` feature).

use std::io;

use parking_lot::Mutex;

use crate::{
    AudioBackend, Capability, CommandOutput, CommandRunner, Error, Result, VolumeLevel,
};

/// Mutable state behind [`MockBackend`].
#[derive(Debug, Default)]
struct MockState {
    /// Reported output devices.
    devices: Vec<String>,
    /// Currently selected device.
    active: Option<String>,
    /// Stored volume; `None` means volume control is unsupported.
    volume: Option<VolumeLevel>,
    /// Stored mute flag; `None` means mute control is unsupported.
    muted: Option<bool>,
    /// Simulate a missing audio tool.
    unavailable: bool,
    /// Fail every `select_device` call.
    fail_select: bool,
    /// Fail every `set_volume` call.
    fail_set_volume: bool,
    /// Fail every `set_muted` call.
    fail_set_muted: bool,
}

/// Simple mock backend for tests.
///
/// Every trait call is recorded by name so tests can assert on side effects.
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Simulated audio state.
    state: Mutex<MockState>,
    /// Names of the trait methods called, in order.
    calls: Mutex<Vec<&'static str>>,
}

impl MockBackend {
    /// An empty backend with no devices and no volume/mute support.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend reporting `devices`, with volume 50 and unmuted output.
    pub fn with_devices<I, S>(devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        mock.set_devices(devices);
        mock.set_volume_level(Some(50));
        mock.set_mute_state(Some(false));
        mock
    }

    /// Replace the reported device list.
    pub fn set_devices<I, S>(&self, devices: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.lock().devices = devices.into_iter().map(Into::into).collect();
    }

    /// Set the active device directly.
    pub fn set_active(&self, name: Option<&str>) {
        self.state.lock().active = name.map(str::to_string);
    }

    /// Set the stored volume; `None` makes volume control unsupported.
    pub fn set_volume_level(&self, level: Option<u8>) {
        self.state.lock().volume = level.map(|v| VolumeLevel::clamped(i64::from(v)));
    }

    /// Set the stored mute flag; `None` makes mute control unsupported.
    pub fn set_mute_state(&self, muted: Option<bool>) {
        self.state.lock().muted = muted;
    }

    /// Simulate a missing audio tool for device calls.
    pub fn set_unavailable(&self, v: bool) {
        self.state.lock().unavailable = v;
    }

    /// Make `select_device` fail.
    pub fn set_fail_select(&self, v: bool) {
        self.state.lock().fail_select = v;
    }

    /// Make `set_volume` fail while reads keep working.
    pub fn set_fail_set_volume(&self, v: bool) {
        self.state.lock().fail_set_volume = v;
    }

    /// Make `set_muted` fail while reads keep working.
    pub fn set_fail_set_muted(&self, v: bool) {
        self.state.lock().fail_set_muted = v;
    }

    /// The active device.
    pub fn active(&self) -> Option<String> {
        self.state.lock().active.clone()
    }

    /// The stored volume.
    pub fn volume_level(&self) -> Option<VolumeLevel> {
        self.state.lock().volume
    }

    /// The stored mute flag.
    pub fn mute_state(&self) -> Option<bool> {
        self.state.lock().muted
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls to the trait method `name`.
    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == name).count()
    }

    /// Record a trait call.
    fn note(&self, call: &'static str) {
        self.calls.lock().push(call);
    }

    /// Error returned while the tool is marked unavailable.
    fn unavailable_error() -> Error {
        Error::BackendUnavailable {
            tool: "mock".into(),
            hint: "mock backend marked unavailable",
            source: io::Error::new(io::ErrorKind::NotFound, "mock"),
        }
    }
}

impl AudioBackend for MockBackend {
    fn list_output_devices(&self) -> Result<Vec<String>> {
        self.note("list_output_devices");
        let state = self.state.lock();
        if state.unavailable {
            return Err(Self::unavailable_error());
        }
        Ok(state.devices.clone())
    }

    fn active_device(&self) -> Result<Option<String>> {
        self.note("active_device");
        let state = self.state.lock();
        if state.unavailable {
            return Err(Self::unavailable_error());
        }
        Ok(state.active.clone())
    }

    fn select_device(&self, name: &str) -> Result<()> {
        self.note("select_device");
        let mut state = self.state.lock();
        if state.unavailable {
            return Err(Self::unavailable_error());
        }
        if state.fail_select || !state.devices.iter().any(|d| d == name) {
            return Err(Error::CommandFailed {
                program: "mock".into(),
                code: Some(1),
                stderr: format!("Could not find an audio device named \"{name}\""),
            });
        }
        state.active = Some(name.to_string());
        Ok(())
    }

    fn volume(&self) -> Result<VolumeLevel> {
        self.note("volume");
        self.state
            .lock()
            .volume
            .ok_or(Error::Unsupported(Capability::ReadVolume))
    }

    fn set_volume(&self, level: VolumeLevel) -> Result<()> {
        self.note("set_volume");
        let mut state = self.state.lock();
        if state.fail_set_volume || state.volume.is_none() {
            return Err(Error::Unsupported(Capability::WriteVolume));
        }
        state.volume = Some(level);
        Ok(())
    }

    fn muted(&self) -> Result<bool> {
        self.note("muted");
        self.state
            .lock()
            .muted
            .ok_or(Error::Unsupported(Capability::ReadMute))
    }

    fn set_muted(&self, muted: bool) -> Result<()> {
        self.note("set_muted");
        let mut state = self.state.lock();
        if state.fail_set_muted || state.muted.is_none() {
            return Err(Error::Unsupported(Capability::WriteMute));
        }
        state.muted = Some(muted);
        Ok(())
    }
}

/// Response function used by [`ScriptedRunner`].
type Responder = Box<dyn Fn(&str, &[&str]) -> io::Result<CommandOutput> + Send + Sync>;

/// A [`CommandRunner`] that answers from a closure and records invocations.
pub struct ScriptedRunner {
    /// Produces the output for each invocation.
    respond: Responder,
    /// Every invocation as `[program, args...]`.
    invocations: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    /// Build a runner that answers each invocation with `respond(program, args)`.
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &[&str]) -> io::Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// All invocations so far, each as `[program, args...]`.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.lock().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let mut line = vec![program.to_string()];
        line.extend(args.iter().map(|a| a.to_string()));
        self.invocations.lock().push(line);
        (self.respond)(program, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_volume_by_default() {
        let mock = MockBackend::new();
        assert!(matches!(
            mock.volume(),
            Err(Error::Unsupported(Capability::ReadVolume))
        ));
        assert_eq!(mock.call_count("volume"), 1);
    }

    #[test]
    fn select_updates_active_only_for_known_devices() {
        let mock = MockBackend::with_devices(["A", "B"]);
        mock.select_device("B").unwrap();
        assert_eq!(mock.active().as_deref(), Some("B"));
        assert!(mock.select_device("C").is_err());
        assert_eq!(mock.active().as_deref(), Some("B"));
        assert_eq!(mock.calls(), vec!["select_device", "select_device"]);
    }
}
