//! macOS backend built on `SwitchAudioSource` and `osascript`.

use tracing::debug;

use crate::{
    AudioBackend, Capability, CommandOutput, CommandRunner, Error, Result, SystemRunner,
    VolumeLevel, first_success,
};

/// Default program used to enumerate and select output devices.
pub const DEFAULT_SWITCH_AUDIO_SOURCE: &str = "SwitchAudioSource";

/// Default program used to run AppleScript.
pub const DEFAULT_OSASCRIPT: &str = "osascript";

/// Shown when `SwitchAudioSource` cannot be started.
const SWITCHER_HINT: &str = "Install via `brew install switchaudio-osx`.";

/// Shown when `osascript` cannot be started.
const OSASCRIPT_HINT: &str = "osascript ships with macOS; check the configured path.";

/// AppleScript output that means "no value".
const MISSING_VALUE: &str = "missing value";

/// Scripts that read the output volume, in order of preference.
const READ_VOLUME: &[&str] = &[
    "output volume of (get volume settings)",
    "tell application \"System Events\" to get output volume of (get volume settings)",
];

/// Scripts that read the output mute flag, in order of preference.
const READ_MUTE: &[&str] = &[
    "output muted of (get volume settings)",
    "tell application \"System Events\" to get output muted of (get volume settings)",
];

/// Scripts that set the output volume, in order of preference.
fn write_volume_scripts(level: VolumeLevel) -> [String; 3] {
    let level = level.get();
    [
        format!("set volume output volume {level}"),
        format!("tell application \"System Events\" to set volume output volume {level}"),
        // Legacy form on a 0-10 scale.
        format!("set volume {:.1}", f64::from(level) / 10.0),
    ]
}

/// Scripts that set the output mute flag, in order of preference.
fn write_mute_scripts(muted: bool) -> [String; 2] {
    [
        format!("set volume output muted {muted}"),
        format!("tell application \"System Events\" to set volume output muted {muted}"),
    ]
}

/// Tool locations for the macOS backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Path or name of the `SwitchAudioSource` executable.
    pub switch_audio_source: String,
    /// Path or name of the `osascript` executable.
    pub osascript: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            switch_audio_source: DEFAULT_SWITCH_AUDIO_SOURCE.to_string(),
            osascript: DEFAULT_OSASCRIPT.to_string(),
        }
    }
}

/// Audio backend for macOS.
#[derive(Debug)]
pub struct MacBackend<R = SystemRunner> {
    /// Tool locations.
    config: BackendConfig,
    /// Process runner.
    runner: R,
}

impl MacBackend {
    /// Create a backend that runs real processes.
    pub fn new(config: BackendConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> MacBackend<R> {
    /// Create a backend with a custom process runner.
    pub fn with_runner(config: BackendConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// The configured tool locations.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The process runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `SwitchAudioSource`; failure to start is fatal.
    fn switcher(&self, args: &[&str]) -> Result<CommandOutput> {
        let tool = &self.config.switch_audio_source;
        debug!(tool = %tool, ?args, "switcher");
        self.runner
            .run(tool, args)
            .map_err(|source| Error::BackendUnavailable {
                tool: tool.clone(),
                hint: SWITCHER_HINT,
                source,
            })
    }

    /// Run `SwitchAudioSource` and require a zero exit status.
    fn switcher_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.switcher(args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Error::CommandFailed {
                program: self.config.switch_audio_source.clone(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Run one AppleScript snippet, returning its trimmed output on success.
    fn osascript(&self, script: &str) -> Result<String> {
        let tool = &self.config.osascript;
        debug!(tool = %tool, script, "osascript");
        let output = self
            .runner
            .run(tool, &["-e", script])
            .map_err(|source| Error::BackendUnavailable {
                tool: tool.clone(),
                hint: OSASCRIPT_HINT,
                source,
            })?;
        if !output.success() {
            return Err(Error::CommandFailed {
                program: tool.clone(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Read a value by trying each script in turn.
    fn read_value<T>(
        &self,
        capability: Capability,
        scripts: &[&str],
        parse: fn(&str) -> Option<T>,
    ) -> Result<T> {
        first_success(
            capability,
            scripts.iter().map(|script| {
                move || {
                    let output = self.osascript(script)?;
                    script_value(&output)
                        .and_then(parse)
                        .ok_or(Error::Parse { capability, output })
                }
            }),
        )
    }

    /// Apply a change by trying each script in turn.
    fn write_value(&self, capability: Capability, scripts: &[String]) -> Result<()> {
        first_success(
            capability,
            scripts
                .iter()
                .map(|script| move || self.osascript(script).map(|_| ())),
        )
    }
}

impl<R: CommandRunner> AudioBackend for MacBackend<R> {
    fn list_output_devices(&self) -> Result<Vec<String>> {
        let output = self.switcher_checked(&["-t", "output", "-a"])?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn active_device(&self) -> Result<Option<String>> {
        let output = self.switcher(&["-c", "-t", "output"])?;
        if !output.success() {
            debug!(code = ?output.code, "current device query failed");
            return Ok(None);
        }
        let name = output.stdout.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    fn select_device(&self, name: &str) -> Result<()> {
        self.switcher_checked(&["-t", "output", "-s", name])
            .map(|_| ())
    }

    fn volume(&self) -> Result<VolumeLevel> {
        self.read_value(Capability::ReadVolume, READ_VOLUME, parse_volume)
    }

    fn set_volume(&self, level: VolumeLevel) -> Result<()> {
        self.write_value(Capability::WriteVolume, &write_volume_scripts(level))
    }

    fn muted(&self) -> Result<bool> {
        self.read_value(Capability::ReadMute, READ_MUTE, parse_muted)
    }

    fn set_muted(&self, muted: bool) -> Result<()> {
        self.write_value(Capability::WriteMute, &write_mute_scripts(muted))
    }
}

/// Filter out AppleScript's "nothing here" answers.
fn script_value(output: &str) -> Option<&str> {
    let value = output.trim();
    (!value.is_empty() && value != MISSING_VALUE).then_some(value)
}

/// Parse `output volume` results.
fn parse_volume(value: &str) -> Option<VolumeLevel> {
    value.parse::<u8>().ok().and_then(VolumeLevel::new)
}

/// Parse `output muted` results.
fn parse_muted(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::mock::ScriptedRunner;

    fn backend(runner: ScriptedRunner) -> MacBackend<ScriptedRunner> {
        MacBackend::with_runner(BackendConfig::default(), runner)
    }

    #[test]
    fn lists_trimmed_nonblank_lines() {
        let b = backend(ScriptedRunner::new(|_, _| {
            Ok(CommandOutput::ok(
                "MacBook Pro Speakers\n  AirPods Pro \n\nStudio Display\n",
            ))
        }));
        let devices = b.list_output_devices().unwrap();
        assert_eq!(
            devices,
            vec!["MacBook Pro Speakers", "AirPods Pro", "Studio Display"]
        );
        assert_eq!(
            b.runner().invocations(),
            vec![vec!["SwitchAudioSource", "-t", "output", "-a"]]
        );
    }

    #[test]
    fn missing_switcher_is_backend_unavailable() {
        let b = backend(ScriptedRunner::new(|_, _| {
            Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
        }));
        let err = b.list_output_devices().unwrap_err();
        assert!(matches!(err, Error::BackendUnavailable { .. }));
        assert!(err.to_string().contains("brew install switchaudio-osx"));
    }

    #[test]
    fn failing_list_is_command_failed() {
        let b = backend(ScriptedRunner::new(|_, _| {
            Ok(CommandOutput::failed(1, "boom\n"))
        }));
        match b.list_output_devices().unwrap_err() {
            Error::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn active_device_unknown_on_failure_or_blank() {
        let b = backend(ScriptedRunner::new(|_, _| Ok(CommandOutput::failed(1, ""))));
        assert_eq!(b.active_device().unwrap(), None);
        let b = backend(ScriptedRunner::new(|_, _| Ok(CommandOutput::ok("  \n"))));
        assert_eq!(b.active_device().unwrap(), None);
        let b = backend(ScriptedRunner::new(|_, _| {
            Ok(CommandOutput::ok("AirPods Pro\n"))
        }));
        assert_eq!(b.active_device().unwrap().as_deref(), Some("AirPods Pro"));
    }

    #[test]
    fn select_passes_name_verbatim() {
        let b = backend(ScriptedRunner::new(|_, _| Ok(CommandOutput::ok(""))));
        b.select_device("Studio Display").unwrap();
        assert_eq!(
            b.runner().invocations(),
            vec![vec![
                "SwitchAudioSource",
                "-t",
                "output",
                "-s",
                "Studio Display"
            ]]
        );
    }

    #[test]
    fn volume_falls_through_missing_value() {
        let b = backend(ScriptedRunner::new(|_, args| {
            if args[1].starts_with("tell application") {
                Ok(CommandOutput::ok("35\n"))
            } else {
                Ok(CommandOutput::ok("missing value\n"))
            }
        }));
        assert_eq!(b.volume().unwrap().get(), 35);
        assert_eq!(b.runner().invocations().len(), 2);
    }

    #[test]
    fn volume_unsupported_when_all_dialects_fail() {
        let b = backend(ScriptedRunner::new(|_, _| {
            Ok(CommandOutput::failed(1, "execution error: not authorized"))
        }));
        let err = b.volume().unwrap_err();
        assert!(matches!(err, Error::Unsupported(Capability::ReadVolume)));
        assert_eq!(b.runner().invocations().len(), READ_VOLUME.len());
    }

    #[test]
    fn set_volume_stops_at_first_success() {
        let b = backend(ScriptedRunner::new(|_, args| {
            if args[1] == "set volume output volume 40" {
                Ok(CommandOutput::failed(1, "nope"))
            } else {
                Ok(CommandOutput::ok(""))
            }
        }));
        b.set_volume(VolumeLevel::clamped(40)).unwrap();
        let calls = b.runner().invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1][2],
            "tell application \"System Events\" to set volume output volume 40"
        );
    }

    #[test]
    fn legacy_volume_script_uses_tenths() {
        let scripts = write_volume_scripts(VolumeLevel::clamped(45));
        assert_eq!(scripts[2], "set volume 4.5");
    }

    #[test]
    fn mute_reads_and_writes() {
        let b = backend(ScriptedRunner::new(|_, args| {
            if args[1].starts_with("output muted") {
                Ok(CommandOutput::ok("true\n"))
            } else {
                Ok(CommandOutput::ok(""))
            }
        }));
        assert!(b.muted().unwrap());
        b.set_muted(false).unwrap();
        let calls = b.runner().invocations();
        assert_eq!(calls[1], vec!["osascript", "-e", "set volume output muted false"]);
    }

    #[test]
    fn unparseable_mute_is_a_failed_dialect() {
        let b = backend(ScriptedRunner::new(|_, _| Ok(CommandOutput::ok("maybe"))));
        assert!(matches!(
            b.muted().unwrap_err(),
            Error::Unsupported(Capability::ReadMute)
        ));
    }

    #[test]
    fn parse_helpers() {
        assert_eq!(parse_volume("100"), Some(VolumeLevel::MAX));
        assert_eq!(parse_volume("101"), None);
        assert_eq!(parse_volume("-1"), None);
        assert_eq!(script_value(" missing value "), None);
        assert_eq!(script_value(""), None);
        assert_eq!(parse_muted("false"), Some(false));
    }
}
