//! One function per command-line action, each writing its report to `out`.

use std::io::Write;

use audio_backend::AudioBackend;
use audio_engine::{Controller, switch_to};
use tracing::debug;

use crate::{
    cli::Action,
    error::{Error, Result},
    interactive,
};

/// Run `action` against `backend`.
pub fn run<B, W>(action: &Action, backend: &B, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    debug!(?action, "dispatching");
    match action {
        Action::GetVolume => show_volume(backend, out),
        Action::SetVolume(level) => set_volume(backend, *level, out),
        Action::AdjustVolume(delta) => adjust_volume(backend, *delta, out),
        Action::ToggleMute => toggle_mute(backend, out),
        Action::Current => show_current(backend, out),
        Action::Interactive => interactive::run(backend, out),
        Action::Switch(name) => switch(backend, name, out),
        Action::List => list_devices(backend, out),
    }
}

/// Print every output device, marking the active one.
pub fn list_devices<B, W>(backend: &B, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let devices = backend.list_output_devices()?;
    let active = backend.active_device()?;
    writeln!(out, "Available output devices:")?;
    for device in &devices {
        if active.as_deref() == Some(device.as_str()) {
            writeln!(out, "  • {device} (active)")?;
        } else {
            writeln!(out, "  • {device}")?;
        }
    }
    Ok(())
}

/// Print the active output device.
pub fn show_current<B, W>(backend: &B, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let device = backend
        .active_device()?
        .ok_or(Error::CurrentDeviceUnknown)?;
    writeln!(out, "{device}")?;
    Ok(())
}

/// Switch to the device best matching `query`.
pub fn switch<B, W>(backend: &B, query: &str, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let switched = switch_to(backend, query)?;
    if switched.was_resolved() {
        writeln!(out, "Similar device found: '{}'", switched.device)?;
    }
    writeln!(out, "Switched audio output to: {}", switched.device)?;
    Ok(())
}

/// Print the current volume.
pub fn show_volume<B, W>(backend: &B, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let level = Controller::new(backend).volume()?;
    writeln!(out, "Current volume: {level}%")?;
    Ok(())
}

/// Set an absolute volume, clamped to 0-100.
pub fn set_volume<B, W>(backend: &B, level: i64, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let applied = Controller::new(backend).set_volume(level)?;
    writeln!(out, "Volume set to {applied}%")?;
    Ok(())
}

/// Move the volume by `delta` relative to its current level.
pub fn adjust_volume<B, W>(backend: &B, delta: i64, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let applied = Controller::new(backend).adjust_volume(delta)?;
    writeln!(out, "Volume set to {applied}%")?;
    Ok(())
}

/// Flip the mute state.
pub fn toggle_mute<B, W>(backend: &B, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let muted = Controller::new(backend).toggle_mute()?;
    writeln!(out, "{}", if muted { "Audio muted" } else { "Audio unmuted" })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use audio_backend::mock::MockBackend;
    use audio_engine::{NotFound, Unavailable};

    use super::*;

    fn backend() -> MockBackend {
        let b = MockBackend::with_devices(["MacBook Pro Speakers", "AirPods Pro", "HomePod Mini"]);
        b.set_active(Some("MacBook Pro Speakers"));
        b
    }

    fn output(action: Action, backend: &MockBackend) -> Result<String> {
        let mut out = Vec::new();
        run(&action, backend, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn listing_marks_active_device() {
        let out = output(Action::List, &backend()).unwrap();
        assert_eq!(
            out,
            "Available output devices:\n  • MacBook Pro Speakers (active)\n  \
             • AirPods Pro\n  • HomePod Mini\n"
        );
    }

    #[test]
    fn current_device_is_printed() {
        let out = output(Action::Current, &backend()).unwrap();
        assert_eq!(out, "MacBook Pro Speakers\n");
    }

    #[test]
    fn unknown_current_device_is_an_error() {
        let b = backend();
        b.set_active(None);
        let err = output(Action::Current, &b).unwrap_err();
        assert!(matches!(err, Error::CurrentDeviceUnknown));
    }

    #[test]
    fn verbatim_switch_is_quiet() {
        let b = backend();
        let out = output(Action::Switch("AirPods Pro".into()), &b).unwrap();
        assert_eq!(out, "Switched audio output to: AirPods Pro\n");
        assert_eq!(b.active().as_deref(), Some("AirPods Pro"));
    }

    #[test]
    fn fuzzy_switch_announces_the_match() {
        let b = backend();
        let out = output(Action::Switch("HomePood".into()), &b).unwrap();
        assert_eq!(
            out,
            "Similar device found: 'HomePod Mini'\nSwitched audio output to: HomePod Mini\n"
        );
    }

    #[test]
    fn unmatched_switch_reports_devices() {
        let b = MockBackend::with_devices(["HomePod Mini", "Studio Display"]);
        b.set_active(Some("Studio Display"));
        let err = output(Action::Switch("Xbox Controller".into()), &b).unwrap_err();
        match err {
            Error::NotFound(NotFound { query, devices }) => {
                assert_eq!(query, "Xbox Controller");
                assert_eq!(devices, ["HomePod Mini", "Studio Display"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(b.call_count("select_device"), 0);
        assert_eq!(b.active().as_deref(), Some("Studio Display"));
    }

    #[test]
    fn loose_match_still_switches() {
        let b = backend();
        let out = output(Action::Switch("Xbox Controller".into()), &b).unwrap();
        assert!(out.starts_with("Similar device found: 'MacBook Pro Speakers'\n"));
        assert_eq!(b.call_count("select_device"), 1);
    }

    #[test]
    fn volume_commands_report_applied_level() {
        let b = backend();
        assert_eq!(
            output(Action::GetVolume, &b).unwrap(),
            "Current volume: 50%\n"
        );
        assert_eq!(
            output(Action::SetVolume(150), &b).unwrap(),
            "Volume set to 100%\n"
        );
        assert_eq!(
            output(Action::AdjustVolume(-30), &b).unwrap(),
            "Volume set to 70%\n"
        );
    }

    #[test]
    fn toggle_mute_reports_new_state() {
        let b = backend();
        assert_eq!(output(Action::ToggleMute, &b).unwrap(), "Audio muted\n");
        assert_eq!(output(Action::ToggleMute, &b).unwrap(), "Audio unmuted\n");
    }

    #[test]
    fn missing_volume_is_unavailable() {
        let b = backend();
        b.set_volume_level(None);
        let err = output(Action::AdjustVolume(10), &b).unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable(Unavailable::VolumeBaseline)
        ));
        assert_eq!(b.call_count("set_volume"), 0);
    }

    #[test]
    fn backend_failure_is_propagated() {
        let b = backend();
        b.set_unavailable(true);
        let err = output(Action::List, &b).unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }
}
