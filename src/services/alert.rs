//! Alert sound playback

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;
use tracing::{debug, info, warn};

/// Sound file looked up next to the executable when none is configured
pub const DEFAULT_ALARM_FILE: &str = "countdown_alarm.wav";

/// Something that can announce that the countdown expired.
///
/// Implementations are fire-and-forget: they must not block and must never
/// fail the caller.
pub trait AlertSink: Send {
    fn play_alert(&self);
}

/// Plays a sound file through an external player command
#[derive(Debug, Clone)]
pub struct SoundAlert {
    path: PathBuf,
    player: String,
}

impl SoundAlert {
    pub fn new(path: PathBuf, player: String) -> Self {
        Self { path, player }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlertSink for SoundAlert {
    fn play_alert(&self) {
        if !self.path.exists() {
            debug!("No alarm sound at {}, skipping", self.path.display());
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("No runtime available to play the alarm sound");
            return;
        }

        let mut command = player_command(&self.player, &self.path);
        let child = match command.stdout(Stdio::null()).stderr(Stdio::piped()).spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to execute {}: {}", self.player, e);
                return;
            }
        };

        info!("Playing alarm {}", self.path.display());
        let player = self.player.clone();
        tokio::spawn(async move {
            match child.wait_with_output().await {
                Ok(output) if !output.status.success() => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    warn!("{} failed: {}", player, stderr.trim());
                }
                Ok(_) => debug!("Alarm playback finished"),
                Err(e) => warn!("Failed to wait for {}: {}", player, e),
            }
        });
    }
}

/// Player used when none is given on the command line
pub fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else if cfg!(windows) {
        "powershell"
    } else {
        "aplay"
    }
}

/// `countdown_alarm.wav` beside the running executable
pub fn default_alarm_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_ALARM_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ALARM_FILE))
}

fn player_command(player: &str, path: &Path) -> Command {
    let mut command = Command::new(player);
    if player.eq_ignore_ascii_case("powershell") {
        let script = format!(
            "(New-Object Media.SoundPlayer '{}').PlaySync()",
            path.display()
        );
        command.args(["-NoProfile", "-Command", script.as_str()]);
    } else {
        command.arg(path);
    }
    command
}
