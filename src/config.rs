//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    error::Result,
    placement::{Corner, MonitorLayout, Placement, WindowSize, WorkArea},
    services::{default_alarm_path, default_player, SoundAlert},
    state::TimerState,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "corner-countdown")]
#[command(about = "An always-on-top countdown timer anchored to a corner of a display")]
#[command(version)]
pub struct Config {
    /// The screen/monitor to display on, 1..N
    #[arg(short, long, default_value = "1")]
    pub display: usize,

    /// Count down minutes, range is 0..99
    #[arg(short, long, default_value = "2")]
    pub minutes: u32,

    /// Count down seconds, range is 0..59
    #[arg(short, long, default_value = "0")]
    pub seconds: u32,

    /// Corner of the display: tl, tr, bl or br
    #[arg(short, long, default_value = "br")]
    pub position: Corner,

    /// Work area of a monitor as LEFT,TOP,RIGHT,BOTTOM; repeat per monitor
    #[arg(long = "monitor", value_name = "L,T,R,B", default_value = "0,0,1920,1080")]
    pub monitors: Vec<WorkArea>,

    /// Window width in pixels
    #[arg(long, default_value = "198", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "162", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Sound played when the countdown expires
    #[arg(long)]
    pub alarm: Option<PathBuf>,

    /// Command used to play the alarm sound
    #[arg(long)]
    pub player: Option<String>,

    /// Tick interval in milliseconds; the expiry blink runs at half of it
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Port of the control surface
    #[arg(long, default_value = "20560")]
    pub port: u16,

    /// Host address of the control surface
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything the countdown needs, checked before anything starts
#[derive(Debug, Clone)]
pub struct Settings {
    pub timer: TimerState,
    pub placement: Placement,
    pub tick_interval: Duration,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Range-check the countdown and resolve the window placement
    pub fn validate(&self) -> Result<Settings> {
        let timer = TimerState::configure(self.minutes, self.seconds)?;
        let placement = Placement::locate(
            &self.monitor_layout(),
            self.display,
            self.position,
            self.window_size(),
        )?;

        Ok(Settings {
            timer,
            placement,
            tick_interval: Duration::from_millis(self.tick_ms),
        })
    }

    pub fn monitor_layout(&self) -> MonitorLayout {
        MonitorLayout::new(self.monitors.clone())
    }

    pub fn window_size(&self) -> WindowSize {
        WindowSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Alarm sound sink built from `--alarm` and `--player`
    pub fn alert(&self) -> SoundAlert {
        let path = self.alarm.clone().unwrap_or_else(default_alarm_path);
        let player = self
            .player
            .clone()
            .unwrap_or_else(|| default_player().to_string());
        SoundAlert::new(path, player)
    }

    /// Get the control surface address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
