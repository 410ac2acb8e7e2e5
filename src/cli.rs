//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use projectile_playground::entities::StepMode;

#[derive(Parser, Debug)]
#[command(name = "projectile_playground")]
#[command(about = "Fire bullets, artillery, fireballs, lasers and fireworks across the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seed for the random source (fuses and sparks); random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Time fed to each integration step
    #[arg(long, value_enum, default_value_t = StepArg::SinceLaunch)]
    pub step: StepArg,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StepArg {
    /// Seconds since the shot was fired
    SinceLaunch,
    /// Seconds since the previous frame
    PerFrame,
}

impl From<StepArg> for StepMode {
    fn from(arg: StepArg) -> Self {
        match arg {
            StepArg::SinceLaunch => StepMode::SinceLaunch,
            StepArg::PerFrame => StepMode::PerFrame,
        }
    }
}

impl Cli {
    /// Frame budget for the chosen rate, kept within 1..=240 fps.
    pub fn frame_budget(&self) -> Duration {
        let fps = self.fps.clamp(1, 240);
        Duration::from_secs_f64(1.0 / fps as f64)
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.verbose > 0 {
            Some(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            })
        } else if self.quiet {
            Some(log::LevelFilter::Error)
        } else {
            None
        }
    }
}
