use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use filmloc_core::rank::DEFAULT_LIMIT;
use filmloc_core::{CollisionPolicy, RankOptions};
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments for filmloc
#[derive(Debug, Parser)]
#[command(
    name = "filmloc",
    version,
    about = "Generates an HTML map with the film locations of a year closest to you"
)]
pub struct CliArgs {
    /// Release year of the films (e.g. 2010)
    pub year: u16,

    /// Your latitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Your longitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Path to the locations dataset (`locations.list`, optionally .gz)
    pub path_to_dataset: PathBuf,

    /// How many closest locations to keep
    #[arg(short = 'n', long, env = "FILMLOC_LIMIT", default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Seconds between two geocoding requests
    #[arg(long, env = "FILMLOC_MIN_DELAY", default_value = "3", value_parser = parse_seconds)]
    pub min_delay: Duration,

    /// User-Agent sent to the geocoding service
    #[arg(long, env = "FILMLOC_USER_AGENT", default_value = "filmloc")]
    pub user_agent: String,

    /// Preferred language of returned addresses
    #[arg(long, env = "FILMLOC_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Nominatim search endpoint
    #[arg(long, env = "FILMLOC_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Resolve places from a local JSON table instead of the network
    #[arg(short = 'g', long)]
    pub gazetteer: Option<PathBuf>,

    /// Directory the map is written to
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// What to do when different films land on the exact same coordinate
    #[arg(long, value_enum, default_value_t = OnCollision::KeepBoth)]
    pub on_collision: OnCollision,

    /// Offset in degrees used by `--on-collision offset`, in (0, 1]
    #[arg(long, default_value_t = 1e-4, value_parser = parse_offset_step)]
    pub offset_step: f64,

    /// Print the ranking only, do not write a map
    #[arg(long)]
    pub no_map: bool,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnCollision {
    /// Keep both markers on the same spot
    KeepBoth,
    /// Move later markers slightly north
    Offset,
}

impl CliArgs {
    pub fn rank_options(&self) -> RankOptions {
        let collision = match self.on_collision {
            OnCollision::KeepBoth => CollisionPolicy::KeepBoth,
            OnCollision::Offset => CollisionPolicy::Offset {
                step_deg: self.offset_step,
            },
        };
        RankOptions {
            limit: self.limit,
            collision,
        }
    }

    /// Fails with a usage error when the dataset file is missing.
    pub fn check_dataset(&self) -> Result<(), clap::Error> {
        if self.path_to_dataset.exists() {
            return Ok(());
        }
        Err(CliArgs::command().error(
            ErrorKind::ValueValidation,
            format!(
                "The specified dataset file does not exist: {}",
                self.path_to_dataset.display()
            ),
        ))
    }

    /// Log filter implied by `-v` when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{s:?} is not a valid delay: {e}"))
}

fn parse_offset_step(s: &str) -> Result<f64, String> {
    let step: f64 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    if step > 0.0 && step <= 1.0 {
        Ok(step)
    } else {
        Err(format!("{s:?} is not an offset in (0, 1] degrees"))
    }
}
