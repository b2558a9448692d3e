use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::clock::DEFAULT_CLOCK_INTERVAL;
use crate::error::Error;
use crate::surface::BorderGlyphs;

#[derive(Parser, Debug)]
#[command(
    name = "cell-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Overlapping windows, a menu bar and a clock in a character-cell terminal"
)]
pub struct Cli {
    /// Directory to open in a listing window. Repeat for more windows.
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub dirs: Vec<PathBuf>,

    /// Clock refresh period.
    #[arg(
        long = "clock-ms",
        value_name = "MILLIS",
        default_value_t = DEFAULT_CLOCK_INTERVAL.as_millis() as u64
    )]
    pub clock_ms: u64,

    /// Draw window frames with ASCII characters.
    #[arg(long)]
    pub ascii: bool,

    /// Most verbose level shown in the log window.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: Level,

    /// Do not open the block-game window.
    #[arg(long = "no-game")]
    pub no_game: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dirs: Vec<PathBuf>,
    pub clock_interval: Duration,
    pub borders: BorderGlyphs,
    pub log_level: Level,
    pub show_game: bool,
}

impl TryFrom<&Cli> for Config {
    type Error = Error;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(50..=10_000).contains(&cli.clock_ms) {
            return Err(Error::Config(
                "clock-ms must be between 50 and 10000".to_string(),
            ));
        }
        if let Some(empty) = cli.dirs.iter().find(|d| d.as_os_str().is_empty()) {
            return Err(Error::Config(format!("empty directory path {empty:?}")));
        }
        let dirs = if cli.dirs.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            cli.dirs.clone()
        };
        Ok(Self {
            dirs,
            clock_interval: Duration::from_millis(cli.clock_ms),
            borders: if cli.ascii {
                BorderGlyphs::ASCII
            } else {
                BorderGlyphs::LINE
            },
            log_level: cli.log_level,
            show_game: !cli.no_game,
        })
    }
}
