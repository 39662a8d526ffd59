use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "csgray")]
#[command(about = "Render a CSG scene description with recursive ray tracing")]
#[command(version)]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image path (PNG)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Override the screen's pixels per scene unit
    #[arg(long, value_parser = parse_dpi)]
    pub dpi: Option<f64>,

    /// Override the maximum recursion depth
    #[arg(short, long)]
    pub recursion: Option<u32>,
}

fn parse_dpi(value: &str) -> Result<f64, String> {
    let dpi: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if dpi > 0.0 && dpi.is_finite() {
        Ok(dpi)
    } else {
        Err(format!("dpi must be positive, got {dpi}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["csgray", "scene.json"]).unwrap();
        assert_eq!(args.scene, PathBuf::from("scene.json"));
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(matches!(args.log_level, LogLevel::Info));
        assert!(args.dpi.is_none());
        assert!(args.recursion.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "csgray",
            "scene.json",
            "-o",
            "out.png",
            "--log-level",
            "debug",
            "--dpi",
            "64",
            "--recursion",
            "2",
        ])
        .unwrap();

        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
        assert_eq!(args.dpi, Some(64.0));
        assert_eq!(args.recursion, Some(2));
    }

    #[test]
    fn test_rejects_bad_dpi() {
        assert!(Args::try_parse_from(["csgray", "scene.json", "--dpi", "0"]).is_err());
        assert!(Args::try_parse_from(["csgray", "scene.json", "--dpi", "abc"]).is_err());
        assert!(Args::try_parse_from(["csgray"]).is_err());
    }
}
