use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use vista_renderer::Scheduling;

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

#[derive(Parser, Debug)]
#[command(name = "vista")]
#[command(about = "Render a JSON scene description to an image")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Render on a worker pool with this many threads
    #[arg(long, conflicts_with_all = ["sequential", "parallel"])]
    pub threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long, conflicts_with = "parallel")]
    pub sequential: bool,

    /// Render with rayon's parallel iterators
    #[arg(long)]
    pub parallel: bool,

    /// Override the sampling seed from the scene file
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    /// Scheduling requested on the command line, if any.
    pub fn scheduling(&self) -> Option<Scheduling> {
        if let Some(threads) = self.threads {
            Some(Scheduling::WorkerPool { threads })
        } else if self.sequential {
            Some(Scheduling::Sequential)
        } else if self.parallel {
            Some(Scheduling::Parallel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vista", "scene.json"]).unwrap();
        assert_eq!(args.scene, PathBuf::from("scene.json"));
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(matches!(args.log_level, LogLevel::Info));
        assert_eq!(args.scheduling(), None);
    }

    #[test]
    fn test_scheduling_flags() {
        let pool = Args::try_parse_from(["vista", "s.json", "--threads", "6"]).unwrap();
        assert_eq!(pool.scheduling(), Some(Scheduling::WorkerPool { threads: 6 }));

        let sequential = Args::try_parse_from(["vista", "s.json", "--sequential"]).unwrap();
        assert_eq!(sequential.scheduling(), Some(Scheduling::Sequential));

        let parallel = Args::try_parse_from(["vista", "s.json", "--parallel"]).unwrap();
        assert_eq!(parallel.scheduling(), Some(Scheduling::Parallel));
    }

    #[test]
    fn test_conflicting_scheduling_flags() {
        let threads_and_sequential = ["vista", "s.json", "--threads", "2", "--sequential"];
        assert!(Args::try_parse_from(threads_and_sequential).is_err());
        assert!(Args::try_parse_from(["vista", "s.json", "--sequential", "--parallel"]).is_err());
    }

    #[test]
    fn test_output_and_log_level() {
        let args = Args::try_parse_from([
            "vista",
            "s.json",
            "-o",
            "renders/out.png",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output, PathBuf::from("renders/out.png"));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
