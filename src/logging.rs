use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Diagnostic verbosity selected on the command line. Report lines always go
/// to stdout; everything configured here goes to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn directive(self) -> String {
        format!("ros_node_audit={}", self.level())
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the flag-derived filter.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    // try_init: integration tests may install more than once per process
    let _ = match verbosity {
        Verbosity::Quiet | Verbosity::Normal => builder.without_time().try_init(),
        _ => builder.try_init(),
    };
}
