use std::fmt;
use std::io;

/// Errors from reading and parsing the input file.
#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    /// A line's token wasn't of the form `#<k>`.
    MalformedToken { line: usize, token: String },
    /// An offset resolved to a position before the head of the graph.
    InvalidOperand(graph::GraphError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(e) => write!(f, "could not read input file: {e}"),
            InputError::MalformedToken { line, token } => {
                write!(f, "line {line}: malformed token {token:?}, expected `#<k>`")
            }
            InputError::InvalidOperand(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            InputError::InvalidOperand(e) => Some(e),
            InputError::MalformedToken { .. } => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

impl From<graph::GraphError> for InputError {
    fn from(e: graph::GraphError) -> Self {
        InputError::InvalidOperand(e)
    }
}

/// Errors from loading an optional `--config` file.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config file: {e}"),
            ConfigError::Toml(e) => write!(f, "could not parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
        }
    }
}

/// The union of everything that can send this binary out with a non-zero exit code.
#[derive(Debug)]
pub enum CliError {
    Input(InputError),
    Config(ConfigError),
    Scheduler(scheduler::SchedulerError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Input(e) => write!(f, "{e}"),
            CliError::Config(e) => write!(f, "{e}"),
            CliError::Scheduler(e) => write!(f, "{e}"),
        }
    }
}

impl From<InputError> for CliError {
    fn from(e: InputError) -> Self {
        CliError::Input(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<scheduler::SchedulerError> for CliError {
    fn from(e: scheduler::SchedulerError) -> Self {
        CliError::Scheduler(e)
    }
}
