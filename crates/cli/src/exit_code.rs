//! Exit codes for the graphsniper CLI.
//!
//! A run that finds nothing still exits with [`ExitCode::Success`]; only
//! problems with the outer surface (config, output files) are failures.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed, whether or not anything was found
    Success = 0,
    /// Any other failure
    Failure = 1,
    /// Configuration error (missing or invalid config file, bad flag value)
    ConfigError = 2,
    /// I/O error (URL list unreadable, output not writable)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classify an error by the first recognizable cause in its chain.
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if cause.is::<graphsniper_config::ConfigError>() {
                return Self::ConfigError;
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::Failure
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::ConfigError.code(), 2);
        assert_eq!(ExitCode::IoError.code(), 4);
    }

    #[test]
    fn test_for_error_finds_io_cause() {
        let err = std::fs::read_to_string("/definitely/not/here")
            .context("Failed to read URL list")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::IoError);
    }

    #[test]
    fn test_for_error_finds_config_cause() {
        let err = graphsniper_config::load_config_from_str("workers: 0", "c.yml".as_ref())
            .context("Failed to load config")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }

    #[test]
    fn test_for_error_defaults_to_failure() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::for_error(&err), ExitCode::Failure);
    }
}
