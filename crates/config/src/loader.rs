use crate::{ConfigError, Result, SniperConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".graphsniperrc.yml",
    ".graphsniperrc.yaml",
    ".graphsniperrc.json",
    ".graphsniperrc",
    "graphsniper.config.yml",
    "graphsniper.config.yaml",
    "graphsniper.config.json",
];

/// Find a config file by walking up the directory tree from `start_dir`.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from `path`, detecting the format from its extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<SniperConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!("Config loaded successfully");
    Ok(config)
}

/// Load a config from a string. `path` drives format detection and errors.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<SniperConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".graphsniperrc" => {
            tracing::trace!("Trying YAML then JSON for .graphsniperrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<SniperConfig> {
    // An empty YAML document means "all defaults".
    if contents.trim().is_empty() {
        return Ok(SniperConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<SniperConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn invalid(path: &Path, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn validate_config(config: &SniperConfig, path: &Path) -> Result<()> {
    if config.workers == Some(0) {
        return Err(invalid(path, "'workers' must be at least 1"));
    }
    if config.fetch.timeout == Some(0) {
        return Err(invalid(path, "'fetch.timeout' must be at least 1 second"));
    }
    if config.fetch.connect_timeout == Some(0) {
        return Err(invalid(path, "'fetch.connect_timeout' must be at least 1 second"));
    }
    if let Some(sources) = &config.discovery.sources {
        if sources.iter().any(|source| source.program.trim().is_empty()) {
            return Err(invalid(path, "discovery source has an empty 'program'"));
        }
    }
    if let Some(command) = &config.beautify.command {
        if command.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(invalid(path, "'beautify.command' must name a program"));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
