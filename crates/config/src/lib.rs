mod config;
mod error;
mod loader;

pub use config::{
    BeautifyConfig, DiscoveryConfig, FetchConfig, MergeOrderConfig, OutputConfig, SniperConfig,
    SourceCommand, DOMAIN_PLACEHOLDER,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
