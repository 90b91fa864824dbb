//! Configuration handling

pub mod maplint;

pub use maplint::{ChecksConfig, ConfigError, IgnoreError, MaplintConfig, OutputConfig, CONFIG_FILE_NAME};
