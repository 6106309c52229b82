//! Configuration file loading and command-line overrides.
//!
//! ```toml
//! [engine]
//! set_order = "random"
//! seed = 7
//! trim_trailing_newlines = true
//! ```

use std::path::{Path, PathBuf};

use recombine_model::{EngineOptions, SetOrder};
use serde::Deserialize;
use tracing::debug;

use crate::error::InputError;

/// Looked up next to the input document when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "recombine.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub engine: EngineOptions,
}

/// Option values given on the command line. Unset fields keep the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOverrides {
    pub set_order: Option<SetOrder>,
    pub seed: Option<u64>,
    pub trim_trailing_newlines: bool,
    pub no_transforms: bool,
}

/// Parse the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<ConfigFile, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| InputError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// The configuration that applies to `input`.
///
/// An explicit path must exist. Otherwise `recombine.toml` beside the input
/// is used when present.
pub fn discover_config(
    explicit: Option<&Path>,
    input: &Path,
) -> Result<Option<(PathBuf, ConfigFile)>, InputError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = input
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(None);
            }
            candidate
        }
    };
    let config = load_config(&path)?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(Some((path, config)))
}

/// Apply command-line overrides on top of the file options.
pub fn resolve_options(config: Option<ConfigFile>, overrides: &EngineOverrides) -> EngineOptions {
    let mut options = config.map(|config| config.engine).unwrap_or_default();
    if let Some(order) = overrides.set_order {
        options.set_order = order;
    }
    if overrides.seed.is_some() {
        options.seed = overrides.seed;
    }
    if overrides.trim_trailing_newlines {
        options.trim_trailing_newlines = true;
    }
    if overrides.no_transforms {
        options.apply_transforms = false;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_file() {
        let config = ConfigFile {
            engine: EngineOptions::default()
                .with_set_order(SetOrder::Random)
                .with_seed(Some(1)),
        };
        let overrides = EngineOverrides {
            set_order: Some(SetOrder::Sorted),
            no_transforms: true,
            ..EngineOverrides::default()
        };
        let options = resolve_options(Some(config), &overrides);
        assert_eq!(options.set_order, SetOrder::Sorted);
        assert_eq!(options.seed, Some(1));
        assert!(!options.apply_transforms);
    }

    #[test]
    fn no_file_means_defaults() {
        let options = resolve_options(None, &EngineOverrides::default());
        assert_eq!(options, EngineOptions::default());
    }
}
