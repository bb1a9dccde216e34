//! Verifies that every map config shipped with the game describes a buildable grid.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use hexmap_lib::config::HexMapConfig;
use xshell::Shell;

/// Where the shipped configs live, relative to the workspace root.
const CONFIG_FOLDER: &str = "configs";

/// A config file that could not be used.
#[derive(Debug)]
pub(super) struct ConfigFailure {
    /// The offending file.
    path: PathBuf,
    /// What went wrong.
    reason: String,
}

impl Display for ConfigFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Parses and validates every `.json` file in the config folder.
pub(super) fn verify_map_configs(sh: &Shell) -> Vec<ConfigFailure> {
    let folder = sh.current_dir().join(CONFIG_FOLDER);
    let paths = match sh.read_dir(&folder) {
        Ok(paths) => paths,
        Err(error) => {
            return vec![ConfigFailure {
                path: folder,
                reason: error.to_string(),
            }]
        }
    };

    paths
        .into_iter()
        .filter(|path| is_config_file(path))
        .filter_map(|path| {
            let reason = match sh.read_file(&path) {
                Ok(json) => validate(&json).err()?,
                Err(error) => error.to_string(),
            };
            Some(ConfigFailure { path, reason })
        })
        .collect()
}

/// Checks that `json` parses, and that its grid settings are usable.
fn validate(json: &str) -> Result<(), String> {
    let config = HexMapConfig::from_json(json).map_err(|error| error.to_string())?;
    config.hex_size().map_err(|error| error.to_string())?;
    config
        .chunk_dimensions()
        .map_err(|error| error.to_string())?;

    if config.zoom_min > config.zoom_max {
        return Err(format!(
            "zoom_min ({}) is larger than zoom_max ({})",
            config.zoom_min, config.zoom_max
        ));
    }

    Ok(())
}

/// Configs are stored as JSON.
fn is_config_file(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "json")
}
