use directories::ProjectDirs;
use std::path::PathBuf;

pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "cellsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Pick the configuration file to read, if any.
///
/// An explicit `--config` always wins. Otherwise the default file is used
/// when it exists, unless defaults are disabled.
pub(crate) fn resolve_config_path(
    explicit: Option<PathBuf>,
    no_default_config: bool,
) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if no_default_config {
        return None;
    }
    let path = default_config_path()?;
    if path.is_file() {
        log::debug!("Using default config {}", path.display());
        Some(path)
    } else {
        None
    }
}
