use std::env;
use std::path::PathBuf;

use gitblogger::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

fn default_log_location() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("GitBlogger").join("log").join("gitblogger.log"))
}

/// Without an explicit path, a missing configuration just means defaults
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path {
        Some(path) => path,
        None => match get_config_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = default_log_location();
        }
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: Option<PathBuf>) -> Result<PathBuf, String> {
    let path = match config_path {
        Some(path) => path,
        None => match dirs::config_dir() {
            Some(cfg_dir) => cfg_dir.join(CFG_FILE_NAME),
            None => return Err("Could not find user config dir".to_string()),
        },
    };

    if let Err(e) = write_sample_cfg(&path) {
        return Err(format!("Error writing sample config to {}: {}", path.display(), e));
    }

    Ok(path)
}
