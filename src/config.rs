use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default)]
pub struct Preview {
    /// ramhorns template with `{{title}}` and `{{{content}}}`
    pub template: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
pub struct Config {
    pub log: Option<Log>,
    pub preview: Option<Preview>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }
    if let Some(ref mut preview) = cfg.preview {
        preview.template = preview.template.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
