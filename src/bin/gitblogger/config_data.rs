use std::fs;
use std::io;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location

# Remove this section to only see warnings and errors on the console
[log]
# Critical, Error, Warn, Info, Debug or Trace
level = "Info"
log_to_console = false
# Defaults to the user cache directory
# location = "${exe_dir}/log/gitblogger.log"

[preview]
# Page used by `gitblogger preview --out`. Gets {{title}} and {{{content}}}
# template = "${exe_dir}/preview.tpl"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, CONFIG_SAMPLE)
}
