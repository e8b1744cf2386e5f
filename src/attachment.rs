use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use spdlog::debug;

lazy_static! {
    // A reference runs from `file:` to the first `)` or `"` of the line
    static ref FILE_REF_REGEX: Regex = Regex::new(r#"file:(?P<path>[^)"\n]*)"#).unwrap();
}

fn candidate_path<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    let path = caps.name("path")?.as_str().trim_end();
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Collects the local files referenced as `file:<path>` in the markdown text.
///
/// References are returned in order of appearance, duplicates included.
/// Candidates that don't exist or aren't regular files are skipped.
pub fn scan(md_text: &str) -> Vec<PathBuf> {
    let mut attachments = vec![];
    for line in md_text.lines() {
        for caps in FILE_REF_REGEX.captures_iter(line) {
            let Some(candidate) = candidate_path(&caps) else {
                continue;
            };

            let path = PathBuf::from(candidate);
            if path.is_file() {
                attachments.push(path);
            } else {
                debug!("Skipping attachment candidate {}", candidate);
            }
        }
    }
    attachments
}

fn base_name(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|name| name.to_str())
}

fn rewrite_line(line: &str) -> String {
    let result = FILE_REF_REGEX.replace_all(line, |caps: &Captures| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let raw = caps.name("path").map_or("", |m| m.as_str());
        match candidate_path(caps).and_then(base_name) {
            Some(name) => {
                // Keep the spacing before a `"title"`
                let trailing = &raw[raw.trim_end().len()..];
                format!("{}{}", name, trailing)
            }
            None => whole.to_string(),
        }
    });
    result.to_string()
}

/// Replaces every `file:<absolute-path>` reference with the file's base name,
/// the name the attachment gets once copied next to `content.md`.
///
/// Plain text substitution, line by line. A `file:` outside of a link is
/// rewritten as well.
pub fn rewrite(md_text: &str) -> String {
    md_text.split('\n')
        .map(rewrite_line)
        .collect::<Vec<String>>()
        .join("\n")
}
