use std::collections::HashSet;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use spdlog::debug;

use crate::attachment;
use crate::error::{BlogError, IoContext, Result, ValidationError};
use crate::render::{render, render_raw};
use crate::text_utils::{first_line, parse_title};

pub const MISSING_TITLE_PROMPT: &str = "Please enter your title at the first line - GitBlogger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    #[default]
    Html,
    Raw,
}

/// A post being written. Nothing here is persisted until it is published.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    text: String,
    scanned: Vec<PathBuf>,
    attached: Vec<PathBuf>,
    topics: String,
}

impl Draft {
    pub fn new() -> Draft {
        Draft::default()
    }

    pub fn from_text(text: &str) -> Draft {
        let mut draft = Draft::new();
        draft.set_text(text);
        draft
    }

    /// Replaces the markdown and looks for `file:` references again
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.scanned = attachment::scan(&self.text);
        debug!("Draft has {} referenced attachments", self.scanned.len());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn title(&self) -> Option<&str> {
        let line = first_line(&self.text);
        if line.is_empty() {
            None
        } else {
            Some(parse_title(line))
        }
    }

    pub fn window_title(&self) -> &str {
        self.title().unwrap_or(MISSING_TITLE_PROMPT)
    }

    pub fn set_topics(&mut self, topics: &str) {
        self.topics = topics.to_string();
    }

    /// Free text, kept as typed. Published posts don't carry it.
    pub fn topics(&self) -> &str {
        &self.topics
    }

    /// Adds a file picked by hand rather than referenced from the text
    pub fn attach(&mut self, path: &Path) -> Result<PathBuf> {
        let path = fs::canonicalize(path)
            .io_context(|| format!("Error attaching {}", path.display()))?;

        let metadata = fs::metadata(&path)
            .io_context(|| format!("Error attaching {}", path.display()))?;
        if !metadata.is_file() {
            return Err(BlogError::io(
                format!("Error attaching {}", path.display()),
                io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        self.attached.push(path.clone());
        Ok(path)
    }

    /// Files to copy on publish: the ones referenced in the text, in order,
    /// then the attached ones. A file reached twice, by any path, is listed once.
    pub fn attachments(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut attachments = vec![];
        for path in self.scanned.iter().chain(&self.attached) {
            let key = fs::canonicalize(path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                attachments.push(path.clone());
            }
        }
        attachments
    }

    pub fn preview(&self, mode: PreviewMode) -> String {
        match mode {
            PreviewMode::Html => render(&self.text),
            PreviewMode::Raw => render_raw(&self.text),
        }
    }

    /// Checks the draft can be published and returns its title
    pub fn validate(&self) -> std::result::Result<&str, ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        self.title().ok_or(ValidationError::MissingTitle)
    }
}
