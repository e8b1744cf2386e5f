use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use spdlog::info;

use crate::draft::Draft;
use crate::error::{BlogError, IoContext, Result};
use crate::index::{Index, Log};
use crate::publisher::{self, CONTENT_FILE_NAME};
use crate::render::render;
use crate::text_utils::{format_publish_time, join_topics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub index: usize,
    pub publish: String,
    pub title: String,
    pub topics: String,
}

/// An opened blog: the index file and the directory holding the posts.
pub struct BlogManager {
    index_path: PathBuf,
    basedir: PathBuf,
    index: Index,
}

fn basedir_of(index_path: &Path) -> PathBuf {
    match index_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl BlogManager {
    pub fn open(index_path: &Path) -> Result<BlogManager> {
        let index = Index::load(index_path)?;
        info!("Opened blog index {} with {} logs", index_path.display(), index.logs.len());

        Ok(BlogManager {
            index_path: index_path.to_path_buf(),
            basedir: basedir_of(index_path),
            index,
        })
    }

    pub fn create(index_path: &Path) -> Result<BlogManager> {
        let index = Index::create(index_path)?;
        Ok(BlogManager {
            index_path: index_path.to_path_buf(),
            basedir: basedir_of(index_path),
            index,
        })
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// Posts with their positions, newest first
    pub fn entries(&self) -> Vec<(usize, &Log)> {
        self.index.logs.iter().enumerate().rev().collect()
    }

    fn log(&self, position: usize) -> Result<&Log> {
        self.index.get(position).ok_or(BlogError::NotFound(position))
    }

    pub fn detail(&self, position: usize) -> Result<PostDetail> {
        let log = self.log(position)?;
        let publish = format_publish_time(log.publish_time)
            .map_err(|e| BlogError::io(format!("Error reading post {}", position), io::Error::new(io::ErrorKind::InvalidData, e)))?;

        Ok(PostDetail {
            index: position,
            publish,
            title: log.title.clone(),
            topics: join_topics(&log.topics),
        })
    }

    pub fn post_dir(&self, position: usize) -> PathBuf {
        publisher::post_dir(&self.basedir, position)
    }

    /// Markdown of a published post
    pub fn content(&self, position: usize) -> Result<String> {
        self.log(position)?;
        let path = self.post_dir(position).join(CONTENT_FILE_NAME);
        fs::read_to_string(&path).io_context(|| format!("Error reading {}", path.display()))
    }

    pub fn content_html(&self, position: usize) -> Result<String> {
        Ok(render(&self.content(position)?))
    }

    pub fn publish(&mut self, draft: &Draft) -> Result<Log> {
        publisher::publish(&mut self.index, &self.index_path, &self.basedir, draft)
    }
}
