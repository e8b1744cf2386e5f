use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use gitblogger::text_utils::format_date_time;
use gitblogger::BlogManager;

pub fn create_cmd(index_path: &Path) -> Result<()> {
    BlogManager::create(index_path)
        .with_context(|| format!("Error creating blog index {}", index_path.display()))?;

    let full_path = fs::canonicalize(index_path).unwrap_or_else(|_| index_path.to_path_buf());
    println!("Initial index has been created successfully at {}", full_path.display());
    Ok(())
}

pub fn list_cmd(index_path: &Path) -> Result<()> {
    let manager = BlogManager::open(index_path)
        .with_context(|| format!("Error opening blog index {}", index_path.display()))?;

    for (position, log) in manager.entries() {
        let (date, time) = format_date_time(log.publish_time)
            .unwrap_or_else(|_| ("----------".to_string(), "--:--:--".to_string()));
        println!("{:>4}  {} {}  {}", position, date, time, log.title);
    }
    Ok(())
}

pub fn show_cmd(index_path: &Path, position: usize, html: bool) -> Result<()> {
    let manager = BlogManager::open(index_path)
        .with_context(|| format!("Error opening blog index {}", index_path.display()))?;

    let detail = manager.detail(position)?;
    println!("Index: {}", detail.index);
    println!("Publish: {}", detail.publish);
    println!("Title: {}", detail.title);
    println!("Topics: {}", detail.topics);
    println!();

    let content = if html {
        manager.content_html(position)?
    } else {
        manager.content(position)?
    };
    println!("{}", content);
    Ok(())
}
