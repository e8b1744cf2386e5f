use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spdlog::info;

use gitblogger::config::Config;
use gitblogger::render::{PreviewRenderer, DEFAULT_PREVIEW_TEMPLATE};
use gitblogger::{BlogManager, Draft, PreviewMode};

use crate::{PreviewArgs, PublishArgs};

fn open_draft(md_path: &Path) -> Result<Draft> {
    let text = fs::read_to_string(md_path)
        .with_context(|| format!("Error reading draft {}", md_path.display()))?;
    Ok(Draft::from_text(&text))
}

fn read_template(config: &Config) -> Result<String> {
    let template = config.preview.as_ref().and_then(|preview| preview.template.as_ref());
    match template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Error reading preview template {}", path.display())),
        None => Ok(DEFAULT_PREVIEW_TEMPLATE.to_string()),
    }
}

pub fn preview_cmd(config: &Config, args: PreviewArgs) -> Result<()> {
    let draft = open_draft(&args.markdown)?;
    let mode = if args.raw { PreviewMode::Raw } else { PreviewMode::Html };
    let content = draft.preview(mode);

    for attachment in draft.attachments() {
        info!("Attachment: {}", attachment.display());
    }

    let Some(out) = args.out else {
        println!("{}", content);
        return Ok(());
    };

    let tpl_src = read_template(config)?;
    let renderer = PreviewRenderer::new(&tpl_src)?;
    let page = renderer.render(draft.window_title(), &content);
    fs::write(&out, page).with_context(|| format!("Error writing preview {}", out.display()))?;

    println!("Preview written to {}", out.display());
    Ok(())
}

pub fn publish_cmd(args: PublishArgs) -> Result<()> {
    let mut draft = open_draft(&args.markdown)?;
    if let Some(ref topics) = args.topics {
        draft.set_topics(topics);
    }
    for path in &args.attach {
        draft.attach(path)?;
    }

    let mut manager = BlogManager::open(&args.index)
        .with_context(|| format!("Error opening blog index {}", args.index.display()))?;
    let log = manager.publish(&draft)
        .with_context(|| format!("Error publishing {}", args.markdown.display()))?;

    let position = manager.index().logs.len() - 1;
    println!("Published \"{}\" as post {} in {}", log.title, position, manager.post_dir(position).display());
    Ok(())
}
