use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use spdlog::{debug, info};

use crate::attachment;
use crate::draft::Draft;
use crate::error::{BlogError, IoContext, Result};
use crate::index::{Index, Log};
use crate::text_utils::now_timestamp;

pub const CONTENT_FILE_NAME: &str = "content.md";

pub fn post_dir(basedir: &Path, position: usize) -> PathBuf {
    basedir.join(position.to_string())
}

fn copy_attachment(source: &Path, post_dir: &Path) -> Result<PathBuf> {
    let context = || format!("Error copying attachment {}", source.display());

    let file_name = source.file_name().ok_or_else(|| {
        BlogError::io(context(), io::Error::new(ErrorKind::InvalidInput, "attachment has no file name"))
    })?;
    let target_path = post_dir.join(file_name);

    let mut source_file = File::open(source).io_context(context)?;
    // Two attachments sharing a base name end up here
    let mut target_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target_path)
        .io_context(|| format!("Error creating {}", target_path.display()))?;
    io::copy(&mut source_file, &mut target_file).io_context(context)?;

    debug!("Copied {} to {}", source.display(), target_path.display());
    Ok(target_path)
}

/// Publishes `draft` as the next post of `index`.
///
/// The post goes to `basedir/<position>/`, where position is the number of
/// logs before publishing. Then the log is appended and the index is written
/// to `index_path`.
///
/// A rejected draft leaves everything untouched. Any later failure aborts
/// without cleaning up: the directory, `content.md` and copied attachments
/// written so far stay where they are.
pub fn publish(index: &mut Index, index_path: &Path, basedir: &Path, draft: &Draft) -> Result<Log> {
    publish_at(index, index_path, basedir, draft, now_timestamp())
}

pub fn publish_at(index: &mut Index, index_path: &Path, basedir: &Path, draft: &Draft, publish_time: i64) -> Result<Log> {
    let title = draft.validate()?.to_string();

    let position = index.next_position();
    let dir = post_dir(basedir, position);
    fs::create_dir(&dir)
        .io_context(|| format!("Error creating post directory {}", dir.display()))?;
    info!("Publishing \"{}\" to {}", title, dir.display());

    let content = attachment::rewrite(draft.text());
    let content_path = dir.join(CONTENT_FILE_NAME);
    fs::write(&content_path, content)
        .io_context(|| format!("Error writing {}", content_path.display()))?;

    for source in draft.attachments() {
        copy_attachment(&source, &dir)?;
    }

    let log = Log {
        publish_time,
        title,
        revision: 0,
        topics: vec![],
    };

    index.logs.push(log.clone());
    index.save(index_path)?;

    info!("Published post {} with {} logs in index", position, index.logs.len());
    Ok(log)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn setup() -> (tempfile::TempDir, PathBuf, Index) {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("index.json");
        let index = Index::create(&index_path).unwrap();
        (dir, index_path, index)
    }

    fn dir_entries(path: &Path) -> Vec<String> {
        let mut entries: Vec<String> = fs::read_dir(path).unwrap()
            .map(|e| e.unwrap().file_name().to_str().unwrap().to_string())
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_publish_creates_numbered_dirs() {
        let (dir, index_path, mut index) = setup();
        let basedir = dir.path();

        let log = publish_at(&mut index, &index_path, basedir, &Draft::from_text("# First\nbody\n"), 1000).unwrap();
        assert_eq!(log, Log { publish_time: 1000, title: "First".to_string(), revision: 0, topics: vec![] });

        publish_at(&mut index, &index_path, basedir, &Draft::from_text("Second\n"), 2000).unwrap();

        assert_eq!(dir_entries(basedir), ["0", "1", "index.json"]);
        assert_eq!(fs::read_to_string(basedir.join("0").join(CONTENT_FILE_NAME)).unwrap(), "# First\nbody\n");
        assert_eq!(fs::read_to_string(basedir.join("1").join(CONTENT_FILE_NAME)).unwrap(), "Second\n");

        let saved = Index::load(&index_path).unwrap();
        assert_eq!(saved, index);
        assert_eq!(saved.logs[1].title, "Second");
        assert_eq!(saved.logs[1].publish_time, 2000);
    }

    #[test]
    fn test_publish_uses_current_time() {
        let (dir, index_path, mut index) = setup();
        let before = now_timestamp();
        let log = publish(&mut index, &index_path, dir.path(), &Draft::from_text("# Now")).unwrap();
        assert!(log.publish_time >= before);
        assert!(log.publish_time <= now_timestamp());
    }

    #[test]
    fn test_topics_are_not_published() {
        let (dir, index_path, mut index) = setup();
        let mut draft = Draft::from_text("# Topics");
        draft.set_topics("rust, blog");
        let log = publish(&mut index, &index_path, dir.path(), &draft).unwrap();
        assert!(log.topics.is_empty());
        assert_eq!(log.revision, 0);
    }

    #[test]
    fn test_rejected_draft_has_no_side_effects() {
        let (dir, index_path, mut index) = setup();
        let before = fs::read_to_string(&index_path).unwrap();

        for text in ["", "\nno title"] {
            let err = publish(&mut index, &index_path, dir.path(), &Draft::from_text(text)).unwrap_err();
            assert!(err.is_validation());
        }

        assert!(index.logs.is_empty());
        assert_eq!(dir_entries(dir.path()), ["index.json"]);
        assert_eq!(fs::read_to_string(&index_path).unwrap(), before);
    }

    #[test]
    fn test_existing_dir_fails() {
        let (dir, index_path, mut index) = setup();
        fs::create_dir(dir.path().join("0")).unwrap();

        let err = publish(&mut index, &index_path, dir.path(), &Draft::from_text("# Clash")).unwrap_err();
        assert!(matches!(err, BlogError::Io { .. }));
        assert!(index.logs.is_empty());
        assert!(!dir.path().join("0").join(CONTENT_FILE_NAME).exists());
    }

    #[test]
    fn test_attachment_is_copied_and_link_rewritten() {
        let (dir, index_path, mut index) = setup();
        let src_dir = tempdir().unwrap();
        let image = src_dir.path().join("c.png");
        fs::write(&image, [0x89u8, 0x50, 0x4e, 0x47, 0x00, 0xff]).unwrap();

        let draft = Draft::from_text(&format!("# Pic\n![x](file:{})\n", image.display()));
        publish(&mut index, &index_path, dir.path(), &draft).unwrap();

        let post = dir.path().join("0");
        assert_eq!(fs::read_to_string(post.join(CONTENT_FILE_NAME)).unwrap(), "# Pic\n![x](c.png)\n");
        assert_eq!(fs::read(post.join("c.png")).unwrap(), fs::read(&image).unwrap());
    }

    #[test]
    fn test_same_base_name_collision() {
        let (dir, index_path, mut index) = setup();
        let src_dir = tempdir().unwrap();
        let a = src_dir.path().join("a");
        let b = src_dir.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        fs::write(a.join("c.png"), b"first").unwrap();
        fs::write(b.join("c.png"), b"second").unwrap();

        let draft = Draft::from_text(&format!(
            "# Clash\n![a](file:{})\n![b](file:{})\n",
            a.join("c.png").display(),
            b.join("c.png").display(),
        ));
        let err = publish(&mut index, &index_path, dir.path(), &draft).unwrap_err();
        match err {
            BlogError::Io { source, .. } => assert_eq!(source.kind(), ErrorKind::AlreadyExists),
            e => panic!("unexpected error {}", e),
        }

        // Nothing is rolled back
        let post = dir.path().join("0");
        assert_eq!(fs::read(post.join("c.png")).unwrap(), b"first");
        assert!(post.join(CONTENT_FILE_NAME).exists());
        assert!(index.logs.is_empty());
        assert!(Index::load(&index_path).unwrap().logs.is_empty());
    }

    #[test]
    fn test_same_image_referenced_twice() {
        let (dir, index_path, mut index) = setup();
        let src_dir = tempdir().unwrap();
        let image = src_dir.path().join("c.png");
        fs::write(&image, b"png").unwrap();

        let draft = Draft::from_text(&format!("# Twice\n![a](file:{0})\n![b](file:{0})\n", image.display()));
        publish(&mut index, &index_path, dir.path(), &draft).unwrap();

        let post = dir.path().join("0");
        assert_eq!(dir_entries(&post), ["c.png", "content.md"]);
        assert_eq!(fs::read_to_string(post.join(CONTENT_FILE_NAME)).unwrap(), "# Twice\n![a](c.png)\n![b](c.png)\n");

        publish(&mut index, &index_path, dir.path(), &Draft::from_text("# Next")).unwrap();
        assert_eq!(index.logs.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_attached_file_also_referenced_through_symlink() {
        let (dir, index_path, mut index) = setup();
        let src_dir = tempdir().unwrap();
        let real = src_dir.path().join("real");
        let link = src_dir.path().join("link");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("c.png"), b"png").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let linked = link.join("c.png");
        let mut draft = Draft::from_text(&format!("# Linked\n![x](file:{})\n", linked.display()));
        draft.attach(&linked).unwrap();
        publish(&mut index, &index_path, dir.path(), &draft).unwrap();

        assert_eq!(dir_entries(&dir.path().join("0")), ["c.png", "content.md"]);
    }

    #[test]
    fn test_vanished_attachment_fails() {
        let (dir, index_path, mut index) = setup();
        let src_dir = tempdir().unwrap();
        let image = src_dir.path().join("gone.png");
        fs::write(&image, b"png").unwrap();

        let draft = Draft::from_text(&format!("# Gone\n![x](file:{})\n", image.display()));
        fs::remove_file(&image).unwrap();

        let err = publish(&mut index, &index_path, dir.path(), &draft).unwrap_err();
        match err {
            BlogError::Io { source, .. } => assert_eq!(source.kind(), ErrorKind::NotFound),
            e => panic!("unexpected error {}", e),
        }
        assert!(!dir.path().join("0").join("gone.png").exists());
    }
}
