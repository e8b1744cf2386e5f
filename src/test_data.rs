#[cfg(test)]
pub const INDEX_DATA: &str = r#"{"logs":[{"publishTime":1704067200,"title":"Hello world","revision":0,"topics":["rust","blog"]},{"publishTime":1706745600,"title":"Second post","revision":0,"topics":[]}]}"#;

#[cfg(test)]
pub const DRAFT_DATA: &str = "# My first post
Writing posts in markdown and keeping them next to a plain json index.

## Why

Everything stays in files, so the whole blog can live in a git repository.
";
