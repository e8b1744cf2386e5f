use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use ramhorns::Template;

pub const DEFAULT_PREVIEW_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
</head>
<body>
{{{content}}}
</body>
</html>
"#;

/// CommonMark to HTML. Never fails: malformed markdown just renders as text.
pub fn render(md_text: &str) -> String {
    markdown::to_html(md_text)
}

lazy_static! {
    static ref RAW_TEMPLATE: Template<'static> = Template::new("<pre>{{text}}</pre>\n").unwrap();
}

#[derive(ramhorns::Content)]
struct RawItem<'a> {
    text: &'a str,
}

/// The raw view: markdown source shown as preformatted text
pub fn render_raw(md_text: &str) -> String {
    RAW_TEMPLATE.render(&RawItem { text: md_text })
}

#[derive(ramhorns::Content)]
struct PreviewItem<'a> {
    title: &'a str,
    content: &'a str,
}

pub struct PreviewRenderer<'a> {
    pub template: Template<'a>,
}

impl PreviewRenderer<'_> {
    pub fn new(preview_tpl_src: &str) -> io::Result<PreviewRenderer> {
        let template = match Template::new(preview_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing preview template: {}", e)));
            }
        };

        Ok(PreviewRenderer {
            template,
        })
    }

    pub fn with_default_template() -> io::Result<PreviewRenderer<'static>> {
        PreviewRenderer::new(DEFAULT_PREVIEW_TEMPLATE)
    }

    /// Standalone HTML page around already rendered content
    pub fn render(&self, title: &str, content_html: &str) -> String {
        self.template.render(&PreviewItem {
            title,
            content: content_html,
        })
    }
}
