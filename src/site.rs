//! Static site generation.
//!
//! Mirrors a tree of static assets into the output directory, then renders
//! every Markdown file of the content tree through an HTML template at the
//! matching relative path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ConvertError;
use crate::node::escape_text;
use crate::{extract_title, markdown_to_html};

/// Placeholder replaced by the document title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Placeholder replaced by the converted document body.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Error during site generation.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Filesystem error on a specific path.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A Markdown document failed to convert.
    #[error("failed to convert {}", path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },
}

trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T, SiteError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, SiteError> {
        self.map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Summary of a site build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub assets_copied: usize,
    pub pages_generated: usize,
}

/// Copy static assets and generate every page described by `config`.
pub fn build_site(config: &Config) -> Result<BuildStats, SiteError> {
    let paths = &config.paths;

    if config.build.clean && paths.output_dir.exists() {
        fs::remove_dir_all(&paths.output_dir).at(&paths.output_dir)?;
    }

    fs::create_dir_all(&paths.output_dir).at(&paths.output_dir)?;
    let assets_copied = if paths.static_dir.is_dir() {
        copy_tree(&paths.static_dir, &paths.output_dir)?
    } else {
        tracing::warn!(path = %paths.static_dir.display(), "Static directory not found, skipping");
        0
    };

    let template = fs::read_to_string(&paths.template).at(&paths.template)?;
    let pages_generated =
        generate_pages_recursive(&paths.content_dir, &template, &paths.output_dir)?;

    tracing::info!(assets_copied, pages_generated, "Site build completed");
    Ok(BuildStats {
        assets_copied,
        pages_generated,
    })
}

/// Recursively copy `src` into `dst`, replacing whatever `dst` held before.
///
/// Returns the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    if dst.exists() {
        fs::remove_dir_all(dst).at(dst)?;
    }
    fs::create_dir_all(dst).at(dst)?;
    copy_tree(src, dst)
}

/// Copy the contents of `src` into the existing directory `dst`.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in fs::read_dir(src).at(src)? {
        let entry = entry.at(src)?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path).at(&dst_path)?;
            copied += copy_tree(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).at(&src_path)?;
            tracing::debug!(from = %src_path.display(), to = %dst_path.display(), "Copied file");
            copied += 1;
        }
    }

    tracing::debug!(from = %src.display(), to = %dst.display(), files = copied, "Copied directory");
    Ok(copied)
}

/// Fill the template placeholders for one document.
///
/// The title is escaped like any other text content.
pub fn render_page(markdown: &str, template: &str) -> Result<String, ConvertError> {
    let title = extract_title(markdown)?;
    let content = markdown_to_html(markdown)?;
    Ok(template
        .replace(TITLE_PLACEHOLDER, &escape_text(&title))
        .replace(CONTENT_PLACEHOLDER, &content))
}

/// Render the Markdown file at `from` through `template` and write it to `dest`.
pub fn generate_page(from: &Path, template: &str, dest: &Path) -> Result<(), SiteError> {
    tracing::info!(from = %from.display(), to = %dest.display(), "Generating page");

    let markdown = fs::read_to_string(from).at(from)?;
    let page = render_page(&markdown, template).map_err(|source| SiteError::Convert {
        path: from.to_path_buf(),
        source,
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).at(parent)?;
    }
    fs::write(dest, page).at(dest)
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout under `dest_dir` with `.html` extensions.
///
/// Other files are ignored. Returns the number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
) -> Result<usize, SiteError> {
    fs::create_dir_all(dest_dir).at(dest_dir)?;

    let mut generated = 0;
    for entry in fs::read_dir(content_dir).at(content_dir)? {
        let entry = entry.at(content_dir)?;
        let path = entry.path();
        let dest_path = dest_dir.join(entry.file_name());

        if path.is_dir() {
            generated += generate_pages_recursive(&path, template, &dest_path)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            generate_page(&path, template, &dest_path.with_extension("html"))?;
            generated += 1;
        }
    }

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TEMPLATE: &str =
        "<html><head><title>{{ Title }}</title></head><body>{{ Content }}</body></html>";

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(root: &Path, relative: &str) -> String {
        fs::read_to_string(root.join(relative)).unwrap()
    }

    #[test]
    fn render_page_fills_placeholders() {
        assert_eq!(
            render_page("# Hi\n\nBody", TEMPLATE).unwrap(),
            "<html><head><title>Hi</title></head><body><div><h1>Hi</h1><p>Body</p></div></body></html>"
        );
    }

    #[test]
    fn render_page_replaces_every_placeholder() {
        assert_eq!(
            render_page("# T", "{{ Title }}|{{ Title }}").unwrap(),
            "T|T"
        );
    }

    #[test]
    fn render_page_escapes_title() {
        assert_eq!(
            render_page("# Tom & Jerry", "{{ Title }}").unwrap(),
            "Tom &amp; Jerry"
        );
    }

    #[test]
    fn render_page_requires_a_title() {
        assert_eq!(
            render_page("no heading", TEMPLATE),
            Err(ConvertError::MissingTitle)
        );
    }

    #[test]
    fn copy_dir_mirrors_tree_and_clears_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("static");
        let dst = tmp.path().join("public");
        write(&src, "index.css", "body {}");
        write(&src, "images/logo.png", "png");
        write(&dst, "stale.txt", "old");

        let copied = copy_dir(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(read(&dst, "index.css"), "body {}");
        assert_eq!(read(&dst, "images/logo.png"), "png");
        assert!(!dst.join("stale.txt").exists());
    }

    #[test]
    fn copy_dir_missing_source_reports_path() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("nope");
        let err = copy_dir(&src, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, SiteError::Io { ref path, .. } if *path == src));
    }

    #[test]
    fn generates_pages_at_matching_paths() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        let out = tmp.path().join("public");
        write(&content, "index.md", "# Home\n\nWelcome");
        write(&content, "blog/post/index.md", "# Post\n\n- a\n- b");
        write(&content, "notes.txt", "ignored");

        let generated = generate_pages_recursive(&content, TEMPLATE, &out).unwrap();

        assert_eq!(generated, 2);
        assert_eq!(
            read(&out, "index.html"),
            "<html><head><title>Home</title></head><body><div><h1>Home</h1><p>Welcome</p></div></body></html>"
        );
        assert_eq!(
            read(&out, "blog/post/index.html"),
            "<html><head><title>Post</title></head><body><div><h1>Post</h1><ul><li>a</li><li>b</li></ul></div></body></html>"
        );
        assert!(!out.join("notes.txt").exists());
        assert!(!out.join("notes.html").exists());
    }

    #[test]
    fn conversion_failure_names_the_document() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        write(&content, "bad.md", "# Bad\n\nunclosed `code");

        let err = generate_pages_recursive(&content, TEMPLATE, &tmp.path().join("out")).unwrap_err();

        match err {
            SiteError::Convert { path, source } => {
                assert_eq!(path, content.join("bad.md"));
                assert!(matches!(source, ConvertError::UnbalancedDelimiter { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn build_site_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "static/style.css", "p {}");
        write(root, "content/index.md", "# Site\n\n*hello*");
        write(root, "template.html", TEMPLATE);
        write(root, "public/leftover.html", "stale");

        let mut config = Config::default();
        config.paths.static_dir = root.join("static");
        config.paths.content_dir = root.join("content");
        config.paths.template = root.join("template.html");
        config.paths.output_dir = root.join("public");

        let stats = build_site(&config).unwrap();

        assert_eq!(
            stats,
            BuildStats {
                assets_copied: 1,
                pages_generated: 1,
            }
        );
        assert_eq!(read(root, "public/style.css"), "p {}");
        assert!(read(root, "public/index.html").contains("<p><i>hello</i></p>"));
        assert!(!root.join("public/leftover.html").exists());
    }

    #[test]
    fn build_site_without_clean_keeps_existing_output() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "static/app.js", "js");
        write(root, "content/index.md", "# Home");
        write(root, "template.html", "{{ Content }}");
        write(root, "public/keep.txt", "kept");

        let mut config = Config::default();
        config.paths.static_dir = root.join("static");
        config.paths.content_dir = root.join("content");
        config.paths.template = root.join("template.html");
        config.paths.output_dir = root.join("public");
        config.build.clean = false;

        build_site(&config).unwrap();

        assert_eq!(read(root, "public/keep.txt"), "kept");
        assert_eq!(read(root, "public/app.js"), "js");
    }

    #[test]
    fn build_site_without_static_dir() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "content/a.md", "# A");
        write(root, "template.html", "{{ Content }}");

        let mut config = Config::default();
        config.paths.static_dir = root.join("missing");
        config.paths.content_dir = root.join("content");
        config.paths.template = root.join("template.html");
        config.paths.output_dir = root.join("public");

        let stats = build_site(&config).unwrap();

        assert_eq!(stats.assets_copied, 0);
        assert_eq!(read(root, "public/a.html"), "<div><h1>A</h1></div>");
    }
}
