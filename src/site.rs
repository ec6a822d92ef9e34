//! The site-tree builder. [`Builder::convert_tree`] mirrors the source
//! directory tree into the output tree, converting every recognized markdown
//! document into an HTML page at the same relative path. The later passes
//! ([`Builder::write_index_pages`] and [`Builder::menu`]) traverse the
//! *output* tree: the first generates a landing page for every directory
//! that lacks one, the second assembles the nested navigation fragment.
//!
//! Directory entries are sorted by name at every level, so a given source
//! tree always produces byte-identical output regardless of how the
//! filesystem enumerates entries.

use crate::markdown;
use crate::page;
use crate::title;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Document extensions recognized by the conversion pass, compared
/// case-insensitively against a file's extension.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// The extension given to converted pages.
const PAGE_EXTENSION: &str = "html";

/// The file name of a directory's landing page. A landing page is the
/// category's destination in the menu and is excluded from its own
/// directory's leaf links.
const INDEX_FILE: &str = "index.html";

/// The slot in [`MENU_TEMPLATE`] that receives the accumulated entries.
const ENTRIES_SLOT: &str = "{{entries}}";

/// The shell around the navigation fragment: a container and an empty list
/// into which the entries are inserted.
const MENU_TEMPLATE: &str = r#"<div class="menu">
  <input type="checkbox" id="menu-toggle" class="menu-toggle"/>
  <label for="menu-toggle" class="menu-button">Menu</label>
  <nav class="menu-nav">
    <ul class="menu-list">
{{entries}}    </ul>
  </nav>
</div>
"#;

/// The template for generated directory landing pages. The title slot
/// receives the directory name and the body slot receives the listing.
const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Index of "{{title}}"</title>
    <link rel="stylesheet" href="/menu.css">
</head>
<body>
    <ul>
{{body}}    </ul>
</body>
</html>
"#;

/// Mirrors a source tree into an output tree and derives the navigation
/// structure from the result.
pub struct Builder<'a> {
    /// The root of the source tree. Must exist before any pass runs.
    source_root: &'a Path,

    /// The root of the mirrored output tree. [`Builder::convert_tree`]
    /// creates its subdirectories as it encounters them.
    output_root: &'a Path,
}

impl<'a> Builder<'a> {
    /// Constructs a new builder. See the fields on [`Builder`] for argument
    /// descriptions.
    pub fn new(source_root: &'a Path, output_root: &'a Path) -> Builder<'a> {
        Builder {
            source_root,
            output_root,
        }
    }

    /// The conversion pass. Walks the source tree in sorted order, creating
    /// the mirrored directory for every source directory and converting
    /// every recognized document; all other files are silently skipped. The
    /// first failure aborts the whole walk.
    pub fn convert_tree(&self) -> Result<()> {
        for result in WalkDir::new(self.source_root).sort_by_file_name() {
            let entry = result?;
            let path = entry.path();
            // walkdir only yields paths under the root it was given
            let relative = path.strip_prefix(self.source_root).unwrap();
            let target = self.output_root.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|err| Error::CreateDirectory {
                    path: target.clone(),
                    err,
                })?;
            } else if is_document(path) {
                self.convert_document(path, &target.with_extension(PAGE_EXTENSION))?;
            }
        }
        Ok(())
    }

    /// Reads one document, converts it, and writes the rendered page.
    fn convert_document(&self, source: &Path, target: &Path) -> Result<()> {
        tracing::info!(
            source = %source.display(),
            target = %target.display(),
            "converting document"
        );
        let contents = fs::read_to_string(source).map_err(|err| Error::ReadSource {
            path: source.to_owned(),
            err,
        })?;
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidFileName(source.to_owned()))?;
        let rendered = page::render_page(
            &title::make_title(file_name),
            &markdown::to_html(&contents),
        );
        fs::write(target, rendered).map_err(|err| Error::WritePage {
            path: target.to_owned(),
            err,
        })
    }

    /// The index pass. Generates a landing page for every output directory
    /// that does not already have one, listing the directory's immediate
    /// pages and its subdirectories' landing pages. A directory with no
    /// pages anywhere below it gets no landing page, and a landing page
    /// converted from a source `index.md` is left untouched.
    pub fn write_index_pages(&self) -> Result<()> {
        self.write_directory_index(self.output_root)
    }

    fn write_directory_index(&self, dir: &Path) -> Result<()> {
        // Children first, so a subdirectory's generated landing page is
        // already on disk when the parent builds its listing.
        for entry in sorted_entries(dir)? {
            if entry.path().is_dir() {
                self.write_directory_index(&entry.path())?;
            }
        }

        let index_path = dir.join(INDEX_FILE);
        if index_path.exists() {
            return Ok(());
        }

        let mut entries = String::new();
        for entry in sorted_entries(dir)? {
            let path = entry.path();
            let name = entry_name(&entry)?;
            let relative = path.strip_prefix(self.output_root).unwrap();
            if path.is_dir() {
                if path.join(INDEX_FILE).exists() {
                    entries.push_str(&format!(
                        "        <li><a href=\"/{}/{}\">{}</a></li>\n",
                        relative.display(),
                        INDEX_FILE,
                        name
                    ));
                }
            } else if is_page(&name) {
                entries.push_str(&format!(
                    "        <li><a href=\"/{}\">{}</a></li>\n",
                    relative.display(),
                    page_label(&name)
                ));
            }
        }

        if entries.is_empty() {
            return Ok(());
        }

        let dir_name = dir.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let rendered = page::substitute(INDEX_TEMPLATE, dir_name, &entries);
        fs::write(&index_path, rendered).map_err(|err| Error::WritePage {
            path: index_path.clone(),
            err,
        })
    }

    /// The menu pass. Traverses the output tree and assembles the nested
    /// navigation fragment: a Category entry per directory containing at
    /// least one page, linking to that directory's landing page, and a Leaf
    /// Link per page other than each directory's own landing page. Nesting
    /// depth equals directory nesting depth.
    pub fn menu(&self) -> Result<String> {
        let mut entries = String::new();
        self.menu_entries(self.output_root, &mut entries)?;
        Ok(MENU_TEMPLATE.replacen(ENTRIES_SLOT, &entries, 1))
    }

    fn menu_entries(&self, dir: &Path, out: &mut String) -> Result<()> {
        for entry in sorted_entries(dir)? {
            let path = entry.path();
            let name = entry_name(&entry)?;
            let relative = path.strip_prefix(self.output_root).unwrap().to_owned();
            if path.is_dir() {
                let mut children = String::new();
                self.menu_entries(&path, &mut children)?;
                // a directory with no pages anywhere below it gets no entry
                if children.is_empty() && !path.join(INDEX_FILE).exists() {
                    continue;
                }
                out.push_str(&format!(
                    "<li class=\"menu-item has-children\">\n  <a href=\"/{}/{}\" class=\"menu-link\">{}</a>\n  <ul class=\"menu-dropdown\">\n",
                    relative.display(),
                    INDEX_FILE,
                    name
                ));
                out.push_str(&children);
                out.push_str("  </ul>\n</li>\n");
            } else if is_page(&name) && name != INDEX_FILE {
                out.push_str(&format!(
                    "<li class=\"menu-item\"><a href=\"/{}\" class=\"menu-link\">{}</a></li>\n",
                    relative.display(),
                    page_label(&name)
                ));
            }
        }
        Ok(())
    }
}

/// Whether a source path names a recognized document.
fn is_document(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        None => false,
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            DOCUMENT_EXTENSIONS.iter().any(|recognized| *recognized == ext)
        }
    }
}

/// Whether an output file name is a converted page.
fn is_page(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(PAGE_EXTENSION))
}

/// The link label for a page: its file name with the extension stripped.
fn page_label(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

fn entry_name(entry: &fs::DirEntry) -> Result<String> {
    match entry.file_name().to_str() {
        Some(name) => Ok(name.to_owned()),
        None => Err(Error::InvalidFileName(entry.path())),
    }
}

/// Reads a directory's entries sorted by name, for deterministic output.
fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let annotate = |err| Error::ReadDirectory {
        path: dir.to_owned(),
        err,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(annotate)?
        .collect::<io::Result<Vec<fs::DirEntry>>>()
        .map_err(annotate)?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a site-tree operation. Every variant that wraps an
/// I/O error names the path that failed.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors raised by the source-tree walk itself.
    Walk(walkdir::Error),

    /// Returned when a mirrored output directory cannot be created.
    CreateDirectory { path: PathBuf, err: io::Error },

    /// Returned when a source document cannot be read.
    ReadSource { path: PathBuf, err: io::Error },

    /// Returned when a rendered page cannot be written.
    WritePage { path: PathBuf, err: io::Error },

    /// Returned when an output directory cannot be enumerated.
    ReadDirectory { path: PathBuf, err: io::Error },

    /// Returned for file names that are not valid UTF-8.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Walk(err) => err.fmt(f),
            Error::CreateDirectory { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::ReadSource { path, err } => {
                write!(f, "Reading document '{}': {}", path.display(), err)
            }
            Error::WritePage { path, err } => {
                write!(f, "Writing page '{}': {}", path.display(), err)
            }
            Error::ReadDirectory { path, err } => {
                write!(f, "Reading directory '{}': {}", path.display(), err)
            }
            Error::InvalidFileName(path) => {
                write!(f, "File name is not valid UTF-8: '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Walk(err) => Some(err),
            Error::CreateDirectory { path: _, err } => Some(err),
            Error::ReadSource { path: _, err } => Some(err),
            Error::WritePage { path: _, err } => Some(err),
            Error::ReadDirectory { path: _, err } => Some(err),
            Error::InvalidFileName(_) => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator in the conversion pass.
    fn from(err: walkdir::Error) -> Error {
        Error::Walk(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// A source tree with a nested document directory, a directory of only
    /// non-documents, and a directory whose landing page comes from a source
    /// `index.md`.
    fn fixture() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("docs");
        let output = dir.path().join("out");
        write_file(&input.join("intro.md"), "# Intro\n\nwelcome");
        write_file(&input.join("guide/setup.md"), "# Setup\n\nsteps");
        write_file(&input.join("guide/notes.txt"), "not a document");
        write_file(&input.join("assets/raw.bin"), "not a document either");
        write_file(&input.join("ref/index.md"), "# Reference\n\nconverted landing page");
        fs::create_dir_all(&output).unwrap();
        (dir, input, output)
    }

    fn run_all_passes(input: &Path, output: &Path) -> Result<String> {
        let builder = Builder::new(input, output);
        builder.convert_tree()?;
        builder.write_index_pages()?;
        builder.menu()
    }

    #[test]
    fn test_mirrors_directory_topology() -> Result<()> {
        let (_tmp, input, output) = fixture();
        run_all_passes(&input, &output)?;
        assert!(output.join("guide").is_dir());
        assert!(output.join("assets").is_dir());
        assert!(output.join("ref").is_dir());
        Ok(())
    }

    #[test]
    fn test_converts_documents_in_place() -> Result<()> {
        let (_tmp, input, output) = fixture();
        run_all_passes(&input, &output)?;
        let intro = fs::read_to_string(output.join("intro.html")).unwrap();
        assert!(intro.contains("<title>Intro</title>"));
        assert!(intro.contains("<h1>Intro</h1>"));
        assert!(intro.contains("<p>welcome</p>"));
        assert!(output.join("guide/setup.html").is_file());
        Ok(())
    }

    #[test]
    fn test_skips_non_documents() -> Result<()> {
        let (_tmp, input, output) = fixture();
        run_all_passes(&input, &output)?;
        assert!(!output.join("guide/notes.txt").exists());
        assert!(!output.join("guide/notes.html").exists());
        assert!(!output.join("assets/raw.bin").exists());
        Ok(())
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() -> Result<()> {
        let (_tmp, input, output) = fixture();
        write_file(&input.join("UPPER.MD"), "# Upper");
        write_file(&input.join("longform.MarkDown"), "# Longform");
        run_all_passes(&input, &output)?;
        assert!(output.join("UPPER.html").is_file());
        assert!(output.join("longform.html").is_file());
        Ok(())
    }

    #[test]
    fn test_menu_links_every_page_once() -> Result<()> {
        let (_tmp, input, output) = fixture();
        let menu = run_all_passes(&input, &output)?;
        assert_eq!(1, menu.matches("href=\"/intro.html\"").count());
        assert_eq!(1, menu.matches("href=\"/guide/setup.html\"").count());
        assert!(menu.contains(">intro</a>"));
        assert!(menu.contains(">setup</a>"));
        Ok(())
    }

    #[test]
    fn test_menu_nests_categories_by_directory() -> Result<()> {
        let (_tmp, input, output) = fixture();
        write_file(&input.join("guide/advanced/tuning.md"), "# Tuning");
        let menu = run_all_passes(&input, &output)?;
        let guide = menu.find("href=\"/guide/index.html\"").unwrap();
        let advanced = menu.find("href=\"/guide/advanced/index.html\"").unwrap();
        let tuning = menu.find("href=\"/guide/advanced/tuning.html\"").unwrap();
        assert!(guide < advanced && advanced < tuning);
        Ok(())
    }

    #[test]
    fn test_menu_excludes_landing_pages_and_empty_directories() -> Result<()> {
        let (_tmp, input, output) = fixture();
        let menu = run_all_passes(&input, &output)?;
        assert!(!menu.contains(">index</a>"));
        assert!(!menu.contains("assets"));
        Ok(())
    }

    #[test]
    fn test_generates_missing_landing_pages() -> Result<()> {
        let (_tmp, input, output) = fixture();
        run_all_passes(&input, &output)?;
        let guide = fs::read_to_string(output.join("guide/index.html")).unwrap();
        assert!(guide.contains("Index of \"guide\""));
        assert!(guide.contains("href=\"/guide/setup.html\""));
        let root = fs::read_to_string(output.join("index.html")).unwrap();
        assert!(root.contains("href=\"/intro.html\""));
        assert!(root.contains("href=\"/guide/index.html\""));
        Ok(())
    }

    #[test]
    fn test_keeps_converted_landing_pages() -> Result<()> {
        let (_tmp, input, output) = fixture();
        run_all_passes(&input, &output)?;
        let landing = fs::read_to_string(output.join("ref/index.html")).unwrap();
        assert!(landing.contains("converted landing page"));
        assert!(!landing.contains("Index of"));
        Ok(())
    }

    #[test]
    fn test_directory_of_non_documents_gets_no_landing_page() -> Result<()> {
        let (_tmp, input, output) = fixture();
        run_all_passes(&input, &output)?;
        assert!(!output.join("assets/index.html").exists());
        Ok(())
    }

    #[test]
    fn test_first_failure_aborts_conversion() {
        let (_tmp, input, output) = fixture();
        // Blocking the mirrored directory makes create_dir_all fail.
        fs::write(output.join("guide"), "in the way").unwrap();
        let err = Builder::new(&input, &output).convert_tree().unwrap_err();
        match err {
            Error::CreateDirectory { path, err: _ } => {
                assert_eq!(output.join("guide"), path)
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
