//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: validating the source and
//! output paths, cleaning the previous output, and running the
//! [`crate::site::Builder`] passes in order. The navigation fragment is
//! written to `menu.html` at the output root.

use crate::site::{self, Builder};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The file name of the navigation fragment at the output root.
const MENU_FILE: &str = "menu.html";

/// Builds the site from a source directory into an output directory. The
/// source path must be an existing directory. The output path is rebuilt
/// from scratch on every run: an existing output directory is removed
/// recursively, a missing one is simply created, and an output path that is
/// not a directory is rejected.
pub fn build_site(input: &Path, output: &Path) -> Result<()> {
    let metadata = fs::metadata(input).map_err(|err| Error::InputDirectory {
        path: input.to_owned(),
        err,
    })?;
    if !metadata.is_dir() {
        return Err(Error::InputNotDirectory(input.to_owned()));
    }

    clean_output(output)?;
    fs::create_dir_all(output).map_err(|err| Error::CreateOutput {
        path: output.to_owned(),
        err,
    })?;

    let builder = Builder::new(input, output);
    builder.convert_tree()?;
    builder.write_index_pages()?;

    // The fragment is written after the menu pass so it never lists itself.
    let menu = builder.menu()?;
    let menu_path = output.join(MENU_FILE);
    fs::write(&menu_path, menu).map_err(|err| Error::WriteMenu {
        path: menu_path,
        err,
    })?;

    Ok(())
}

/// Blows away a previous output directory so the run is a clean rebuild. A
/// missing output path is not an error; anything other than a directory is.
fn clean_output(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Error::Clean {
            path: dir.to_owned(),
            err,
        }),
        Ok(metadata) if !metadata.is_dir() => {
            Err(Error::OutputNotDirectory(dir.to_owned()))
        }
        Ok(_) => fs::remove_dir_all(dir).map_err(|err| Error::Clean {
            path: dir.to_owned(),
            err,
        }),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during validation,
/// cleaning the previous output, any of the site-tree passes, or writing the
/// navigation fragment.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during the site-tree passes.
    Site(site::Error),

    /// Returned when the input path cannot be inspected (typically because
    /// it does not exist).
    InputDirectory { path: PathBuf, err: io::Error },

    /// Returned when the input path exists but is not a directory.
    InputNotDirectory(PathBuf),

    /// Returned when the output path exists but is not a directory.
    OutputNotDirectory(PathBuf),

    /// Returned for I/O problems while cleaning the previous output.
    Clean { path: PathBuf, err: io::Error },

    /// Returned when the output directory cannot be created.
    CreateOutput { path: PathBuf, err: io::Error },

    /// Returned when the navigation fragment cannot be written.
    WriteMenu { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Site(err) => err.fmt(f),
            Error::InputDirectory { path, err } => {
                write!(f, "Input directory '{}': {}", path.display(), err)
            }
            Error::InputNotDirectory(path) => {
                write!(f, "Input path '{}' is not a directory", path.display())
            }
            Error::OutputNotDirectory(path) => {
                write!(f, "Output path '{}' is not a directory", path.display())
            }
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::CreateOutput { path, err } => {
                write!(f, "Creating output directory '{}': {}", path.display(), err)
            }
            Error::WriteMenu { path, err } => {
                write!(f, "Writing menu fragment '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Site(err) => Some(err),
            Error::InputDirectory { path: _, err } => Some(err),
            Error::InputNotDirectory(_) => None,
            Error::OutputNotDirectory(_) => None,
            Error::Clean { path: _, err } => Some(err),
            Error::CreateOutput { path: _, err } => Some(err),
            Error::WriteMenu { path: _, err } => Some(err),
        }
    }
}

impl From<site::Error> for Error {
    /// Converts [`site::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator around the builder passes.
    fn from(err: site::Error) -> Error {
        Error::Site(err)
    }
}
