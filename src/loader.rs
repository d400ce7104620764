//! File resolution and environment selection.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::straps::Straps;
use crate::StrapsError;

/// Default name of the straps file.
pub const STRAPS_FILE: &str = "straps.xml";

/// Default environment variable naming the base directory used for fallback
/// file resolution.
pub const BASE_DIR_VAR: &str = "STRAPS_BASE";

/// Builder for loading a straps file.
///
/// Resolution precedence: the straps file in the current working directory
/// first, then `<base dir>/<fallback location>/<file name>` where the base
/// directory comes from the [`base_dir_var`](Self::base_dir_var) environment
/// variable.
///
/// The environment to select is named by the value of a selector environment
/// variable, passed to [`load`](Self::load).
///
/// ## Example
///
/// ```no_run
/// use straps::Loader;
///
/// // With RUN_ENV=dev and $STRAPS_BASE/myapp/config/straps.xml present
/// let straps = Loader::new()
///     .fallback_location("myapp/config")
///     .load("RUN_ENV")?;
/// # Ok::<(), straps::StrapsError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "a loader does nothing until .load() is called"]
pub struct Loader {
    file_name: String,
    base_dir_var: String,
    fallback_location: PathBuf,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            file_name: STRAPS_FILE.to_string(),
            base_dir_var: BASE_DIR_VAR.to_string(),
            fallback_location: PathBuf::new(),
        }
    }
}

impl Loader {
    /// Creates a loader with the default file name and base directory variable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the straps file name (default [`STRAPS_FILE`]).
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Overrides the base directory environment variable (default
    /// [`BASE_DIR_VAR`]).
    pub fn base_dir_var(mut self, name: impl Into<String>) -> Self {
        self.base_dir_var = name.into();
        self
    }

    /// Sets the path under the base directory to search when the file is not
    /// in the working directory.
    pub fn fallback_location(mut self, location: impl AsRef<Path>) -> Self {
        self.fallback_location = location.as_ref().to_path_buf();
        self
    }

    /// Resolves, reads and parses the straps file, then selects the
    /// environment named by the value of `selector_var`.
    ///
    /// Returns an independent [`Straps`] handle; no process-wide state is
    /// touched.
    pub fn load(self, selector_var: &str) -> Result<Straps, StrapsError> {
        let path = self.resolve_file()?;

        let contents =
            std::fs::read_to_string(&path).map_err(|source| StrapsError::ReadError {
                path: path.clone(),
                source,
            })?;
        let doc = Document::parse(&contents)?;

        let selector = std::env::var(selector_var)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| StrapsError::MissingSelector(selector_var.to_string()))?;

        let env = doc
            .environment(&selector)
            .ok_or(StrapsError::UnknownEnvironment(selector))?;

        Ok(Straps::from_environment(env))
    }

    /// Applies the resolution precedence: working directory first, then the
    /// base directory fallback.
    fn resolve_file(&self) -> Result<PathBuf, StrapsError> {
        let local = PathBuf::from(&self.file_name);
        if local.is_file() {
            return Ok(local);
        }

        let base = std::env::var(&self.base_dir_var)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| StrapsError::MissingBaseDir(self.base_dir_var.clone()))?;

        let fallback = Path::new(&base)
            .join(&self.fallback_location)
            .join(&self.file_name);
        if fallback.is_file() {
            return Ok(fallback);
        }

        Err(StrapsError::FileNotFound {
            searched: vec![local, fallback],
        })
    }
}

impl Straps {
    /// Loads the straps file and selects the environment named by the value
    /// of `selector_var`.
    ///
    /// `fallback_location` is the path under the base directory (the
    /// [`BASE_DIR_VAR`] environment variable) searched when `straps.xml` is
    /// not in the working directory. Use [`Loader`] directly to override the
    /// file name or base directory variable.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use straps::Straps;
    ///
    /// let straps = Straps::load("RUN_ENV", "myapp/config")?;
    /// println!("company: {}", straps.strap("CompanyName")?);
    /// # Ok::<(), straps::StrapsError>(())
    /// ```
    pub fn load(
        selector_var: &str,
        fallback_location: impl AsRef<Path>,
    ) -> Result<Straps, StrapsError> {
        Loader::new()
            .fallback_location(fallback_location)
            .load(selector_var)
    }
}
