//! Environment-scoped application settings loaded from an XML document.
//!
//! A `straps.xml` file groups key/value settings by environment:
//!
//! ```xml
//! <straps>
//!   <env name="dev">
//!     <strap key="CompanyName" value="NEWCO-DEV"/>
//!     <strap key="UseEmail" value="true"/>
//!   </env>
//!   <env name="prod">
//!     <strap key="CompanyName" value="NEWCO"/>
//!     <strap key="UseEmail" value="true"/>
//!   </env>
//! </straps>
//! ```
//!
//! The file is looked up in the working directory first, then under the
//! directory named by the `STRAPS_BASE` environment variable. A second
//! environment variable, named by the caller, selects which `<env>` to load;
//! its settings are flattened into a [`Straps`] handle queried through typed
//! accessors.
//!
//! ```no_run
//! use straps::Straps;
//!
//! // With RUN_ENV=dev in the process environment
//! let straps = Straps::load("RUN_ENV", "myapp/config")?;
//!
//! assert_eq!(straps.strap("CompanyName")?, "NEWCO-DEV");
//! assert!(straps.strap_bool("UseEmail")?);
//! # Ok::<(), straps::StrapsError>(())
//! ```
//!
//! Loading is one-shot by design: resolve a file, parse it, select one
//! environment. There is no reload or change notification; load once at
//! process startup and share the handle.

mod document;
mod error;
mod loader;
mod straps;

pub use error::StrapsError;
pub use loader::{Loader, BASE_DIR_VAR, STRAPS_FILE};
pub use straps::Straps;
