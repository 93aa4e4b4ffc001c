//! Prelude module for convenient imports.
//!
//! ```
//! use gamedex_model::prelude::*;
//! ```

pub use crate::catalog::Catalog;
pub use crate::error::{ModelError, Result};
pub use crate::models::{FileNode, Game, Platform, ProviderData};
