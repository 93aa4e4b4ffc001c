//! Game library records for gamedex.
//!
//! # Quick Start
//!
//! ```
//! use gamedex_model::prelude::*;
//!
//! let game = Game::new("1", "Celeste", Platform::Pc, "lib-1").with_critic_score(92.0);
//! assert_eq!(game.max_score(), Some(92.0));
//! ```

pub mod catalog;
pub mod error;
pub mod models;
pub mod prelude;
