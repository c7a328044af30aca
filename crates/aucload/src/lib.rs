//! aucload turns JSON auction listing archives into four flat `|`-separated
//! relation files (`Items.dat`, `Users.dat`, `Categories.dat`, `Bids.dat`)
//! ready for bulk loading into a relational schema.
//!
//! The interesting work happens in [`normalize`]: one denormalized listing
//! in, rows for all four relations out, with currency and timestamp fields
//! rewritten into load-friendly forms.  Users observed across all input
//! files of a run are deduplicated by [`registry::UserRegistry`] and written
//! once, at the end of the run.

pub mod config;
pub mod dat;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod runner;
pub mod sink;
