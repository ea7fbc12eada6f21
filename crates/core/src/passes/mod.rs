//! Body rewriting passes, in pipeline order.
//!
//! - `comments`: drop comment tokens
//! - `dead_code`: remove procedures nothing refers to
//! - `mangle`: rename user names, then built-in operators
//! - `remangle`: hand the shortest codes to the most used names

pub mod comments;
pub mod dead_code;
pub mod mangle;
pub mod remangle;

pub use comments::strip_comments;
pub use dead_code::{DefinitionScan, eliminate_dead_procedures};
pub use mangle::{NameMap, mangle_defaults, mangle_variables};
pub use remangle::remangle;
