//! Linear expression types.
//!
//! - `core`     — Expression: ordered terms + constant
//! - `term_map` — TermMap: variable → coefficient, sorted by variable
//! - `args`     — Term / Arg construction items and their aggregation
//! - `format`   — canonical text rendering
//! - `error`    — Expression construction errors

pub mod args;
pub mod core;
pub mod error;
pub mod format;
pub mod term_map;

pub use args::{Arg, Term, parse_args, parse_terms};
pub use core::Expression;
pub use error::ExpressionError;
pub use format::{FormatOptions, format_number};
pub use term_map::TermMap;
