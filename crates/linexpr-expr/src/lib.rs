//! Linear expressions over solver variables.
//!
//! An [`Expression`] is `Σ coefficient × variable + constant`. Variables are
//! owned by the surrounding solver; expressions aggregate them into sorted
//! terms and read their current values on demand.

pub mod expr;
pub mod ids;
pub mod logging;
pub mod variable;

pub use expr::{Arg, Expression, ExpressionError, FormatOptions, Term, TermMap};
pub use ids::VariableId;
pub use logging::{LoggingError, enable_logging};
pub use variable::Variable;
