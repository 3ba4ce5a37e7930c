//! Canonical text rendering for expressions.
//!
//! The first term renders a non-unit coefficient as `c*v`; later terms render
//! it as `cv` with no multiplication sign. Both forms are part of the output
//! contract.

use std::fmt;

use crate::expr::core::Expression;

const PREVIEW_TERMS: usize = 30;

/// Rendering controls for [`Expression::format_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum number of terms to render. `None` renders all of them.
    pub terms: Option<usize>,
}

impl FormatOptions {
    /// Preview mode used by terse displays.
    pub fn preview() -> Self {
        Self {
            terms: Some(PREVIEW_TERMS),
        }
    }

    /// Full mode with no truncation.
    pub fn full() -> Self {
        Self { terms: None }
    }

    /// Cap the number of rendered terms.
    pub fn with_terms(mut self, limit: usize) -> Self {
        self.terms = Some(limit);
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::full()
    }
}

const EXPONENT_BELOW: f64 = 1e-6;
const EXPONENT_FROM: f64 = 1e21;

/// Shortest round-trip decimal, with `-0` shown as `0`.
///
/// Magnitudes below `1e-6` or from `1e21` up switch to exponent form with a
/// signed positive exponent (`1e-7`, `2.5e-8`, `1e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude < EXPONENT_BELOW || magnitude >= EXPONENT_FROM {
        let rendered = format!("{value:e}");
        return match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => rendered,
        };
    }
    format!("{value}")
}

#[allow(clippy::float_cmp)]
pub(crate) fn write_expression<W: fmt::Write>(
    out: &mut W,
    expr: &Expression,
    max_terms: Option<usize>,
) -> fmt::Result {
    let terms = expr.terms();
    let term_limit = max_terms.unwrap_or(terms.len()).min(terms.len());

    for (idx, (variable, coeff)) in terms.iter().take(term_limit).enumerate() {
        if idx == 0 {
            if coeff == 1.0 {
                write!(out, "{variable}")?;
            } else if coeff == -1.0 {
                write!(out, "-{variable}")?;
            } else {
                write!(out, "{}*{variable}", format_number(coeff))?;
            }
        } else if coeff == 1.0 {
            write!(out, " + {variable}")?;
        } else if coeff == -1.0 {
            write!(out, " - {variable}")?;
        } else if coeff >= 0.0 {
            write!(out, " + {}{variable}", format_number(coeff))?;
        } else {
            write!(out, " - {}{variable}", format_number(-coeff))?;
        }
    }

    if term_limit < terms.len() {
        let remaining = terms.len() - term_limit;
        if term_limit == 0 {
            write!(out, "... ({remaining} more terms)")?;
        } else {
            write!(out, " + ... ({remaining} more terms)")?;
        }
    }

    let constant = expr.constant();
    if constant < 0.0 {
        write!(out, " - {}", format_number(-constant))?;
    } else if constant > 0.0 {
        write!(out, " + {}", format_number(constant))?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self, None)
    }
}

impl Expression {
    /// Canonical rendering with an optional term cap.
    pub fn format_with(&self, options: &FormatOptions) -> String {
        let mut rendered = String::new();
        let _ = write_expression(&mut rendered, self, options.terms);
        rendered
    }
}
