//! Core expression type: ordered terms + constant.
//!
//! An [`Expression`] is built once from its arguments and never changes
//! afterwards. Reads are pure; [`Expression::value`] re-reads the current
//! variable values on every call.

use crate::expr::args::{Arg, Term, parse_args, parse_terms};
use crate::expr::error::ExpressionError;
use crate::expr::term_map::TermMap;
use crate::ids::VariableId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    terms: TermMap,
    constant: f64,
}

impl Expression {
    // ── Constructors ────────────────────────────────────────

    /// Build from loosely typed args: numbers, variables and
    /// `[coefficient, variable]` pairs, summed in order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; no expression is produced.
    pub fn new<I>(args: I) -> Result<Self, ExpressionError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        match parse_args(args.into_iter().map(Into::into)) {
            Ok((terms, constant)) => {
                tracing::debug!(
                    component = "expression",
                    operation = "new",
                    status = "success",
                    terms = terms.len(),
                    "Built expression"
                );
                Ok(Self { terms, constant })
            }
            Err(err) => {
                tracing::debug!(
                    component = "expression",
                    operation = "new",
                    status = "error",
                    code = err.code(),
                    error = %err,
                    "Rejected expression arguments"
                );
                Err(err)
            }
        }
    }

    /// Build from already-typed terms. Cannot fail.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        let (terms, constant) = parse_terms(terms.into_iter().map(Into::into));
        tracing::trace!(
            component = "expression",
            operation = "from_terms",
            status = "success",
            terms = terms.len(),
            "Built expression"
        );
        Self { terms, constant }
    }

    /// No terms, zero constant.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Default::default()
        }
    }

    // ── Accessors ───────────────────────────────────────────

    /// Aggregated terms in variable order. Read-only.
    pub fn terms(&self) -> &TermMap {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// `constant + Σ coefficient × variable.value()`, using current values.
    pub fn value(&self) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, (variable, coeff)| {
                acc + variable.value() * coeff
            })
    }

    /// True when there are no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        usize::from(!self.terms.is_empty())
    }

    /// Id-keyed snapshot of the terms, in variable order.
    pub fn linear_terms(&self) -> Vec<(VariableId, f64)> {
        self.terms
            .iter()
            .map(|(variable, coeff)| (variable.id(), coeff))
            .collect()
    }

    /// Consume and return (terms, constant).
    pub fn into_parts(self) -> (TermMap, f64) {
        (self.terms, self.constant)
    }
}
