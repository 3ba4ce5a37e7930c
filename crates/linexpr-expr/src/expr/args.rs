//! Construction arguments and their aggregation into terms.
//!
//! Two input layers:
//! - [`Term`]: closed set of valid items. Aggregating a sequence of terms
//!   cannot fail.
//! - [`Arg`]: loosely typed host input. Each arg is validated into a term,
//!   and the first invalid arg aborts the whole parse.

use std::fmt;

use crate::expr::error::ExpressionError;
use crate::expr::format::format_number;
use crate::expr::term_map::TermMap;
use crate::variable::Variable;

/// One valid construction item.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Added to the constant.
    Constant(f64),
    /// Adds 1.0 to the variable's coefficient.
    Unit(Variable),
    /// Adds the coefficient to the variable's coefficient.
    Scaled(f64, Variable),
}

/// One loosely typed construction item, prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(f64),
    Variable(Variable),
    /// Only a `[number, variable]` pair is accepted.
    Sequence(Vec<Arg>),
    Text(String),
    Bool(bool),
    Null,
}

impl TryFrom<Arg> for Term {
    type Error = ExpressionError;

    fn try_from(arg: Arg) -> Result<Self, Self::Error> {
        match arg {
            Arg::Number(value) => Ok(Term::Constant(value)),
            Arg::Variable(variable) => Ok(Term::Unit(variable)),
            Arg::Sequence(items) => pair_term(items),
            other => Err(ExpressionError::InvalidArgumentType {
                found: other.to_string(),
            }),
        }
    }
}

fn pair_term(items: Vec<Arg>) -> Result<Term, ExpressionError> {
    let [first, second]: [Arg; 2] = items
        .try_into()
        .map_err(|items: Vec<Arg>| ExpressionError::InvalidPairLength { len: items.len() })?;

    let coefficient = match first {
        Arg::Number(value) => value,
        other => {
            return Err(ExpressionError::InvalidPairElement0 {
                found: other.to_string(),
            });
        }
    };
    let variable = match second {
        Arg::Variable(variable) => variable,
        other => {
            return Err(ExpressionError::InvalidPairElement1 {
                found: other.to_string(),
            });
        }
    };
    Ok(Term::Scaled(coefficient, variable))
}

/// Aggregate terms in order: constants are summed, repeated variables have
/// their coefficients summed into a single entry.
pub fn parse_terms<I>(terms: I) -> (TermMap, f64)
where
    I: IntoIterator<Item = Term>,
{
    let mut map = TermMap::new();
    let mut constant = 0.0;
    for term in terms {
        match term {
            Term::Constant(value) => constant += value,
            Term::Unit(variable) => *map.entry_or_zero(variable) += 1.0,
            Term::Scaled(coeff, variable) => *map.entry_or_zero(variable) += coeff,
        }
    }
    (map, constant)
}

/// Validate and aggregate args. Stops at the first invalid arg.
pub fn parse_args<I>(args: I) -> Result<(TermMap, f64), ExpressionError>
where
    I: IntoIterator<Item = Arg>,
{
    let terms = args
        .into_iter()
        .map(Term::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parse_terms(terms))
}

// ── Conversions ─────────────────────────────────────────────

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Constant(value)
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::Unit(variable)
    }
}

impl From<&Variable> for Term {
    fn from(variable: &Variable) -> Self {
        Term::Unit(variable.clone())
    }
}

impl From<(f64, Variable)> for Term {
    fn from((coeff, variable): (f64, Variable)) -> Self {
        Term::Scaled(coeff, variable)
    }
}

impl From<(f64, &Variable)> for Term {
    fn from((coeff, variable): (f64, &Variable)) -> Self {
        Term::Scaled(coeff, variable.clone())
    }
}

impl From<Term> for Arg {
    fn from(term: Term) -> Self {
        match term {
            Term::Constant(value) => Arg::Number(value),
            Term::Unit(variable) => Arg::Variable(variable),
            Term::Scaled(coeff, variable) => {
                Arg::Sequence(vec![Arg::Number(coeff), Arg::Variable(variable)])
            }
        }
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(value)
    }
}

impl From<Variable> for Arg {
    fn from(variable: Variable) -> Self {
        Arg::Variable(variable)
    }
}

impl From<&Variable> for Arg {
    fn from(variable: &Variable) -> Self {
        Arg::Variable(variable.clone())
    }
}

impl From<(f64, Variable)> for Arg {
    fn from(pair: (f64, Variable)) -> Self {
        Term::from(pair).into()
    }
}

impl From<(f64, &Variable)> for Arg {
    fn from(pair: (f64, &Variable)) -> Self {
        Term::from(pair).into()
    }
}

impl From<Vec<Arg>> for Arg {
    fn from(items: Vec<Arg>) -> Self {
        Arg::Sequence(items)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Text(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Text(text)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

/// JSON-like rendering used to name offending values in errors.
impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Number(value) => f.write_str(&format_number(*value)),
            Arg::Variable(variable) => write!(f, "{variable}"),
            Arg::Sequence(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Arg::Text(text) => write!(f, "{text:?}"),
            Arg::Bool(value) => write!(f, "{value}"),
            Arg::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{Arg, Term, parse_args, parse_terms};
    use crate::{ExpressionError, Variable};

    #[test]
    fn numbers_sum_into_constant() {
        let (terms, constant) = parse_terms([Term::from(1.5), Term::from(2.0), Term::from(-0.5)]);
        assert!(terms.is_empty());
        assert_eq!(constant, 3.0);
    }

    #[test]
    fn unit_and_scaled_terms_aggregate() {
        let x = Variable::new();
        let (terms, constant) = parse_terms([
            Term::from(&x),
            Term::from((2.0, &x)),
            Term::from((3.0, &x)),
        ]);
        assert_eq!(constant, 0.0);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms.get(&x), Some(6.0));
    }

    #[test]
    fn pair_arg_becomes_scaled_term() {
        let x = Variable::new();
        let term = Term::try_from(Arg::from((2.0, &x))).unwrap();
        assert_eq!(term, Term::Scaled(2.0, x));
    }

    #[test]
    fn pair_length_is_checked_first() {
        let x = Variable::new();
        let arg = Arg::Sequence(vec![Arg::from(&x), Arg::from(&x), Arg::from(&x)]);
        assert_eq!(
            Term::try_from(arg).unwrap_err(),
            ExpressionError::InvalidPairLength { len: 3 }
        );
        assert_eq!(
            Term::try_from(Arg::Sequence(Vec::new())).unwrap_err(),
            ExpressionError::InvalidPairLength { len: 0 }
        );
    }

    #[test]
    fn pair_elements_are_checked_in_order() {
        let x = Variable::named("x");
        let swapped = Arg::Sequence(vec![Arg::from(&x), Arg::from(2.0)]);
        assert_eq!(
            Term::try_from(swapped).unwrap_err(),
            ExpressionError::InvalidPairElement0 {
                found: "x".to_string()
            }
        );

        let no_variable = Arg::Sequence(vec![Arg::from(2.0), Arg::from(3.0)]);
        assert_eq!(
            Term::try_from(no_variable).unwrap_err(),
            ExpressionError::InvalidPairElement1 {
                found: "3".to_string()
            }
        );
    }

    #[test]
    fn unsupported_args_name_the_value() {
        assert_eq!(
            Term::try_from(Arg::from("abc")).unwrap_err(),
            ExpressionError::InvalidArgumentType {
                found: "\"abc\"".to_string()
            }
        );
        assert_eq!(
            Term::try_from(Arg::Null).unwrap_err(),
            ExpressionError::InvalidArgumentType {
                found: "null".to_string()
            }
        );
    }

    #[test]
    fn parse_args_stops_at_first_failure() {
        let x = Variable::new();
        let result = parse_args([
            Arg::from(1.0),
            Arg::Bool(true),
            Arg::Sequence(vec![Arg::from(1.0)]),
            Arg::from(&x),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ExpressionError::InvalidArgumentType {
                found: "true".to_string()
            }
        );
    }

    #[test]
    fn sequence_display_is_json_like() {
        let x = Variable::named("x");
        let arg = Arg::Sequence(vec![Arg::from(2.5), Arg::from(&x), Arg::from("s")]);
        assert_eq!(arg.to_string(), "[2.5, x, \"s\"]");
    }
}
