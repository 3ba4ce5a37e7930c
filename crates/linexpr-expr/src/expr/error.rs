//! Expression construction errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Argument is not a number, variable, or pair.
    InvalidArgumentType { found: String },
    /// Pair argument does not have exactly two elements.
    InvalidPairLength { len: usize },
    /// Pair's first element is not numeric.
    InvalidPairElement0 { found: String },
    /// Pair's second element is not a variable.
    InvalidPairElement1 { found: String },
}

impl ExpressionError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExpressionError::InvalidArgumentType { .. } => "EXPR_INVALID_ARGUMENT_TYPE",
            ExpressionError::InvalidPairLength { .. } => "EXPR_INVALID_PAIR_LENGTH",
            ExpressionError::InvalidPairElement0 { .. } => "EXPR_INVALID_PAIR_ELEMENT_0",
            ExpressionError::InvalidPairElement1 { .. } => "EXPR_INVALID_PAIR_ELEMENT_1",
        }
    }
}

impl std::fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpressionError::InvalidArgumentType { found } => write!(
                f,
                "[{}] Invalid expression argument: {}",
                self.code(),
                found
            ),
            ExpressionError::InvalidPairLength { len } => write!(
                f,
                "[{}] Pair must have length 2 (got {})",
                self.code(),
                len
            ),
            ExpressionError::InvalidPairElement0 { found } => write!(
                f,
                "[{}] Pair item 0 must be a number (got {})",
                self.code(),
                found
            ),
            ExpressionError::InvalidPairElement1 { found } => write!(
                f,
                "[{}] Pair item 1 must be a variable (got {})",
                self.code(),
                found
            ),
        }
    }
}

impl std::error::Error for ExpressionError {}
