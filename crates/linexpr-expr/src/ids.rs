use std::fmt;

/// Stable identity of a [`Variable`](crate::Variable).
///
/// Ids are allocated in creation order, so sorting by id gives the
/// deterministic total order expressions use for their terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VariableId(u64);

impl VariableId {
    /// Get the inner u64 value.
    pub fn inner(self) -> u64 {
        self.0
    }

    /// Create an ID from a u64 value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::VariableId;

    #[test]
    fn variable_id_roundtrip() {
        let id = VariableId::new(7);
        assert_eq!(id.inner(), 7);
    }

    #[test]
    fn variable_id_orders_by_value() {
        assert!(VariableId::new(2) < VariableId::new(11));
    }

    #[test]
    fn variable_id_holds_values_past_u32() {
        let wide = VariableId::new(u64::from(u32::MAX) + 1);
        assert_ne!(wide, VariableId::new(0));
        assert!(wide > VariableId::new(u64::from(u32::MAX)));
    }

    #[test]
    fn variable_id_display() {
        assert_eq!(VariableId::new(3).to_string(), "v3");
    }
}
