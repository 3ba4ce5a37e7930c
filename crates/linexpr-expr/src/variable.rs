//! Solver variables referenced by expressions.
//!
//! A [`Variable`] is a cheap handle: clones share the same identity and the
//! same current value. The surrounding solver owns the value and updates it
//! through [`Variable::set_value`]; expressions only read it.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{self, AtomicU64};

use crate::ids::VariableId;

// Process-wide and never reset; 64 bits so ids never wrap within a process.
static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct VariableData {
    name: Option<String>,
    value: Cell<f64>,
}

/// A variable handle with stable identity and a live current value.
///
/// Equality, ordering and hashing use the [`VariableId`] only. Two variables
/// that happen to share a name or a value are still distinct.
#[derive(Clone)]
pub struct Variable {
    id: VariableId,
    data: Rc<VariableData>,
}

impl Variable {
    /// Unnamed variable with current value 0.
    pub fn new() -> Self {
        Self::allocate(None)
    }

    /// Named variable with current value 0.
    pub fn named(name: impl Into<String>) -> Self {
        Self::allocate(Some(name.into()))
    }

    fn allocate(name: Option<String>) -> Self {
        let id = VariableId::new(NEXT_VARIABLE_ID.fetch_add(1, atomic::Ordering::Relaxed));
        Self {
            id,
            data: Rc::new(VariableData {
                name,
                value: Cell::new(0.0),
            }),
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    /// Current value as last written by the solver.
    pub fn value(&self) -> f64 {
        self.data.value.get()
    }

    /// Overwrite the current value. Visible through every clone.
    pub fn set_value(&self, value: f64) {
        self.data.value.set(value);
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.id.inner())
            .field("name", &self.data.name)
            .field("value", &self.data.value.get())
            .finish()
    }
}

/// Renders the name, or the id form (`v3`) for unnamed variables.
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.id),
        }
    }
}
