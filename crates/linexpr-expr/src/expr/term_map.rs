//! Ordered variable → coefficient map.
//!
//! Keys are sorted by [`Variable`] order (ascending id), independent of
//! insertion order. Solvers merging expressions rely on that sortedness.
//! The public surface is read-only; only the parser in this crate inserts.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::variable::Variable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermMap {
    entries: BTreeMap<Variable, f64>,
}

impl TermMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Coefficient slot for `variable`, inserting 0.0 first if absent.
    pub(crate) fn entry_or_zero(&mut self, variable: Variable) -> &mut f64 {
        self.entries.entry(variable).or_insert(0.0)
    }

    /// Coefficient of `variable`, if it has a term.
    pub fn get(&self, variable: &Variable) -> Option<f64> {
        self.entries.get(variable).copied()
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.entries.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms in variable order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Borrowing iterator over `(variable, coefficient)` pairs in variable order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Variable, f64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Variable, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(variable, coeff)| (variable, *coeff))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(variable, coeff)| (variable, *coeff))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a TermMap {
    type Item = (&'a Variable, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::TermMap;
    use crate::Variable;

    #[test]
    fn entry_or_zero_inserts_then_accumulates() {
        let x = Variable::new();
        let mut map = TermMap::new();
        assert_eq!(*map.entry_or_zero(x.clone()), 0.0);
        *map.entry_or_zero(x.clone()) += 2.0;
        *map.entry_or_zero(x.clone()) += 3.0;
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&x), Some(5.0));
    }

    #[test]
    fn iteration_follows_variable_order_not_insertion() {
        let a = Variable::new();
        let b = Variable::new();
        let c = Variable::new();
        let mut map = TermMap::new();
        *map.entry_or_zero(c.clone()) += 3.0;
        *map.entry_or_zero(a.clone()) += 1.0;
        *map.entry_or_zero(b.clone()) += 2.0;

        let order = map.iter().map(|(v, _)| v.id()).collect::<Vec<_>>();
        assert_eq!(order, vec![a.id(), b.id(), c.id()]);
        let reversed = map.iter().rev().map(|(_, coeff)| coeff).collect::<Vec<_>>();
        assert_eq!(reversed, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn canceled_entries_are_kept() {
        let x = Variable::new();
        let mut map = TermMap::new();
        *map.entry_or_zero(x.clone()) += 2.0;
        *map.entry_or_zero(x.clone()) += -2.0;
        assert!(map.contains(&x));
        assert_eq!(map.get(&x), Some(0.0));
    }

    #[test]
    fn missing_variable_has_no_entry() {
        let map = TermMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get(&Variable::new()), None);
    }
}
