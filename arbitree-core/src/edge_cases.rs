//! Budgeted catalogs of boundary values.

use std::rc::Rc;
use std::sync::Arc;

use crate::shrinkable::Shrinkable;

type Supplier<T> = Arc<dyn Fn() -> Rc<dyn Shrinkable<T>> + Send + Sync>;

/// A finite list of edge case suppliers.
///
/// Each pass through [`EdgeCases::iter`] builds fresh shrinkables, so the
/// same catalog can be reused by every run of a property.
pub struct EdgeCases<T> {
    suppliers: Vec<Supplier<T>>,
}

impl<T> Clone for EdgeCases<T> {
    fn clone(&self) -> Self {
        EdgeCases {
            suppliers: self.suppliers.clone(),
        }
    }
}

impl<T> Default for EdgeCases<T> {
    fn default() -> Self {
        EdgeCases::none()
    }
}

impl<T> EdgeCases<T> {
    /// A catalog without edge cases.
    pub fn none() -> Self {
        EdgeCases {
            suppliers: Vec::new(),
        }
    }

    /// Number of edge cases in the catalog.
    pub fn size(&self) -> usize {
        self.suppliers.len()
    }

    /// True when the catalog holds no edge case.
    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Fresh shrinkables for every edge case, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Rc<dyn Shrinkable<T>>> + '_ {
        self.suppliers.iter().map(|supplier| supplier())
    }

    /// Concatenate catalogs in order, keeping at most `max_edge_cases` entries.
    pub fn concat(parts: Vec<EdgeCases<T>>, max_edge_cases: usize) -> Self {
        let suppliers = parts
            .into_iter()
            .flat_map(|part| part.suppliers)
            .take(max_edge_cases)
            .collect();
        EdgeCases { suppliers }
    }

    /// Keep the first `max_edge_cases` entries.
    pub fn limit(mut self, max_edge_cases: usize) -> Self {
        self.suppliers.truncate(max_edge_cases);
        self
    }
}

impl<T: 'static> EdgeCases<T> {
    /// A single edge case built afresh by `supplier` on every pass.
    pub fn from_supplier<F>(supplier: F) -> Self
    where
        F: Fn() -> Rc<dyn Shrinkable<T>> + Send + Sync + 'static,
    {
        EdgeCases {
            suppliers: vec![Arc::new(supplier)],
        }
    }

    /// Transform every edge case shrinkable.
    pub fn map_shrinkable<U, F>(self, f: F) -> EdgeCases<U>
    where
        F: Fn(Rc<dyn Shrinkable<T>>) -> Rc<dyn Shrinkable<U>> + Send + Sync + 'static,
        U: 'static,
    {
        let f = Arc::new(f);
        let suppliers = self
            .suppliers
            .into_iter()
            .map(|supplier| {
                let f = Arc::clone(&f);
                Arc::new(move || f(supplier())) as Supplier<U>
            })
            .collect();
        EdgeCases { suppliers }
    }

    /// Drop the edge cases whose value fails `predicate`.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        let suppliers = self
            .suppliers
            .into_iter()
            .filter(|supplier| predicate(&supplier().value()))
            .collect();
        EdgeCases { suppliers }
    }
}
