//! A single ordered index over the quads in a [`Model`](crate::Model).
//!
//! Every configured index shares the same [`StoredQuad`] records (see
//! [`crate::model`]) — an index holds only an ordering handle onto each
//! record, never a private copy of its four node positions. The backing
//! structure is a `Vec` kept sorted by the order's comparator; inserts and
//! removes binary-search for their position. This is the "sorted gap
//! buffer" alternative the data model explicitly allows alongside a
//! balanced tree.

use quadstore_model::{key_of, pattern_key_of, Order, Pattern, Quad};
use std::rc::Rc;

pub(crate) struct StoredQuad {
    pub(crate) quad: Quad,
}

pub(crate) struct Index {
    order: Order,
    entries: Vec<Rc<StoredQuad>>,
}

impl Index {
    pub(crate) fn new(order: Order) -> Self {
        Self {
            order,
            entries: Vec::new(),
        }
    }

    pub(crate) fn order(&self) -> Order {
        self.order
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn locate(&self, quad: &Quad) -> Result<usize, usize> {
        let key = key_of(self.order, quad);
        self.entries
            .binary_search_by(|probe| key_of(self.order, &probe.quad).cmp(&key))
    }

    pub(crate) fn contains(&self, quad: &Quad) -> bool {
        self.locate(quad).is_ok()
    }

    /// Inserts `record`. Returns `false` without modifying the index if an
    /// entry for the same quad already exists.
    pub(crate) fn insert(&mut self, record: Rc<StoredQuad>) -> bool {
        match self.locate(&record.quad) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, record);
                true
            }
        }
    }

    /// Removes the entry for `quad`, if present.
    pub(crate) fn remove(&mut self, quad: &Quad) -> Option<Rc<StoredQuad>> {
        match self.locate(quad) {
            Ok(pos) => Some(self.entries.remove(pos)),
            Err(_) => None,
        }
    }

    /// The index of the leftmost entry greater than or equal to `pattern`'s
    /// lower bound (wildcards sort below every real node, so unbound
    /// positions in `pattern` never exclude a match).
    pub(crate) fn lower_bound(&self, pattern: &Pattern) -> usize {
        let key = pattern_key_of(self.order, pattern);
        self.entries
            .partition_point(|probe| key_of(self.order, &probe.quad) < key)
    }

    pub(crate) fn get(&self, position: usize) -> Option<&Rc<StoredQuad>> {
        self.entries.get(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadstore_model::World;

    fn quad(world: &World, s: &str, p: &str, o: &str) -> Quad {
        Quad::new(world.new_iri(s), world.new_iri(p), world.new_iri(o), None)
    }

    #[test]
    fn insert_keeps_sorted_order_and_rejects_duplicates() {
        let world = World::new();
        let mut index = Index::new(Order::SPO);
        assert!(index.insert(Rc::new(StoredQuad {
            quad: quad(&world, "http://b", "http://p", "http://o")
        })));
        assert!(index.insert(Rc::new(StoredQuad {
            quad: quad(&world, "http://a", "http://p", "http://o")
        })));
        assert!(!index.insert(Rc::new(StoredQuad {
            quad: quad(&world, "http://a", "http://p", "http://o")
        })));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0).unwrap().quad.subject.as_str(), "http://a");
        assert_eq!(index.get(1).unwrap().quad.subject.as_str(), "http://b");
    }

    #[test]
    fn remove_absent_is_a_no_op() {
        let world = World::new();
        let mut index = Index::new(Order::SPO);
        let q = quad(&world, "http://a", "http://p", "http://o");
        assert!(index.remove(&q).is_none());
        index.insert(Rc::new(StoredQuad { quad: q.clone() }));
        assert!(index.remove(&q).is_some());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn lower_bound_finds_prefix_start() {
        let world = World::new();
        let mut index = Index::new(Order::SPO);
        for s in ["a", "b", "c"] {
            index.insert(Rc::new(StoredQuad {
                quad: quad(&world, &format!("http://{s}"), "http://p", "http://o"),
            }));
        }
        let pattern = Pattern::any().with_subject(world.new_iri("http://b"));
        let pos = index.lower_bound(&pattern);
        assert_eq!(index.get(pos).unwrap().quad.subject.as_str(), "http://b");
    }
}
