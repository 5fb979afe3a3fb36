//! The multi-index quad store.

use crate::index::{Index, StoredQuad};
use crate::iter::QuadIter;
use crate::planner;
// Not re-exported from this crate's public API: see the trait's own
// doc-hidden definition in `quadstore_model::node::ObjectPositionRefs`.
use quadstore_model::ObjectPositionRefs as _;
use quadstore_model::{Node, Order, Pattern, Quad, World};
use std::ops::BitOr;
use std::rc::Rc;

/// Bitmask selecting which graph-less orders a [`Model`] maintains beyond
/// the always-present `SPO` default. Setting [`IndexSet::WITH_GRAPH`]
/// additionally builds, for every selected graph-less order, its matching
/// graph-prefixed counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSet(u8);

impl IndexSet {
    pub const SPO: Self = Self(1 << 0);
    pub const SOP: Self = Self(1 << 1);
    pub const PSO: Self = Self(1 << 2);
    pub const POS: Self = Self(1 << 3);
    pub const OSP: Self = Self(1 << 4);
    pub const OPS: Self = Self(1 << 5);
    pub const WITH_GRAPH: Self = Self(1 << 6);
    pub const ALL: Self = Self(0b0111_1111);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    const fn order_bit(order: Order) -> Self {
        match order {
            Order::SPO | Order::GSPO => Self::SPO,
            Order::SOP | Order::GSOP => Self::SOP,
            Order::PSO | Order::GPSO => Self::PSO,
            Order::POS | Order::GPOS => Self::POS,
            Order::OSP | Order::GOSP => Self::OSP,
            Order::OPS | Order::GOPS => Self::OPS,
        }
    }
}

impl BitOr for IndexSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Default for IndexSet {
    fn default() -> Self {
        Self::SPO
    }
}

/// A collection of indices over the same set of quads. Every configured
/// index contains exactly the quads the others do; `num_quads` always
/// equals each index's length.
pub struct Model {
    world: World,
    indexes: Vec<Index>,
}

impl Model {
    /// Builds a `Model` configured with `indexes`. `SPO` is always present
    /// regardless of whether [`IndexSet::SPO`] was set.
    pub fn new(world: World, indexes: IndexSet) -> Self {
        let mut built = Vec::new();
        built.push(Index::new(Order::SPO));
        if indexes.contains(IndexSet::WITH_GRAPH) {
            built.push(Index::new(Order::GSPO));
        }
        for (bit, order) in [
            (IndexSet::SOP, Order::SOP),
            (IndexSet::PSO, Order::PSO),
            (IndexSet::POS, Order::POS),
            (IndexSet::OSP, Order::OSP),
            (IndexSet::OPS, Order::OPS),
        ] {
            if indexes.contains(bit) {
                built.push(Index::new(order));
                if indexes.contains(IndexSet::WITH_GRAPH) {
                    built.push(Index::new(order.graph_prefixed()));
                }
            }
        }
        Self {
            world,
            indexes: built,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn has_order(&self, order: Order) -> bool {
        self.indexes.iter().any(|index| index.order() == order)
    }

    pub(crate) fn index(&self, order: Order) -> &Index {
        self.indexes
            .iter()
            .find(|index| index.order() == order)
            .expect("planner only selects configured orders")
    }

    /// Number of quads currently stored (identical to every configured
    /// index's length).
    pub fn num_quads(&self) -> usize {
        self.indexes[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_quads() == 0
    }

    /// Inserts `quad`. Returns `false` (no-op) if it is already present, or
    /// if `subject`/`predicate`/`object` would be a wildcard — which cannot
    /// happen through this crate's `Quad` type, since it has no wildcard
    /// representation for those positions; kept for parity with the data
    /// model's documented failure mode.
    pub fn add(&mut self, quad: Quad) -> bool {
        if self.indexes[0].contains(&quad) {
            return false;
        }
        let record = Rc::new(StoredQuad { quad: quad.clone() });
        for index in &mut self.indexes {
            index.insert(Rc::clone(&record));
        }
        quad.object.incr_refs_as_obj();
        true
    }

    /// Removes `quad` if present; a no-op otherwise.
    pub fn remove(&mut self, quad: &Quad) -> bool {
        if self.indexes[0].remove(quad).is_none() {
            return false;
        }
        for index in &mut self.indexes[1..] {
            index.remove(quad);
        }
        quad.object.decr_refs_as_obj();
        true
    }

    /// Iterates every stored quad in default (`SPO`) order.
    pub fn begin(&self) -> QuadIter<'_> {
        self.find(&Pattern::any())
    }

    /// Iterates the quads matching `pattern`, planning the best available
    /// index and iteration mode for its bound/unbound signature.
    pub fn find(&self, pattern: &Pattern) -> QuadIter<'_> {
        let plan = planner::plan(self, pattern);
        QuadIter::new(self, pattern.clone(), plan)
    }

    /// Convenience wrapper building a pattern from optional positions.
    pub fn quads_for_pattern(
        &self,
        subject: Option<Node>,
        predicate: Option<Node>,
        object: Option<Node>,
        graph: Option<Node>,
    ) -> QuadIter<'_> {
        self.find(&Pattern {
            subject,
            predicate,
            object,
            graph,
        })
    }
}
