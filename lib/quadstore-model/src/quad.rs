//! The quad tuple, patterns over it, and the twelve lexicographic orders.

use crate::node::Node;
use std::fmt;

/// A fully bound quad: `subject`/`predicate`/`object` are never wildcards.
/// `graph` is `None` for the default graph.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
    pub graph: Option<Node>,
}

impl Quad {
    pub fn new(subject: Node, predicate: Node, object: Node, graph: Option<Node>) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    pub fn as_pattern(&self) -> Pattern {
        Pattern {
            subject: Some(self.subject.clone()),
            predicate: Some(self.predicate.clone()),
            object: Some(self.object.clone()),
            graph: self.graph.clone(),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(graph) = &self.graph {
            write!(f, " {graph}")?;
        }
        write!(f, " .")
    }
}

/// A pattern over the four quad positions. `None` in `subject`/`predicate`/
/// `object` is the wildcard (matches any node). `None` in `graph` matches
/// either the default graph or any graph, depending on how the pattern was
/// built (see [`Pattern::any_graph`] vs [`Pattern::default_graph`]) — the
/// store does not distinguish the two once the pattern reaches the planner,
/// matching the wildcard/default-graph conflation the rest of this crate's
/// `Option<Node>` encoding embraces throughout.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub subject: Option<Node>,
    pub predicate: Option<Node>,
    pub object: Option<Node>,
    pub graph: Option<Node>,
}

impl Pattern {
    /// A pattern matching every quad.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: Node) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_predicate(mut self, predicate: Node) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_object(mut self, object: Node) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_graph(mut self, graph: Node) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Whether `quad` matches this pattern position-wise: a bound position
    /// requires pointer-identical equality, an unbound one matches anything.
    pub fn matches(&self, quad: &Quad) -> bool {
        self.subject.as_ref().is_none_or(|s| *s == quad.subject)
            && self.predicate.as_ref().is_none_or(|p| *p == quad.predicate)
            && self.object.as_ref().is_none_or(|o| *o == quad.object)
            && self.graph.as_ref().is_none_or(|g| Some(g) == quad.graph.as_ref())
    }

    /// The three-bit signature over (subject, predicate, object)
    /// boundedness the planner dispatches on.
    pub fn signature(&self) -> Signature {
        Signature {
            s: self.subject.is_some(),
            p: self.predicate.is_some(),
            o: self.object.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub s: bool,
    pub p: bool,
    pub o: bool,
}

/// Which canonical quad position a permutation slot projects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    S,
    P,
    O,
    G,
}

/// One of the twelve lexicographic key permutations over a quad's four
/// positions: the six permutations of (S, P, O) plus their six
/// graph-prefixed counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Order {
    SPO,
    SOP,
    PSO,
    POS,
    OSP,
    OPS,
    GSPO,
    GSOP,
    GPSO,
    GPOS,
    GOSP,
    GOPS,
}

impl Order {
    pub const GRAPH_LESS: [Self; 6] = [
        Self::SPO,
        Self::SOP,
        Self::PSO,
        Self::POS,
        Self::OSP,
        Self::OPS,
    ];

    pub const GRAPH_PREFIXED: [Self; 6] = [
        Self::GSPO,
        Self::GSOP,
        Self::GPSO,
        Self::GPOS,
        Self::GOSP,
        Self::GOPS,
    ];

    /// The graph-prefixed order corresponding to this order's (S, P, O)
    /// permutation (a no-op if already graph-prefixed).
    pub fn graph_prefixed(self) -> Self {
        match self {
            Self::SPO | Self::GSPO => Self::GSPO,
            Self::SOP | Self::GSOP => Self::GSOP,
            Self::PSO | Self::GPSO => Self::GPSO,
            Self::POS | Self::GPOS => Self::GPOS,
            Self::OSP | Self::GOSP => Self::GOSP,
            Self::OPS | Self::GOPS => Self::GOPS,
        }
    }

    pub fn is_graph_prefixed(self) -> bool {
        matches!(
            self,
            Self::GSPO | Self::GSOP | Self::GPSO | Self::GPOS | Self::GOSP | Self::GOPS
        )
    }

    /// The four key slots in comparison order (most significant first).
    pub fn permutation(self) -> [Position; 4] {
        use Position::{G, O, P, S};
        match self {
            Self::SPO => [S, P, O, G],
            Self::SOP => [S, O, P, G],
            Self::PSO => [P, S, O, G],
            Self::POS => [P, O, S, G],
            Self::OSP => [O, S, P, G],
            Self::OPS => [O, P, S, G],
            Self::GSPO => [G, S, P, O],
            Self::GSOP => [G, S, O, P],
            Self::GPSO => [G, P, S, O],
            Self::GPOS => [G, P, O, S],
            Self::GOSP => [G, O, S, P],
            Self::GOPS => [G, O, P, S],
        }
    }

    /// Number of leading slots meaningful for range/prefix matching: 3 for
    /// graph-less orders (graph trails only to keep per-index cardinality
    /// equal, see the crate docs), 4 for graph-prefixed ones.
    pub fn significant_len(self) -> usize {
        if self.is_graph_prefixed() { 4 } else { 3 }
    }
}

fn slot(quad: &Quad, position: Position) -> Option<Node> {
    match position {
        Position::S => Some(quad.subject.clone()),
        Position::P => Some(quad.predicate.clone()),
        Position::O => Some(quad.object.clone()),
        Position::G => quad.graph.clone(),
    }
}

fn pattern_slot(pattern: &Pattern, position: Position) -> Option<Node> {
    match position {
        Position::S => pattern.subject.clone(),
        Position::P => pattern.predicate.clone(),
        Position::O => pattern.object.clone(),
        Position::G => pattern.graph.clone(),
    }
}

/// Projects a quad into the four-slot key used by `order`'s index.
pub fn key_of(order: Order, quad: &Quad) -> [Option<Node>; 4] {
    order.permutation().map(|position| slot(quad, position))
}

/// Projects a pattern into the same slot arrangement, for building a
/// lower-bound search key; unbound positions stay `None` (the wildcard, and
/// also the smallest possible value at that slot).
pub fn pattern_key_of(order: Order, pattern: &Pattern) -> [Option<Node>; 4] {
    order.permutation().map(|position| pattern_slot(pattern, position))
}

/// Rebuilds canonical `(subject, predicate, object, graph)` fields from a
/// permuted key, for reading back an index entry.
pub fn unpermute(order: Order, key: &[Option<Node>; 4]) -> (Node, Node, Node, Option<Node>) {
    let mut s = None;
    let mut p = None;
    let mut o = None;
    let mut g = None;
    for (position, value) in order.permutation().into_iter().zip(key.iter().cloned()) {
        match position {
            Position::S => s = value,
            Position::P => p = value,
            Position::O => o = value,
            Position::G => g = value,
        }
    }
    (
        s.expect("subject slot always bound in a stored quad"),
        p.expect("predicate slot always bound in a stored quad"),
        o.expect("object slot always bound in a stored quad"),
        g,
    )
}
