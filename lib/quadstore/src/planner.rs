//! Maps a pattern's bound/unbound signature to the index and iteration
//! strategy used to answer it (spec section on planner dispatch).

use crate::model::Model;
use quadstore_model::{Order, Pattern, Position, Signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    All,
    Single,
    Range,
    FilterRange,
    FilterAll,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Plan {
    pub(crate) order: Order,
    pub(crate) mode: Mode,
    pub(crate) prefix_len: usize,
}

/// The graph-less orders preferred for each (S, P, O) boundedness
/// signature, most-preferred first.
fn preferred_orders(sig: Signature) -> &'static [Order] {
    match (sig.s, sig.p, sig.o) {
        (false, false, false) => &[Order::SPO],
        (false, false, true) => &[Order::OPS, Order::OSP],
        (false, true, false) => &[Order::POS, Order::PSO],
        (true, false, false) => &[Order::SPO, Order::SOP],
        (false, true, true) => &[Order::OPS, Order::POS],
        (true, false, true) => &[Order::SOP, Order::OSP],
        (true, true, false) => &[Order::SPO, Order::PSO],
        (true, true, true) => &[Order::SPO],
    }
}

fn bound_count(sig: Signature) -> usize {
    usize::from(sig.s) + usize::from(sig.p) + usize::from(sig.o)
}

/// How many of `order`'s leading slots are bound by `sig`/`graph_bound`
/// before the first unbound slot. Never exceeds `order.significant_len()`:
/// a graph-less order's trailing `G` slot is not a meaningful match
/// position (see the data model's index-coherency notes), so the scan
/// stops short of it even when `graph_bound` is true.
fn prefix_match_len(order: Order, sig: Signature, graph_bound: bool) -> usize {
    let mut len = 0;
    for position in order.permutation().into_iter().take(order.significant_len()) {
        let bound = match position {
            Position::S => sig.s,
            Position::P => sig.p,
            Position::O => sig.o,
            Position::G => graph_bound,
        };
        if bound {
            len += 1;
        } else {
            break;
        }
    }
    len
}

pub(crate) fn plan(model: &Model, pattern: &Pattern) -> Plan {
    let sig = pattern.signature();
    let graph_bound = pattern.graph.is_some();
    let full_match_len = bound_count(sig) + usize::from(graph_bound);

    let preferred: Vec<Order> = preferred_orders(sig)
        .iter()
        .map(|order| if graph_bound { order.graph_prefixed() } else { *order })
        .collect();

    for order in &preferred {
        if model.has_order(*order) {
            let mode = if sig.s && sig.p && sig.o {
                Mode::Single
            } else if full_match_len == 0 {
                Mode::All
            } else {
                Mode::Range
            };
            return Plan {
                order: *order,
                mode,
                prefix_len: full_match_len,
            };
        }
    }

    // No preferred index is configured: fall back to the best available
    // partial prefix, preferring graph-prefixed orders when the graph is
    // bound (a longer match there still beats a graph-less one).
    let candidates: Vec<Order> = if graph_bound {
        Order::GRAPH_PREFIXED.iter().chain(Order::GRAPH_LESS.iter()).copied().collect()
    } else {
        Order::GRAPH_LESS.to_vec()
    };

    let mut best: Option<(Order, usize)> = None;
    for order in candidates {
        if !model.has_order(order) {
            continue;
        }
        let len = prefix_match_len(order, sig, graph_bound);
        if len > 0 && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((order, len));
        }
    }

    if let Some((order, prefix_len)) = best {
        return Plan {
            order,
            mode: Mode::FilterRange,
            prefix_len,
        };
    }

    Plan {
        order: Order::SPO,
        mode: Mode::FilterAll,
        prefix_len: 0,
    }
}
