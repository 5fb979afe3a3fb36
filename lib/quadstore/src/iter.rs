//! The lazy, index-order quad iterator.

use crate::model::Model;
use crate::planner::{Mode, Plan};
use quadstore_model::{unpermute, Pattern, Quad};

/// Iterates the quads matching a pattern, in the chosen index's order.
/// Borrows its [`Model`] for its whole lifetime, so the borrow checker
/// rejects any attempt to mutate the store while an iterator over it is
/// alive — the use-after-mutation hazard the data model calls undefined
/// behavior becomes a compile error here instead.
pub struct QuadIter<'m> {
    model: &'m Model,
    pattern: Pattern,
    plan: Plan,
    position: usize,
    done: bool,
}

impl<'m> QuadIter<'m> {
    pub(crate) fn new(model: &'m Model, pattern: Pattern, plan: Plan) -> Self {
        let index = model.index(plan.order);
        let position = index.lower_bound(&pattern);
        let mut iter = Self {
            model,
            pattern,
            plan,
            position,
            done: false,
        };
        if matches!(iter.plan.mode, Mode::FilterRange | Mode::FilterAll) {
            iter.skip_to_next_match();
        } else {
            iter.done = index.get(position).is_none();
        }
        iter
    }

    fn current_quad(&self, position: usize) -> Option<Quad> {
        let index = self.model.index(self.plan.order);
        let record = index.get(position)?;
        let key = quadstore_model::key_of(self.plan.order, &record.quad);
        let (s, p, o, g) = unpermute(self.plan.order, &key);
        Some(Quad::new(s, p, o, g))
    }

    fn matches_prefix(&self, quad: &Quad) -> bool {
        let key = quadstore_model::key_of(self.plan.order, quad);
        let pattern_key = quadstore_model::pattern_key_of(self.plan.order, &self.pattern);
        key.iter()
            .zip(pattern_key.iter())
            .take(self.plan.prefix_len)
            .all(|(k, p)| p.is_none() || k == p)
    }

    fn skip_graphs(&self) -> bool {
        !self.plan.order.is_graph_prefixed()
    }

    /// Advances `self.position` past any entries sharing the current
    /// entry's (S, P, O) prefix, implementing the graph-collapsing
    /// behaviour of graph-less orders.
    fn collapse_graph_duplicates(&mut self, current: &Quad) {
        if !self.skip_graphs() {
            return;
        }
        loop {
            let Some(next) = self.current_quad(self.position + 1) else {
                break;
            };
            if next.subject == current.subject
                && next.predicate == current.predicate
                && next.object == current.object
            {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    fn skip_to_next_match(&mut self) {
        loop {
            let Some(quad) = self.current_quad(self.position) else {
                self.done = true;
                return;
            };
            if !self.matches_prefix(&quad) {
                self.done = true;
                return;
            }
            if self.pattern.matches(&quad) {
                return;
            }
            self.position += 1;
        }
    }
}

impl Iterator for QuadIter<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let quad = self.current_quad(self.position)?;
        self.collapse_graph_duplicates(&quad);

        match self.plan.mode {
            Mode::All => {
                self.position += 1;
                if self.current_quad(self.position).is_none() {
                    self.done = true;
                }
            }
            Mode::Single => {
                self.done = true;
            }
            Mode::Range => {
                self.position += 1;
                match self.current_quad(self.position) {
                    Some(next) if self.matches_prefix(&next) => {}
                    _ => self.done = true,
                }
            }
            Mode::FilterRange | Mode::FilterAll => {
                self.position += 1;
                self.skip_to_next_match();
            }
        }
        Some(quad)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{IndexSet, Model};
    use quadstore_model::{Pattern, Quad, World};

    fn quad(world: &World, s: &str, p: &str, o: &str) -> Quad {
        Quad::new(world.new_iri(s), world.new_iri(p), world.new_iri(o), None)
    }

    #[test]
    fn order_is_non_decreasing_under_the_chosen_comparator() {
        let world = World::new();
        let mut model = Model::new(world.clone(), IndexSet::SPO);
        model.add(quad(&world, "http://a", "http://b", "http://z"));
        model.add(quad(&world, "http://a", "http://b", "http://y"));
        model.add(quad(&world, "http://a", "http://a", "http://x"));
        let results: Vec<_> = model.begin().collect();
        let mut sorted = results.clone();
        sorted.sort_by(|a, b| {
            quadstore_model::key_of(quadstore_model::Order::SPO, a)
                .cmp(&quadstore_model::key_of(quadstore_model::Order::SPO, b))
        });
        assert!(results
            .iter()
            .map(|q| q.to_string())
            .eq(sorted.iter().map(|q| q.to_string())));
    }

    #[test]
    fn filter_all_still_yields_only_matching_quads_without_an_object_index() {
        let world = World::new();
        let mut model = Model::new(world.clone(), IndexSet::SPO);
        let c = world.new_iri("http://c");
        model.add(Quad::new(world.new_iri("http://a"), world.new_iri("http://p"), c.clone(), None));
        model.add(quad(&world, "http://a", "http://p", "http://d"));
        let pattern = Pattern::any().with_object(c);
        let results: Vec<_> = model.find(&pattern).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].object.as_str(), "http://c");
    }

    #[test]
    fn graph_collapsing_yields_one_entry_per_spo_triple() {
        let world = World::new();
        let mut model = Model::new(world.clone(), IndexSet::SPO);
        let g1 = world.new_iri("http://g1");
        let g2 = world.new_iri("http://g2");
        model.add(Quad::new(
            world.new_iri("http://a"),
            world.new_iri("http://b"),
            world.new_iri("http://c"),
            Some(g1),
        ));
        model.add(Quad::new(
            world.new_iri("http://a"),
            world.new_iri("http://b"),
            world.new_iri("http://c"),
            Some(g2),
        ));
        let results: Vec<_> = model.begin().collect();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn full_pattern_match_soundness() {
        let world = World::new();
        let mut model = Model::new(world.clone(), IndexSet::ALL | IndexSet::WITH_GRAPH);
        model.add(quad(&world, "http://a", "http://b", "http://c"));
        model.add(quad(&world, "http://a", "http://b", "http://d"));
        model.add(quad(&world, "http://e", "http://b", "http://c"));

        let a = world.new_iri("http://a");
        let pattern = Pattern::any().with_subject(a);
        let results: Vec<_> = model.find(&pattern).collect();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|q| q.subject.as_str() == "http://a"));
    }
}
