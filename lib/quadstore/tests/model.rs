//! End-to-end tests covering interning, multi-index storage, planning, and
//! iteration together, as a caller assembling the crate's public API would
//! exercise it.

use quadstore::io::{QuadReader, QuadWriter, RdfFormat};
use quadstore::{IndexSet, Model, Pattern, Quad, World};
use std::io::Cursor;

fn quad(world: &World, s: &str, p: &str, o: &str, g: Option<&str>) -> Quad {
    Quad::new(
        world.new_iri(s),
        world.new_iri(p),
        world.new_iri(o),
        g.map(|g| world.new_iri(g)),
    )
}

#[test]
fn round_trips_quads_through_every_configured_index() {
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::ALL);

    let a = quad(&world, "urn:s1", "urn:p1", "urn:o1", None);
    let b = quad(&world, "urn:s1", "urn:p2", "urn:o2", Some("urn:g1"));
    let c = quad(&world, "urn:s2", "urn:p1", "urn:o1", Some("urn:g1"));

    assert!(model.add(a.clone()));
    assert!(model.add(b.clone()));
    assert!(model.add(c.clone()));
    assert!(!model.add(a.clone()), "re-adding an existing quad is a no-op");
    assert_eq!(model.num_quads(), 3);

    let s1 = world.new_iri("urn:s1");
    let results: Vec<_> = model.find(&Pattern::any().with_subject(s1)).collect();
    assert_eq!(results.len(), 2);

    let p1 = world.new_iri("urn:p1");
    let results: Vec<_> = model.find(&Pattern::any().with_predicate(p1)).collect();
    assert_eq!(results.len(), 2);

    let g1 = world.new_iri("urn:g1");
    let results: Vec<_> = model.find(&Pattern::any().with_graph(g1)).collect();
    assert_eq!(results.len(), 2);
}

#[test]
fn graph_less_iteration_collapses_duplicate_graphs() {
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::ALL);

    model.add(quad(&world, "urn:s", "urn:p", "urn:o", Some("urn:g1")));
    model.add(quad(&world, "urn:s", "urn:p", "urn:o", Some("urn:g2")));
    assert_eq!(model.num_quads(), 2);

    // A pattern with no graph position bound scans the graph-less SPO index,
    // which stores one entry per distinct (s, p, o) regardless of how many
    // graphs carry it.
    let s = world.new_iri("urn:s");
    let results: Vec<_> = model.find(&Pattern::any().with_subject(s)).collect();
    assert_eq!(results.len(), 1);
}

#[test]
fn removing_a_quad_drops_it_from_every_index() {
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::ALL);
    let a = quad(&world, "urn:s", "urn:p", "urn:o", None);
    model.add(a.clone());
    assert_eq!(model.num_quads(), 1);
    assert!(model.remove(&a));
    assert_eq!(model.num_quads(), 0);
    assert!(!model.remove(&a));
}

#[test]
fn loads_n_quads_text_and_serializes_it_back_out() {
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::ALL);

    let input = concat!(
        "<urn:s1> <urn:p> \"hello\"@en <urn:g1> .\n",
        "<urn:s2> <urn:p> \"42\"^^<urn:xsd:integer> .\n",
        "_:b1 <urn:p> <urn:s1> .\n",
    );
    for quad in QuadReader::new(RdfFormat::NQuads).read(world.clone(), Cursor::new(input)) {
        model.add(quad.unwrap());
    }
    assert_eq!(model.num_quads(), 3);

    let mut out = Vec::new();
    let mut writer = QuadWriter::new(&mut out, RdfFormat::NQuads);
    for q in model.find(&Pattern::any()) {
        writer.write_quad(&q).unwrap();
    }
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("\"hello\"@en"));
}

#[test]
fn a_minimally_configured_model_still_answers_every_pattern_shape() {
    // Only the mandatory SPO index is present; the planner must fall back to
    // filtered scans instead of failing.
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::empty());
    model.add(quad(&world, "urn:s", "urn:p", "urn:o", None));

    let o = world.new_iri("urn:o");
    let results: Vec<_> = model.find(&Pattern::any().with_object(o)).collect();
    assert_eq!(results.len(), 1);
}
