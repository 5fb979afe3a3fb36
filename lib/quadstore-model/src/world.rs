//! The node interner.
//!
//! A [`World`] owns every [`Node`](crate::Node) minted through it. Interning
//! tables hold only [`Weak`] references, so a node's last strong handle
//! dropping is what removes it from its table — there is no separate
//! "garbage collect the interner" step.

use crate::node::{BlankData, IriData, LanguageTagData, LiteralData, LiteralKey, Node};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[derive(Default)]
pub(crate) struct WorldTables {
    pub(crate) iris: HashMap<Box<str>, Weak<IriData>>,
    pub(crate) blanks: HashMap<Box<str>, Weak<BlankData>>,
    pub(crate) languages: HashMap<Box<str>, Weak<LanguageTagData>>,
    pub(crate) literals: HashMap<LiteralKey, Weak<LiteralData>>,
}

/// The sole creator and destroyer of [`Node`]s.
///
/// Cloning a `World` shares the same interning tables (it is a cheap `Rc`
/// clone); a [`Node`] minted by one `World` clone is visible to lookups on
/// any other clone of the same `World`, but must never be stored in a
/// [`Model`](crate::Model) built against an unrelated `World`.
#[derive(Clone, Default)]
pub struct World(pub(crate) Rc<RefCell<WorldTables>>);

impl World {
    /// Creates a fresh, empty interner.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns an IRI, returning the canonical handle for its lexical form.
    pub fn new_iri(&self, iri: impl AsRef<str>) -> Node {
        let iri = iri.as_ref();
        if let Some(existing) = self
            .0
            .borrow()
            .iris
            .get(iri)
            .and_then(Weak::upgrade)
        {
            return Node::Iri(existing);
        }
        let data = Rc::new(IriData {
            world: Rc::downgrade(&self.0),
            bytes: iri.into(),
            refs_as_obj: Cell::new(0),
        });
        self.0
            .borrow_mut()
            .iris
            .insert(data.bytes.clone(), Rc::downgrade(&data));
        Node::Iri(data)
    }

    /// Interns a blank-node identifier.
    pub fn new_blank(&self, id: impl AsRef<str>) -> Node {
        let id = id.as_ref();
        if let Some(existing) = self
            .0
            .borrow()
            .blanks
            .get(id)
            .and_then(Weak::upgrade)
        {
            return Node::Blank(existing);
        }
        let data = Rc::new(BlankData {
            world: Rc::downgrade(&self.0),
            bytes: id.into(),
            refs_as_obj: Cell::new(0),
        });
        self.0
            .borrow_mut()
            .blanks
            .insert(data.bytes.clone(), Rc::downgrade(&data));
        Node::Blank(data)
    }

    /// Interns a fresh, process-unique blank node (no caller-supplied id).
    pub fn new_unique_blank(&self) -> Node {
        loop {
            let candidate = format!("g{:032x}", rand::random::<u128>());
            if !self.0.borrow().blanks.contains_key(candidate.as_str()) {
                return self.new_blank(candidate);
            }
        }
    }

    fn intern_language(&self, language: Option<&str>) -> Option<Rc<LanguageTagData>> {
        let language = language?;
        if let Some(existing) = self
            .0
            .borrow()
            .languages
            .get(language)
            .and_then(Weak::upgrade)
        {
            return Some(existing);
        }
        let data = Rc::new(LanguageTagData {
            world: Rc::downgrade(&self.0),
            bytes: language.into(),
        });
        self.0
            .borrow_mut()
            .languages
            .insert(data.bytes.clone(), Rc::downgrade(&data));
        Some(data)
    }

    /// Interns a literal. `datatype` must be a [`Node::Iri`] minted by this
    /// same `World`, or `None`, in which case the effective datatype is
    /// `xsd:string` (or `rdf:langString` when `language` is set) by
    /// convention of the caller; the interner itself does not special-case
    /// those IRIs.
    ///
    /// # Panics
    ///
    /// Panics if `datatype` is `Some` and not a [`Node::Iri`].
    pub fn new_literal(
        &self,
        value: impl AsRef<str>,
        datatype: Option<Node>,
        language: Option<&str>,
    ) -> Node {
        if let Some(dt) = &datatype {
            assert!(matches!(dt, Node::Iri(_)), "literal datatype must be an IRI node");
        }
        let value = value.as_ref();
        let language = self.intern_language(language);
        let key = LiteralKey::probe(value, datatype.as_ref(), language.as_ref());
        if let Some(existing) = self.0.borrow().literals.get(&key).and_then(Weak::upgrade) {
            return Node::Literal(existing);
        }
        let data = Rc::new(LiteralData {
            world: Rc::downgrade(&self.0),
            bytes: value.into(),
            datatype,
            language,
            refs_as_obj: Cell::new(0),
        });
        let key = LiteralKey::from_data(&data);
        self.0
            .borrow_mut()
            .literals
            .insert(key, Rc::downgrade(&data));
        Node::Literal(data)
    }

    /// Number of distinct IRIs, blank nodes, and literals currently alive.
    pub fn node_count(&self) -> usize {
        let tables = self.0.borrow();
        tables.iris.len() + tables.blanks.len() + tables.literals.len()
    }
}
