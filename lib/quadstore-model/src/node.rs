//! The tagged Node value and its total order.

use crate::world::WorldTables;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

pub(crate) struct IriData {
    pub(crate) world: Weak<RefCell<WorldTables>>,
    pub(crate) bytes: Box<str>,
    pub(crate) refs_as_obj: Cell<usize>,
}

impl Drop for IriData {
    fn drop(&mut self) {
        if let Some(world) = self.world.upgrade() {
            world.borrow_mut().iris.remove(&*self.bytes);
        }
    }
}

pub(crate) struct BlankData {
    pub(crate) world: Weak<RefCell<WorldTables>>,
    pub(crate) bytes: Box<str>,
    pub(crate) refs_as_obj: Cell<usize>,
}

impl Drop for BlankData {
    fn drop(&mut self) {
        if let Some(world) = self.world.upgrade() {
            world.borrow_mut().blanks.remove(&*self.bytes);
        }
    }
}

pub(crate) struct LanguageTagData {
    pub(crate) world: Weak<RefCell<WorldTables>>,
    pub(crate) bytes: Box<str>,
}

impl Drop for LanguageTagData {
    fn drop(&mut self) {
        if let Some(world) = self.world.upgrade() {
            world.borrow_mut().languages.remove(&*self.bytes);
        }
    }
}

pub(crate) struct LiteralData {
    pub(crate) world: Weak<RefCell<WorldTables>>,
    pub(crate) bytes: Box<str>,
    pub(crate) datatype: Option<Node>,
    pub(crate) language: Option<Rc<LanguageTagData>>,
    pub(crate) refs_as_obj: Cell<usize>,
}

impl Drop for LiteralData {
    fn drop(&mut self) {
        if let Some(world) = self.world.upgrade() {
            let key = LiteralKey::from_data(self);
            world.borrow_mut().literals.remove(&key);
        }
    }
}

/// Lookup key for the literals table: lexical bytes plus the *identity* of
/// the datatype and language handles, not their content — avoids the extra
/// strong references a content-based key would otherwise force.
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct LiteralKey {
    bytes: Box<str>,
    datatype: Option<*const ()>,
    language: Option<*const ()>,
}

impl LiteralKey {
    pub(crate) fn probe(bytes: &str, datatype: Option<&Node>, language: Option<&Rc<LanguageTagData>>) -> Self {
        Self {
            bytes: bytes.into(),
            datatype: datatype.map(Node::data_ptr),
            language: language.map(|l| Rc::as_ptr(l).cast::<()>()),
        }
    }

    pub(crate) fn from_data(data: &LiteralData) -> Self {
        Self {
            bytes: data.bytes.clone(),
            datatype: data.datatype.as_ref().map(Node::data_ptr),
            language: data.language.as_ref().map(|l| Rc::as_ptr(l).cast::<()>()),
        }
    }
}

/// The kind of term a [`Node`] represents, also its primary sort rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Iri,
    Blank,
    Literal,
}

/// An interned, reference-counted RDF term: an IRI, a blank node, or a
/// literal. Equality is pointer identity (guaranteed by interning to agree
/// with content equality); ordering is the content-based total order used
/// by every index permutation.
#[derive(Clone)]
pub enum Node {
    Iri(Rc<IriData>),
    Blank(Rc<BlankData>),
    Literal(Rc<LiteralData>),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Iri(_) => NodeKind::Iri,
            Self::Blank(_) => NodeKind::Blank,
            Self::Literal(_) => NodeKind::Literal,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// The lexical form: the IRI string, the blank node id, or the
    /// literal's lexical value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Iri(d) => &d.bytes,
            Self::Blank(d) => &d.bytes,
            Self::Literal(d) => &d.bytes,
        }
    }

    /// The literal's datatype node, if this is a literal with one set.
    pub fn datatype(&self) -> Option<&Node> {
        match self {
            Self::Literal(d) => d.datatype.as_ref(),
            _ => None,
        }
    }

    /// The literal's language tag, if any.
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Literal(d) => d.language.as_deref().map(|l| &*l.bytes),
            _ => None,
        }
    }

    /// Current strong-reference count: the number of live handles to this
    /// node, counting quad positions that hold it, external caller handles,
    /// and (for IRIs used as a datatype) the literals referencing it.
    pub fn refs(&self) -> usize {
        match self {
            Self::Iri(d) => Rc::strong_count(d),
            Self::Blank(d) => Rc::strong_count(d),
            Self::Literal(d) => Rc::strong_count(d),
        }
    }

    /// Number of stored quads in which this node currently occupies the
    /// object position. Maintained by the store, not the interner.
    pub fn refs_as_obj(&self) -> usize {
        match self {
            Self::Iri(d) => d.refs_as_obj.get(),
            Self::Blank(d) => d.refs_as_obj.get(),
            Self::Literal(d) => d.refs_as_obj.get(),
        }
    }

    fn refs_as_obj_cell(&self) -> &Cell<usize> {
        match self {
            Self::Iri(d) => &d.refs_as_obj,
            Self::Blank(d) => &d.refs_as_obj,
            Self::Literal(d) => &d.refs_as_obj,
        }
    }

    pub(crate) fn data_ptr(&self) -> *const () {
        match self {
            Self::Iri(d) => Rc::as_ptr(d).cast::<()>(),
            Self::Blank(d) => Rc::as_ptr(d).cast::<()>(),
            Self::Literal(d) => Rc::as_ptr(d).cast::<()>(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.data_ptr() == other.data_ptr()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_ptr().hash(state);
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| match (self, other) {
                (Self::Iri(a), Self::Iri(b)) => a.bytes.cmp(&b.bytes),
                (Self::Blank(a), Self::Blank(b)) => a.bytes.cmp(&b.bytes),
                (Self::Literal(a), Self::Literal(b)) => a
                    .bytes
                    .cmp(&b.bytes)
                    .then_with(|| a.datatype.cmp(&b.datatype))
                    .then_with(|| {
                        let a_lang = a.language.as_ref().map(|l| &*l.bytes);
                        let b_lang = b.language.as_ref().map(|l| &*l.bytes);
                        a_lang.cmp(&b_lang)
                    }),
                _ => unreachable!("kind comparison already separates variants"),
            })
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(d) => write!(f, "<{}>", d.bytes),
            Self::Blank(d) => write!(f, "_:{}", d.bytes),
            Self::Literal(d) => {
                crate::escape::write_quoted(&d.bytes, f)?;
                if let Some(language) = &d.language {
                    write!(f, "@{}", language.bytes)
                } else if let Some(datatype) = &d.datatype {
                    write!(f, "^^{datatype}")
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Store-internal bookkeeping for [`Node::refs_as_obj`]. Deliberately not an
/// inherent `Node` method: these two calls must stay paired one-for-one with
/// a quad's object position entering and leaving a store (`Model::add`/
/// `remove` are the only intended callers), so the pairing is expressed as a
/// separate trait that has to be explicitly imported rather than an
/// always-visible `Node::incr_refs_as_obj()`/`decr_refs_as_obj()` any caller
/// could reach. `#[doc(hidden)]` keeps it out of generated docs; it is not
/// covered by this crate's semver guarantees.
#[doc(hidden)]
pub trait ObjectPositionRefs {
    #[doc(hidden)]
    fn incr_refs_as_obj(&self);
    #[doc(hidden)]
    fn decr_refs_as_obj(&self);
}

impl ObjectPositionRefs for Node {
    fn incr_refs_as_obj(&self) {
        let cell = self.refs_as_obj_cell();
        cell.set(cell.get() + 1);
    }

    fn decr_refs_as_obj(&self) {
        let cell = self.refs_as_obj_cell();
        debug_assert!(cell.get() > 0, "refs_as_obj decremented without a matching increment");
        cell.set(cell.get().saturating_sub(1));
    }
}
