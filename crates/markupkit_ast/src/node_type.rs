//! Interned node type tags.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use parking_lot::Mutex;
use serde::{Serialize, Serializer};

static INTERNED: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();

/// The type tag of a syntax tree node.
///
/// A `NodeType` is a `'static` string name. Types declared with [`NodeType::new`]
/// use the literal directly; names only known at runtime go through
/// [`NodeType::intern`], which hands out one shared allocation per distinct
/// name. Comparison checks pointer identity first and falls back to the name.
#[derive(Clone, Copy)]
pub struct NodeType(&'static str);

impl NodeType {
    /// Container whose children splice into whatever parent receives it.
    pub const FRAGMENT: NodeType = NodeType("{{fragment}}");

    /// Text consumed by a rule that produced no node of its own.
    pub const ANONYMOUS: NodeType = NodeType("anonymous");

    /// Creates a node type from a static name.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the node type for a name known only at runtime.
    pub fn intern(name: &str) -> Self {
        let mut interned = INTERNED.get_or_init(|| Mutex::new(HashSet::new())).lock();
        if let Some(existing) = interned.get(name) {
            return Self(*existing);
        }
        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        interned.insert(leaked);
        Self(leaked)
    }

    /// The name of this type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl PartialEq for NodeType {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0) || self.0 == other.0
    }
}

impl Eq for NodeType {}

impl Hash for NodeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({})", self.0)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}
