//! Per-node property bag.
//!
//! Downstream consumers (renderers, replacement logic) attach metadata to
//! nodes through typed keys. The parser never reads or writes properties.
//!
//! Values are stored as a closed [`PropertyValue`] union tagged by the key's
//! [`PropertyKey::NAME`], so reading a property is a match on the variant.

use std::ops::Range;

use parking_lot::RwLock;

/// A value stored in a node's property bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Flag(bool),
    Integer(i64),
    Text(String),
    /// A range of UTF-16 code units, relative to the node.
    Span(Range<usize>),
}

/// Conversion between a key's value type and [`PropertyValue`].
pub trait PropertyType: Sized {
    fn into_value(self) -> PropertyValue;

    /// Returns `None` if `value` holds a different variant.
    fn from_value(value: &PropertyValue) -> Option<Self>;
}

impl PropertyType for bool {
    fn into_value(self) -> PropertyValue {
        PropertyValue::Flag(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl PropertyType for i64 {
    fn into_value(self) -> PropertyValue {
        PropertyValue::Integer(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Integer(integer) => Some(*integer),
            _ => None,
        }
    }
}

impl PropertyType for String {
    fn into_value(self) -> PropertyValue {
        PropertyValue::Text(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl PropertyType for Range<usize> {
    fn into_value(self) -> PropertyValue {
        PropertyValue::Span(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Span(span) => Some(span.clone()),
            _ => None,
        }
    }
}

impl PropertyType for PropertyValue {
    fn into_value(self) -> PropertyValue {
        self
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// A typed key for attaching metadata to a node.
///
/// # Example
///
/// ```rust
/// use markupkit_ast::{NodeType, PropertyKey, SyntaxTreeNode};
///
/// struct Replacement;
///
/// impl PropertyKey for Replacement {
///     const NAME: &'static str = "replacement";
///     type Value = String;
/// }
///
/// let node = SyntaxTreeNode::terminal(NodeType::new("emoji"), 5);
/// node.set_property::<Replacement>(":)".to_string());
/// assert_eq!(node.property::<Replacement>().as_deref(), Some(":)"));
/// ```
pub trait PropertyKey {
    /// Tag the value is stored under. Keys sharing a name share a slot.
    const NAME: &'static str;

    /// The type of value stored under this key.
    type Value: PropertyType;
}

/// Storage for node properties. An empty bag holds no heap allocation.
#[derive(Default)]
pub(crate) struct PropertyBag {
    slots: RwLock<Vec<(&'static str, PropertyValue)>>,
}

impl PropertyBag {
    pub(crate) fn get<K: PropertyKey>(&self) -> Option<K::Value> {
        let slots = self.slots.read();
        slots
            .iter()
            .find(|(name, _)| *name == K::NAME)
            .and_then(|(_, value)| K::Value::from_value(value))
    }

    pub(crate) fn insert<K: PropertyKey>(&self, value: K::Value) -> Option<K::Value> {
        let mut slots = self.slots.write();
        let value = value.into_value();
        match slots.iter_mut().find(|(name, _)| *name == K::NAME) {
            Some(slot) => {
                let previous = std::mem::replace(&mut slot.1, value);
                K::Value::from_value(&previous)
            }
            None => {
                slots.push((K::NAME, value));
                None
            }
        }
    }

    pub(crate) fn remove<K: PropertyKey>(&self) -> Option<K::Value> {
        let mut slots = self.slots.write();
        let position = slots.iter().position(|(name, _)| *name == K::NAME)?;
        let (_, value) = slots.swap_remove(position);
        K::Value::from_value(&value)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}
