//! Values owned by a foreign runtime, reachable only through the
//! [`ForeignObject`] capability trait.

use crate::core::{PropertyKey, SymbolData, Value};
use crate::unicode::{utf16_to_utf8, utf16_to_utf8_exact};
use std::rc::Rc;

pub type ForeignRef = Rc<dyn ForeignObject>;

/// Failures a foreign value may report for a member message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InteropError {
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("Message not supported: {0}")]
    UnsupportedMessage(&'static str),
}

/// A property key in the form handed across the interop boundary.
#[derive(Clone, Debug)]
pub enum ForeignKey {
    String(String),
    Index(u32),
    Symbol(Rc<SymbolData>),
}

impl PartialEq for ForeignKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ForeignKey::String(a), ForeignKey::String(b)) => a == b,
            (ForeignKey::Index(a), ForeignKey::Index(b)) => a == b,
            (ForeignKey::Symbol(a), ForeignKey::Symbol(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForeignKey::String(s) => write!(f, "{s}"),
            ForeignKey::Index(idx) => write!(f, "{idx}"),
            ForeignKey::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}

/// A string key with a lone surrogate has no foreign spelling and is reported
/// as an unknown identifier.
impl TryFrom<&PropertyKey> for ForeignKey {
    type Error = InteropError;

    fn try_from(key: &PropertyKey) -> Result<Self, Self::Error> {
        match key {
            PropertyKey::String(s) => utf16_to_utf8_exact(s)
                .map(ForeignKey::String)
                .ok_or_else(|| InteropError::UnknownIdentifier(utf16_to_utf8(s))),
            PropertyKey::Index(idx) => Ok(ForeignKey::Index(*idx)),
            PropertyKey::Symbol(sym) => Ok(ForeignKey::Symbol(sym.clone())),
        }
    }
}

pub trait ForeignObject {
    /// Name of the foreign type, for diagnostics.
    fn type_name(&self) -> &str {
        "foreign"
    }

    fn has_member(&self, _key: &ForeignKey) -> bool {
        false
    }

    fn remove_member(&self, key: &ForeignKey) -> Result<(), InteropError>;

    /// The primitive this value unboxes to, if it is a boxed primitive.
    /// Implementations must return a primitive, never another foreign value.
    fn to_primitive(&self) -> Option<Value> {
        None
    }
}

/// Removes `key` from a foreign value. Unknown members and unsupported
/// removal both report `false`.
pub fn remove_member(foreign: &ForeignRef, key: &PropertyKey) -> bool {
    let exported = match ForeignKey::try_from(key) {
        Ok(exported) => exported,
        Err(e) => {
            log::debug!("remove_member on {} for '{}' not sent: {}", foreign.type_name(), key, e);
            return false;
        }
    };
    match foreign.remove_member(&exported) {
        Ok(()) => true,
        Err(e) => {
            log::debug!(
                "remove_member on {} for '{}' failed: {} (has_member={})",
                foreign.type_name(),
                exported,
                e,
                foreign.has_member(&exported)
            );
            false
        }
    }
}
