use crate::core::{SymbolData, Value, f64_to_array_index, format_js_number, i32_to_array_index};
use crate::unicode::{utf8_to_utf16, utf16_to_array_index, utf16_to_utf8};
use crate::{JSError, raise_type_error};
use std::rc::Rc;

/// A property key. Strings that spell a canonical array index are always
/// stored as `Index`, so `"3"` and `3` are the same key.
#[derive(Clone, Debug)]
pub enum PropertyKey {
    String(Vec<u16>),
    Index(u32),
    Symbol(Rc<SymbolData>),
}

impl PropertyKey {
    pub fn from_utf16(s: Vec<u16>) -> Self {
        match utf16_to_array_index(&s) {
            Some(idx) => PropertyKey::Index(idx),
            None => PropertyKey::String(s),
        }
    }

    /// ToPropertyKey for primitive values. Objects need the evaluator's
    /// ToPrimitive first and are rejected here.
    pub fn from_value(val: &Value) -> Result<Self, JSError> {
        match val {
            Value::Symbol(sym) => Ok(PropertyKey::Symbol(sym.clone())),
            Value::String(s) => Ok(PropertyKey::from_utf16(s.clone())),
            Value::Int(i) => Ok(match i32_to_array_index(*i) {
                Some(idx) => PropertyKey::Index(idx),
                None => PropertyKey::String(utf8_to_utf16(&i.to_string())),
            }),
            Value::Number(n) => Ok(match f64_to_array_index(*n) {
                Some(idx) => PropertyKey::Index(idx),
                None => PropertyKey::String(utf8_to_utf16(&format_js_number(*n))),
            }),
            Value::BigInt(b) => Ok(PropertyKey::from_utf16(utf8_to_utf16(&b.to_string()))),
            Value::Boolean(b) => Ok(PropertyKey::from(if *b { "true" } else { "false" })),
            Value::Undefined => Ok(PropertyKey::from("undefined")),
            Value::Null => Ok(PropertyKey::from("null")),
            Value::Object(_) | Value::Foreign(_) | Value::HostBindings(_) => {
                Err(raise_type_error!("Cannot convert {} to a property key without ToPrimitive", val.type_of()))
            }
        }
    }

    /// ToArrayIndex: the index this key denotes, if any.
    #[inline]
    pub fn to_array_index(&self) -> Option<u32> {
        match self {
            PropertyKey::Index(idx) => Some(*idx),
            _ => None,
        }
    }

    pub fn is_length(&self) -> bool {
        matches!(self, PropertyKey::String(s) if s.iter().copied().eq("length".encode_utf16()))
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::from_utf16(utf8_to_utf16(s))
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::from(s.as_str())
    }
}

impl From<u32> for PropertyKey {
    fn from(idx: u32) -> Self {
        if idx <= crate::core::MAX_ARRAY_INDEX {
            PropertyKey::Index(idx)
        } else {
            PropertyKey::String(utf8_to_utf16(&idx.to_string()))
        }
    }
}

impl From<Rc<SymbolData>> for PropertyKey {
    fn from(sym: Rc<SymbolData>) -> Self {
        PropertyKey::Symbol(sym)
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyKey::String(s1), PropertyKey::String(s2)) => s1 == s2,
            (PropertyKey::Index(i1), PropertyKey::Index(i2)) => i1 == i2,
            (PropertyKey::Symbol(sym1), PropertyKey::Symbol(sym2)) => Rc::ptr_eq(sym1, sym2),
            _ => false,
        }
    }
}

impl Eq for PropertyKey {}

impl std::hash::Hash for PropertyKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            PropertyKey::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            PropertyKey::Index(idx) => {
                1u8.hash(state);
                idx.hash(state);
            }
            PropertyKey::Symbol(sym) => {
                2u8.hash(state);
                Rc::as_ptr(sym).hash(state);
            }
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", utf16_to_utf8(s)),
            PropertyKey::Index(idx) => write!(f, "{idx}"),
            PropertyKey::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}
