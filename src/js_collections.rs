//! Key normalization for Map and Set.
//!
//! Map and Set compare keys with SameValueZero. [`normalize`] maps every key
//! to a [`NormalizedKey`] such that SameValueZero-equal keys produce
//! representation-identical results, so the bucket structure can rely on
//! plain `Eq` and `Hash`.

use crate::core::{
    ForeignRef, HostBindings, JSObjectDataPtr, MAX_SAFE_INTEGER, SymbolData, Value, canonical_f64_bits, f64_to_safe_integer,
};
use num_bigint::BigInt;
use std::rc::Rc;

#[derive(Clone)]
pub enum NormalizedKey {
    Undefined,
    Null,
    /// Any Number that is an integer in the safe range, including both zeros.
    Integer(i64),
    /// Any other Number. All NaNs share one representation.
    Number(f64),
    BigInt(BigInt),
    String(Vec<u16>),
    Boolean(bool),
    Symbol(Rc<SymbolData>),
    Object(JSObjectDataPtr),
    Foreign(ForeignRef),
    HostBindings(HostBindings),
}

pub fn normalize(value: &Value) -> NormalizedKey {
    match value {
        Value::Int(i) => NormalizedKey::Integer(i64::from(*i)),
        Value::Number(n) => normalize_f64(*n),
        Value::String(s) => NormalizedKey::String(s.clone()),
        Value::Boolean(b) => NormalizedKey::Boolean(*b),
        Value::Symbol(sym) => NormalizedKey::Symbol(sym.clone()),
        Value::BigInt(b) => NormalizedKey::BigInt(b.clone()),
        Value::Object(obj) => NormalizedKey::Object(obj.clone()),
        Value::Undefined => NormalizedKey::Undefined,
        Value::Null => NormalizedKey::Null,
        Value::HostBindings(bindings) => NormalizedKey::HostBindings(bindings.clone()),
        Value::Foreign(foreign) => match foreign.to_primitive() {
            None => NormalizedKey::Foreign(foreign.clone()),
            Some(Value::Foreign(inner)) => {
                log::warn!("{} unboxed to another foreign value; keeping it opaque", foreign.type_name());
                NormalizedKey::Foreign(inner)
            }
            Some(primitive) => normalize(&primitive),
        },
    }
}

fn normalize_f64(n: f64) -> NormalizedKey {
    match f64_to_safe_integer(n) {
        Some(i) => NormalizedKey::Integer(i),
        None if n.is_nan() => NormalizedKey::Number(f64::NAN),
        None => NormalizedKey::Number(n),
    }
}

impl From<NormalizedKey> for Value {
    fn from(key: NormalizedKey) -> Self {
        match key {
            NormalizedKey::Integer(i) => match i32::try_from(i) {
                Ok(small) => Value::Int(small),
                Err(_) => {
                    debug_assert!(i.abs() <= MAX_SAFE_INTEGER);
                    Value::Number(i as f64)
                }
            },
            NormalizedKey::Number(n) => Value::Number(n),
            NormalizedKey::Undefined => Value::Undefined,
            NormalizedKey::Null => Value::Null,
            NormalizedKey::BigInt(b) => Value::BigInt(b),
            NormalizedKey::String(s) => Value::String(s),
            NormalizedKey::Boolean(b) => Value::Boolean(b),
            NormalizedKey::Symbol(sym) => Value::Symbol(sym),
            NormalizedKey::Object(obj) => Value::Object(obj),
            NormalizedKey::Foreign(foreign) => Value::Foreign(foreign),
            NormalizedKey::HostBindings(bindings) => Value::HostBindings(bindings),
        }
    }
}

impl PartialEq for NormalizedKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NormalizedKey::Undefined, NormalizedKey::Undefined) => true,
            (NormalizedKey::Null, NormalizedKey::Null) => true,
            (NormalizedKey::Integer(a), NormalizedKey::Integer(b)) => a == b,
            (NormalizedKey::Number(a), NormalizedKey::Number(b)) => canonical_f64_bits(*a) == canonical_f64_bits(*b),
            (NormalizedKey::BigInt(a), NormalizedKey::BigInt(b)) => a == b,
            (NormalizedKey::String(a), NormalizedKey::String(b)) => a == b,
            (NormalizedKey::Boolean(a), NormalizedKey::Boolean(b)) => a == b,
            (NormalizedKey::Symbol(a), NormalizedKey::Symbol(b)) => Rc::ptr_eq(a, b),
            (NormalizedKey::Object(a), NormalizedKey::Object(b)) => Rc::ptr_eq(a, b),
            (NormalizedKey::Foreign(a), NormalizedKey::Foreign(b)) => Rc::ptr_eq(a, b),
            (NormalizedKey::HostBindings(a), NormalizedKey::HostBindings(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for NormalizedKey {}

impl std::hash::Hash for NormalizedKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            NormalizedKey::Undefined | NormalizedKey::Null => {}
            NormalizedKey::Integer(i) => i.hash(state),
            NormalizedKey::Number(n) => canonical_f64_bits(*n).hash(state),
            NormalizedKey::BigInt(b) => b.hash(state),
            NormalizedKey::String(s) => s.hash(state),
            NormalizedKey::Boolean(b) => b.hash(state),
            NormalizedKey::Symbol(sym) => Rc::as_ptr(sym).hash(state),
            NormalizedKey::Object(obj) => Rc::as_ptr(obj).hash(state),
            NormalizedKey::Foreign(foreign) => Rc::as_ptr(foreign).cast::<()>().hash(state),
            NormalizedKey::HostBindings(bindings) => bindings.as_ptr().hash(state),
        }
    }
}

impl std::fmt::Debug for NormalizedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizedKey::Integer(i) => write!(f, "Integer({i})"),
            other => write!(f, "{:?}", Value::from(other.clone())),
        }
    }
}
