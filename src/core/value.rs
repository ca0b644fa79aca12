use crate::core::{ForeignRef, HostBindings, PropertyKey, canonical_f64_bits};
use crate::js_array::ArrayStorage;
use crate::unicode::{utf8_to_utf16, utf16_to_utf8};
use num_bigint::BigInt;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

pub type JSObjectDataPtr = Rc<RefCell<JSObjectData>>;

#[inline]
pub fn new_js_object_data() -> JSObjectDataPtr {
    Rc::new(RefCell::new(JSObjectData::new()))
}

/// Own state of an ordinary object: its property table and, for arrays, the
/// element storage that backs the indexed properties.
#[derive(Clone, Default, Debug)]
pub struct JSObjectData {
    pub properties: indexmap::IndexMap<PropertyKey, Value>,
    pub non_configurable: HashSet<PropertyKey>,
    pub array: Option<ArrayStorage>,
}

impl JSObjectData {
    pub fn new() -> Self {
        JSObjectData::default()
    }

    pub fn insert(&mut self, key: impl Into<PropertyKey>, val: Value) {
        self.properties.insert(key.into(), val);
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        self.properties.contains_key(key)
    }

    /// Removes the property and its attribute marker. Order of the
    /// remaining properties is preserved.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<Value> {
        self.non_configurable.remove(key);
        self.properties.shift_remove(key)
    }

    pub fn set_non_configurable(&mut self, key: impl Into<PropertyKey>) {
        self.non_configurable.insert(key.into());
    }

    pub fn set_configurable(&mut self, key: impl Into<PropertyKey>) {
        self.non_configurable.remove(&key.into());
    }

    pub fn is_configurable(&self, key: &PropertyKey) -> bool {
        !self.non_configurable.contains(key)
    }

    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }
}

#[derive(Debug)]
pub struct SymbolData {
    pub description: Option<String>,
}

impl SymbolData {
    pub fn new(description: Option<&str>) -> Rc<SymbolData> {
        Rc::new(SymbolData {
            description: description.map(str::to_string),
        })
    }
}

impl std::fmt::Display for SymbolData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "Symbol({desc})"),
            None => write!(f, "Symbol()"),
        }
    }
}

#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Int(i32),
    Number(f64),
    BigInt(BigInt),
    String(Vec<u16>), // UTF-16 code units
    Boolean(bool),
    Symbol(Rc<SymbolData>),
    Object(JSObjectDataPtr),
    Foreign(ForeignRef),
    HostBindings(HostBindings),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Int,
    Number,
    BigInt,
    String,
    Boolean,
    Symbol,
    Object,
    Foreign,
    HostBindings,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Number(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Object(_) => ValueKind::Object,
            Value::Foreign(_) => ValueKind::Foreign,
            Value::HostBindings(_) => ValueKind::HostBindings,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::Foreign(_) | Value::HostBindings(_))
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Int(_) | Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Symbol(_) => "symbol",
            Value::Null | Value::Object(_) | Value::Foreign(_) | Value::HostBindings(_) => "object",
        }
    }

    /// The Number payload of `Int` and `Number` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(f64::from(*i)),
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// SameValueZero: SameValue, except that +0 and -0 are equal.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return (a.is_nan() && b.is_nan()) || a == b;
        }
        self == other
    }

    pub fn string(s: &str) -> Value {
        Value::String(utf8_to_utf16(s))
    }
}

/// SameValue (`Object.is`). `Int` and `Number` are both the language Number.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return canonical_f64_bits(a) == canonical_f64_bits(b);
        }
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Foreign(a), Value::Foreign(b)) => Rc::ptr_eq(a, b),
            (Value::HostBindings(a), Value::HostBindings(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// Objects are printed by address: the object graph may be cyclic.
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::BigInt(b) => write!(f, "{b}n"),
            Value::String(s) => write!(f, "{:?}", utf16_to_utf8(s)),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::Object(obj) => write!(f, "[object {:p}]", Rc::as_ptr(obj)),
            Value::Foreign(foreign) => write!(f, "[foreign {} {:p}]", foreign.type_name(), Rc::as_ptr(foreign)),
            Value::HostBindings(bindings) => write!(f, "[bindings {:p}]", bindings.as_ptr()),
        }
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}

impl From<Rc<SymbolData>> for Value {
    fn from(sym: Rc<SymbolData>) -> Self {
        Value::Symbol(sym)
    }
}

impl From<JSObjectDataPtr> for Value {
    fn from(obj: JSObjectDataPtr) -> Self {
        Value::Object(obj)
    }
}
