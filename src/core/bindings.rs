use crate::core::{PropertyKey, Value};
use crate::unicode::utf16_to_utf8_exact;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A name table owned by the embedding host (e.g. script-engine bindings).
/// Cloning shares the table.
#[derive(Clone, Default, Debug)]
pub struct HostBindings {
    table: Rc<RefCell<IndexMap<String, Value>>>,
}

impl HostBindings {
    pub fn new() -> Self {
        HostBindings::default()
    }

    pub fn put(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.table.borrow_mut().insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.table.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.borrow().contains_key(name)
    }

    /// Removes the entry named by `key`. Bindings are keyed by Rust strings,
    /// so a symbol key or a key holding a lone surrogate never matches.
    pub fn remove(&self, key: &PropertyKey) -> bool {
        let name = match key {
            PropertyKey::String(s) => match utf16_to_utf8_exact(s) {
                Some(name) => name,
                None => return false,
            },
            PropertyKey::Index(idx) => idx.to_string(),
            PropertyKey::Symbol(_) => return false,
        };
        self.table.borrow_mut().shift_remove(&name).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &HostBindings) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }

    pub fn as_ptr(&self) -> *const RefCell<IndexMap<String, Value>> {
        Rc::as_ptr(&self.table)
    }
}
