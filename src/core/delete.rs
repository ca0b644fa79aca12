use crate::JSError;
use crate::core::{JSObjectDataPtr, PropertyKey, Value, remove_member};
use crate::js_object::PropertyStore;
use crate::js_string::is_string_own_property;
#[cfg(feature = "profile")]
use std::cell::Cell;

/// The case of the `delete` operator a (target, key) pair was handled by,
/// in dispatch order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeleteBranch {
    ArrayFastPath,
    Object,
    Symbol,
    String,
    HostBindings,
    Foreign,
    Other,
}

/// `delete target[key]`.
///
/// Only the generic object store can fail, with a TypeError for a
/// non-configurable property in strict mode. Every other case reports a plain
/// boolean.
pub fn delete_property(target: &Value, key: &PropertyKey, strict: bool, store: &mut dyn PropertyStore) -> Result<bool, JSError> {
    dispatch_delete(target, key, strict, store).1
}

fn dispatch_delete(
    target: &Value,
    key: &PropertyKey,
    strict: bool,
    store: &mut dyn PropertyStore,
) -> (DeleteBranch, Result<bool, JSError>) {
    let (branch, result) = match target {
        Value::Object(obj) => {
            if let Some(idx) = key.to_array_index()
                && delete_fast_array_element(obj, idx, strict)
            {
                (DeleteBranch::ArrayFastPath, Ok(true))
            } else {
                (DeleteBranch::Object, store.delete_property(obj, key, strict))
            }
        }
        // Symbols carry no own properties.
        Value::Symbol(_) => (DeleteBranch::Symbol, Ok(true)),
        Value::String(s) => (DeleteBranch::String, Ok(!is_string_own_property(s, key))),
        Value::HostBindings(bindings) => (DeleteBranch::HostBindings, Ok(bindings.remove(key))),
        Value::Foreign(foreign) => (DeleteBranch::Foreign, Ok(remove_member(foreign, key))),
        Value::Undefined | Value::Null | Value::Int(_) | Value::Number(_) | Value::BigInt(_) | Value::Boolean(_) => {
            (DeleteBranch::Other, Ok(true))
        }
    };
    log::trace!("delete {:?}[{}] strict={} via {:?}", target.kind(), key, strict, branch);
    (branch, result)
}

/// Deletes an element of a fast, length-writable array and swaps in the
/// storage it hands back. Returns false when the object does not qualify,
/// including when the index is held by the property table instead.
fn delete_fast_array_element(obj: &JSObjectDataPtr, index: u32, strict: bool) -> bool {
    let mut data = obj.borrow_mut();
    if !data.array.as_ref().is_some_and(|a| a.is_fast() && a.is_length_writable()) {
        return false;
    }
    if data.contains_key(&PropertyKey::Index(index)) {
        return false;
    }
    if let Some(array) = data.array.take() {
        let (array, deleted) = array.delete_element(index, strict);
        debug_assert!(deleted);
        data.array = Some(array);
    }
    true
}

/// How often each dispatch case was taken by one operator.
#[cfg(feature = "profile")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteProfile {
    pub array_fast_path: u64,
    pub object: u64,
    pub symbol: u64,
    pub string: u64,
    pub host_bindings: u64,
    pub foreign: u64,
    pub other: u64,
}

#[cfg(feature = "profile")]
impl DeleteProfile {
    fn record(&mut self, branch: DeleteBranch) {
        let counter = match branch {
            DeleteBranch::ArrayFastPath => &mut self.array_fast_path,
            DeleteBranch::Object => &mut self.object,
            DeleteBranch::Symbol => &mut self.symbol,
            DeleteBranch::String => &mut self.string,
            DeleteBranch::HostBindings => &mut self.host_bindings,
            DeleteBranch::Foreign => &mut self.foreign,
            DeleteBranch::Other => &mut self.other,
        };
        *counter += 1;
    }
}

/// A `delete` site: the strictness of the code it appears in is fixed when
/// the site is created.
#[derive(Debug, Default)]
pub struct DeletePropertyOperator {
    strict: bool,
    #[cfg(feature = "profile")]
    profile: Cell<DeleteProfile>,
}

impl DeletePropertyOperator {
    pub fn create(strict: bool) -> Self {
        DeletePropertyOperator {
            strict,
            #[cfg(feature = "profile")]
            profile: Cell::default(),
        }
    }

    pub fn create_non_strict() -> Self {
        DeletePropertyOperator::create(false)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn execute(&self, target: &Value, key: &PropertyKey, store: &mut dyn PropertyStore) -> Result<bool, JSError> {
        let (_branch, result) = dispatch_delete(target, key, self.strict, store);
        #[cfg(feature = "profile")]
        {
            let mut profile = self.profile.get();
            profile.record(_branch);
            self.profile.set(profile);
        }
        result
    }

    /// Like [`execute`](Self::execute), converting a primitive key with
    /// ToPropertyKey first.
    pub fn execute_value_key(&self, target: &Value, key: &Value, store: &mut dyn PropertyStore) -> Result<bool, JSError> {
        let key = PropertyKey::from_value(key)?;
        self.execute(target, &key, store)
    }

    #[cfg(feature = "profile")]
    pub fn profile(&self) -> DeleteProfile {
        self.profile.get()
    }
}
