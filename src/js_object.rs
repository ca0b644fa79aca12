use crate::core::{JSObjectDataPtr, PropertyKey};
use crate::{JSError, raise_type_error};

/// The generic object-store side of `delete`, used whenever an object can
/// not take the array fast path.
pub trait PropertyStore {
    /// Deletes an own property. Returns `Ok(false)` for a non-configurable
    /// property in sloppy mode and a TypeError for one in strict mode.
    fn delete_property(&mut self, obj: &JSObjectDataPtr, key: &PropertyKey, strict: bool) -> Result<bool, JSError>;
}

/// [[Delete]] of ordinary objects and array exotic objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdinaryPropertyStore;

impl PropertyStore for OrdinaryPropertyStore {
    fn delete_property(&mut self, obj: &JSObjectDataPtr, key: &PropertyKey, strict: bool) -> Result<bool, JSError> {
        ordinary_delete(obj, key, strict)
    }
}

pub fn ordinary_delete(obj: &JSObjectDataPtr, key: &PropertyKey, strict: bool) -> Result<bool, JSError> {
    let mut data = obj.borrow_mut();
    if let Some(array) = data.array.as_mut() {
        if key.is_length() {
            return reject_delete(key, "Array", strict);
        }
        if let Some(idx) = key.to_array_index()
            && array.has_element(idx)
        {
            if array.is_sealed() {
                return reject_delete(key, "Array", strict);
            }
            array.remove_element(idx);
            return Ok(true);
        }
    }

    // Index keys the element storage does not hold may still live in the
    // property table.

    if !data.contains_key(key) {
        return Ok(true);
    }
    if !data.is_configurable(key) {
        return reject_delete(key, "Object", strict);
    }
    data.remove(key);
    Ok(true)
}

fn reject_delete(key: &PropertyKey, class_name: &str, strict: bool) -> Result<bool, JSError> {
    if strict {
        Err(raise_type_error!("Cannot delete property '{}' of [object {}]", key, class_name))
    } else {
        Ok(false)
    }
}

/// Object.seal: every own property, and every element, becomes non-configurable.
pub fn seal_object(obj: &JSObjectDataPtr) {
    let mut data = obj.borrow_mut();
    let keys: Vec<PropertyKey> = data.properties.keys().cloned().collect();
    data.non_configurable.extend(keys);
    if let Some(array) = data.array.as_mut() {
        array.seal();
    }
}

/// Object.freeze. Only configurability and array writability are modelled.
pub fn freeze_object(obj: &JSObjectDataPtr) {
    seal_object(obj);
    if let Some(array) = obj.borrow_mut().array.as_mut() {
        array.freeze();
    }
}
