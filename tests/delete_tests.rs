use jsdelete::*;
use std::cell::RefCell;
use std::rc::Rc;

// Initialize logger for this integration test binary so `RUST_LOG` is honored.
// Using `ctor` ensures initialization runs before tests start.
#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

/// Forwards to the ordinary store and counts how often it was consulted.
#[derive(Default)]
struct CountingStore {
    calls: usize,
}

impl PropertyStore for CountingStore {
    fn delete_property(&mut self, obj: &JSObjectDataPtr, key: &PropertyKey, strict: bool) -> Result<bool, JSError> {
        self.calls += 1;
        ordinary_delete(obj, key, strict)
    }
}

/// A foreign map whose members live in a host-side table.
struct ForeignMap {
    members: RefCell<Vec<String>>,
    removable: bool,
    removed: RefCell<Vec<ForeignKey>>,
}

impl ForeignMap {
    fn new(members: &[&str], removable: bool) -> Rc<ForeignMap> {
        Rc::new(ForeignMap {
            members: RefCell::new(members.iter().map(|m| m.to_string()).collect()),
            removable,
            removed: RefCell::new(Vec::new()),
        })
    }
}

impl ForeignObject for ForeignMap {
    fn type_name(&self) -> &str {
        "ForeignMap"
    }

    fn has_member(&self, key: &ForeignKey) -> bool {
        self.members.borrow().contains(&key.to_string())
    }

    fn remove_member(&self, key: &ForeignKey) -> Result<(), InteropError> {
        if !self.removable {
            return Err(InteropError::UnsupportedMessage("remove"));
        }
        let name = key.to_string();
        let mut members = self.members.borrow_mut();
        match members.iter().position(|m| *m == name) {
            Some(pos) => {
                members.remove(pos);
                self.removed.borrow_mut().push(key.clone());
                Ok(())
            }
            None => Err(InteropError::UnknownIdentifier(name)),
        }
    }
}

#[cfg(test)]
mod delete_tests {
    use super::*;

    fn delete(target: &Value, key: impl Into<PropertyKey>, strict: bool) -> Result<bool, JSError> {
        delete_property(target, &key.into(), strict, &mut OrdinaryPropertyStore)
    }

    #[test]
    fn test_fast_array_delete_is_idempotent() {
        let arr = create_array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let target = Value::Object(arr.clone());
        assert!(delete(&target, 1u32, false).unwrap());
        assert_eq!(get_array_length(&arr), Some(3));
        assert!(delete(&target, 1u32, false).unwrap());
        assert_eq!(get_array_length(&arr), Some(3));
        let storage = arr.borrow().array.clone().unwrap();
        assert_eq!(storage.to_vec(), vec![Some(Value::Int(1)), None, Some(Value::Int(3))]);
    }

    #[test]
    fn test_fast_array_delete_succeeds_in_strict_mode() {
        let arr = create_array(vec![Value::from("a"), Value::from("b")]);
        assert!(delete(&Value::Object(arr.clone()), 0u32, true).unwrap());
        assert!(delete(&Value::Object(arr.clone()), 99u32, true).unwrap());
        assert_eq!(get_array_length(&arr), Some(2));
    }

    #[test]
    fn test_fast_array_delete_with_string_index_key() {
        let arr = create_array(vec![Value::Int(5), Value::Int(6)]);
        assert!(delete(&Value::Object(arr.clone()), "1", false).unwrap());
        assert!(!arr.borrow().array.as_ref().unwrap().has_element(1));
    }

    #[test]
    fn test_fast_array_path_skips_generic_store() {
        let arr = create_array(vec![Value::Int(1), Value::Int(2)]);
        let target = Value::Object(arr.clone());
        let mut store = CountingStore::default();
        assert!(delete_property(&target, &PropertyKey::Index(0), false, &mut store).unwrap());
        assert_eq!(store.calls, 0);

        // Named keys on the same array go through the store.
        assert!(delete_property(&target, &PropertyKey::from("foo"), false, &mut store).unwrap());
        assert_eq!(store.calls, 1);
    }

    #[test]
    fn test_array_with_readonly_length_uses_generic_store() {
        let arr = create_array(vec![Value::Int(1), Value::Int(2)]);
        arr.borrow_mut().array.as_mut().unwrap().prevent_length_write();
        let mut store = CountingStore::default();
        assert!(delete_property(&Value::Object(arr.clone()), &PropertyKey::Index(0), false, &mut store).unwrap());
        assert_eq!(store.calls, 1);
        assert!(!arr.borrow().array.as_ref().unwrap().has_element(0));
        assert_eq!(get_array_length(&arr), Some(2));
    }

    #[test]
    fn test_sparse_array_uses_generic_store() {
        let arr = create_array(vec![]);
        arr.borrow_mut().array.as_mut().unwrap().set(100_000, Value::Int(1)).unwrap();
        let mut store = CountingStore::default();
        assert!(delete_property(&Value::Object(arr.clone()), &PropertyKey::Index(100_000), false, &mut store).unwrap());
        assert_eq!(store.calls, 1);
        assert_eq!(arr.borrow().array.as_ref().unwrap().get(100_000), None);
    }

    #[test]
    fn test_array_length_is_not_deletable() {
        let arr = Value::Object(create_array(vec![Value::Int(1)]));
        assert!(!delete(&arr, "length", false).unwrap());
        let err = delete(&arr, "length", true).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_frozen_array_elements() {
        let arr = create_array(vec![Value::Int(1), Value::Int(2)]);
        freeze_object(&arr);
        let target = Value::Object(arr.clone());
        assert!(!delete(&target, 0u32, false).unwrap());
        assert!(delete(&target, 0u32, true).unwrap_err().is_type_error());
        // Nothing to delete past the end.
        assert!(delete(&target, 7u32, true).unwrap());
        assert_eq!(arr.borrow().array.as_ref().unwrap().get(0), Some(Value::Int(1)));
    }

    #[test]
    fn test_ordinary_object_delete() {
        let obj = new_js_object_data();
        obj.borrow_mut().insert("a", Value::Int(1));
        obj.borrow_mut().insert("b", Value::Int(2));
        obj.borrow_mut().set_non_configurable("b");
        let target = Value::Object(obj.clone());

        assert!(delete(&target, "a", false).unwrap());
        assert!(!obj.borrow().contains_key(&PropertyKey::from("a")));
        assert!(delete(&target, "missing", true).unwrap());

        assert!(!delete(&target, "b", false).unwrap());
        let err = delete(&target, "b", true).unwrap_err();
        assert!(err.is_type_error());
        assert!(err.message().contains("Cannot delete property 'b'"));
        assert_eq!(obj.borrow().get(&PropertyKey::from("b")), Some(&Value::Int(2)));

        obj.borrow_mut().set_configurable("b");
        assert!(delete(&target, "b", true).unwrap());
    }

    #[test]
    fn test_ordinary_object_index_keys() {
        let obj = new_js_object_data();
        obj.borrow_mut().insert(PropertyKey::Index(0), Value::from("zero"));
        let target = Value::Object(obj.clone());
        assert!(delete(&target, "0", false).unwrap());
        assert!(obj.borrow().properties.is_empty());
    }

    #[test]
    fn test_symbol_keyed_property() {
        let sym = SymbolData::new(Some("tag"));
        let obj = new_js_object_data();
        obj.borrow_mut().insert(sym.clone(), Value::Boolean(true));
        let target = Value::Object(obj.clone());
        // A different symbol with the same description is a different key.
        assert!(delete(&target, SymbolData::new(Some("tag")), false).unwrap());
        assert_eq!(obj.borrow().properties.len(), 1);
        assert!(delete(&target, sym, false).unwrap());
        assert!(obj.borrow().properties.is_empty());
    }

    #[test]
    fn test_sealed_object() {
        let obj = new_js_object_data();
        obj.borrow_mut().insert("x", Value::Null);
        seal_object(&obj);
        assert!(!delete(&Value::Object(obj), "x", false).unwrap());
    }

    #[test]
    fn test_symbol_target_is_vacuous() {
        let target = Value::Symbol(SymbolData::new(Some("s")));
        for key in [PropertyKey::from("description"), PropertyKey::Index(0), PropertyKey::from("length")] {
            assert!(delete(&target, key.clone(), false).unwrap());
            assert!(delete(&target, key, true).unwrap());
        }
    }

    #[test]
    fn test_string_target() {
        let s = Value::from("abc");
        assert!(!delete(&s, "length", false).unwrap());
        assert!(!delete(&s, "length", true).unwrap());
        assert!(delete(&s, 5u32, false).unwrap());
        assert!(delete(&s, 3u32, false).unwrap());
        assert!(!delete(&s, 1u32, false).unwrap());
        assert!(!delete(&s, "2", false).unwrap());
        assert!(delete(&s, "foo", false).unwrap());
        assert!(delete(&s, "-1", false).unwrap());
        assert!(delete(&s, SymbolData::new(None), false).unwrap());
    }

    #[test]
    fn test_empty_string_target() {
        let s = Value::from("");
        assert!(delete(&s, 0u32, false).unwrap());
        assert!(!delete(&s, "length", false).unwrap());
    }

    #[test]
    fn test_host_bindings_target() {
        let bindings = HostBindings::new();
        bindings.put("answer", Value::Int(42));
        bindings.put("0", Value::Boolean(false));
        let target = Value::HostBindings(bindings.clone());

        assert!(delete(&target, "answer", false).unwrap());
        assert!(!bindings.contains("answer"));
        assert!(!delete(&target, "answer", false).unwrap());
        assert!(!delete(&target, SymbolData::new(Some("answer")), false).unwrap());
        assert!(delete(&target, 0u32, true).unwrap());
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_foreign_target() {
        let foreign = ForeignMap::new(&["x", "1"], true);
        let target = Value::Foreign(foreign.clone());

        assert!(delete(&target, "x", false).unwrap());
        assert!(!foreign.has_member(&ForeignKey::String("x".to_string())));
        assert!(!delete(&target, "x", false).unwrap());
        assert!(!delete(&target, "unknown", true).unwrap());
        assert!(delete(&target, 1u32, false).unwrap());
        assert_eq!(
            *foreign.removed.borrow(),
            vec![ForeignKey::String("x".to_string()), ForeignKey::Index(1)]
        );
    }

    #[test]
    fn test_foreign_target_without_remove_support() {
        let foreign = ForeignMap::new(&["x"], false);
        let target = Value::Foreign(foreign.clone());
        assert!(!delete(&target, "x", false).unwrap());
        assert!(!delete(&target, "x", true).unwrap());
        assert!(foreign.has_member(&ForeignKey::String("x".to_string())));
    }

    #[test]
    fn test_remove_member_maps_failures_to_false() {
        let foreign: ForeignRef = ForeignMap::new(&["a"], true);
        assert!(!remove_member(&foreign, &PropertyKey::from("b")));
        assert!(remove_member(&foreign, &PropertyKey::from("a")));
    }

    #[test]
    fn test_lone_surrogate_key_on_host_bindings() {
        let bindings = HostBindings::new();
        bindings.put("\u{FFFD}", Value::Int(1));
        let target = Value::HostBindings(bindings.clone());
        let lone = PropertyKey::from_utf16(vec![0xD800]);

        assert!(!delete_property(&target, &lone, false, &mut OrdinaryPropertyStore).unwrap());
        assert!(!delete_property(&target, &lone, true, &mut OrdinaryPropertyStore).unwrap());
        assert_eq!(bindings.len(), 1);
        assert!(delete(&target, "\u{FFFD}", false).unwrap());
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_lone_surrogate_key_on_foreign_target() {
        let high = PropertyKey::from_utf16(vec![0xD800]);
        let low = PropertyKey::from_utf16(vec![0xDC00]);
        assert!(ForeignKey::try_from(&high).is_err());
        assert!(ForeignKey::try_from(&low).is_err());

        let foreign = ForeignMap::new(&["\u{FFFD}"], true);
        let target = Value::Foreign(foreign.clone());
        assert!(!delete_property(&target, &high, false, &mut OrdinaryPropertyStore).unwrap());
        assert!(!delete_property(&target, &low, true, &mut OrdinaryPropertyStore).unwrap());
        assert!(foreign.removed.borrow().is_empty());
        assert!(foreign.has_member(&ForeignKey::String("\u{FFFD}".to_string())));
    }

    #[test]
    fn test_array_index_held_in_property_table() {
        let arr = create_array(vec![]);
        arr.borrow_mut().insert(PropertyKey::Index(0), Value::Null);
        let target = Value::Object(arr.clone());
        let mut store = CountingStore::default();

        assert!(delete_property(&target, &PropertyKey::Index(0), false, &mut store).unwrap());
        assert_eq!(store.calls, 1);
        assert!(arr.borrow().properties.is_empty());
        assert_eq!(get_array_length(&arr), Some(0));
    }

    #[test]
    fn test_non_configurable_index_in_property_table_of_array() {
        let arr = create_array(vec![Value::Int(7)]);
        {
            let mut data = arr.borrow_mut();
            data.insert(PropertyKey::Index(3), Value::Int(9));
            data.set_non_configurable(PropertyKey::Index(3));
        }
        let target = Value::Object(arr.clone());

        assert!(!delete(&target, 3u32, false).unwrap());
        assert!(delete(&target, 3u32, true).unwrap_err().is_type_error());
        assert_eq!(arr.borrow().get(&PropertyKey::Index(3)), Some(&Value::Int(9)));

        // The element storage still takes the fast path.
        assert!(delete(&target, 0u32, true).unwrap());
        assert!(!arr.borrow().array.as_ref().unwrap().has_element(0));
    }

    #[test]
    fn test_other_primitives_are_vacuous() {
        let targets = [
            Value::Int(1),
            Value::Number(1.5),
            Value::Boolean(true),
            Value::BigInt(num_bigint::BigInt::from(7)),
            Value::Undefined,
            Value::Null,
        ];
        for target in targets {
            assert!(delete(&target, "x", true).unwrap());
            assert!(delete(&target, 0u32, false).unwrap());
        }
    }

    #[test]
    fn test_operator_with_value_keys() {
        let arr = create_array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let op = DeletePropertyOperator::create_non_strict();
        assert!(!op.is_strict());
        let mut store = OrdinaryPropertyStore;
        let target = Value::Object(arr.clone());
        assert!(op.execute_value_key(&target, &Value::Number(2.0), &mut store).unwrap());
        assert!(op.execute_value_key(&target, &Value::from("0"), &mut store).unwrap());
        let storage = arr.borrow().array.clone().unwrap();
        assert_eq!(storage.to_vec(), vec![None, Some(Value::Int(2)), None]);

        let err = op.execute_value_key(&target, &Value::Object(new_js_object_data()), &mut store).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_strict_operator() {
        let obj = new_js_object_data();
        obj.borrow_mut().insert("k", Value::Int(1));
        obj.borrow_mut().set_non_configurable("k");
        let op = DeletePropertyOperator::create(true);
        assert!(op.is_strict());
        let result = op.execute(&Value::Object(obj), &PropertyKey::from("k"), &mut OrdinaryPropertyStore);
        assert!(result.unwrap_err().is_type_error());
    }
}
