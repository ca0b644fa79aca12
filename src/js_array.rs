use crate::core::{JSObjectDataPtr, MAX_ARRAY_INDEX, Value, new_js_object_data};
use crate::{JSError, raise_range_error, raise_type_error};
use std::collections::BTreeMap;

/// Writes further than this past the dense end switch the array to sparse storage.
const MAX_DENSE_GAP: u32 = 1024;

/// Packing strategy of an array's elements.
#[derive(Clone, Debug, Default)]
pub enum ArrayKind {
    #[default]
    Empty,
    Int32(Vec<i32>),
    Double(Vec<f64>),
    Object(Vec<Value>),
    Holey(Vec<Option<Value>>),
    Sparse(BTreeMap<u32, Value>),
}

impl ArrayKind {
    pub fn name(&self) -> &'static str {
        match self {
            ArrayKind::Empty => "empty",
            ArrayKind::Int32(_) => "int32",
            ArrayKind::Double(_) => "double",
            ArrayKind::Object(_) => "object",
            ArrayKind::Holey(_) => "holey",
            ArrayKind::Sparse(_) => "sparse",
        }
    }

    fn dense_len(&self) -> usize {
        match self {
            ArrayKind::Empty | ArrayKind::Sparse(_) => 0,
            ArrayKind::Int32(v) => v.len(),
            ArrayKind::Double(v) => v.len(),
            ArrayKind::Object(v) => v.len(),
            ArrayKind::Holey(v) => v.len(),
        }
    }

    fn into_holey(self) -> Vec<Option<Value>> {
        match self {
            ArrayKind::Empty => Vec::new(),
            ArrayKind::Int32(v) => v.into_iter().map(|i| Some(Value::Int(i))).collect(),
            ArrayKind::Double(v) => v.into_iter().map(|n| Some(Value::Number(n))).collect(),
            ArrayKind::Object(v) => v.into_iter().map(Some).collect(),
            ArrayKind::Holey(v) => v,
            ArrayKind::Sparse(map) => {
                let len = map.last_key_value().map_or(0, |(k, _)| *k as usize + 1);
                let mut v = vec![None; len];
                for (k, val) in map {
                    v[k as usize] = Some(val);
                }
                v
            }
        }
    }

    fn into_sparse(self) -> BTreeMap<u32, Value> {
        match self {
            ArrayKind::Sparse(map) => map,
            other => other
                .into_holey()
                .into_iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i as u32, v)))
                .collect(),
        }
    }
}

/// Element storage of an array object. It is owned by exactly one object;
/// operations that may repack it take `self` and hand back the storage the
/// owner must keep.
#[derive(Clone, Debug)]
pub struct ArrayStorage {
    kind: ArrayKind,
    length: u32,
    length_writable: bool,
    sealed: bool,
    frozen: bool,
}

impl Default for ArrayStorage {
    fn default() -> Self {
        ArrayStorage {
            kind: ArrayKind::Empty,
            length: 0,
            length_writable: true,
            sealed: false,
            frozen: false,
        }
    }
}

impl ArrayStorage {
    pub fn new() -> Self {
        ArrayStorage::default()
    }

    /// Builds storage with the tightest packing that holds every value.
    /// Values past the largest array length are dropped.
    pub fn from_values(mut values: Vec<Value>) -> Self {
        let length = clamp_array_length(values.len());
        if values.len() > length as usize {
            log::warn!("array literal of {} values truncated to length {}", values.len(), length);
            values.truncate(length as usize);
        }
        let kind = if values.is_empty() {
            ArrayKind::Empty
        } else if values.iter().all(|v| matches!(v, Value::Int(_))) {
            ArrayKind::Int32(
                values
                    .into_iter()
                    .filter_map(|v| if let Value::Int(i) = v { Some(i) } else { None })
                    .collect(),
            )
        } else if values.iter().all(|v| v.as_f64().is_some()) {
            ArrayKind::Double(values.iter().filter_map(Value::as_f64).collect())
        } else {
            ArrayKind::Object(values)
        };
        ArrayStorage { kind, length, ..ArrayStorage::default() }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn kind(&self) -> &ArrayKind {
        &self.kind
    }

    /// Dense or holey packing whose elements can be removed without the
    /// generic property machinery.
    pub fn is_fast(&self) -> bool {
        !self.sealed && !matches!(self.kind, ArrayKind::Sparse(_))
    }

    pub fn is_length_writable(&self) -> bool {
        self.length_writable
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn get(&self, index: u32) -> Option<Value> {
        let i = index as usize;
        match &self.kind {
            ArrayKind::Empty => None,
            ArrayKind::Int32(v) => v.get(i).map(|n| Value::Int(*n)),
            ArrayKind::Double(v) => v.get(i).map(|n| Value::Number(*n)),
            ArrayKind::Object(v) => v.get(i).cloned(),
            ArrayKind::Holey(v) => v.get(i).cloned().flatten(),
            ArrayKind::Sparse(map) => map.get(&index).cloned(),
        }
    }

    pub fn has_element(&self, index: u32) -> bool {
        let i = index as usize;
        match &self.kind {
            ArrayKind::Holey(v) => v.get(i).is_some_and(Option::is_some),
            ArrayKind::Sparse(map) => map.contains_key(&index),
            kind => i < kind.dense_len(),
        }
    }

    fn has_elements_from(&self, start: u32) -> bool {
        match &self.kind {
            ArrayKind::Sparse(map) => map.range(start..).next().is_some(),
            kind => (start as usize..kind.dense_len()).any(|i| self.has_element(i as u32)),
        }
    }

    /// Elements in index order, holes as `None`.
    pub fn to_vec(&self) -> Vec<Option<Value>> {
        (0..self.length).map(|i| self.get(i)).collect()
    }

    pub fn set(&mut self, index: u32, value: Value) -> Result<(), JSError> {
        if index > MAX_ARRAY_INDEX {
            return Err(raise_range_error!("Invalid array index {index}"));
        }
        if self.frozen {
            return Err(raise_type_error!("Cannot assign to read only property '{index}' of frozen array"));
        }
        let present = self.has_element(index);
        if !present && self.sealed {
            return Err(raise_type_error!("Cannot add property {index}, array is not extensible"));
        }
        if index >= self.length && !self.length_writable {
            return Err(raise_type_error!("Cannot add property {index}, array length is not writable"));
        }

        let dense_len = self.kind.dense_len() as u32;
        let kind = std::mem::take(&mut self.kind);
        let before = kind.name();
        self.kind = match kind {
            ArrayKind::Sparse(mut map) => {
                map.insert(index, value);
                ArrayKind::Sparse(map)
            }
            kind if index > dense_len.saturating_add(MAX_DENSE_GAP) => {
                let mut map = kind.into_sparse();
                map.insert(index, value);
                ArrayKind::Sparse(map)
            }
            kind if index > dense_len => {
                let mut v = kind.into_holey();
                v.resize(index as usize, None);
                v.push(Some(value));
                ArrayKind::Holey(v)
            }
            kind => Self::store_dense(kind, index as usize, value),
        };
        if before != self.kind.name() {
            log::debug!("array storage transition {} -> {} (set index {})", before, self.kind.name(), index);
        }
        self.length = self.length.max(index + 1);
        Ok(())
    }

    // `index` is at most the current dense length.
    fn store_dense(kind: ArrayKind, index: usize, value: Value) -> ArrayKind {
        fn put<T>(v: &mut Vec<T>, index: usize, item: T) {
            if index == v.len() {
                v.push(item);
            } else {
                v[index] = item;
            }
        }
        match (kind, value) {
            (ArrayKind::Empty, Value::Int(i)) => ArrayKind::Int32(vec![i]),
            (ArrayKind::Empty, Value::Number(n)) => ArrayKind::Double(vec![n]),
            (ArrayKind::Empty, value) => ArrayKind::Object(vec![value]),
            (ArrayKind::Int32(mut v), Value::Int(i)) => {
                put(&mut v, index, i);
                ArrayKind::Int32(v)
            }
            (ArrayKind::Int32(v), Value::Number(n)) => {
                let mut v: Vec<f64> = v.into_iter().map(f64::from).collect();
                put(&mut v, index, n);
                ArrayKind::Double(v)
            }
            (ArrayKind::Double(mut v), value @ (Value::Int(_) | Value::Number(_))) => {
                put(&mut v, index, value.as_f64().unwrap_or(f64::NAN));
                ArrayKind::Double(v)
            }
            (ArrayKind::Object(mut v), value) => {
                put(&mut v, index, value);
                ArrayKind::Object(v)
            }
            (ArrayKind::Holey(mut v), value) => {
                put(&mut v, index, Some(value));
                ArrayKind::Holey(v)
            }
            (kind, value) => {
                let mut v: Vec<Value> = kind.into_holey().into_iter().map(|e| e.unwrap_or(Value::Undefined)).collect();
                put(&mut v, index, value);
                ArrayKind::Object(v)
            }
        }
    }

    pub fn set_length(&mut self, new_length: u32) -> Result<(), JSError> {
        if new_length == self.length {
            return Ok(());
        }
        if !self.length_writable {
            return Err(raise_type_error!("Cannot assign to read only property 'length' of array"));
        }
        if self.sealed && self.has_elements_from(new_length) {
            return Err(raise_type_error!("Cannot truncate array with non-configurable elements"));
        }
        let n = new_length as usize;
        match &mut self.kind {
            ArrayKind::Empty => {}
            ArrayKind::Int32(v) => v.truncate(n),
            ArrayKind::Double(v) => v.truncate(n),
            ArrayKind::Object(v) => v.truncate(n),
            ArrayKind::Holey(v) => v.truncate(n),
            ArrayKind::Sparse(map) => {
                map.split_off(&new_length);
            }
        }
        self.length = new_length;
        Ok(())
    }

    pub fn prevent_length_write(&mut self) {
        self.length_writable = false;
    }

    /// Object.seal: elements become non-configurable.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Object.freeze: sealed, read-only elements and a read-only length.
    pub fn freeze(&mut self) {
        self.sealed = true;
        self.frozen = true;
        self.length_writable = false;
    }

    /// Fast-path element deletion. Leaves a hole, never changes `length` and
    /// always succeeds; `strict` has no effect here.
    pub fn delete_element(mut self, index: u32, strict: bool) -> (ArrayStorage, bool) {
        debug_assert!(self.is_fast() && self.length_writable, "fast-path delete on {:?}", self.kind.name());
        log::trace!("delete_element index={} strict={} kind={}", index, strict, self.kind.name());
        self.remove_element(index);
        (self, true)
    }

    /// Removes the element at `index`, turning it into a hole. Packed storage
    /// becomes holey. Returns whether an element was present.
    pub fn remove_element(&mut self, index: u32) -> bool {
        if !self.has_element(index) {
            return false;
        }
        let kind = std::mem::take(&mut self.kind);
        let before = kind.name();
        self.kind = match kind {
            ArrayKind::Sparse(mut map) => {
                map.remove(&index);
                ArrayKind::Sparse(map)
            }
            kind => {
                let mut v = kind.into_holey();
                v[index as usize] = None;
                ArrayKind::Holey(v)
            }
        };
        if before != self.kind.name() {
            log::debug!("array storage transition {} -> {} (delete index {})", before, self.kind.name(), index);
        }
        true
    }
}

fn clamp_array_length(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Creates an array object holding `values`.
pub fn create_array(values: Vec<Value>) -> JSObjectDataPtr {
    let obj = new_js_object_data();
    obj.borrow_mut().array = Some(ArrayStorage::from_values(values));
    obj
}

pub fn is_array(obj: &JSObjectDataPtr) -> bool {
    obj.borrow().is_array()
}

pub fn get_array_length(obj: &JSObjectDataPtr) -> Option<u32> {
    obj.borrow().array.as_ref().map(ArrayStorage::length)
}
