pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod js_array;
pub(crate) mod js_collections;
pub(crate) mod js_object;
pub(crate) mod js_string;
pub(crate) mod unicode;

pub use crate::core::{
    DeleteBranch, DeletePropertyOperator, ForeignKey, ForeignObject, ForeignRef, HostBindings, InteropError, JSObjectData, JSObjectDataPtr,
    MAX_ARRAY_INDEX, MAX_SAFE_INTEGER, PropertyKey, SymbolData, Value, ValueKind, delete_property, new_js_object_data, remove_member,
};
#[cfg(feature = "profile")]
pub use crate::core::DeleteProfile;
pub use error::JSError;
pub use js_array::{ArrayKind, ArrayStorage, create_array, get_array_length, is_array};
pub use js_collections::{NormalizedKey, normalize};
pub use js_object::{OrdinaryPropertyStore, PropertyStore, freeze_object, ordinary_delete, seal_object};
pub use unicode::{utf8_to_utf16, utf16_to_utf8};
