use crate::core::PropertyKey;
use crate::unicode::utf16_len;

/// Whether `key` names one of a string value's own properties: an in-bounds
/// code unit index or `length`. These are read-only and non-configurable.
pub fn is_string_own_property(s: &[u16], key: &PropertyKey) -> bool {
    match key.to_array_index() {
        Some(idx) => (idx as usize) < utf16_len(s),
        None => key.is_length(),
    }
}
