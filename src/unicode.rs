// Helper functions for UTF-16 string operations
pub fn utf8_to_utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

pub fn utf16_to_utf8(v: &[u16]) -> String {
    String::from_utf16_lossy(v)
}

/// Exact conversion; `None` when the units hold a lone surrogate.
pub fn utf16_to_utf8_exact(v: &[u16]) -> Option<String> {
    String::from_utf16(v).ok()
}

pub fn utf16_len(v: &[u16]) -> usize {
    v.len()
}

/// Parse a UTF-16 string as a canonical array index: the decimal form of an
/// integer in `0..=2^32-2` with no sign, no leading zeros and no whitespace.
pub fn utf16_to_array_index(v: &[u16]) -> Option<u32> {
    if v.is_empty() || v.len() > 10 {
        return None;
    }
    if v.len() > 1 && v[0] == u16::from(b'0') {
        return None;
    }
    let mut acc: u64 = 0;
    for &unit in v {
        if !(u16::from(b'0')..=u16::from(b'9')).contains(&unit) {
            return None;
        }
        acc = acc * 10 + u64::from(unit - u16::from(b'0'));
    }
    if acc <= u64::from(crate::core::MAX_ARRAY_INDEX) {
        Some(acc as u32)
    } else {
        None
    }
}
