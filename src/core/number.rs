// Shared numeric conversion helpers used by the delete operator and the key normalizer

use num_traits::ToPrimitive;

/// Number.MAX_SAFE_INTEGER (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = (1_i64 << 53) - 1;

/// Largest array index; 2^32 - 1 is reserved for the maximum `length`.
pub const MAX_ARRAY_INDEX: u32 = u32::MAX - 1;

/// Returns the integer `n` represents exactly, if it is finite, integral and
/// within the safe-integer range. Both zeros map to `0`.
pub fn f64_to_safe_integer(n: f64) -> Option<i64> {
    if !n.is_finite() || n.trunc() != n {
        return None;
    }
    let i = n.to_i64()?;
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i) { Some(i) } else { None }
}

/// Returns the array index `n` represents exactly. `-0` is index 0, as
/// ToString(-0) is "0".
pub fn f64_to_array_index(n: f64) -> Option<u32> {
    let i = f64_to_safe_integer(n)?;
    let idx = i.to_u32()?;
    (idx <= MAX_ARRAY_INDEX).then_some(idx)
}

pub fn i32_to_array_index(n: i32) -> Option<u32> {
    n.to_u32()
}

/// One bit pattern for every NaN so hashing by bits stays consistent.
#[inline]
pub fn canonical_f64_bits(n: f64) -> u64 {
    if n.is_nan() { f64::NAN.to_bits() } else { n.to_bits() }
}

/// Number::toString(n) for the radix-10 case.
pub fn format_js_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n.is_sign_negative() { "-Infinity".to_string() } else { "Infinity".to_string() };
    }
    // Handle zero: ECMAScript ToString(-0) should produce "0"
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    // Use exponential form for very large or very small numbers (ECMAScript style)
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{:e}", n);
        if let Some((mant, exp)) = s.split_once('e')
            && let Ok(exp_int) = exp.parse::<i32>()
        {
            return format!("{}e{:+}", mant, exp_int);
        }
        return s;
    }
    format!("{}", n)
}
