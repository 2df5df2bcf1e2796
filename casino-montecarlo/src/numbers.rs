//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::{NumCast, cast};

/// Convert any primitive number to f64, returning `None` when it has no f64 form.
#[must_use]
pub fn to_f64<T: NumCast>(value: T) -> Option<f64> {
    cast::<T, f64>(value)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Share of `count` in `total`, or 0.0 when `total` is zero.
#[must_use]
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    usize_to_f64(count) / usize_to_f64(total)
}
