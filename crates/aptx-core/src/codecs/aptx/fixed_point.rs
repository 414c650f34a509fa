//! Fixed-point arithmetic primitives for aptX
//!
//! All rounding shifts round to nearest with ties to even. The correction
//! term inspects the discarded bits plus the lowest kept bit: when they equal
//! exactly one half with an even result, the rounding increment is undone.
//! A plain arithmetic shift changes output bits and breaks interoperability.

/// Largest positive 24-bit sample
pub const SAMPLE_MAX: i32 = (1 << 23) - 1;

/// Most negative 24-bit sample
pub const SAMPLE_MIN: i32 = -(1 << 23);

/// Saturate `a` to the signed range of `p + 1` bits
#[inline]
pub const fn clip_intp2(a: i32, p: u32) -> i32 {
    let max = (1i32 << p) - 1;
    let min = -(1i32 << p);
    if a > max {
        max
    } else if a < min {
        min
    } else {
        a
    }
}

/// Saturate to the signed 24-bit range `[-8388608, 8388607]`
#[inline]
pub const fn ssat24(a: i32) -> i32 {
    clip_intp2(a, 23)
}

/// Saturate a wide accumulator to the signed 24-bit range
#[inline]
pub const fn ssat24_wide(a: i64) -> i32 {
    if a > SAMPLE_MAX as i64 {
        SAMPLE_MAX
    } else if a < SAMPLE_MIN as i64 {
        SAMPLE_MIN
    } else {
        a as i32
    }
}

/// Clamp `value` to `[-bound, bound]`
#[inline]
pub const fn clamp_symmetric(value: i32, bound: i32) -> i32 {
    if value > bound {
        bound
    } else if value < -bound {
        -bound
    } else {
        value
    }
}

/// Sign-extend the low `bits` bits of `value`
#[inline]
pub const fn sign_extend(value: i32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value as u32) << shift) as i32 >> shift
}

/// Round-half-to-even right shift of a 32-bit value, `1 <= shift <= 30`
#[inline]
pub const fn rshift32(value: i32, shift: u32) -> i32 {
    let rounding = 1i32 << (shift - 1);
    let mask = (1i32 << (shift + 1)) - 1;
    (value.wrapping_add(rounding) >> shift) - ((value & mask) == rounding) as i32
}

/// Round-half-to-even right shift of a 64-bit accumulator, `1 <= shift <= 62`
#[inline]
pub const fn rshift64(value: i64, shift: u32) -> i64 {
    let rounding = 1i64 << (shift - 1);
    let mask = (1i64 << (shift + 1)) - 1;
    (value.wrapping_add(rounding) >> shift) - ((value & mask) == rounding) as i64
}

/// [`rshift32`] followed by 24-bit saturation
#[inline]
pub const fn rshift32_clip24(value: i32, shift: u32) -> i32 {
    ssat24(rshift32(value, shift))
}

/// [`rshift64`], truncation to the low 32 bits, then 24-bit saturation
#[inline]
pub const fn rshift64_clip24(value: i64, shift: u32) -> i32 {
    ssat24(rshift64(value, shift) as i32)
}

/// Three-way comparison: 1, 0 or -1
#[inline]
pub const fn diff_sign(x: i32, y: i32) -> i32 {
    (x > y) as i32 - (x < y) as i32
}
