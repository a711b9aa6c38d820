use fixed::types::I32F32;

/// Q32.32 fixed-point wattage: 32 integer bits, 32 fractional bits.
/// Deterministic across platforms, unlike f32/f64.
pub type Watts = I32F32;

/// Convert an f64 to Watts. Use only for initialization/config, never
/// inside the registry's bookkeeping.
#[inline]
pub fn f64_to_watts(v: f64) -> Watts {
    Watts::from_num(v)
}

/// Convert Watts to f64. Use only for display/FFI.
#[inline]
pub fn watts_to_f64(v: Watts) -> f64 {
    v.to_num::<f64>()
}
