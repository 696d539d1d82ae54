// src/tensor/element.rs
// ============================================================================
// ELEMENT - Tipos numéricos aceptados y su conversión a f32
// ============================================================================
//
// El archivo exportado siempre es float32. Cualquier tipo de entrada se
// convierte con `to_f32`:
//   - f64 -> f32: redondeo IEEE-754 al más cercano, fuera de rango = ±inf
//   - NaN sigue siendo NaN (el payload no se conserva)
//   - enteros de más de 24 bits pueden perder precisión
//
// ============================================================================

use half::{bf16, f16};

/// Elemento numérico exportable
pub trait Element: Copy + Send + Sync + 'static {
    /// `true` si `to_f32` puede perder precisión o rango
    const NARROWING: bool;

    /// Nombre del tipo para logs
    const NAME: &'static str;

    /// Conversión explícita a float32
    fn to_f32(self) -> f32;
}

macro_rules! impl_element {
    ($($ty:ty => $name:literal, $narrowing:literal;)*) => {
        $(
            impl Element for $ty {
                const NARROWING: bool = $narrowing;
                const NAME: &'static str = $name;

                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }
            }
        )*
    };
}

impl_element! {
    f32 => "f32", false;
    f64 => "f64", true;
    i8 => "i8", false;
    i16 => "i16", false;
    i32 => "i32", true;
    i64 => "i64", true;
    u8 => "u8", false;
    u16 => "u16", false;
    u32 => "u32", true;
    u64 => "u64", true;
}

impl Element for f16 {
    const NARROWING: bool = false;
    const NAME: &'static str = "f16";

    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }
}

impl Element for bf16 {
    const NARROWING: bool = false;
    const NAME: &'static str = "bf16";

    #[inline]
    fn to_f32(self) -> f32 {
        bf16::to_f32(self)
    }
}
