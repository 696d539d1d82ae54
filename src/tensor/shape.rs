// src/tensor/shape.rs
// ============================================================================
// SHAPE - Dimensiones y cálculo de offsets
// ============================================================================

use crate::error::TensorError;

/// Dimensiones de un tensor, de la más externa a la más interna.
///
/// El orden lógico de almacenamiento es row-major: el último eje varía más
/// rápido. Se permiten dimensiones de tamaño 0 (tensor vacío).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    numel: usize,
}

impl Shape {
    /// Crea un shape. Rechaza rank 0 y productos que desbordan `usize`.
    pub fn new(dims: impl Into<Vec<usize>>) -> Result<Self, TensorError> {
        let dims = dims.into();
        if dims.is_empty() {
            return Err(TensorError::ZeroRank);
        }

        let numel = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| TensorError::Overflow(dims.clone()))?;

        Ok(Self { dims, numel })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Número de elementos (producto de las dimensiones)
    pub fn numel(&self) -> usize {
        self.numel
    }

    pub fn is_empty(&self) -> bool {
        self.numel == 0
    }

    /// Inversión de ejes: [d0, d1, ..., dn-1] -> [dn-1, ..., d1, d0]
    pub fn reversed(&self) -> Self {
        let mut dims = self.dims.clone();
        dims.reverse();
        Self { dims, numel: self.numel }
    }

    /// Strides row-major en elementos (el último eje tiene stride 1)
    pub fn row_major_strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.dims.len()];
        for axis in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * self.dims[axis + 1];
        }
        strides
    }

    /// Offset de `indices` en el almacenamiento row-major del tensor
    pub fn row_major_index(&self, indices: &[usize]) -> Option<usize> {
        if !self.in_bounds(indices) {
            return None;
        }
        let mut index = 0;
        for (&i, &d) in indices.iter().zip(&self.dims) {
            index = index * d + i;
        }
        Some(index)
    }

    /// Offset de `indices` en el orden column-major (el primer eje varía más
    /// rápido). Es la posición del elemento dentro del archivo exportado.
    pub fn column_major_index(&self, indices: &[usize]) -> Option<usize> {
        if !self.in_bounds(indices) {
            return None;
        }
        let mut index = 0;
        let mut multiplier = 1;
        for (&i, &d) in indices.iter().zip(&self.dims) {
            index += i * multiplier;
            multiplier *= d;
        }
        Some(index)
    }

    fn in_bounds(&self, indices: &[usize]) -> bool {
        indices.len() == self.dims.len()
            && indices.iter().zip(&self.dims).all(|(&i, &d)| i < d)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}
