// src/layout/mod.rs
// ============================================================================
// LAYOUT - Inversión de ejes y orden de exportación
// ============================================================================
//
// El archivo se escribe recorriendo en row-major la vista con los ejes
// invertidos. Equivale a recorrer el tensor original en column-major:
//
//   shape [2, 3], datos [[1, 2, 3], [4, 5, 6]]
//   vista invertida [3, 2] -> [[1, 4], [2, 5], [3, 6]]
//   export buffer         -> [1, 4, 2, 5, 3, 6]
//
// Ningún dato se mueve: solo cambian dims y strides.
//
// ============================================================================

use rayon::prelude::*;

use crate::tensor::{Element, Shape, TensorView};

/// A partir de este número de elementos el gather se hace con rayon
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Permutación de inversión de ejes sobre un shape row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversedAxes {
    dims: Vec<usize>,
    strides: Vec<usize>,
    numel: usize,
}

impl ReversedAxes {
    pub fn new(shape: &Shape) -> Self {
        let mut strides = shape.row_major_strides();
        strides.reverse();
        Self {
            dims: shape.reversed().dims().to_vec(),
            strides,
            numel: shape.numel(),
        }
    }

    /// Dimensiones de la vista invertida
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Strides (sobre los datos originales) de cada eje de la vista
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Offset en los datos originales de la posición `k` del export buffer.
    /// `k` debe ser menor que `numel`.
    pub fn source_index(&self, mut k: usize) -> usize {
        let mut offset = 0;
        for axis in (0..self.dims.len()).rev() {
            let d = self.dims[axis];
            offset += (k % d) * self.strides[axis];
            k /= d;
        }
        offset
    }

    /// Iterador de offsets fuente en orden de exportación
    pub fn iter(&self) -> ExportOrder {
        ExportOrder {
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            counter: vec![0; self.dims.len()],
            offset: 0,
            remaining: self.numel,
        }
    }
}

/// Recorrido tipo odómetro de la vista invertida
#[derive(Debug, Clone)]
pub struct ExportOrder {
    dims: Vec<usize>,
    strides: Vec<usize>,
    counter: Vec<usize>,
    offset: usize,
    remaining: usize,
}

impl Iterator for ExportOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.offset;
        self.remaining -= 1;

        // Avanzar: el último eje de la vista es el más rápido
        for axis in (0..self.dims.len()).rev() {
            self.counter[axis] += 1;
            self.offset += self.strides[axis];
            if self.counter[axis] < self.dims[axis] {
                break;
            }
            self.offset -= self.strides[axis] * self.dims[axis];
            self.counter[axis] = 0;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ExportOrder {}

/// Construye el export buffer: orden invertido + conversión a f32
pub fn export_buffer<T: Element>(view: &TensorView<'_, T>) -> Vec<f32> {
    let axes = ReversedAxes::new(view.shape());
    if axes.numel() >= PARALLEL_THRESHOLD {
        gather_parallel(&axes, view.data())
    } else {
        gather_sequential(&axes, view.data())
    }
}

fn gather_sequential<T: Element>(axes: &ReversedAxes, data: &[T]) -> Vec<f32> {
    axes.iter().map(|i| data[i].to_f32()).collect()
}

fn gather_parallel<T: Element>(axes: &ReversedAxes, data: &[T]) -> Vec<f32> {
    (0..axes.numel())
        .into_par_iter()
        .map(|k| data[axes.source_index(k)].to_f32())
        .collect()
}
