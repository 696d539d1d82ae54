// src/tensor/mod.rs
// ============================================================================
// TENSOR - Array N-dimensional row-major
// ============================================================================

pub mod element;
pub mod shape;

pub use element::Element;
pub use shape::Shape;

use crate::error::TensorError;

/// Tensor con datos propios en orden row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T: Element> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Element> Tensor<T> {
    /// Crea un tensor. `data.len()` debe ser igual al producto de `dims`.
    pub fn new(dims: impl Into<Vec<usize>>, data: Vec<T>) -> Result<Self, TensorError> {
        let shape = Shape::new(dims)?;
        check_len(&shape, data.len())?;
        Ok(Self { shape, data })
    }

    /// Construye el tensor a partir del índice lineal row-major
    pub fn from_fn(
        dims: impl Into<Vec<usize>>,
        f: impl FnMut(usize) -> T,
    ) -> Result<Self, TensorError> {
        let shape = Shape::new(dims)?;
        let data = (0..shape.numel()).map(f).collect();
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Valor en la posición lógica `indices`
    pub fn get(&self, indices: &[usize]) -> Option<T> {
        self.shape.row_major_index(indices).map(|i| self.data[i])
    }

    pub fn view(&self) -> TensorView<'_, T> {
        TensorView { shape: self.shape.clone(), data: &self.data }
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

/// Vista prestada sobre un buffer row-major existente
#[derive(Debug, Clone)]
pub struct TensorView<'a, T: Element> {
    shape: Shape,
    data: &'a [T],
}

impl<'a, T: Element> TensorView<'a, T> {
    pub fn new(dims: impl Into<Vec<usize>>, data: &'a [T]) -> Result<Self, TensorError> {
        let shape = Shape::new(dims)?;
        check_len(&shape, data.len())?;
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    pub fn get(&self, indices: &[usize]) -> Option<T> {
        self.shape.row_major_index(indices).map(|i| self.data[i])
    }
}

impl<'a, T: Element> From<&'a Tensor<T>> for TensorView<'a, T> {
    fn from(tensor: &'a Tensor<T>) -> Self {
        tensor.view()
    }
}

fn check_len(shape: &Shape, actual: usize) -> Result<(), TensorError> {
    if shape.numel() != actual {
        return Err(TensorError::ShapeMismatch {
            dims: shape.dims().to_vec(),
            expected: shape.numel(),
            actual,
        });
    }
    Ok(())
}
