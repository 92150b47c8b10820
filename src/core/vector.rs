// Core Layer: Vector implementation
//
// Entries are kept as parallel `indices`/`values` arrays sorted by index.
// Presence is decided by the index array alone, so an explicitly stored zero
// is an entry like any other.

use crate::core::container::{try_reserve, ContainerState, IOMode, Phase, Stamp};
use crate::core::error::{GraphBlasError, Result};
use crate::core::iter::VectorIter;
use crate::parallel;
use crate::types::{GraphBLASType, TypeCode};

/// Sparse vector
#[derive(Debug)]
pub struct Vector<T: GraphBLASType> {
    /// Size of vector
    size: usize,
    /// Indices of stored values, strictly increasing
    indices: Vec<usize>,
    /// Stored values
    values: Vec<T>,
    /// Capacity and identity bookkeeping
    state: ContainerState,
}

impl<T: GraphBLASType> Vector<T> {
    /// Create a new empty vector with room for every position
    pub fn new(size: usize) -> Result<Self> {
        Self::with_capacity(size, size)
    }

    /// Create a new empty vector with an explicit capacity
    ///
    /// Fails with `CapacityExceeded` if `capacity > size`.
    pub fn with_capacity(size: usize, capacity: usize) -> Result<Self> {
        Ok(Self {
            size,
            indices: Vec::new(),
            values: Vec::new(),
            state: ContainerState::new(capacity, size)?,
        })
    }

    /// Create a vector storing every position of `values`
    pub fn from_dense(values: &[T]) -> Result<Self> {
        let mut v = Self::new(values.len())?;
        v.indices = (0..values.len()).collect();
        v.values = values.to_vec();
        Ok(v)
    }

    /// Get size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get number of stored entries, explicit zeros included
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Get reserved capacity; always at least `nnz()`
    pub fn capacity(&self) -> usize {
        self.state.capacity()
    }

    /// Get type code
    pub fn type_code(&self) -> TypeCode {
        T::TYPE_CODE
    }

    /// Get indices slice
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Get values slice
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Reserve room for `capacity` entries
    ///
    /// Fails with `CapacityExceeded` if `capacity` exceeds the vector size or
    /// would drop below the current number of entries.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        self.state.check_resize(capacity, self.nnz())?;
        try_reserve(&mut self.indices, capacity)?;
        try_reserve(&mut self.values, capacity)?;
        self.state.set_capacity(capacity);
        log::debug!("Vector of size {} resized to capacity {}", self.size, capacity);
        Ok(())
    }

    /// Replace all entries with the given `(index, value)` pairs
    ///
    /// Nothing changes on failure.
    pub fn build_unique(&mut self, indices: &[usize], values: &[T], mode: IOMode) -> Result<()> {
        if indices.len() != values.len() {
            return Err(GraphBlasError::InvalidValue);
        }
        if indices.iter().any(|&i| i >= self.size) {
            return Err(GraphBlasError::IndexOutOfBounds);
        }
        self.state.ensure_fits(indices.len())?;

        let mut pairs: Vec<(usize, T)> = indices.iter().copied().zip(values.iter().copied()).collect();
        match mode {
            IOMode::Sequential => pairs.sort_unstable_by_key(|p| p.0),
            IOMode::Parallel => parallel::sort_unstable_by_key(&mut pairs, |p| p.0),
        }
        if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(GraphBlasError::DuplicateCoordinate);
        }

        log::debug!(
            "Built vector of size {} from {} entries ({:?})",
            self.size,
            pairs.len(),
            mode
        );
        let (indices, values) = pairs.into_iter().unzip();
        self.replace(indices, values);
        Ok(())
    }

    /// Set or overwrite a single entry
    ///
    /// Inserting a new entry into a full vector fails with `CapacityExceeded`.
    pub fn set_element(&mut self, value: T, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(GraphBlasError::IndexOutOfBounds);
        }
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos] = value,
            Err(pos) => {
                self.state.ensure_fits(self.nnz() + 1)?;
                self.indices.insert(pos, index);
                self.values.insert(pos, value);
            }
        }
        self.state.touch();
        Ok(())
    }

    /// Get the entry at `index`, `None` if nothing is stored there
    pub fn get(&self, index: usize) -> Option<T> {
        self.indices
            .binary_search(&index)
            .ok()
            .map(|pos| self.values[pos])
    }

    /// Fill every position with `value`, or clear every entry for `None`
    ///
    /// Filling needs capacity for every position.
    pub fn fill(&mut self, value: Option<T>) -> Result<()> {
        match value {
            Some(v) => {
                self.state.ensure_fits(self.size)?;
                self.replace((0..self.size).collect(), vec![v; self.size]);
            }
            None => self.clear(),
        }
        Ok(())
    }

    /// Remove every entry; capacity is kept
    pub fn clear(&mut self) {
        self.indices.clear();
        self.values.clear();
        self.state.touch();
    }

    /// Iterate over stored `(index, value)` pairs in ascending index order
    pub fn iter(&self) -> VectorIter<'_, T> {
        VectorIter::new(&self.indices, &self.values)
    }

    /// Copy out the stored entries
    pub fn extract_tuples(&self) -> (Vec<usize>, Vec<T>) {
        (self.indices.clone(), self.values.clone())
    }

    pub(crate) fn stamp(&self) -> Stamp {
        self.state.stamp()
    }

    pub(crate) fn state(&self) -> &ContainerState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ContainerState {
        &mut self.state
    }

    /// Write an operation's output pattern
    ///
    /// `Resize` only grows capacity to fit the pattern; `Execute` requires the
    /// pattern to fit and then replaces the entries.
    pub(crate) fn commit(&mut self, indices: Vec<usize>, values: Vec<T>, phase: Phase) -> Result<()> {
        match phase {
            Phase::Resize => self.state.grow_to(indices.len()),
            Phase::Execute => {
                self.state.ensure_fits(indices.len())?;
                self.replace(indices, values);
                Ok(())
            }
        }
    }

    fn replace(&mut self, indices: Vec<usize>, values: Vec<T>) {
        debug_assert_eq!(indices.len(), values.len());
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        self.indices = indices;
        self.values = values;
        self.state.touch();
    }
}

impl<T: GraphBLASType> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            indices: self.indices.clone(),
            values: self.values.clone(),
            state: self.state.duplicate(),
        }
    }
}

impl<'a, T: GraphBLASType> IntoIterator for &'a Vector<T> {
    type Item = (usize, T);
    type IntoIter = VectorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
