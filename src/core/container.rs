// Core Layer: Container bookkeeping
//
// State shared by Matrix and Vector that is independent of the element storage:
// reserved capacity, an identity stamp that changes on every mutation, and the
// reservation left behind by the RESIZE phase of a two-phase operation.

use crate::core::error::{GraphBlasError, Result};
use crate::ops::descriptor::Descriptor;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Phase of a container-producing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Compute the output pattern and reserve capacity for it; values untouched
    Resize,
    /// Compute and write the output values
    #[default]
    Execute,
}

/// Ingestion mode for bulk builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IOMode {
    /// Single sequential pass over the input
    #[default]
    Sequential,
    /// Ordering-agnostic ingestion, may use worker threads
    Parallel,
}

/// Identity of a container at a point in its history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stamp {
    id: u64,
    revision: u64,
}

/// Kind of operation a reservation was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedOp {
    MaskedSet,
}

/// Output pattern reserved by a RESIZE phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    op: ReservedOp,
    inputs: Vec<Stamp>,
    desc: Descriptor,
    nnz: usize,
}

impl Reservation {
    pub fn new(op: ReservedOp, inputs: Vec<Stamp>, desc: Descriptor, nnz: usize) -> Self {
        Self {
            op,
            inputs,
            desc,
            nnz,
        }
    }

    /// Number of entries the reserved pattern holds
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    fn matches(&self, op: ReservedOp, inputs: &[Stamp], desc: &Descriptor) -> bool {
        self.op == op && self.inputs == inputs && self.desc == *desc
    }
}

/// Capacity and identity bookkeeping for a sparse container
#[derive(Debug)]
pub struct ContainerState {
    /// Maximum number of entries storable without a resize
    capacity: usize,
    /// Number of addressable positions; capacity never exceeds it
    ceiling: usize,
    stamp: Stamp,
    reservation: Option<Reservation>,
}

impl ContainerState {
    /// Create the bookkeeping for a fresh container
    ///
    /// Fails with `CapacityExceeded` if `capacity` exceeds `ceiling`.
    pub fn new(capacity: usize, ceiling: usize) -> Result<Self> {
        if capacity > ceiling {
            return Err(GraphBlasError::CapacityExceeded);
        }
        Ok(Self {
            capacity,
            ceiling,
            stamp: Stamp {
                id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
                revision: 0,
            },
            reservation: None,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn stamp(&self) -> Stamp {
        self.stamp
    }

    /// Validate a new capacity against the current entry count and ceiling
    pub fn check_resize(&self, capacity: usize, nnz: usize) -> Result<()> {
        if capacity > self.ceiling || capacity < nnz {
            return Err(GraphBlasError::CapacityExceeded);
        }
        Ok(())
    }

    /// Set the capacity; callers validate with `check_resize` first
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.reservation = None;
    }

    /// Grow capacity so that `nnz` entries fit; never shrinks
    pub fn grow_to(&mut self, nnz: usize) -> Result<()> {
        if nnz > self.ceiling {
            return Err(GraphBlasError::CapacityExceeded);
        }
        self.capacity = self.capacity.max(nnz);
        Ok(())
    }

    /// Fail unless `nnz` entries fit in the current capacity
    pub fn ensure_fits(&self, nnz: usize) -> Result<()> {
        if nnz > self.capacity {
            log::debug!(
                "Output needs {} entries but capacity is {}",
                nnz,
                self.capacity
            );
            return Err(GraphBlasError::CapacityExceeded);
        }
        Ok(())
    }

    /// Record that the entries changed
    ///
    /// Bumps the revision and drops any pending reservation.
    pub fn touch(&mut self) {
        self.stamp.revision += 1;
        self.reservation = None;
    }

    pub fn reserve(&mut self, reservation: Reservation) {
        self.reservation = Some(reservation);
    }

    /// Fail with `NotResized` unless a matching reservation is pending
    pub fn check_reservation(
        &self,
        op: ReservedOp,
        inputs: &[Stamp],
        desc: &Descriptor,
    ) -> Result<()> {
        match &self.reservation {
            Some(r) if r.matches(op, inputs, desc) => Ok(()),
            _ => Err(GraphBlasError::NotResized),
        }
    }

    pub fn reservation(&self) -> Option<&Reservation> {
        self.reservation.as_ref()
    }

    /// Fresh bookkeeping with the same capacity, used when a container is cloned
    pub fn duplicate(&self) -> Self {
        Self {
            capacity: self.capacity,
            ceiling: self.ceiling,
            stamp: Stamp {
                id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
                revision: 0,
            },
            reservation: None,
        }
    }
}

/// Reserve vector storage, mapping allocation failure to `OutOfMemory`
pub(crate) fn try_reserve<T>(storage: &mut Vec<T>, total: usize) -> Result<()> {
    let additional = total.saturating_sub(storage.len());
    storage
        .try_reserve_exact(additional)
        .map_err(|_| GraphBlasError::OutOfMemory)
}
