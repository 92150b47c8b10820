// Operation descriptors
//
// A descriptor adjusts how a kernel reads its mask and matrix operand and how
// it writes into a masked output. Passing `None` to a kernel is the same as
// passing `Descriptor::new()`. Each kernel family rejects flags it cannot
// honour before it looks at any operand.

use crate::core::error::{GraphBlasError, Result};

/// Kernel families, each accepting its own subset of descriptor flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kernel {
    MatVec,
    ElementWise,
    Apply,
    Set,
}

impl Kernel {
    fn reads_matrix(self) -> bool {
        matches!(self, Kernel::MatVec)
    }
}

/// Flags for a single kernel call
///
/// Built by chaining onto `Descriptor::new()`:
/// `Descriptor::new().structural().complement()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descriptor {
    /// mxv, eWise and apply drop output entries the mask disallows instead
    /// of keeping them
    pub output_replace: bool,
    /// The mask selects the positions it does not hold
    pub mask_complement: bool,
    /// Any stored mask entry selects its position, whatever its value
    pub mask_structure: bool,
    /// mxv reads the matrix operand as its transpose
    pub transpose_first: bool,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(self) -> Self {
        Self {
            output_replace: true,
            ..self
        }
    }

    pub fn complement(self) -> Self {
        Self {
            mask_complement: true,
            ..self
        }
    }

    pub fn structural(self) -> Self {
        Self {
            mask_structure: true,
            ..self
        }
    }

    pub fn transposed(self) -> Self {
        Self {
            transpose_first: true,
            ..self
        }
    }

    fn check(&self, kernel: Kernel) -> Result<()> {
        if self.transpose_first && !kernel.reads_matrix() {
            log::debug!("{:?} kernel has no matrix operand to transpose", kernel);
            return Err(GraphBlasError::InvalidValue);
        }
        Ok(())
    }
}

/// Effective descriptor for a call to `kernel`, rejecting flags it cannot use
pub(crate) fn resolve(desc: Option<&Descriptor>, kernel: Kernel) -> Result<Descriptor> {
    let desc = desc.copied().unwrap_or_default();
    desc.check(kernel)?;
    Ok(desc)
}
