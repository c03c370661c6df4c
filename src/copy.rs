/// How a copy treats the mutable parts of its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyMode {
    /// Scalars by value, containers aliased.
    Shallow,
    /// Scalars by value, containers newly allocated with equal content.
    Deep,
}

/// Types which copy themselves only in an explicitly requested [`CopyMode`].
pub trait Replicate: Sized {
    /// Produce a copy of `self`. The source is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FacsimileError::NullReference`] when a deep copy is
    /// requested and a container it has to copy is unset.
    fn replicate(&self, mode: CopyMode) -> crate::FacsimileResult<Self>;
}

/// Copy `source` in the given mode.
pub fn copy<T: Replicate>(source: &T, mode: CopyMode) -> crate::FacsimileResult<T> {
    source.replicate(mode)
}
