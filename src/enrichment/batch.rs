//! Splitting key lists into provider-sized batches.

/// Maximum number of IDs the Spotify `tracks` / `artists` endpoints accept per call
pub const PROVIDER_BATCH_LIMIT: usize = 50;

/// A validated batch size: at least 1, at most [`PROVIDER_BATCH_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchSizeError {
    #[error("Batch size must be at least 1")]
    Zero,

    #[error("Batch size {0} exceeds the provider limit of {PROVIDER_BATCH_LIMIT}")]
    TooLarge(usize),
}

impl BatchSize {
    pub fn new(size: usize) -> Result<Self, BatchSizeError> {
        match size {
            0 => Err(BatchSizeError::Zero),
            n if n > PROVIDER_BATCH_LIMIT => Err(BatchSizeError::TooLarge(n)),
            n => Ok(Self(n)),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(PROVIDER_BATCH_LIMIT)
    }
}

/// Lazily split `items` into contiguous batches of `size`; only the last may be shorter.
///
/// An empty slice yields no batches at all.
pub fn batches<T>(items: &[T], size: BatchSize) -> impl ExactSizeIterator<Item = &[T]> {
    items.chunks(size.get())
}
