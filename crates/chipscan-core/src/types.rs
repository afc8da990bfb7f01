//! Type aliases for commonly used complex types.

/// A boxed iterator for returning different iterator types from one API.
///
/// The traversal dispatcher selects one of several lazily-evaluated
/// coordinate streams at runtime; boxing erases the concrete type.
///
/// # Example
/// ```rust,ignore
/// let iter: BoxedIterator<u32> = if ascending {
///     Box::new(0..10)
/// } else {
///     Box::new((0..10).rev())
/// };
/// ```
pub type BoxedIterator<T> = Box<dyn Iterator<Item = T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_iterator_selects_at_runtime() {
        let ascending = false;
        let iter: BoxedIterator<u32> = if ascending {
            Box::new(0..5)
        } else {
            Box::new((0..5).rev())
        };
        assert_eq!(iter.collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
    }
}
