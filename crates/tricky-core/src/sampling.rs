//! Random question selection with an injected random source.

use rand::seq::{SliceChooseIter, SliceRandom};
use rand::Rng;

/// Default number of questions in one quiz attempt.
pub const DEFAULT_QUIZ_SIZE: usize = 5;

/// A lazy, one-shot random sample drawn from a slice.
///
/// Yields each chosen element once, never repeats an element, and cannot be
/// restarted.
pub struct Sample<'a, T> {
    inner: SliceChooseIter<'a, [T], T>,
}

impl<'a, T> Iterator for Sample<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Sample<'_, T> {}

/// Draw up to `k` distinct elements from `items` using `rng`.
///
/// Returns all of `items` (in random order) when the slice has fewer than `k`
/// elements.
pub fn sample<'a, T, R>(items: &'a [T], rng: &mut R, k: usize) -> Sample<'a, T>
where
    R: Rng + ?Sized,
{
    Sample {
        inner: items.choose_multiple(rng, k),
    }
}
