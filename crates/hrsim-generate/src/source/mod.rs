//! Random capability consumed by the factory, mutator and sampler.

mod faker;
mod locales;

pub use faker::FakeSource;
pub use locales::LocaleKey;

use chrono::{Duration, NaiveDate};

/// Source of uniform draws and locale-realistic strings.
///
/// Passed explicitly as `&mut dyn RandomSource` so callers decide how it is
/// seeded; nothing in the crate keeps random state of its own.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform integer in the closed range `min..=max`.
    fn int_in_range(&mut self, min: i64, max: i64) -> i64;

    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    fn email(&mut self) -> String;
    fn phone_number(&mut self) -> String;
    fn address(&mut self) -> String;

    /// Uniform date in the closed range `start..=end`.
    fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0);
        start + Duration::days(self.int_in_range(0, span))
    }

    /// `amount` distinct indices in `0..len`, uniformly, in draw order.
    ///
    /// `amount` must not exceed `len`.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for slot in 0..amount {
            let pick = slot + self.index(len - slot);
            indices.swap(slot, pick);
        }
        indices.truncate(amount);
        indices
    }
}

/// Uniform choice from a slice; `None` when it is empty.
pub fn pick<'a, T>(source: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(source.index(items.len()))
}

/// Fresh seed for runs that did not ask for one; log it to replay the run.
pub fn entropy_seed() -> u64 {
    rand::random()
}
