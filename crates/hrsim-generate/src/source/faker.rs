use ::fake::Fake;
use ::fake::faker::address::raw::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use ::fake::faker::internet::raw::SafeEmail;
use ::fake::faker::name::raw::{FirstName, LastName};
use ::fake::faker::phone_number::raw::PhoneNumber;
use ::fake::locales::{EN, PT_BR};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{LocaleKey, RandomSource};

/// [`RandomSource`] backed by the `fake` crate's locale data.
pub struct FakeSource<R = ChaCha8Rng> {
    rng: R,
    locale: LocaleKey,
}

impl FakeSource<ChaCha8Rng> {
    /// Deterministic source: the same seed and locale replay the same draws.
    pub fn seeded(seed: u64, locale: LocaleKey) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), locale)
    }

    /// Non-reproducible source seeded from the operating system.
    pub fn from_entropy(locale: LocaleKey) -> Self {
        Self::new(ChaCha8Rng::from_os_rng(), locale)
    }
}

impl<R: Rng> FakeSource<R> {
    pub fn new(rng: R, locale: LocaleKey) -> Self {
        Self { rng, locale }
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }
}

macro_rules! localized {
    ($self:ident, $faker:ident) => {{
        let value: String = match $self.locale {
            LocaleKey::EnUs => $faker(EN).fake_with_rng(&mut $self.rng),
            LocaleKey::PtBr => $faker(PT_BR).fake_with_rng(&mut $self.rng),
        };
        value
    }};
}

impl<R: Rng> RandomSource for FakeSource<R> {
    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    fn first_name(&mut self) -> String {
        localized!(self, FirstName)
    }

    fn last_name(&mut self) -> String {
        localized!(self, LastName)
    }

    fn email(&mut self) -> String {
        localized!(self, SafeEmail)
    }

    fn phone_number(&mut self) -> String {
        localized!(self, PhoneNumber)
    }

    fn address(&mut self) -> String {
        let number = localized!(self, BuildingNumber);
        let street = localized!(self, StreetName);
        let city = localized!(self, CityName);
        let state = localized!(self, StateAbbr);
        let zip = localized!(self, ZipCode);
        match self.locale {
            LocaleKey::EnUs => format!("{number} {street}, {city}, {state} {zip}"),
            LocaleKey::PtBr => format!("{street}, {number}, {city} - {state}, {zip}"),
        }
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, len, amount).into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_draws() {
        let mut a = FakeSource::seeded(7, LocaleKey::EnUs);
        let mut b = FakeSource::seeded(7, LocaleKey::EnUs);
        assert_eq!(a.first_name(), b.first_name());
        assert_eq!(a.address(), b.address());
        assert_eq!(a.int_in_range(1, 1000), b.int_in_range(1, 1000));
    }

    #[test]
    fn entropy_source_draws_in_range() {
        let mut source = FakeSource::from_entropy(LocaleKey::EnUs);
        assert_eq!(source.locale(), LocaleKey::EnUs);
        for _ in 0..50 {
            let value = source.int_in_range(35_000, 120_000);
            assert!((35_000..=120_000).contains(&value));
            assert!(source.index(7) < 7);
        }
        assert!(source.email().contains('@'));
    }

    #[test]
    fn sample_indices_are_distinct() {
        let mut source = FakeSource::seeded(3, LocaleKey::PtBr);
        let mut picked = source.sample_indices(50, 20);
        assert_eq!(picked.len(), 20);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 20);
        assert!(picked.iter().all(|idx| *idx < 50));
    }

    #[test]
    fn emails_have_an_at_sign() {
        let mut source = FakeSource::seeded(11, LocaleKey::PtBr);
        for _ in 0..20 {
            assert!(source.email().contains('@'));
        }
    }
}
