//! Savings list construction and biased-randomised candidate selection.

use crate::config::Config;
use crate::problem::Arc;
use itertools::Itertools;
use rand::distributions::Open01;
use rand::{Rng, RngCore};

/// A pluggable selection strategy: takes the ranked candidate list and the
/// skew parameter and yields every candidate exactly once.
pub type BiasedFn =
    for<'r> fn(Vec<usize>, f64, &'r mut dyn RngCore) -> Box<dyn Iterator<Item = usize> + 'r>;

/// Indices of all customer-to-customer arcs, sorted by descending saving.
///
/// The sort is stable: arcs with equal saving keep their input order.
pub fn savings_list(arcs: &[Arc]) -> Vec<usize> {
    arcs.iter()
        .enumerate()
        .filter(|(_, arc)| arc.is_saving_candidate())
        .sorted_by(|(_, a), (_, b)| b.saving.total_cmp(&a.saving))
        .map(|(idx, _)| idx)
        .collect()
}

/// Sampling without replacement under a quasi-geometric distribution
/// `f(x) = (1 - beta)^x`, favouring the front of the list.
///
/// Each step draws `u` in (0, 1) and removes the option at
/// `floor(log_{1 - beta}(u)) mod n` from the remaining `n` options.
pub struct BiasedRandomisation<'r, T, R: ?Sized> {
    options: Vec<T>,
    log_base: f64,
    rng: &'r mut R,
}

impl<'r, T, R: Rng + ?Sized> BiasedRandomisation<'r, T, R> {
    pub fn new(options: Vec<T>, beta: f64, rng: &'r mut R) -> Self {
        BiasedRandomisation {
            options,
            log_base: (1.0 - beta).ln(),
            rng,
        }
    }
}

impl<'r, T, R: Rng + ?Sized> Iterator for BiasedRandomisation<'r, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.options.is_empty() {
            return None;
        }
        let u: f64 = self.rng.sample(Open01);
        let idx = (u.ln() / self.log_base) as usize % self.options.len();
        Some(self.options.remove(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.options.len(), Some(self.options.len()))
    }
}

impl<'r, T, R: Rng + ?Sized> ExactSizeIterator for BiasedRandomisation<'r, T, R> {}

/// The default biased selection strategy.
pub fn quasi_geometric<'r>(
    candidates: Vec<usize>,
    beta: f64,
    rng: &'r mut dyn RngCore,
) -> Box<dyn Iterator<Item = usize> + 'r> {
    Box::new(BiasedRandomisation::new(candidates, beta, rng))
}

/// The candidate sequence for one construction pass: the savings list as is,
/// or a fresh biased draw from it.
pub fn candidates<'r>(
    savings: &[usize],
    config: &Config,
    rng: &'r mut dyn RngCore,
) -> Box<dyn Iterator<Item = usize> + 'r> {
    if config.biased {
        (config.biased_func)(savings.to_vec(), config.beta, rng)
    } else {
        Box::new(savings.to_vec().into_iter())
    }
}
