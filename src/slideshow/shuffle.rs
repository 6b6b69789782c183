use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::trace;

use super::slide::SlideEntry;

/// In-place Fisher–Yates shuffle, walking from the last index down to 1.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Ordering applied to the slides when the show starts.
#[derive(Debug, Clone)]
pub enum SlideOrder {
    Shuffled(StdRng),
    /// Keep insertion order.
    Insertion,
}

impl SlideOrder {
    /// Shuffled order, deterministic when a seed is given.
    pub fn shuffled(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::Shuffled(rng)
    }

    pub fn arrange(&mut self, slides: &mut [SlideEntry]) {
        match self {
            Self::Shuffled(rng) => {
                fisher_yates(slides, rng);
                trace!(count = slides.len(), "slides shuffled");
            }
            Self::Insertion => {}
        }
    }
}
