use rand::Rng;

const SEED_MIN: u64 = 1_000_000_000;
const SEED_MAX: u64 = 10_000_000_000;

/// Source of the per-fold reproducibility seeds. Injectable so test runs
/// are deterministic; the seeds tag folds for downstream consumers and are
/// never used for sampling inside the engine.
pub trait SeedSource {
    /// Next 10-digit seed.
    fn next_seed(&mut self) -> u64;
}

/// Production source backed by the thread-local RNG.
#[derive(Default)]
pub struct RandomSeedSource;

impl RandomSeedSource {
    pub fn new() -> Self {
        Self
    }
}

impl SeedSource for RandomSeedSource {
    fn next_seed(&mut self) -> u64 {
        rand::thread_rng().gen_range(SEED_MIN..SEED_MAX)
    }
}

/// Deterministic counter source for tests and reproducible runs.
pub struct SequentialSeedSource {
    next: u64,
}

impl SequentialSeedSource {
    pub fn new() -> Self {
        Self { next: SEED_MIN }
    }
}

impl Default for SequentialSeedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedSource for SequentialSeedSource {
    fn next_seed(&mut self) -> u64 {
        let seed = self.next;
        self.next += 1;
        seed
    }
}
