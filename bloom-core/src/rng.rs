use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Random source used for every stochastic choice in the simulation.
pub type SimRng = ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Create an RNG seeded from the thread-local entropy source.
///
/// Runs built this way are not reproducible.
pub fn entropy_rng() -> SimRng {
    SimRng::from_rng(&mut rand::rng())
}
