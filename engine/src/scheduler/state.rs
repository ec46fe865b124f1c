use crate::config::SimConfig;
use crate::rng::SimRng;

/// Everything a tick mutates besides the snapshot itself.
///
/// Lives behind the scheduler's core mutex, which makes the mutex holder the
/// generator's single writer.
pub(crate) struct SimCore {
    pub rng: SimRng,
    pub config: SimConfig,

    /// True between `start()` and `stop()`.
    pub running: bool,

    /// Bumped on every start/stop. A timer task only applies ticks while the
    /// generation it was spawned with is still current.
    pub generation: u64,
}

impl SimCore {
    pub fn new(rng: SimRng, config: SimConfig) -> Self {
        Self {
            rng,
            config,
            running: false,
            generation: 0,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }
}
