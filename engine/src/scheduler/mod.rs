pub mod perturb;
pub mod scheduler;
mod state;

pub use perturb::{TickOutcome, perturb, step_zone};
pub use scheduler::{PerturbationScheduler, SchedulerState};
