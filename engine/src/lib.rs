pub mod config;
pub mod filter;
pub mod init;
pub mod media;
pub mod metrics;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod types;
pub mod window;

pub mod error;
pub mod time;
