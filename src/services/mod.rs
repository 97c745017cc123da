// SPDX-License-Identifier: MIT

//! Business logic services.

pub mod pairing;
pub mod progress;
pub mod stats;

pub use pairing::PairingService;
pub use progress::ProgressService;
pub use stats::StatsService;
