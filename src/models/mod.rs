// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod pairing;
pub mod progress;
pub mod stats;

pub use pairing::{PeerChat, PeerMessage};
pub use progress::LessonProgress;
pub use stats::{ProgressDelta, UserStats};
