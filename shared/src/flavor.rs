//! Presentation flavor attached to each chat response
//!
//! A simulated step count and a wellness reminder. Neither influences the
//! reply text; both draw from a caller-supplied RNG so tests can seed it.

use rand::Rng;
use std::ops::RangeInclusive;

/// Reminders shown next to the reply
pub const REMINDERS: [&str; 4] = [
    "💧 Don’t forget to drink water!",
    "🚶 Time for a walk break.",
    "🧘 Do a quick 2 min stretch.",
    "🍎 Eat a fruit instead of junk food.",
];

/// Bounds of the simulated step count (inclusive)
pub const STEP_RANGE: RangeInclusive<u32> = 2000..=12000;

/// Flavor values for one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flavor {
    pub steps_today: u32,
    pub reminder: &'static str,
}

impl Flavor {
    /// Draw a step count and a reminder, in that order
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let steps_today = rng.gen_range(STEP_RANGE);
        let reminder = REMINDERS[rng.gen_range(0..REMINDERS.len())];
        Self {
            steps_today,
            reminder,
        }
    }
}
