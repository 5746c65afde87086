//! Lightweight wellness prompts shown next to the calendar.

use std::time::Duration;

/// How often the breathing prompt alternates between inhaling and exhaling.
pub const BREATH_INTERVAL: Duration = Duration::from_secs(4);

const IDLE_MESSAGE: &str = "Pausa para respirar?";
const INHALE_MESSAGE: &str = "Inspire...";
const EXHALE_MESSAGE: &str = "Expire...";

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
enum BreathPhase {
    #[default]
    Idle,
    /// Running, but the first interval has not elapsed yet. The idle prompt
    /// stays up until then.
    Starting,
    Inhale,
    Exhale,
}

/// The "mindful moment" prompt. Toggling it starts a breathing exercise whose
/// message changes on every tick of `BREATH_INTERVAL`.
#[derive(Debug, Default, Clone)]
pub struct BreathingCycle {
    phase: BreathPhase,
}

impl BreathingCycle {
    pub fn new() -> Self {
        BreathingCycle::default()
    }

    pub fn is_breathing(&self) -> bool {
        self.phase != BreathPhase::Idle
    }

    /// Starts the exercise if idle, stops it otherwise. Returns whether the
    /// exercise is running afterwards.
    pub fn toggle(&mut self) -> bool {
        self.phase = match self.phase {
            BreathPhase::Idle => BreathPhase::Starting,
            _ => BreathPhase::Idle,
        };
        self.is_breathing()
    }

    /// Advances the exercise by one interval. Does nothing while idle.
    pub fn tick(&mut self) {
        self.phase = match self.phase {
            BreathPhase::Idle => BreathPhase::Idle,
            BreathPhase::Inhale => BreathPhase::Exhale,
            BreathPhase::Starting | BreathPhase::Exhale => BreathPhase::Inhale,
        };
    }

    pub fn message(&self) -> &'static str {
        match self.phase {
            BreathPhase::Idle | BreathPhase::Starting => IDLE_MESSAGE,
            BreathPhase::Inhale => INHALE_MESSAGE,
            BreathPhase::Exhale => EXHALE_MESSAGE,
        }
    }
}

/// Counts the glasses of water drunk today.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HydrationCounter {
    count: u32,
}

impl HydrationCounter {
    pub fn new() -> Self {
        HydrationCounter::default()
    }

    /// Records one more glass and returns the new total.
    pub fn drink(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn label(&self) -> String {
        format!("Bebi água! ({})", self.count)
    }
}
