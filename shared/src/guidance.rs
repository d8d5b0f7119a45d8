//! First-aid guidance shown while a drone is en route

use crate::limits;

/// Key of the fallback tip list
pub const DEFAULT_TIPS_KEY: &str = "default";

const HEAVY_BLEEDING: &[&str] = &[
    "Apply firm, direct pressure to the wound",
    "Keep the injured area elevated if possible",
    "Do not remove any objects embedded in the wound",
    "Keep the person calm and still",
];

const BREATHING_DIFFICULTY: &[&str] = &[
    "Help the person sit upright",
    "Loosen any tight clothing",
    "Keep airways clear",
    "Stay calm and help them breathe slowly",
];

const HEAD_INJURY: &[&str] = &[
    "Do not move the person",
    "Keep their head and neck still",
    "Monitor breathing closely",
    "Do not give food or water",
];

const DEFAULT_TIPS: &[&str] = &[
    "Stay calm and keep the patient comfortable",
    "Monitor vital signs if possible",
    "Keep the person warm",
    "Wait for medical assistance",
];

/// First-aid instructions for an injury type, in the order to follow them
pub fn tips_for(injury_type: &str) -> &'static [&'static str] {
    match injury_type {
        "heavy_bleeding" => HEAVY_BLEEDING,
        "breathing_difficulty" => BREATHING_DIFFICULTY,
        "head_injury" => HEAD_INJURY,
        _ => DEFAULT_TIPS,
    }
}

/// Simulated arrival countdown
///
/// Starts at [`limits::INITIAL_ETA_MINUTES`] and drops one minute per
/// elapsed minute, holding at [`limits::MIN_ETA_MINUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtaCountdown {
    started_at_ms: u64,
}

impl EtaCountdown {
    pub fn start(now_ms: u64) -> Self {
        Self { started_at_ms: now_ms }
    }

    /// Minutes shown at `now_ms`
    pub fn minutes_remaining(&self, now_ms: u64) -> u32 {
        let elapsed_ticks = now_ms.saturating_sub(self.started_at_ms) / limits::ETA_TICK_MS;
        let max_drop = u64::from(limits::INITIAL_ETA_MINUTES - limits::MIN_ETA_MINUTES);
        limits::INITIAL_ETA_MINUTES - elapsed_ticks.min(max_drop) as u32
    }

    /// Whether the countdown has reached its floor
    pub fn is_arriving(&self, now_ms: u64) -> bool {
        self.minutes_remaining(now_ms) == limits::MIN_ETA_MINUTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tips() {
        let tips = tips_for("heavy_bleeding");
        assert_eq!(tips.len(), 4);
        assert_eq!(tips[0], "Apply firm, direct pressure to the wound");
    }

    #[test]
    fn test_unknown_type_falls_back() {
        assert_eq!(tips_for("fracture"), tips_for(DEFAULT_TIPS_KEY));
        assert_eq!(tips_for(""), DEFAULT_TIPS);
    }

    #[test]
    fn test_eta_counts_down_per_minute() {
        let eta = EtaCountdown::start(1_000);
        assert_eq!(eta.minutes_remaining(1_000), 8);
        assert_eq!(eta.minutes_remaining(1_000 + 59_999), 8);
        assert_eq!(eta.minutes_remaining(1_000 + 60_000), 7);
        assert_eq!(eta.minutes_remaining(1_000 + 3 * 60_000), 5);
    }

    #[test]
    fn test_eta_holds_at_floor() {
        let eta = EtaCountdown::start(0);
        assert_eq!(eta.minutes_remaining(7 * 60_000), 1);
        assert_eq!(eta.minutes_remaining(u64::MAX), 1);
        assert!(eta.is_arriving(60 * 60_000));
    }

    #[test]
    fn test_eta_clock_skew() {
        // A clock reading before the start shows the full ETA
        let eta = EtaCountdown::start(10_000);
        assert_eq!(eta.minutes_remaining(0), 8);
    }
}
