//! Motivational messages by completion tier

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const HIGH: [&str; 3] = [
    "🌟 You're on fire! Keep pushing forward!",
    "💯 Almost there—finish strong!",
    "🔥 Your hard work is paying off!",
];

const MEDIUM: [&str; 3] = [
    "🚀 Great progress! Keep going!",
    "📚 Halfway done—stay consistent!",
    "💡 You're making steady progress!",
];

const LOW: [&str; 3] = [
    "🔥 Every small step counts—keep moving!",
    "💡 Stay consistent and don't give up!",
    "🌱 Growth takes time—keep learning!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// High from 80 %, medium from 50 %
    pub fn for_rate(rate: f64) -> Self {
        if rate >= 80.0 {
            Tier::High
        } else if rate >= 50.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            Tier::High => &HIGH,
            Tier::Medium => &MEDIUM,
            Tier::Low => &LOW,
        }
    }

    /// One message of the tier, uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.messages().choose(rng).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_rate(100.0), Tier::High);
        assert_eq!(Tier::for_rate(80.0), Tier::High);
        assert_eq!(Tier::for_rate(79.9), Tier::Medium);
        assert_eq!(Tier::for_rate(50.0), Tier::Medium);
        assert_eq!(Tier::for_rate(49.9), Tier::Low);
        assert_eq!(Tier::for_rate(0.0), Tier::Low);
    }

    #[test]
    fn test_pick_stays_in_tier() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in [Tier::High, Tier::Medium, Tier::Low] {
            for _ in 0..20 {
                assert!(tier.messages().contains(&tier.pick(&mut rng)));
            }
        }
    }
}
