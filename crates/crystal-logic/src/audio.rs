//! Ambient hum and accent sounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;
use crate::events::ReactorEvent;
use crate::state::ReactorState;
use crate::status::ReactorStatus;

/// Chance an accent is attempted on an atmos cycle.
pub const ACCENT_CHANCE: f64 = 0.05;

/// Which family of sounds the crystal makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    Delam,
}

impl Mood {
    pub fn for_status(status: ReactorStatus) -> Self {
        if status >= ReactorStatus::Danger {
            Mood::Delam
        } else {
            Mood::Calm
        }
    }

    pub fn loop_sound(self, config: &ReactorConfig) -> &str {
        match self {
            Mood::Calm => &config.calm_loop_sound,
            Mood::Delam => &config.delam_loop_sound,
        }
    }

    pub fn accent_sound(self, config: &ReactorConfig) -> &str {
        match self {
            Mood::Calm => &config.calm_accent_sound,
            Mood::Delam => &config.delam_accent_sound,
        }
    }
}

/// Looping ambience around the crystal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientSound {
    pub mood: Mood,
    /// Whole steps in [-5, 5].
    pub volume: f32,
}

/// Louder with power: silent-ish when idle, full at 500.
pub fn ambient_volume(power: f32) -> f32 {
    (power / 50.0 - 5.0).clamp(-5.0, 5.0).round()
}

/// Pick the loop for the current status and power. Only changes are reported.
pub fn update_ambient(state: &mut ReactorState) -> Option<ReactorEvent> {
    let ambient = AmbientSound {
        mood: Mood::for_status(state.status),
        volume: ambient_volume(state.power),
    };
    if state.ambient == Some(ambient) {
        return None;
    }
    state.ambient = Some(ambient);
    Some(ReactorEvent::AmbientChanged(ambient))
}

/// Seconds required between accents. A crystal driven hard by both damage
/// and power chirps more often.
pub fn accent_cooldown(state: &ReactorState, config: &ReactorConfig) -> f32 {
    let aggression = ((state.damage / 800.0) * (state.power / 2500.0)).min(1.0) * 100.0;
    ((100.0 - aggression) * 5.0)
        .round()
        .max(config.accent_min_cooldown)
}

/// Maybe play an accent. `state.since_accent` must already include this frame.
pub fn roll_accent<R: Rng + ?Sized>(
    state: &mut ReactorState,
    config: &ReactorConfig,
    rng: &mut R,
) -> Option<ReactorEvent> {
    if !rng.gen_bool(ACCENT_CHANCE) || state.since_accent < accent_cooldown(state, config) {
        return None;
    }
    state.since_accent = 0.0;
    Some(ReactorEvent::AccentPlayed(Mood::for_status(state.status)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mood_follows_status() {
        assert_eq!(Mood::for_status(ReactorStatus::Warning), Mood::Calm);
        assert_eq!(Mood::for_status(ReactorStatus::Danger), Mood::Delam);
        assert_eq!(Mood::for_status(ReactorStatus::Delaminating), Mood::Delam);
    }

    #[test]
    fn test_ambient_volume_steps() {
        assert_eq!(ambient_volume(0.0), -5.0);
        assert_eq!(ambient_volume(250.0), 0.0);
        assert_eq!(ambient_volume(9000.0), 5.0);
    }

    #[test]
    fn test_ambient_reported_on_change_only() {
        let mut state = ReactorState::default();
        assert!(update_ambient(&mut state).is_some());
        assert!(update_ambient(&mut state).is_none());

        state.status = ReactorStatus::Emergency;
        let event = update_ambient(&mut state);
        assert_eq!(
            event,
            Some(ReactorEvent::AmbientChanged(AmbientSound {
                mood: Mood::Delam,
                volume: -5.0
            }))
        );
    }

    #[test]
    fn test_accent_cooldown_shrinks_with_aggression() {
        let config = ReactorConfig::default();
        let idle = ReactorState::default();
        assert_eq!(accent_cooldown(&idle, &config), 500.0);

        let driven = ReactorState {
            damage: 800.0,
            power: 2500.0,
            ..Default::default()
        };
        assert_eq!(accent_cooldown(&driven, &config), config.accent_min_cooldown);
    }

    #[test]
    fn test_accent_waits_for_cooldown() {
        let config = ReactorConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = ReactorState {
            damage: 800.0,
            power: 2500.0,
            status: ReactorStatus::Emergency,
            ..Default::default()
        };

        let mut played = Vec::new();
        // 200 s of atmos cycles
        for step in 0..400 {
            state.since_accent += 0.5;
            if let Some(event) = roll_accent(&mut state, &config, &mut rng) {
                played.push((step, event));
            }
        }
        assert!(!played.is_empty());
        assert!(played
            .iter()
            .all(|(_, e)| *e == ReactorEvent::AccentPlayed(Mood::Delam)));
        for pair in played.windows(2) {
            // at least the 2 s minimum apart
            assert!(pair[1].0 - pair[0].0 >= 4);
        }
    }
}
