//! Coarse reactor status shown to monitors and used to pick alert tone.

use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;
use crate::gas::GasMixture;
use crate::integrity::integrity_percent;
use crate::state::ReactorState;

/// Ordered from least to most alarming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReactorStatus {
    /// No ambient mixture to read.
    Error,
    Inactive,
    Normal,
    Caution,
    Warning,
    Danger,
    Emergency,
    Delaminating,
}

impl ReactorStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReactorStatus::Error => "error",
            ReactorStatus::Inactive => "inactive",
            ReactorStatus::Normal => "normal",
            ReactorStatus::Caution => "caution",
            ReactorStatus::Warning => "warning",
            ReactorStatus::Danger => "danger",
            ReactorStatus::Emergency => "emergency",
            ReactorStatus::Delaminating => "delaminating",
        }
    }
}

/// Classify the reactor from its current state and surroundings.
pub fn compute_status(
    state: &ReactorState,
    config: &ReactorConfig,
    mixture: Option<&GasMixture>,
) -> ReactorStatus {
    let Some(mix) = mixture else {
        return ReactorStatus::Error;
    };

    if state.final_countdown {
        return ReactorStatus::Delaminating;
    }

    let integrity = integrity_percent(state.damage, config.explosion_point);
    if integrity < 25.0 {
        ReactorStatus::Emergency
    } else if integrity < 50.0 {
        ReactorStatus::Danger
    } else if integrity < 75.0 {
        ReactorStatus::Warning
    } else if mix.temperature > config.heat_threshold_kelvin() * 0.8 {
        ReactorStatus::Caution
    } else if state.power > 5.0 {
        ReactorStatus::Normal
    } else {
        ReactorStatus::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::Gas;

    fn room_air() -> GasMixture {
        GasMixture::default()
            .with_moles(Gas::Oxygen, 20.0)
            .with_moles(Gas::Nitrogen, 80.0)
            .with_temperature(200.0)
    }

    #[test]
    fn test_missing_mixture_is_error() {
        let state = ReactorState::default();
        let config = ReactorConfig::default();
        assert_eq!(compute_status(&state, &config, None), ReactorStatus::Error);
    }

    #[test]
    fn test_idle_crystal_is_inactive() {
        let state = ReactorState::default();
        let config = ReactorConfig::default();
        assert_eq!(
            compute_status(&state, &config, Some(&room_air())),
            ReactorStatus::Inactive
        );
    }

    #[test]
    fn test_powered_crystal_is_normal() {
        let state = ReactorState {
            power: 100.0,
            ..Default::default()
        };
        let config = ReactorConfig::default();
        assert_eq!(
            compute_status(&state, &config, Some(&room_air())),
            ReactorStatus::Normal
        );
    }

    #[test]
    fn test_integrity_bands() {
        let config = ReactorConfig::default();
        let air = room_air();
        let at = |damage: f32| {
            let state = ReactorState {
                damage,
                ..Default::default()
            };
            compute_status(&state, &config, Some(&air))
        };
        assert_eq!(at(300.0), ReactorStatus::Warning);
        assert_eq!(at(500.0), ReactorStatus::Danger);
        assert_eq!(at(800.0), ReactorStatus::Emergency);
    }

    #[test]
    fn test_hot_crystal_is_caution() {
        let state = ReactorState::default();
        let config = ReactorConfig::default();
        let hot = room_air().with_temperature(300.0);
        assert_eq!(
            compute_status(&state, &config, Some(&hot)),
            ReactorStatus::Caution
        );
    }

    #[test]
    fn test_ordering() {
        assert!(ReactorStatus::Delaminating > ReactorStatus::Emergency);
        assert!(ReactorStatus::Warning > ReactorStatus::Caution);
        assert!(ReactorStatus::Inactive > ReactorStatus::Error);
    }
}
