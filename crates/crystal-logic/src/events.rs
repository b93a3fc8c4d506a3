//! Events produced by the reactor logic.
//!
//! Logic functions never touch the world directly. They return
//! [`ReactorEvent`]s which the engine applies to its collaborators
//! (atmosphere, damage bookkeeping, chat, audio, entity spawning).

use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyKind;
use crate::audio::{AmbientSound, Mood};
use crate::production::ProducedGas;
use crate::status::ReactorStatus;
use crate::zap::ZapPlan;

/// Who hears an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementScope {
    /// Station-wide broadcast.
    Station,
    /// Spoken by the crystal to those nearby.
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnouncementKind {
    Warning,
    Emergency,
    Healing,
    PowerThreshold,
    PowerlossThreshold,
    MoleThreshold,
    DelaminationStarted,
    Countdown,
    StandDown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub kind: AnnouncementKind,
    pub scope: AnnouncementScope,
    pub text: String,
}

impl Announcement {
    pub fn station(kind: AnnouncementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            scope: AnnouncementScope::Station,
            text: text.into(),
        }
    }

    pub fn local(kind: AnnouncementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            scope: AnnouncementScope::Local,
            text: text.into(),
        }
    }
}

/// Side effect requested by the reactor for the engine to carry out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReactorEvent {
    Announcement(Announcement),
    /// Radiation pulse from the crystal.
    RadiationEmitted { amount: f32, range: f32 },
    /// Byproducts to merge into the tile, and the tile's new temperature.
    GasReleased { produced: ProducedGas, temperature: f32 },
    /// Damage to forward to the damageable collaborator (negative heals).
    DamageChanged { delta: f32 },
    LightningDischarged(ZapPlan),
    /// Anomalies to place around the crystal, one per entry.
    AnomaliesSpawned(Vec<AnomalyKind>),
    /// Ambient loop or its volume changed.
    AmbientChanged(AmbientSound),
    /// One-off accent heard near the crystal.
    AccentPlayed(Mood),
    StatusChanged {
        from: ReactorStatus,
        to: ReactorStatus,
    },
    /// Countdown alarm begins. Emitted once per countdown.
    AlarmStarted,
    /// Entity touched the crystal: it is deleted and ash is left at its
    /// coordinates.
    EntityConsumed { entity: u64, power_gain: f32 },
    /// Countdown resolved with enough gas around: crystal becomes a singularity.
    SingularitySpawned,
    /// Countdown resolved in thin gas: the crystal explodes and is deleted.
    ExplosionTriggered,
}

impl ReactorEvent {
    /// Whether this event ends the crystal's existence.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReactorEvent::SingularitySpawned | ReactorEvent::ExplosionTriggered
        )
    }
}
