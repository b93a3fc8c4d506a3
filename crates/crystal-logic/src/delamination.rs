//! Terminal failure sequence.
//!
//! `Stable -> Countdown -> Resolved(outcome)`. The countdown may fall back to
//! `Stable` if damage drops under the explosion point before it expires;
//! once resolved nothing more happens for this crystal.
//!
//! Entry and recovery both read `state.damage`, which only moves on a damage
//! cycle, so frames in between can never flip the phase back and forth.

use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;
use crate::events::{Announcement, AnnouncementKind, ReactorEvent};
use crate::state::ReactorState;
use crate::timer::PeriodicTimer;

/// Countdown announcements are made this often while time is plentiful...
pub const SPEAK_INTERVAL: f32 = 5.0;
/// ...and this often in the final seconds.
pub const SPEAK_INTERVAL_IMMINENT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelamOutcome {
    /// Enough gas to collapse into a singularity.
    Singularity,
    Explosion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelamPhase {
    Stable,
    Countdown,
    Resolved(DelamOutcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delamination {
    pub phase: DelamPhase,
    pub countdown: PeriodicTimer,
    pub speak: PeriodicTimer,
    pub alarm_played: bool,
}

impl Delamination {
    pub fn new(config: &ReactorConfig) -> Self {
        Self {
            phase: DelamPhase::Stable,
            countdown: PeriodicTimer::new(config.delam_duration),
            speak: PeriodicTimer::new(SPEAK_INTERVAL),
            alarm_played: false,
        }
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> f32 {
        (self.countdown.interval - self.countdown.elapsed).max(0.0)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, DelamPhase::Resolved(_))
    }

    fn restart(&mut self) {
        self.countdown.reset();
        self.speak.reset();
        self.speak.set_interval(SPEAK_INTERVAL);
        self.alarm_played = false;
    }
}

/// Advance the failure sequence by `dt` seconds.
///
/// `ambient_moles` is the total gas around the crystal, which decides the
/// outcome when the countdown expires.
pub fn step_delamination(
    state: &mut ReactorState,
    ambient_moles: f32,
    dt: f32,
    config: &ReactorConfig,
) -> Vec<ReactorEvent> {
    let mut events = Vec::new();
    let explosion_point = config.explosion_point;

    match state.delamination.phase {
        DelamPhase::Resolved(_) => {}

        DelamPhase::Stable => {
            if state.damage >= explosion_point {
                state.final_countdown = true;
                let delam = &mut state.delamination;
                delam.phase = DelamPhase::Countdown;
                delam.restart();
                events.push(ReactorEvent::Announcement(Announcement::station(
                    AnnouncementKind::DelaminationStarted,
                    format!(
                        "CRYSTAL DELAMINATION IN PROGRESS. Failsafe engaged. {} seconds until delamination.",
                        config.delam_duration.ceil()
                    ),
                )));
            }
        }

        DelamPhase::Countdown => {
            if state.damage < explosion_point {
                state.final_countdown = false;
                state.delamination.phase = DelamPhase::Stable;
                state.delamination.restart();
                let integrity = state.integrity(config);
                events.push(ReactorEvent::Announcement(Announcement::station(
                    AnnouncementKind::StandDown,
                    format!(
                        "Crystalline hyperstructure has stabilised. Delamination averted. Integrity: {integrity}%."
                    ),
                )));
                return events;
            }

            let delam = &mut state.delamination;
            delam.countdown.advance(dt);
            delam.speak.advance(dt);
            let remaining = delam.remaining();

            if remaining <= 0.0 {
                let outcome = if ambient_moles > config.mole_penalty_threshold {
                    DelamOutcome::Singularity
                } else {
                    DelamOutcome::Explosion
                };
                delam.phase = DelamPhase::Resolved(outcome);
                events.push(match outcome {
                    DelamOutcome::Singularity => ReactorEvent::SingularitySpawned,
                    DelamOutcome::Explosion => ReactorEvent::ExplosionTriggered,
                });
                return events;
            }

            if !delam.alarm_played && remaining <= config.alarm_threshold {
                delam.alarm_played = true;
                events.push(ReactorEvent::AlarmStarted);
            }

            delam.speak.set_interval(if remaining > SPEAK_INTERVAL {
                SPEAK_INTERVAL
            } else {
                SPEAK_INTERVAL_IMMINENT
            });
            if delam.speak.consume() {
                let seconds = remaining.ceil();
                let text = if remaining > SPEAK_INTERVAL {
                    format!("{seconds} seconds remain before delamination.")
                } else {
                    format!("{seconds} seconds until delamination.")
                };
                events.push(ReactorEvent::Announcement(Announcement::station(
                    AnnouncementKind::Countdown,
                    text,
                )));
            }
        }
    }

    events
}
