//! Pure crystal reactor logic.
//!
//! This crate holds the reactor's physics and failure handling with no
//! engine, world, or runtime attached. Functions take plain data and a
//! mutable [`state::ReactorState`] and return [`events::ReactorEvent`]s for
//! the caller to apply, so the nonlinear gas → power → heat → gas loop can be
//! tested in isolation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`anomaly`] | Anomaly rolls from power |
//! | [`audio`] | Ambient loop selection and accent pacing |
//! | [`config`] | Per-prototype thresholds, JSON loading and validation |
//! | [`consumption`] | Destructibility rules and power gained from consumed matter |
//! | [`delamination`] | Terminal countdown, alarm, singularity vs. explosion |
//! | [`events`] | Side effects requested of the engine |
//! | [`exchange`] | Composition ratios, heat/transmission coefficients, powerloss inhibition |
//! | [`gas`] | Enumerated species, coefficient table, gas mixtures |
//! | [`integrity`] | Damage accumulation, healing, space exposure, integrity announcements |
//! | [`power`] | Power gain, radiation, reaction heat, power decay |
//! | [`production`] | Plasma and oxygen byproducts |
//! | [`reactor`] | One full tick in stage order |
//! | [`soother`] | Psychologist coefficient from nearby soothers |
//! | [`state`] | Per-crystal mutable state |
//! | [`status`] | Coarse status classification for monitors |
//! | [`timer`] | Phase-preserving periodic timers |
//! | [`zap`] | Lightning discharge planning |

pub mod anomaly;
pub mod audio;
pub mod config;
pub mod consumption;
pub mod delamination;
pub mod events;
pub mod exchange;
pub mod gas;
pub mod integrity;
pub mod power;
pub mod production;
pub mod reactor;
pub mod soother;
pub mod state;
pub mod status;
pub mod timer;
pub mod zap;
