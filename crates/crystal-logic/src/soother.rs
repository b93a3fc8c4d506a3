//! Psychological pacification of the crystal by nearby soothers.

use crate::state::ReactorState;

/// Change of the psychologist coefficient per damage cycle.
pub const PSY_STEP: f32 = 0.007;

/// Nudge the coefficient up while a living soother is in range, down otherwise.
pub fn update_psy_coefficient(state: &mut ReactorState, soother_present: bool) {
    let step = if soother_present { PSY_STEP } else { -PSY_STEP };
    state.psy_coefficient = (state.psy_coefficient + step).clamp(0.0, 1.0);
}
