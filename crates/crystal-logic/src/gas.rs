//! Gas species, the per-species reactor coefficient table, and a plain
//! gas mixture value.
//!
//! Species are a closed enum mapped through [`Gas::index`] into fixed-size
//! arrays, so a composition and a coefficient lookup can never disagree on
//! which slot belongs to which gas.

use serde::{Deserialize, Serialize};

/// 0 °C in kelvin.
pub const T0C: f32 = 273.15;

/// Number of tracked gas species.
pub const GAS_COUNT: usize = 9;

/// Gas species the reactor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gas {
    Oxygen,
    Nitrogen,
    CarbonDioxide,
    Plasma,
    Tritium,
    WaterVapor,
    Ammonia,
    NitrousOxide,
    Frezon,
}

/// How a single species influences the crystal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasFacts {
    /// Added (not multiplied) into the radiation transmission bonus.
    pub transmit_modifier: f32,
    /// Added (not multiplied) into the heat modifier. Affects heat and byproduct output.
    pub heat_penalty: f32,
    /// Multiplied with the species ratio into the gasmix power ratio.
    pub power_mix_ratio: f32,
}

impl Gas {
    pub const ALL: [Gas; GAS_COUNT] = [
        Gas::Oxygen,
        Gas::Nitrogen,
        Gas::CarbonDioxide,
        Gas::Plasma,
        Gas::Tritium,
        Gas::WaterVapor,
        Gas::Ammonia,
        Gas::NitrousOxide,
        Gas::Frezon,
    ];

    /// Slot of this species in per-species arrays.
    pub fn index(self) -> usize {
        match self {
            Gas::Oxygen => 0,
            Gas::Nitrogen => 1,
            Gas::CarbonDioxide => 2,
            Gas::Plasma => 3,
            Gas::Tritium => 4,
            Gas::WaterVapor => 5,
            Gas::Ammonia => 6,
            Gas::NitrousOxide => 7,
            Gas::Frezon => 8,
        }
    }

    /// Reactor coefficients for this species.
    pub fn facts(self) -> GasFacts {
        let (transmit_modifier, heat_penalty, power_mix_ratio) = match self {
            Gas::Oxygen => (1.5, 1.0, 1.0),
            Gas::Nitrogen => (0.0, -1.5, -1.0),
            Gas::CarbonDioxide => (0.0, 0.1, 1.0),
            Gas::Plasma => (4.0, 15.0, 1.0),
            Gas::Tritium => (30.0, 10.0, 1.0),
            Gas::WaterVapor => (2.0, 12.0, 1.0),
            Gas::Ammonia => (0.0, 1.0, 1.0),
            Gas::NitrousOxide => (0.0, -5.0, -1.0),
            Gas::Frezon => (3.0, -10.0, -1.0),
        };
        GasFacts {
            transmit_modifier,
            heat_penalty,
            power_mix_ratio,
        }
    }
}

/// Per-species values indexed by [`Gas`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GasArray(pub [f32; GAS_COUNT]);

impl GasArray {
    pub fn get(&self, gas: Gas) -> f32 {
        self.0[gas.index()]
    }

    pub fn set(&mut self, gas: Gas, value: f32) {
        self.0[gas.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gas, f32)> + '_ {
        Gas::ALL.iter().map(move |g| (*g, self.get(*g)))
    }
}

/// Moles of each species plus a temperature in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasMixture {
    pub moles: GasArray,
    pub temperature: f32,
}

impl Default for GasMixture {
    fn default() -> Self {
        Self {
            moles: GasArray::default(),
            temperature: T0C + 20.0,
        }
    }
}

impl GasMixture {
    /// Empty mixture (vacuum).
    pub fn vacuum() -> Self {
        Self {
            moles: GasArray::default(),
            temperature: 2.7,
        }
    }

    pub fn with_moles(mut self, gas: Gas, moles: f32) -> Self {
        self.set_moles(gas, moles);
        self
    }

    pub fn with_temperature(mut self, kelvin: f32) -> Self {
        self.temperature = kelvin;
        self
    }

    pub fn moles(&self, gas: Gas) -> f32 {
        self.moles.get(gas)
    }

    pub fn set_moles(&mut self, gas: Gas, moles: f32) {
        self.moles.set(gas, moles.max(0.0));
    }

    pub fn adjust_moles(&mut self, gas: Gas, delta: f32) {
        let current = self.moles(gas);
        self.set_moles(gas, current + delta);
    }

    pub fn total_moles(&self) -> f32 {
        self.moles.0.iter().sum()
    }

    pub fn is_vacuum(&self) -> bool {
        self.total_moles() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_unique_and_dense() {
        let mut seen = [false; GAS_COUNT];
        for gas in Gas::ALL {
            assert!(!seen[gas.index()], "duplicate index for {:?}", gas);
            seen[gas.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_mixture_totals() {
        let mix = GasMixture::default()
            .with_moles(Gas::Oxygen, 20.0)
            .with_moles(Gas::Nitrogen, 80.0);
        assert_eq!(mix.total_moles(), 100.0);
        assert!(!mix.is_vacuum());
        assert!(GasMixture::vacuum().is_vacuum());
    }

    #[test]
    fn test_moles_never_negative() {
        let mut mix = GasMixture::default().with_moles(Gas::Plasma, 5.0);
        mix.adjust_moles(Gas::Plasma, -10.0);
        assert_eq!(mix.moles(Gas::Plasma), 0.0);
    }

    #[test]
    fn test_gas_facts_table() {
        assert_eq!(Gas::Tritium.facts().transmit_modifier, 30.0);
        assert_eq!(Gas::Nitrogen.facts().power_mix_ratio, -1.0);
        assert_eq!(Gas::Plasma.facts().heat_penalty, 15.0);
    }
}
