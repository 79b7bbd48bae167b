//! Parameter types configuring the dehazing stages.
//!
//! One immutable configuration structure is passed into the pipeline entry
//! point; stages never re-specify their own copies of shared knobs, so there
//! is a single authoritative value for each.
//!
//! Defaults follow the dark-channel-prior literature and work well for
//! outdoor photographs at common resolutions. For tuning, start with `omega`
//! (haze removal strength) and `guided_radius` (halo suppression).

use crate::error::DehazeError;
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
///
/// Window radii are `usize`, so negative radii are unrepresentable; the
/// remaining range constraints are enforced by [`DehazeParams::validate`]
/// before any stage runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DehazeParams {
    /// Haze removal strength in (0, 1]. Values below 1 keep a fraction
    /// `1 − ω` of the haze so distant objects retain depth cues.
    pub omega: f32,
    /// Lower bound applied to the refined transmission before recovery,
    /// preventing near-zero division in dense haze. Must be ≥ 0.
    pub t0: f32,
    /// Window radius for the dark-channel and raw-transmission minima.
    pub dark_radius: usize,
    /// Box radius of the guided-filter refinement windows.
    pub guided_radius: usize,
    /// Guided-filter regularization. Larger values smooth more and preserve
    /// edges less. Must be > 0 (keeps the 3×3 solve non-singular in flat
    /// guidance regions).
    pub eps: f32,
}

impl Default for DehazeParams {
    fn default() -> Self {
        Self {
            omega: 0.95,
            t0: 0.1,
            dark_radius: 7,
            guided_radius: 60,
            eps: 1e-3,
        }
    }
}

impl DehazeParams {
    /// Reject out-of-range parameters before pipeline execution.
    pub fn validate(&self) -> Result<(), DehazeError> {
        if !(self.omega > 0.0 && self.omega <= 1.0) {
            return Err(DehazeError::ParameterOutOfRange {
                name: "omega",
                value: self.omega,
                constraint: "in (0, 1]",
            });
        }
        if !(self.t0 >= 0.0) {
            return Err(DehazeError::ParameterOutOfRange {
                name: "t0",
                value: self.t0,
                constraint: ">= 0",
            });
        }
        if !(self.eps > 0.0) {
            return Err(DehazeError::ParameterOutOfRange {
                name: "eps",
                value: self.eps,
                constraint: "> 0",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DehazeParams::default().validate().is_ok());
    }

    #[test]
    fn omega_bounds_are_enforced() {
        for omega in [0.0, -0.5, 1.01, f32::NAN] {
            let params = DehazeParams {
                omega,
                ..Default::default()
            };
            assert!(
                matches!(
                    params.validate(),
                    Err(DehazeError::ParameterOutOfRange { name: "omega", .. })
                ),
                "omega={omega} should be rejected"
            );
        }
    }

    #[test]
    fn negative_t0_is_rejected() {
        let params = DehazeParams {
            t0: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DehazeError::ParameterOutOfRange { name: "t0", .. })
        ));
    }

    #[test]
    fn non_positive_eps_is_rejected() {
        let params = DehazeParams {
            eps: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DehazeError::ParameterOutOfRange { name: "eps", .. })
        ));
    }
}
