use crate::error::TopologyError;
use crate::surfaces::SurfaceKind;
use serde::{Deserialize, Serialize};

/// Tunables for an [`Explorer`](crate::explorer::Explorer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    /// UV radius of the neighborhood that gets embedded and drawn.
    pub view_radius: f64,
    /// UV distance covered by one unit of steering intent.
    pub move_speed: f64,
    /// Display length of the world basis arrows.
    pub axis_length: f64,
    /// View rotation applied per turn step, in radians.
    pub turn_rate: f64,
    pub initial_surface: SurfaceKind,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            view_radius: 0.3,
            move_speed: 0.02,
            axis_length: 0.15,
            turn_rate: 0.05,
            initial_surface: SurfaceKind::Torus,
        }
    }
}

impl ExplorerSettings {
    pub fn validate(&self) -> Result<(), TopologyError> {
        let positive = [
            ("view_radius", self.view_radius),
            ("move_speed", self.move_speed),
            ("axis_length", self.axis_length),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TopologyError::InvalidSettings(format!(
                    "{name} must be finite and positive (got {value})"
                )));
            }
        }
        if !self.turn_rate.is_finite() {
            return Err(TopologyError::InvalidSettings(format!(
                "turn_rate must be finite (got {})",
                self.turn_rate
            )));
        }
        Ok(())
    }
}
