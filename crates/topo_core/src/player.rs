use serde::{Deserialize, Serialize};

use crate::surfaces::Surface;
use crate::types::{Orientation, Uv};
use crate::wrap::normalize_coordinate;

/// Signed count of seam crossings per axis. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossings {
    pub u: i64,
    pub v: i64,
}

/// What a single move did at the seams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// `+1`/`-1` when the U seam was crossed forwards/backwards, else `0`.
    pub crossed_u: i8,
    pub crossed_v: i8,
    /// True when the move left the orientation reversed relative to before.
    pub orientation_flipped: bool,
}

/// The viewpoint: position in UV, chirality and seam bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Uv,
    pub orientation: Orientation,
    pub crossings: Crossings,
}

impl PlayerState {
    pub fn new(position: Uv) -> Self {
        Self {
            position,
            orientation: Orientation::Direct,
            crossings: Crossings::default(),
        }
    }

    /// Move by `delta`, wrapping or clamping each axis per the surface seams.
    ///
    /// A wrapping axis is crossed at most once per move, so deltas are
    /// expected to stay below one period. A non-finite delta is ignored.
    pub fn apply_move(&mut self, surface: &Surface, delta: Uv) -> MoveOutcome {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            tracing::warn!(
                surface = surface.kind().as_str(),
                du = delta.x,
                dv = delta.y,
                "ignoring non-finite move"
            );
            return MoveOutcome::default();
        }
        let seams = surface.seams();
        let before = self.orientation;
        let mut new_u = self.position.x + delta.x;
        let mut new_v = self.position.y + delta.y;
        let mut outcome = MoveOutcome::default();

        if seams.wrap_u {
            outcome.crossed_u = wrap_axis(&mut new_u, &mut self.crossings.u);
            if outcome.crossed_u != 0 && seams.flip_u {
                self.orientation = self.orientation.flipped();
            }
        } else {
            let (lo, hi) = surface.u_clamp();
            new_u = new_u.clamp(lo, hi);
        }

        if seams.wrap_v {
            outcome.crossed_v = wrap_axis(&mut new_v, &mut self.crossings.v);
            if outcome.crossed_v != 0 && seams.flip_v {
                self.orientation = self.orientation.flipped();
            }
        } else {
            let (lo, hi) = surface.v_clamp();
            new_v = new_v.clamp(lo, hi);
        }

        self.position = Uv::new(new_u, new_v);
        outcome.orientation_flipped = self.orientation != before;

        if outcome.crossed_u != 0 || outcome.crossed_v != 0 {
            tracing::debug!(
                surface = surface.kind().as_str(),
                crossed_u = outcome.crossed_u,
                crossed_v = outcome.crossed_v,
                orientation = self.orientation.sign(),
                "viewpoint crossed a seam"
            );
        }
        outcome
    }
}

fn wrap_axis(value: &mut f64, counter: &mut i64) -> i8 {
    if *value >= 1.0 {
        *counter += 1;
        *value = normalize_coordinate(*value - 1.0);
        1
    } else if *value < 0.0 {
        *counter -= 1;
        // -1e-17 + 1.0 rounds to 1.0.
        *value = normalize_coordinate(*value + 1.0);
        -1
    } else {
        0
    }
}
