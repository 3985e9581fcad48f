//! Periodic identifications of the UV domain.
//!
//! A wrapping axis is identified modulo 1. These helpers keep triangles that
//! straddle a seam contiguous around the view center.

use crate::types::Uv;
use serde::{Deserialize, Serialize};

/// Which UV axes wrap, and which seams reverse orientation when crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seams {
    pub wrap_u: bool,
    pub wrap_v: bool,
    pub flip_u: bool,
    pub flip_v: bool,
}

impl Seams {
    /// Map every wrapping coordinate into `[0, 1)`.
    pub fn normalize(&self, uv: &Uv) -> Uv {
        let mut out = *uv;
        if self.wrap_u {
            out.x = normalize_coordinate(uv.x);
        }
        if self.wrap_v {
            out.y = normalize_coordinate(uv.y);
        }
        out
    }

    /// UV distance taking the shorter way around each wrapping axis.
    ///
    /// Local approximation only; used for neighborhood culling.
    pub fn uv_distance(&self, a: &Uv, b: &Uv) -> f64 {
        let mut du = (b.x - a.x).abs();
        let mut dv = (b.y - a.y).abs();
        if self.wrap_u {
            du = du.min(1.0 - du);
        }
        if self.wrap_v {
            dv = dv.min(1.0 - dv);
        }
        (du * du + dv * dv).sqrt()
    }

    /// Pick the representative of `point` nearest to `center` on each wrapping axis.
    pub fn adjust_for_wrapping(&self, point: &Uv, center: &Uv) -> Uv {
        let mut out = *point;
        if self.wrap_u {
            out.x = nearest_representative(point.x, center.x);
        }
        if self.wrap_v {
            out.y = nearest_representative(point.y, center.y);
        }
        out
    }
}

/// `((x mod 1) + 1) mod 1`, always in `[0, 1)`.
pub fn normalize_coordinate(x: f64) -> f64 {
    ((x % 1.0) + 1.0) % 1.0
}

/// Closest of `{x - 1, x, x + 1}` to `center`; the earliest candidate wins ties.
pub fn nearest_representative(x: f64, center: f64) -> f64 {
    let candidates = [x - 1.0, x, x + 1.0];
    let mut best = candidates[0];
    let mut best_dist = (best - center).abs();
    for &candidate in &candidates[1..] {
        let dist = (candidate - center).abs();
        if dist < best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}
