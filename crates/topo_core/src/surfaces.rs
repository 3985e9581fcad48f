//! Registry of the explorable surfaces.
//!
//! Each [`SurfaceKind`] fixes a closed-form metric and curvature, its seam
//! identifications, a triangulated parameter domain and a few landmarks.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::traits::MetricField;
use crate::triangulation::create_regular_triangulation;
use crate::types::{Landmark, MetricTensor, Triangle, Uv};
use crate::wrap::Seams;

const TAU: f64 = 2.0 * PI;

const TORUS_MAJOR_RADIUS: f64 = 3.0;
const TORUS_MINOR_RADIUS: f64 = 1.0;

const HILL_CENTER: (f64, f64) = (0.5, 0.0);
const HILL_RADIUS: f64 = 0.15;
const HILL_HEIGHT: f64 = 8.0;

const PROJECTIVE_MIN_SIN: f64 = 1e-4;

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Torus,
    Moebius,
    /// Larger Möbius strip carrying a smooth curvature hill.
    Moebius2,
    Klein,
    Projective,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 5] = [
        SurfaceKind::Torus,
        SurfaceKind::Moebius,
        SurfaceKind::Moebius2,
        SurfaceKind::Klein,
        SurfaceKind::Projective,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Torus => "torus",
            SurfaceKind::Moebius => "moebius",
            SurfaceKind::Moebius2 => "moebius2",
            SurfaceKind::Klein => "klein",
            SurfaceKind::Projective => "projective",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SurfaceKind::Torus => "Torus",
            SurfaceKind::Moebius => "Möbius strip",
            SurfaceKind::Moebius2 => "Möbius strip with hill",
            SurfaceKind::Klein => "Klein bottle",
            SurfaceKind::Projective => "Projective plane",
        }
    }

    pub fn seams(self) -> Seams {
        match self {
            SurfaceKind::Torus => Seams {
                wrap_u: true,
                wrap_v: true,
                flip_u: false,
                flip_v: false,
            },
            SurfaceKind::Moebius | SurfaceKind::Moebius2 => Seams {
                wrap_u: true,
                wrap_v: false,
                flip_u: true,
                flip_v: false,
            },
            SurfaceKind::Klein => Seams {
                wrap_u: true,
                wrap_v: true,
                flip_u: true,
                flip_v: false,
            },
            SurfaceKind::Projective => Seams {
                wrap_u: true,
                wrap_v: true,
                flip_u: true,
                flip_v: true,
            },
        }
    }

    pub fn grid(self) -> GridSpec {
        let unit = (0.0, 1.0);
        let strip = (-0.3, 0.3);
        match self {
            SurfaceKind::Torus | SurfaceKind::Klein => GridSpec::new(25, 15, unit, unit),
            SurfaceKind::Moebius | SurfaceKind::Moebius2 => GridSpec::new(30, 10, unit, strip),
            SurfaceKind::Projective => GridSpec::new(20, 20, unit, unit),
        }
    }

    pub fn landmarks(self) -> Vec<Landmark> {
        match self {
            SurfaceKind::Torus => vec![
                Landmark::new(0.0, 0.0, "A", RED),
                Landmark::new(0.5, 0.0, "B", GREEN),
                Landmark::new(0.0, 0.5, "C", BLUE),
                Landmark::new(0.5, 0.5, "D", YELLOW),
            ],
            SurfaceKind::Moebius => vec![Landmark::new(0.5, 0.0, "Center", GREEN)],
            SurfaceKind::Moebius2 => vec![Landmark::new(0.5, 0.0, "Hill", GREEN)],
            SurfaceKind::Klein => vec![
                Landmark::new(0.35, 0.25, "A", RED),
                Landmark::new(0.65, 0.75, "B", BLUE),
            ],
            SurfaceKind::Projective => vec![Landmark::new(0.25, 0.5, "E", BLUE)],
        }
    }

    /// Where the viewpoint lands after switching to this surface.
    pub fn start_position(self) -> Uv {
        match self {
            SurfaceKind::Moebius => Uv::new(0.1, 0.0),
            _ => Uv::new(0.1, 0.1),
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurfaceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TopologyError::UnknownSurface(s.to_string()))
    }
}

impl MetricField for SurfaceKind {
    fn metric(&self, uv: &Uv) -> Option<MetricTensor> {
        Some(match self {
            SurfaceKind::Torus => torus_metric(uv),
            SurfaceKind::Moebius => MetricTensor::new(40.0, 0.0, 2.25),
            SurfaceKind::Moebius2 => MetricTensor::new(160.0, 0.0, 9.0),
            SurfaceKind::Klein => MetricTensor::new(4.0 * TAU * TAU, 0.0, TAU * TAU),
            SurfaceKind::Projective => projective_metric(uv),
        })
    }

    fn curvature(&self, uv: &Uv) -> Option<f64> {
        Some(match self {
            SurfaceKind::Torus => torus_curvature(uv),
            SurfaceKind::Moebius => 0.0,
            SurfaceKind::Moebius2 => hill_curvature(uv),
            SurfaceKind::Klein => 0.2 * (uv.x * TAU).sin() * (uv.y * TAU).cos(),
            SurfaceKind::Projective => 1.0,
        })
    }
}

/// Rectangular parameter domain and its grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub res_u: usize,
    pub res_v: usize,
    pub u_range: (f64, f64),
    pub v_range: (f64, f64),
}

impl GridSpec {
    pub fn new(res_u: usize, res_v: usize, u_range: (f64, f64), v_range: (f64, f64)) -> Self {
        Self {
            res_u,
            res_v,
            u_range,
            v_range,
        }
    }

    pub fn center(&self) -> Uv {
        Uv::new(
            0.5 * (self.u_range.0 + self.u_range.1),
            0.5 * (self.v_range.0 + self.v_range.1),
        )
    }
}

/// A fully built surface. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Surface {
    kind: SurfaceKind,
    seams: Seams,
    grid: GridSpec,
    triangles: Vec<Triangle>,
    landmarks: Vec<Landmark>,
}

impl Surface {
    pub fn new(kind: SurfaceKind) -> Self {
        let grid = kind.grid();
        let triangles =
            create_regular_triangulation(grid.res_u, grid.res_v, grid.u_range, grid.v_range);
        Self {
            kind,
            seams: kind.seams(),
            grid,
            triangles,
            landmarks: kind.landmarks(),
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn seams(&self) -> &Seams {
        &self.seams
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Range a non-wrapping U coordinate is clamped to.
    pub fn u_clamp(&self) -> (f64, f64) {
        self.grid.u_range
    }

    /// Range a non-wrapping V coordinate is clamped to; `[-0.3, 0.3]` on the strips.
    pub fn v_clamp(&self) -> (f64, f64) {
        self.grid.v_range
    }
}

impl MetricField for Surface {
    fn metric(&self, uv: &Uv) -> Option<MetricTensor> {
        self.kind.metric(uv)
    }

    fn curvature(&self, uv: &Uv) -> Option<f64> {
        self.kind.curvature(uv)
    }
}

fn torus_metric(uv: &Uv) -> MetricTensor {
    let phi = uv.y * TAU;
    let ring = TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * phi.cos();
    MetricTensor::new(
        ring * ring * TAU * TAU,
        0.0,
        (TORUS_MINOR_RADIUS * TAU).powi(2),
    )
}

fn torus_curvature(uv: &Uv) -> f64 {
    let cos_phi = (uv.y * TAU).cos();
    let denominator = TORUS_MINOR_RADIUS * (TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * cos_phi);
    if denominator != 0.0 {
        cos_phi / denominator
    } else {
        0.0
    }
}

fn projective_metric(uv: &Uv) -> MetricTensor {
    let mut sin_theta = (uv.y * PI).sin();
    if sin_theta == 0.0 {
        sin_theta = PROJECTIVE_MIN_SIN;
    }
    MetricTensor::new(PI * PI * sin_theta * sin_theta, 0.0, PI * PI)
}

/// C∞ bump `H·exp(1 - 1/(1 - (r/R)²))` inside the hill disc, zero outside.
///
/// `r` is measured the short way around the strip's U seam.
fn hill_curvature(uv: &Uv) -> f64 {
    let center = Uv::new(HILL_CENTER.0, HILL_CENTER.1);
    let r = SurfaceKind::Moebius2.seams().uv_distance(uv, &center);
    let r_sq = r * r;
    let radius_sq = HILL_RADIUS * HILL_RADIUS;
    if r_sq >= radius_sq {
        return 0.0;
    }
    let r_norm_sq = r_sq / radius_sq;
    HILL_HEIGHT * (1.0 - 1.0 / (1.0 - r_norm_sq)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{curvature_at, metric_at};

    #[test]
    fn kinds_round_trip_through_strings() {
        for kind in SurfaceKind::ALL {
            assert_eq!(kind.as_str().parse::<SurfaceKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "sphere".parse::<SurfaceKind>().expect_err("sphere is not registered");
        assert_eq!(err, TopologyError::UnknownSurface("sphere".to_string()));
    }

    #[test]
    fn triangle_counts_follow_grid() {
        let expected = [
            (SurfaceKind::Torus, 750),
            (SurfaceKind::Moebius, 600),
            (SurfaceKind::Moebius2, 600),
            (SurfaceKind::Klein, 750),
            (SurfaceKind::Projective, 800),
        ];
        for (kind, count) in expected {
            assert_eq!(Surface::new(kind).triangles().len(), count, "{kind}");
        }
    }

    #[test]
    fn metrics_stay_positive_on_samples() {
        for kind in SurfaceKind::ALL {
            let surface = Surface::new(kind);
            for i in 0..=20 {
                for j in 0..=20 {
                    let uv = Uv::new(i as f64 / 20.0, j as f64 / 20.0);
                    let g = metric_at(&surface, &uv);
                    assert!(g.g11 > 0.0 && g.g22 > 0.0, "{kind} at {uv:?}");
                }
            }
        }
    }

    #[test]
    fn projective_metric_avoids_zero_at_pole() {
        let g = metric_at(&SurfaceKind::Projective, &Uv::new(0.3, 0.0));
        assert!((g.g11 - PI * PI * 1e-8).abs() < 1e-15);
    }

    #[test]
    fn torus_curvature_changes_sign() {
        let outer = curvature_at(&SurfaceKind::Torus, &Uv::new(0.0, 0.0));
        let inner = curvature_at(&SurfaceKind::Torus, &Uv::new(0.0, 0.5));
        assert!((outer - 0.25).abs() < 1e-12);
        assert!((inner + 0.5).abs() < 1e-12);
    }

    #[test]
    fn hill_peaks_at_center_and_vanishes_outside() {
        let kind = SurfaceKind::Moebius2;
        assert!((curvature_at(&kind, &Uv::new(0.5, 0.0)) - HILL_HEIGHT).abs() < 1e-12);
        let inside = curvature_at(&kind, &Uv::new(0.5, 0.1));
        assert!(inside > 0.0 && inside < HILL_HEIGHT);
        assert_eq!(curvature_at(&kind, &Uv::new(0.5, 0.15)), 0.0);
        assert_eq!(curvature_at(&kind, &Uv::new(0.5, 0.2)), 0.0);
        assert_eq!(curvature_at(&kind, &Uv::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn hill_decays_smoothly_towards_rim() {
        let kind = SurfaceKind::Moebius2;
        let near_rim = curvature_at(&kind, &Uv::new(0.5, 0.149));
        assert!(near_rim > 0.0 && near_rim < 1e-6);
    }

    #[test]
    fn strips_clamp_v_to_their_width() {
        for kind in [SurfaceKind::Moebius, SurfaceKind::Moebius2] {
            assert_eq!(Surface::new(kind).v_clamp(), (-0.3, 0.3));
        }
        assert_eq!(Surface::new(SurfaceKind::Torus).v_clamp(), (0.0, 1.0));
    }

    #[test]
    fn start_positions_match_registry() {
        assert_eq!(SurfaceKind::Moebius.start_position(), Uv::new(0.1, 0.0));
        assert_eq!(SurfaceKind::Klein.start_position(), Uv::new(0.1, 0.1));
        assert_eq!(Surface::new(SurfaceKind::Torus).grid().center(), Uv::new(0.5, 0.5));
    }
}
