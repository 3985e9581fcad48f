//! Local embedding of a UV neighborhood into R³.
//!
//! Offsets from the view center are mapped into the tangent plane with the
//! basis and metric frozen at the center, then bent onto the osculating
//! paraboloid `z = -K·(x² + y²)/2`. The approximation is second order and
//! only meaningful close to the center, which is why meshes are culled to a
//! radius.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::metric::{basis_from_metric, curvature_at, metric_at};
use crate::surfaces::Surface;
use crate::traits::MetricField;
use crate::types::{
    LocalMesh, MetricTensor, Orientation, Resolved, TangentBasis, Uv, VisibleLandmark,
};
use crate::wrap::Seams;

/// Geometry frozen at a view center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    pub center: Uv,
    pub basis: TangentBasis,
    pub metric: MetricTensor,
    pub curvature: f64,
}

impl LocalFrame {
    /// Evaluate basis, metric and curvature once at `center`.
    pub fn at<F: MetricField + ?Sized>(field: &F, center: Uv) -> Resolved<Self> {
        let metric = metric_at(field, &center);
        let curvature = curvature_at(field, &center);
        let basis = basis_from_metric(&metric);

        if !metric.is_finite() || !curvature.is_finite() {
            return Resolved::Fallback(Self::flat(center));
        }
        let frame = Self {
            center,
            basis: *basis.value(),
            metric,
            curvature,
        };
        if basis.is_fallback() {
            Resolved::Fallback(frame)
        } else {
            Resolved::Exact(frame)
        }
    }

    /// Identity basis, identity metric, no bending.
    pub fn flat(center: Uv) -> Self {
        Self {
            center,
            basis: TangentBasis::identity(),
            metric: MetricTensor::IDENTITY,
            curvature: 0.0,
        }
    }

    /// Map an (already unwrapped) UV offset from the center into the tangent plane.
    pub fn to_tangent_plane(&self, offset: &Uv) -> Vector2<f64> {
        let g11_sqrt = self.metric.g11.sqrt();
        let g22_sqrt = self.metric.g22.sqrt();
        let e1 = &self.basis.e1;
        let e2 = &self.basis.e2;
        Vector2::new(
            e1.x * offset.x * g11_sqrt + e2.x * offset.y * g22_sqrt,
            e1.y * offset.x * g11_sqrt + e2.y * offset.y * g22_sqrt,
        )
    }

    /// Lift a tangent-plane point onto the osculating paraboloid.
    pub fn lift(&self, p: &Vector2<f64>) -> Vector3<f64> {
        Vector3::new(p.x, p.y, -self.curvature * (p.x * p.x + p.y * p.y) * 0.5)
    }

    /// Embed a UV point that has already been unwrapped around the center.
    pub fn embed(&self, point: &Uv) -> Vector3<f64> {
        self.lift(&self.to_tangent_plane(&(point - self.center)))
    }

    /// Embed a single point, falling back to the origin when the result is not finite.
    pub fn project_point(&self, point: &Uv) -> Resolved<Vector3<f64>> {
        let p = self.embed(point);
        if p.iter().all(|c| c.is_finite()) {
            Resolved::Exact(p)
        } else {
            Resolved::Fallback(Vector3::zeros())
        }
    }

    /// Display arrows for the U and V coordinate directions at the center.
    ///
    /// Each arrow is scaled to `length`; V is reversed when `orientation` is.
    pub fn world_basis_vectors(
        &self,
        orientation: Orientation,
        length: f64,
    ) -> Resolved<(Vector3<f64>, Vector3<f64>)> {
        let g11_sqrt = self.metric.g11.sqrt();
        let g22_sqrt = self.metric.g22.sqrt();
        let mut vec_u = Vector3::new(
            self.basis.e1.x * g11_sqrt,
            self.basis.e1.y * g11_sqrt,
            0.0,
        );
        let mut vec_v = Vector3::new(
            self.basis.e2.x * g22_sqrt,
            self.basis.e2.y * g22_sqrt,
            0.0,
        );

        let norm_u = vec_u.norm();
        let norm_v = vec_v.norm();
        if !norm_u.is_finite() || !norm_v.is_finite() {
            return Resolved::Fallback(default_world_basis(length));
        }
        if norm_u > 0.0 {
            vec_u = vec_u / norm_u * length;
        }
        if norm_v > 0.0 {
            vec_v = vec_v / norm_v * length;
        }
        if orientation.is_reversed() {
            vec_v = -vec_v;
        }
        Resolved::Exact((vec_u, vec_v))
    }
}

/// Axis-aligned arrows used before any frame exists or when one degenerates.
pub fn default_world_basis(length: f64) -> (Vector3<f64>, Vector3<f64>) {
    (Vector3::new(length, 0.0, 0.0), Vector3::new(0.0, length, 0.0))
}

/// Embed every triangle whose UV centroid lies strictly within `radius` of `center`.
///
/// Vertices are normalized onto the fundamental domain first and then
/// unwrapped around the center, so triangles straddling a seam stay whole.
/// Reversed orientation swaps the last two vertices of every triangle, which
/// flips all face normals.
pub fn render_local_mesh(
    surface: &Surface,
    center: &Uv,
    radius: f64,
    orientation: Orientation,
) -> (LocalMesh, Resolved<LocalFrame>) {
    let frame = LocalFrame::at(surface, *center);
    if frame.is_fallback() {
        tracing::warn!(
            surface = surface.kind().as_str(),
            u = center.x,
            v = center.y,
            "degenerate local frame, using fallback"
        );
    }
    let mesh = embed_triangles(surface, frame.value(), radius, orientation);
    (mesh, frame)
}

fn embed_triangles(
    surface: &Surface,
    frame: &LocalFrame,
    radius: f64,
    orientation: Orientation,
) -> LocalMesh {
    let seams = surface.seams();
    let center = frame.center;
    let mut mesh = LocalMesh::default();

    for triangle in surface.triangles() {
        let dist = seams.uv_distance(&center, &triangle.centroid());
        if !(dist < radius) {
            continue;
        }

        let [p0, p1, p2] = triangle
            .vertices
            .map(|vertex| frame.embed(&unwrap_vertex(seams, &vertex, &center)));
        let corners = if orientation.is_reversed() {
            [p0, p2, p1]
        } else {
            [p0, p1, p2]
        };

        mesh.push_triangle(corners, face_normal(&corners));
    }
    mesh
}

fn unwrap_vertex(seams: &Seams, vertex: &Uv, center: &Uv) -> Uv {
    seams.adjust_for_wrapping(&seams.normalize(vertex), center)
}

/// Unit normal of `corners`; a degenerate triangle keeps its zero cross product.
fn face_normal(corners: &[Vector3<f64>; 3]) -> Vector3<f64> {
    let n = (corners[1] - corners[0]).cross(&(corners[2] - corners[0]));
    let norm = n.norm();
    if norm > 0.0 {
        n / norm
    } else {
        n
    }
}

/// Landmarks strictly within `radius` of `center`, placed with `frame`.
pub fn landmarks_in_view(
    surface: &Surface,
    frame: &LocalFrame,
    center: &Uv,
    radius: f64,
) -> Vec<VisibleLandmark> {
    let seams = surface.seams();
    surface
        .landmarks()
        .iter()
        .filter(|landmark| seams.uv_distance(center, &landmark.position) < radius)
        .map(|landmark| {
            let unwrapped = seams.adjust_for_wrapping(&landmark.position, center);
            VisibleLandmark {
                position: frame.project_point(&unwrapped).into_inner(),
                label: landmark.label.clone(),
                color: landmark.color,
            }
        })
        .collect()
}
