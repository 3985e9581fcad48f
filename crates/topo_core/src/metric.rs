//! Pointwise metric geometry: tensor lookup, orthonormal tangent frames and
//! Gaussian curvature.

use crate::traits::MetricField;
use crate::types::{MetricTensor, Resolved, TangentBasis, Uv};

/// Substitute for non-positive diagonal metric entries.
pub const METRIC_EPSILON: f64 = 1e-4;

/// Metric at `uv`, or the flat identity when the field leaves it unspecified.
///
/// Non-positive `g11`/`g22` are replaced by [`METRIC_EPSILON`]. This is a
/// clamp, not a limit: it only keeps the square roots and divisions
/// downstream well defined.
pub fn metric_at<F: MetricField + ?Sized>(field: &F, uv: &Uv) -> MetricTensor {
    let mut g = field.metric(uv).unwrap_or(MetricTensor::IDENTITY);
    if g.g11 <= 0.0 {
        g.g11 = METRIC_EPSILON;
    }
    if g.g22 <= 0.0 {
        g.g22 = METRIC_EPSILON;
    }
    g
}

/// Gram-Schmidt the coordinate frame under the metric at `uv`.
///
/// `e1 = (1/√g11, 0)` and `e2 ∝ (-g12, g11)`, normalized under the metric.
/// When `e2` has no positive length the canonical `(0, 1)` is used instead,
/// and a non-finite result collapses to the identity frame; both cases are
/// reported as [`Resolved::Fallback`].
pub fn tangent_basis<F: MetricField + ?Sized>(field: &F, uv: &Uv) -> Resolved<TangentBasis> {
    basis_from_metric(&metric_at(field, uv))
}

pub fn basis_from_metric(g: &MetricTensor) -> Resolved<TangentBasis> {
    if !g.is_finite() {
        return Resolved::Fallback(TangentBasis::identity());
    }

    let e1 = Uv::new(1.0 / g.g11.sqrt(), 0.0);
    let e2_unnormalized = Uv::new(-g.g12, g.g11);
    let e2_len_sq = g.norm_squared(&e2_unnormalized);
    if e2_len_sq <= 0.0 || !e2_len_sq.is_finite() {
        return Resolved::Fallback(TangentBasis {
            e1,
            e2: Uv::new(0.0, 1.0),
        });
    }

    let basis = TangentBasis {
        e1,
        e2: e2_unnormalized / e2_len_sq.sqrt(),
    };
    if basis.is_finite() {
        Resolved::Exact(basis)
    } else {
        Resolved::Fallback(TangentBasis::identity())
    }
}

/// Gaussian curvature at `uv`, zero when unspecified.
pub fn curvature_at<F: MetricField + ?Sized>(field: &F, uv: &Uv) -> f64 {
    field.curvature(uv).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant {
        g: MetricTensor,
        k: f64,
    }

    impl MetricField for Constant {
        fn metric(&self, _uv: &Uv) -> Option<MetricTensor> {
            Some(self.g)
        }

        fn curvature(&self, _uv: &Uv) -> Option<f64> {
            Some(self.k)
        }
    }

    struct Unspecified;

    impl MetricField for Unspecified {}

    fn assert_orthonormal(g: &MetricTensor, basis: &TangentBasis) {
        assert!((g.g11 * basis.e1.x * basis.e1.x - 1.0).abs() < 1e-12);
        assert!((g.norm_squared(&basis.e1) - 1.0).abs() < 1e-12);
        assert!((g.norm_squared(&basis.e2) - 1.0).abs() < 1e-12);
        assert!(g.inner(&basis.e1, &basis.e2).abs() < 1e-12);
    }

    #[test]
    fn unspecified_field_is_flat() {
        let uv = Uv::new(0.3, 0.4);
        assert_eq!(metric_at(&Unspecified, &uv), MetricTensor::IDENTITY);
        assert_eq!(curvature_at(&Unspecified, &uv), 0.0);
        let basis = tangent_basis(&Unspecified, &uv);
        assert_eq!(basis, Resolved::Exact(TangentBasis::identity()));
    }

    #[test]
    fn basis_is_orthonormal_for_positive_definite_metrics() {
        let metrics = [
            MetricTensor::new(40.0, 0.0, 2.25),
            MetricTensor::new(2.0, 0.7, 1.5),
            MetricTensor::new(0.5, -0.3, 4.0),
            MetricTensor::new(157.9, 0.0, 39.5),
        ];
        for g in metrics {
            let field = Constant { g, k: 0.0 };
            let basis = tangent_basis(&field, &Uv::zeros());
            assert!(!basis.is_fallback());
            assert_orthonormal(&g, basis.value());
        }
    }

    #[test]
    fn basis_is_right_handed() {
        let field = Constant {
            g: MetricTensor::new(2.0, 0.7, 1.5),
            k: 0.0,
        };
        let basis = tangent_basis(&field, &Uv::zeros()).into_inner();
        assert!(basis.e1.perp(&basis.e2) > 0.0);
    }

    #[test]
    fn non_positive_g11_is_clamped() {
        let field = Constant {
            g: MetricTensor::new(-2.0, 0.0, 1.0),
            k: 0.0,
        };
        let g = metric_at(&field, &Uv::zeros());
        assert_eq!(g.g11, METRIC_EPSILON);
        let basis = tangent_basis(&field, &Uv::zeros()).into_inner();
        assert!((basis.e1.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn indefinite_metric_falls_back_to_canonical_e2() {
        // e2 = (-2, 1) has induced squared norm 1 - 8 + 1 < 0.
        let field = Constant {
            g: MetricTensor::new(1.0, 2.0, 1.0),
            k: 0.0,
        };
        let basis = tangent_basis(&field, &Uv::zeros());
        assert!(basis.is_fallback());
        assert_eq!(basis.value().e2, Uv::new(0.0, 1.0));
        assert_eq!(basis.value().e1, Uv::new(1.0, 0.0));
    }

    #[test]
    fn non_finite_metric_falls_back_to_identity() {
        let field = Constant {
            g: MetricTensor::new(f64::NAN, 0.0, 1.0),
            k: 0.0,
        };
        let basis = tangent_basis(&field, &Uv::zeros());
        assert_eq!(basis, Resolved::Fallback(TangentBasis::identity()));
    }

    #[test]
    fn curvature_passes_through() {
        let field = Constant {
            g: MetricTensor::IDENTITY,
            k: -0.25,
        };
        assert_eq!(curvature_at(&field, &Uv::new(0.9, 0.1)), -0.25);
    }
}
