use crate::types::{MetricTensor, Uv};

/// A Riemannian structure on a UV parameter domain.
///
/// Both methods default to `None`, meaning the field leaves that quantity
/// unspecified; callers then substitute the flat identity metric or zero
/// curvature.
pub trait MetricField {
    /// Metric tensor at `uv`.
    fn metric(&self, _uv: &Uv) -> Option<MetricTensor> {
        None
    }

    /// Gaussian curvature at `uv`.
    fn curvature(&self, _uv: &Uv) -> Option<f64> {
        None
    }
}
