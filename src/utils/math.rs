use nalgebra::Vector3;

/// Clamp into [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Projection of `v` onto the unit vector `axis`.
#[inline]
pub fn project_onto_unit(v: &Vector3<f64>, axis: &Vector3<f64>) -> Vector3<f64> {
    axis * v.dot(axis)
}

#[inline]
pub fn is_finite_vector(v: &Vector3<f64>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
