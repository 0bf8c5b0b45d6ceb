use crate::landmarks::Landmark;

/// Angle in degrees at `vertex` between the rays toward `a` and `b`, via the
/// dot-product/arc-cosine relation on the planar (x, y) vectors.
///
/// Returns NaN when either ray has zero magnitude; callers treat that as
/// "no verdict" rather than an error.
pub fn angle_at(vertex: &Landmark, a: &Landmark, b: &Landmark) -> f32 {
    let (ax, ay) = (a.x - vertex.x, a.y - vertex.y);
    let (bx, by) = (b.x - vertex.x, b.y - vertex.y);

    let dot = ax * bx + ay * by;
    let mag_a = (ax * ax + ay * ay).sqrt();
    let mag_b = (bx * bx + by * by).sqrt();

    // 0/0 propagates NaN through clamp and acos.
    let cos = (dot / (mag_a * mag_b)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y)
    }

    #[test]
    fn right_angle() {
        let angle = angle_at(&lm(0.0, 0.0), &lm(1.0, 0.0), &lm(0.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn straight_line_is_180() {
        let angle = angle_at(&lm(0.5, 0.5), &lm(0.9, 0.5), &lm(0.1, 0.5));
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn collapsed_ray_is_nan() {
        let angle = angle_at(&lm(0.5, 0.5), &lm(0.5, 0.5), &lm(0.1, 0.2));
        assert!(angle.is_nan());
    }

    #[test]
    fn rounding_never_escapes_the_acos_domain() {
        // Nearly parallel rays can push the cosine a hair past 1.0.
        let angle = angle_at(&lm(0.0, 0.0), &lm(0.3, 0.3), &lm(0.6, 0.6));
        assert!((0.0..=180.0).contains(&angle));
    }
}
