use glam::Vec3;

/// Largest component of a transform's world-space scale.
///
/// Non-uniformly scaled planets are treated as spheres of the largest axis,
/// so the atmosphere shell never ends up inside the stretched surface.
pub fn max_axis_scale(scale: Vec3) -> f32 {
    scale.max_element()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_scale() {
        assert_eq!(max_axis_scale(Vec3::splat(2.5)), 2.5);
    }

    #[test]
    fn test_non_uniform_scale_picks_largest_axis() {
        for scale in [
            Vec3::new(3.0, 1.0, 2.0),
            Vec3::new(1.0, 3.0, 2.0),
            Vec3::new(1.0, 2.0, 3.0),
        ] {
            assert_eq!(max_axis_scale(scale), 3.0, "scale {scale}");
        }
    }

    #[test]
    fn test_never_below_any_axis() {
        let scale = Vec3::new(0.25, 1.0e6, 40.0);
        let s = max_axis_scale(scale);
        assert!(s >= scale.x && s >= scale.y && s >= scale.z);
    }
}
