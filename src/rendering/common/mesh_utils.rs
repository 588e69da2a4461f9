use glam::Vec3;
use itertools::Itertools;

use crate::rendering::common::types::BoundingBox;

pub enum MeshUtils {}

impl MeshUtils {
    pub fn compute_bounds(positions: &[Vec3]) -> BoundingBox {
        if positions.is_empty() {
            return BoundingBox::default();
        }

        let (min, max) = positions
            .iter()
            .fold((Vec3::MAX, Vec3::MIN), |(min, max), &position| {
                (min.min(position), max.max(position))
            });
        BoundingBox { min, max }
    }

    /// Smooth per-vertex normals, every triangle contributing proportionally to its area. The
    /// triangles are expected in their final (emitted) winding order, so the normals point to the
    /// front side in the target's handedness. Vertices not used by any triangle get a zero normal.
    pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; positions.len()];

        for (i0, i1, i2) in indices.iter().map(|&i| i as usize).tuples() {
            let (a, b, c) = (positions[i0], positions[i1], positions[i2]);
            // The cross product's length is twice the triangle's area
            let weighted = (b - a).cross(c - a);
            normals[i0] += weighted;
            normals[i1] += weighted;
            normals[i2] += weighted;
        }

        normals.into_iter().map(Vec3::normalize_or_zero).collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_enclose_all_positions() {
        let bounds = MeshUtils::compute_bounds(&[
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
        ]);

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 0.5));
        assert_eq!(bounds.center(), Vec3::new(0.0, 1.0, -1.25));
        assert_eq!(bounds.extents(), Vec3::new(2.0, 6.0, 3.5));
        assert_eq!(MeshUtils::compute_bounds(&[]), BoundingBox::default());
    }

    #[test]
    fn normals_face_the_front_side() {
        // Left-handed and looking down +Z, (0, 2, 1) is clockwise, so the front faces -Z.
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        let normals = MeshUtils::compute_normals(&positions, &[0, 2, 1]);

        assert!(normals[0].abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(normals[1].abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(normals[2].abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(normals[3], Vec3::ZERO);
    }
}
