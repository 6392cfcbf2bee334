use crate::algebra::Vec3;

/// Flattened triangle list.
///
/// Points are stored homogeneous (x, y, z, w); three consecutive points
/// starting at an index form one triangle. The buffer is owned by the
/// surrounding renderer and only read here. Consistent winding across
/// triangles is the producer's contract; it decides which way every normal
/// faces.
#[derive(Clone, Debug, Default)]
pub struct PolygonBuffer {
    points: Vec<[f32; 4]>,
}

impl PolygonBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points (not triangles) in the buffer.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push_point(&mut self, p: Vec3) {
        self.points.push([p.x, p.y, p.z, 1.0]);
    }

    pub fn push_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3) {
        self.push_point(v0);
        self.push_point(v1);
        self.push_point(v2);
    }

    pub fn point(&self, i: usize) -> Option<Vec3> {
        let [x, y, z, _w] = *self.points.get(i)?;
        Some(Vec3::new(x, y, z))
    }

    /// The three vertices starting at `i`, or `None` if `i + 2` is out of
    /// bounds.
    pub fn triangle(&self, i: usize) -> Option<[Vec3; 3]> {
        Some([self.point(i)?, self.point(i + 1)?, self.point(i + 2)?])
    }

    /// Surface normal of the triangle whose first vertex sits at index `i`:
    /// the cross product of its two edge vectors, left unnormalized. A
    /// degenerate triangle yields the zero vector.
    pub fn calculate_normal(&self, i: usize) -> Option<Vec3> {
        let [v0, v1, v2] = self.triangle(i)?;
        Some((v1 - v0).cross(v2 - v0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> [Vec3; 3] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn normal_of_the_unit_triangle_is_plus_z() {
        let [a, b, c] = unit_triangle();
        let mut buf = PolygonBuffer::new();
        buf.push_triangle(a, b, c);
        assert_eq!(buf.calculate_normal(0), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn reversed_winding_negates_the_normal() {
        let [a, b, c] = unit_triangle();
        let mut buf = PolygonBuffer::new();
        buf.push_triangle(a, c, b);
        assert_eq!(buf.calculate_normal(0), Some(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn out_of_bounds_access_is_none() {
        let [a, b, c] = unit_triangle();
        let mut buf = PolygonBuffer::new();
        buf.push_triangle(a, b, c);
        assert!(buf.point(3).is_none());
        assert!(buf.triangle(1).is_none());
        assert!(buf.calculate_normal(1).is_none());
        assert!(PolygonBuffer::new().calculate_normal(0).is_none());
    }

    #[test]
    fn stride_of_three_addresses_each_triangle() {
        let [a, b, c] = unit_triangle();
        let shift = Vec3::new(0.0, 0.0, 5.0);
        let mut buf = PolygonBuffer::new();
        buf.push_triangle(a, b, c);
        buf.push_triangle(a + shift, c + shift, b + shift);
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.calculate_normal(0), Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(buf.calculate_normal(3), Some(Vec3::new(0.0, 0.0, -1.0)));
    }
}
