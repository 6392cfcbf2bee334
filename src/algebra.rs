use serde::Deserialize;
use std::ops::{Add, Mul, Neg, Sub};

/// 3-component vector used for positions, directions and normals alike.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, v: Self) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn cross(self, v: Self) -> Self {
        Self {
            x: self.y * v.z - self.z * v.y,
            y: self.z * v.x - self.x * v.z,
            z: self.x * v.y - self.y * v.x,
        }
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy of `self`. A zero-length input divides by zero and
    /// yields non-finite components; callers must pass non-degenerate vectors.
    pub fn normalize(self) -> Self {
        debug_assert!(self.length() > 0.0, "normalize of zero-length vector");
        self * (1.0 / self.length())
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, f: f32) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self {
        Vec3::new(a[0], a[1], a[2])
    }
}

/* Custom helper so Serde turns a JSON array into Vec3 */
pub fn vec3_from_array<'de, D>(d: D) -> Result<Vec3, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[f32; 3]>::deserialize(d)?;
    Ok(arr.into())
}
