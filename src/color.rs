use serde::Deserialize;
use std::ops::{Add, Mul};

/// RGB color with `f32` channels on a 0–255 scale.
///
/// Channels may run past 255 or below 0 while lighting terms are summed;
/// [`Color::limit`] caps the top end before a color leaves the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Caps each channel at 255. Negative channels pass through unchanged;
    /// only the pixel writer truncates them, at the u8 output boundary.
    pub fn limit(self) -> Self {
        Self::new(
            self.red.min(255.0),
            self.green.min(255.0),
            self.blue.min(255.0),
        )
    }

    /// Quantize for the framebuffer. The `as u8` cast saturates, so anything
    /// negative lands on 0 here.
    pub fn to_rgb(self) -> [u8; 3] {
        [
            self.red.min(255.0) as u8,
            self.green.min(255.0) as u8,
            self.blue.min(255.0) as u8,
        ]
    }
}

impl Add for Color {
    type Output = Self;
    fn add(self, c: Self) -> Self {
        Self::new(self.red + c.red, self.green + c.green, self.blue + c.blue)
    }
}

/// Channel-wise product, used to attenuate a light color by a reflectance
/// triple.
impl Mul for Color {
    type Output = Self;
    fn mul(self, c: Self) -> Self {
        Self::new(self.red * c.red, self.green * c.green, self.blue * c.blue)
    }
}

impl Mul<f32> for Color {
    type Output = Self;
    fn mul(self, f: f32) -> Self {
        Self::new(self.red * f, self.green * f, self.blue * f)
    }
}

impl From<[f32; 3]> for Color {
    fn from(a: [f32; 3]) -> Self {
        Color::new(a[0], a[1], a[2])
    }
}

/* Custom helper so Serde turns a JSON array into Color */
pub fn color_from_array<'de, D>(d: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[f32; 3]>::deserialize(d)?;
    Ok(arr.into())
}
