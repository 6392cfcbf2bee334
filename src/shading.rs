//! Phong illumination: ambient + diffuse + specular, one color per
//! flat-shaded polygon.
//!
//! All three term calculators expect unit-length direction vectors;
//! [`get_lighting`] and [`shade`] normalize local copies before calling them,
//! so callers' vectors are never modified.

use crate::algebra::{vec3_from_array, Vec3};
use crate::color::{color_from_array, Color};
use serde::Deserialize;

/// Highlight sharpness for the specular term; higher is tighter.
pub const SPECULAR_EXP: i32 = 4;

/// Single point light source.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PointLight {
    /// Direction toward the light. It is fed straight into the angle terms,
    /// so it does not attenuate with distance.
    #[serde(deserialize_with = "vec3_from_array")]
    pub location: Vec3,
    #[serde(deserialize_with = "color_from_array")]
    pub color: Color,
}

/// Per-channel reflectance triples, conceptually in [0,1] each.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Material {
    #[serde(deserialize_with = "color_from_array")]
    pub ambient: Color,
    #[serde(deserialize_with = "color_from_array")]
    pub diffuse: Color,
    #[serde(deserialize_with = "color_from_array")]
    pub specular: Color,
}

/// Ambient term: the ambient light attenuated channel-wise by the material's
/// ambient reflectance. No angular dependence.
pub fn calculate_ambient(alight: Color, areflect: Color) -> Color {
    alight * areflect
}

/// Lambertian diffuse term. A light behind or tangent to the surface
/// (`n·l <= 0`) contributes zero on every channel.
pub fn calculate_diffuse(light: &PointLight, dreflect: Color, normal: Vec3) -> Color {
    let cos = normal.dot(light.location).max(0.0);
    light.color * dreflect * cos
}

/// Specular highlight. Mirrors the light direction about the normal
/// (`r = 2·n·(n·l) − l`, left unnormalized) and raises `max(0, r·v)` to
/// [`SPECULAR_EXP`].
pub fn calculate_specular(light: &PointLight, sreflect: Color, view: Vec3, normal: Vec3) -> Color {
    let cos = normal.dot(light.location);
    let reflect = normal * (2.0 * cos) - light.location;
    let cos = reflect.dot(view).max(0.0).powi(SPECULAR_EXP);
    light.color * sreflect * cos
}

/// Full Phong evaluation for one point light. Equivalent to [`shade`] with a
/// one-element light list.
pub fn get_lighting(
    normal: Vec3,
    view: Vec3,
    alight: Color,
    light: &PointLight,
    mat: &Material,
) -> Color {
    shade(normal, view, alight, std::slice::from_ref(light), mat)
}

/// Phong evaluation over any number of point lights: one ambient term plus
/// accumulated diffuse and specular contributions per light, then a single
/// upper clamp at 255 per channel.
///
/// `normal`, `view` and each light direction are normalized internally;
/// zero-length inputs are a contract violation (see [`Vec3::normalize`]).
pub fn shade(
    normal: Vec3,
    view: Vec3,
    alight: Color,
    lights: &[PointLight],
    mat: &Material,
) -> Color {
    let normal = normal.normalize();
    let view = view.normalize();

    let mut i = calculate_ambient(alight, mat.ambient);
    for light in lights {
        let light = PointLight {
            location: light.location.normalize(),
            color: light.color,
        };
        i = i + calculate_diffuse(&light, mat.diffuse, normal)
            + calculate_specular(&light, mat.specular, view, normal);
    }

    i.limit()
}
