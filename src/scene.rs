use crate::algebra::{vec3_from_array, Vec3};
use crate::color::{color_from_array, Color};
use crate::shading::{Material, PointLight};
use serde::Deserialize;
use std::fs;

#[derive(Deserialize, Clone, Copy)]
pub struct RenderJson {
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize, Clone, Copy)]
pub struct SphereJson {
    #[serde(deserialize_with = "vec3_from_array")]
    pub center: Vec3,
    pub radius: f32,
    /// Tessellation steps along each of latitude and longitude.
    pub steps: u32,
}

#[derive(Deserialize)]
pub struct Scene {
    pub render: RenderJson,
    /// View vector shared by every shading evaluation (flat preview, fixed
    /// camera).
    #[serde(deserialize_with = "vec3_from_array")]
    pub view: Vec3,
    #[serde(deserialize_with = "color_from_array")]
    pub ambient: Color,
    pub lights: Vec<PointLight>,
    pub material: Material,
    pub sphere: SphereJson,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            render: RenderJson {
                width: 512,
                height: 512,
            },
            view: Vec3::new(0.0, 0.0, 1.0),
            ambient: Color::new(50.0, 50.0, 50.0),
            lights: vec![PointLight {
                location: Vec3::new(0.5, 0.75, 1.0),
                color: Color::new(200.0, 0.0, 255.0),
            }],
            material: Material {
                ambient: Color::new(0.1, 0.1, 0.1),
                diffuse: Color::new(0.5, 0.5, 0.5),
                specular: Color::new(0.5, 0.5, 0.5),
            },
            sphere: SphereJson {
                center: Vec3::new(0.0, 0.0, 0.0),
                radius: 1.0,
                steps: 48,
            },
        }
    }
}

/// Loads a scene description, falling back to the built-in default scene
/// when the file does not exist.
pub fn load(path: &str) -> Scene {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).expect("scene file is not valid JSON"),
        Err(_) => Scene::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_scene_description() {
        let json = r#"{
            "render": { "width": 64, "height": 32 },
            "view": [0, 0, 1],
            "ambient": [10, 10, 10],
            "lights": [
                { "location": [0.2, 0.1, 0.8], "color": [200, 0, 255] }
            ],
            "material": {
                "ambient": [0.1, 0.1, 0.1],
                "diffuse": [0.5, 0.5, 0.5],
                "specular": [0.5, 0.5, 0.5]
            },
            "sphere": { "center": [0, 0, 0], "radius": 1.5, "steps": 20 }
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.render.width, 64);
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.lights[0].location, Vec3::new(0.2, 0.1, 0.8));
        assert_eq!(scene.lights[0].color, Color::new(200.0, 0.0, 255.0));
        assert_eq!(scene.material.diffuse, Color::new(0.5, 0.5, 0.5));
        assert_eq!(scene.sphere.radius, 1.5);
    }

    #[test]
    fn missing_file_falls_back_to_the_default_scene() {
        let scene = load("definitely/not/here.json");
        assert_eq!(scene.render.width, 512);
        assert_eq!(scene.lights.len(), 1);
    }
}
