//! Flat-shaded preview of a tessellated sphere.
//!
//! This is the collaborator side of the crate: it produces geometry, drives
//! the shading kernels once per triangle, and resolves pixel coverage with an
//! orthographic ray cast. The kernels themselves live in `algebra`,
//! `shading` and `geometry`.

use crate::algebra::Vec3;
use crate::color::Color;
use crate::geometry::PolygonBuffer;
use crate::scene::Scene;
use crate::shading;
use image::{Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;
use std::f32::consts::PI;

/// One triangle with its flat-shading result attached.
#[derive(Clone, Copy, Debug)]
pub struct ShadedTriangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub color: Color,
}

impl ShadedTriangle {
    /// Möller–Trumbore ray/triangle test. Returns the distance along the ray
    /// or `None` on a miss.
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = rd.cross(edge2);
        let a = edge1.dot(h);
        if a.abs() < 1e-6 {
            return None;
        }
        let f = 1.0 / a;
        let s = ro - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = f * rd.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = f * edge2.dot(q);
        (t > 1e-4).then_some(t)
    }
}

/// Appends a lat-long sphere to `buffer`, `steps` subdivisions along each of
/// latitude and longitude. Triangles wind counter-clockwise seen from
/// outside, so every `calculate_normal` points away from the center. The
/// slivers touching the poles degenerate to zero-area triangles with a zero
/// normal; the culling pass drops them.
pub fn tessellate_sphere(buffer: &mut PolygonBuffer, center: Vec3, radius: f32, steps: u32) {
    let point = |i: u32, j: u32| -> Vec3 {
        let theta = PI * j as f32 / steps as f32;
        let phi = 2.0 * PI * i as f32 / steps as f32;
        center
            + Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            )
    };

    for i in 0..steps {
        for j in 0..steps {
            let p00 = point(i, j);
            let p01 = point(i, j + 1);
            let p10 = point(i + 1, j);
            let p11 = point(i + 1, j + 1);
            buffer.push_triangle(p00, p01, p11);
            buffer.push_triangle(p00, p11, p10);
        }
    }
}

/// Shades every front-facing triangle in `polygons`: normal once per
/// triangle, back-face cull against the view vector, then one lighting
/// evaluation per surviving polygon.
pub fn shade_triangles(polygons: &PolygonBuffer, scene: &Scene) -> Vec<ShadedTriangle> {
    let mut shaded = Vec::new();
    for i in (0..polygons.len()).step_by(3) {
        let Some(normal) = polygons.calculate_normal(i) else {
            continue;
        };
        // also drops the degenerate pole slivers (zero normal)
        if normal.dot(scene.view) <= 0.0 {
            continue;
        }
        let color = shading::shade(
            normal,
            scene.view,
            scene.ambient,
            &scene.lights,
            &scene.material,
        );
        let [v0, v1, v2] = polygons.triangle(i).unwrap_or_default();
        shaded.push(ShadedTriangle { v0, v1, v2, color });
    }
    shaded
}

/// Orthographic coverage pass: one ray per pixel along −z, nearest shaded
/// triangle wins.
pub fn render(scene: &Scene, triangles: &[ShadedTriangle], quiet: bool) -> RgbImage {
    let width = scene.render.width;
    let height = scene.render.height;
    let aspect = width as f32 / height as f32;
    let half = scene.sphere.radius * 1.25;
    let eye_z = scene.sphere.center.z + scene.sphere.radius * 4.0;
    let rd = Vec3::new(0.0, 0.0, -1.0);
    let background = Color::new(12.0, 12.0, 18.0);

    let bar = if !quiet {
        let pb = ProgressBar::new(height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} rows | {elapsed_precise} | ETA: {eta}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let rows: Vec<_> = (0..height)
        .into_par_iter()
        .flat_map(|y| {
            if let Some(b) = &bar {
                b.inc(1);
            }
            let mut row = Vec::with_capacity(width as usize);
            for x in 0..width {
                let u = ((x as f32 + 0.5) / width as f32 - 0.5) * 2.0 * half * aspect;
                let v = -((y as f32 + 0.5) / height as f32 - 0.5) * 2.0 * half;
                let ro = Vec3::new(
                    scene.sphere.center.x + u,
                    scene.sphere.center.y + v,
                    eye_z,
                );
                let color = triangles
                    .iter()
                    .filter_map(|tri| tri.hit(ro, rd).map(|t| (t, tri.color)))
                    .min_by(|a, b| a.0.total_cmp(&b.0))
                    .map_or(background, |(_, c)| c);
                row.push(((x, y), color.to_rgb()));
            }
            row
        })
        .collect();

    if let Some(b) = bar {
        b.finish_with_message("Preview complete");
    }

    let mut img = RgbImage::new(width, height);
    for ((x, y), rgb) in rows {
        img.put_pixel(x, y, Rgb(rgb));
    }
    img
}

pub fn render_image_name(w: u32, h: u32) -> String {
    let suf: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("renders/preview_{w}x{h}_{suf}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn sphere_triangles_face_outward() {
        let mut buf = PolygonBuffer::new();
        let center = Vec3::new(0.0, 0.0, 0.0);
        tessellate_sphere(&mut buf, center, 1.0, 12);
        assert_eq!(buf.len(), 12 * 12 * 2 * 3);

        for i in (0..buf.len()).step_by(3) {
            let n = buf.calculate_normal(i).unwrap();
            if n.length() < 1e-6 {
                continue; // pole sliver
            }
            let [v0, v1, v2] = buf.triangle(i).unwrap();
            let centroid = (v0 + v1 + v2) * (1.0 / 3.0);
            assert!(
                n.dot(centroid - center) > 0.0,
                "inward normal at index {i}"
            );
        }
    }

    #[test]
    fn ray_through_the_middle_hits_the_front_of_the_sphere() {
        let scene = Scene::default();
        let mut buf = PolygonBuffer::new();
        tessellate_sphere(
            &mut buf,
            scene.sphere.center,
            scene.sphere.radius,
            scene.sphere.steps,
        );
        let shaded = shade_triangles(&buf, &scene);
        assert!(!shaded.is_empty());

        // nudged off the exact pole vertex to keep the hit test unambiguous
        let ro = Vec3::new(0.05, 0.03, 4.0);
        let rd = Vec3::new(0.0, 0.0, -1.0);
        let nearest = shaded
            .iter()
            .filter_map(|tri| tri.hit(ro, rd))
            .min_by(|a, b| a.total_cmp(b))
            .expect("center ray misses the sphere");
        // front face sits one radius before the center, 3 units from the eye
        assert!((nearest - 3.0).abs() < 0.05);
    }

    #[test]
    fn back_faces_are_culled() {
        let scene = Scene::default();
        let mut buf = PolygonBuffer::new();
        tessellate_sphere(&mut buf, scene.sphere.center, 1.0, 16);
        let shaded = shade_triangles(&buf, &scene);
        // viewed along +z: roughly half the sphere survives, never all of it
        assert!(shaded.len() * 3 < buf.len());
        for tri in &shaded {
            let n = (tri.v1 - tri.v0).cross(tri.v2 - tri.v0);
            assert!(n.dot(scene.view) > 0.0);
        }
    }
}
