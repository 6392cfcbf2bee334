use polyshade::geometry::PolygonBuffer;
use polyshade::preview::{self, render_image_name};
use polyshade::scene;
use std::path::Path;
use std::{env, fs};

fn main() {
    let args: Vec<String> = env::args().collect();
    let quiet_mode = args.contains(&"--quiet".to_string()) || args.contains(&"-q".to_string());
    let scene_path = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .map(String::as_str)
        .unwrap_or("scene.json");

    // ── parse JSON (built-in scene if the file is absent) ─────────────────
    let scene = scene::load(scene_path);

    println!("=== SHADING INFO ===");
    println!(" view     : {:?}", scene.view);
    println!(" ambient  : {:?}", scene.ambient);
    println!(" material : {:?}", scene.material);

    println!("\n=== LIGHTS ({}) ===", scene.lights.len());
    for (i, l) in scene.lights.iter().enumerate() {
        println!(
            " [{}] Light {{ location: {:?}, color: {:?} }}",
            i, l.location, l.color
        );
    }

    // ── geometry + per-triangle flat shading ──────────────────────────────
    let mut polygons = PolygonBuffer::new();
    preview::tessellate_sphere(
        &mut polygons,
        scene.sphere.center,
        scene.sphere.radius,
        scene.sphere.steps,
    );
    let shaded = preview::shade_triangles(&polygons, &scene);
    println!(
        "\nShaded {} of {} triangles ({} culled)",
        shaded.len(),
        polygons.len() / 3,
        polygons.len() / 3 - shaded.len()
    );

    // ── coverage pass and output ──────────────────────────────────────────
    let img = preview::render(&scene, &shaded, quiet_mode);

    let name = render_image_name(scene.render.width, scene.render.height);
    if let Some(dir) = Path::new(&name).parent() {
        fs::create_dir_all(dir).expect("Failed to create renders directory");
    }
    img.save(&name).expect("Failed to write preview image");
    println!("Saved → {name}");
}
