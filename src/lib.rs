//! Flat-shading illumination kernels for a polygon renderer: Phong lighting
//! (`shading`), the vector math underneath it (`algebra`, `color`), triangle
//! normals from a shared polygon buffer (`geometry`), and a small preview
//! renderer that ties them together (`preview`, `scene`).

pub mod algebra;
pub mod color;
pub mod geometry;
pub mod preview;
pub mod scene;
pub mod shading;
