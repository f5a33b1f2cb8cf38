//! UV-sphere mesh for the water surface.

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};

/// Vertex data for the sphere (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Sphere mesh with a seam at azimuth 0 and single-triangle pole caps
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Create a sphere with the given radius and segment counts
    ///
    /// Produces `(width + 1) * (height + 1)` vertices; the pole rows keep one
    /// vertex per column so each column gets its own UV at the cap.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let columns = width_segments as usize + 1;

        let mut vertices = Vec::with_capacity(columns * (height_segments as usize + 1));

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;

            // Shift pole UVs to the middle of their column
            let u_offset = if iy == 0 {
                0.5 / width_segments as f32
            } else if iy == height_segments {
                -0.5 / width_segments as f32
            } else {
                0.0
            };

            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;

                let position = [
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ];
                let normal = [
                    position[0] / radius,
                    position[1] / radius,
                    position[2] / radius,
                ];

                vertices.push(Vertex {
                    position,
                    normal,
                    uv: [u + u_offset, 1.0 - v],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding seen from outside)
        let mut indices =
            Vec::with_capacity(6 * width_segments as usize * (height_segments as usize - 1));
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let top_left = iy * columns as u32 + ix;
                let top_right = top_left + 1;
                let bottom_left = (iy + 1) * columns as u32 + ix;
                let bottom_right = bottom_left + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[top_right, top_left, bottom_right]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[top_left, bottom_left, bottom_right]);
                }
            }
        }

        Self { vertices, indices }
    }
}
