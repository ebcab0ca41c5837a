use std::f32::consts::{PI, TAU};

use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list, counter-clockwise front faces.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn triangle_count(&self) -> u64 {
        (self.indices.len() / 3) as u64
    }

    /// Torus in the XY plane around the Z axis.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);
        let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let p = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: (p - center).normalize_or_zero().to_array(),
                });
            }
        }
        let row = tubular + 1;
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        Self { vertices, indices }
    }

    /// UV sphere. With `inward` set the normals and winding face the
    /// center, for use as an environment shell seen from inside.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32, inward: bool) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);
        let flip = if inward { -1.0 } else { 1.0 };
        let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let p = Vec3::new(
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                );
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: (p.normalize_or_zero() * flip).to_array(),
                });
            }
        }
        let row = w + 1;
        let mut indices = Vec::new();
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                let (first, second) = if inward {
                    ([a, d, b], [b, d, c])
                } else {
                    ([a, b, d], [b, c, d])
                };
                if iy != 0 {
                    indices.extend_from_slice(&first);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&second);
                }
            }
        }
        Self { vertices, indices }
    }

    /// Square in the XZ plane facing +Y.
    pub fn ground_plane(size: f32) -> Self {
        let s = size * 0.5;
        let up = [0.0, 1.0, 0.0];
        let corners = [[-s, 0.0, -s], [-s, 0.0, s], [s, 0.0, s], [s, 0.0, -s]];
        Self {
            vertices: corners
                .iter()
                .map(|&position| Vertex {
                    position,
                    normal: up,
                })
                .collect(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(g: &Geometry, tri: usize) -> Vec3 {
        let idx = &g.indices[tri * 3..tri * 3 + 3];
        let p = |i: u32| Vec3::from(g.vertices[i as usize].position);
        let (a, b, c) = (p(idx[0]), p(idx[1]), p(idx[2]));
        (b - a).cross(c - a)
    }

    #[test]
    fn torus_triangle_count_matches_segments() {
        let g = Geometry::torus(1.0, 0.1, 16, 96);
        assert_eq!(g.triangle_count(), 2 * 16 * 96);
        assert_eq!(g.vertices.len(), 17 * 97);
    }

    #[test]
    fn inward_sphere_faces_center() {
        let g = Geometry::sphere(10.0, 16, 12, true);
        for tri in 0..g.triangle_count() as usize {
            let idx = g.indices[tri * 3] as usize;
            let outward = Vec3::from(g.vertices[idx].position);
            assert!(face_normal(&g, tri).dot(outward) <= 1e-3);
        }
    }

    #[test]
    fn ground_plane_faces_up() {
        let g = Geometry::ground_plane(4.0);
        assert_eq!(g.triangle_count(), 2);
        assert!(face_normal(&g, 0).y > 0.0);
        assert!(face_normal(&g, 1).y > 0.0);
    }
}
