//! CPU-side triangle meshes for the procedural car and scene props.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 6 floats per vertex: position(3) + normal(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

/// One triangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normal: Vec3,
}

impl Triangle {
    pub fn centroid(&self) -> Vec3 {
        (self.positions[0] + self.positions[1] + self.positions[2]) / 3.0
    }
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: u32) -> Vec3 {
        let i = index as usize * 6;
        Vec3::new(self.vertices[i], self.vertices[i + 1], self.vertices[i + 2])
    }

    pub fn normal(&self, index: u32) -> Vec3 {
        let i = index as usize * 6 + 3;
        Vec3::new(self.vertices[i], self.vertices[i + 1], self.vertices[i + 2])
    }

    /// Triangles with a flat normal averaged from their vertices
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            let positions = [self.position(tri[0]), self.position(tri[1]), self.position(tri[2])];
            let normal =
                (self.normal(tri[0]) + self.normal(tri[1]) + self.normal(tri[2])).normalize_or_zero();
            Triangle { positions, normal }
        })
    }

    /// Copy with every vertex moved by `transform`
    pub fn transformed(&self, transform: &Mat4) -> MeshData {
        let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.chunks_exact(6) {
            let p = transform.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_matrix * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        (0..self.vertex_count() as u32)
            .map(|i| self.position(i))
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
    }
}

/// Primitive shape, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    /// Horizontal plane facing +Y, `width` along X and `depth` along Z
    Plane { width: f32, depth: f32 },
    /// Cylinder along Y
    Cylinder { radius: f32, height: f32, segments: u32 },
}

impl Shape {
    pub fn cuboid(x: f32, y: f32, z: f32) -> Self {
        Shape::Cuboid { size: Vec3::new(x, y, z) }
    }

    pub fn plane(width: f32, depth: f32) -> Self {
        Shape::Plane { width, depth }
    }

    pub fn mesh(&self) -> MeshData {
        match *self {
            Shape::Cuboid { size } => cuboid(size.x, size.y, size.z),
            Shape::Plane { width, depth } => plane(width, depth),
            Shape::Cylinder { radius, height, segments } => cylinder(radius, height, segments),
        }
    }
}

/// Position and orientation of a shape in its parent space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Placement {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Quat::IDENTITY,
        }
    }

    pub fn rotated_x(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_rotation_x(radians) * self.rotation;
        self
    }

    pub fn rotated_y(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_rotation_y(radians) * self.rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

// ── Primitive generation ────────────────────────────────────

pub fn cuboid(w: f32, h: f32, d: f32) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24 * 6),
        indices: Vec::with_capacity(36),
    };
    for (quad, normal) in &faces {
        push_quad(&mut mesh, quad, *normal);
    }
    mesh
}

/// Largest edge of a ground plane cell. Cells keep far-off ground visible
/// when the painter drops triangles that cross the near plane.
pub const PLANE_CELL: f32 = 4.0;

pub fn plane(width: f32, depth: f32) -> MeshData {
    let cols = (width / PLANE_CELL).ceil().max(1.0) as u32;
    let rows = (depth / PLANE_CELL).ceil().max(1.0) as u32;
    let cw = width / cols as f32;
    let cd = depth / rows as f32;
    let x0 = -width * 0.5;
    let z0 = -depth * 0.5;

    let mut mesh = MeshData::default();
    for row in 0..rows {
        for col in 0..cols {
            let xa = x0 + col as f32 * cw;
            let za = z0 + row as f32 * cd;
            push_quad(
                &mut mesh,
                &[
                    Vec3::new(xa, 0.0, za + cd),
                    Vec3::new(xa + cw, 0.0, za + cd),
                    Vec3::new(xa + cw, 0.0, za),
                    Vec3::new(xa, 0.0, za),
                ],
                Vec3::Y,
            );
        }
    }
    mesh
}

pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let hh = height * 0.5;
    let mut mesh = MeshData::default();

    // Side faces
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();

        let base = mesh.vertex_count() as u32;
        push_vert(&mut mesh, Vec3::new(radius * c0, -hh, radius * s0), Vec3::new(c0, 0.0, s0));
        push_vert(&mut mesh, Vec3::new(radius * c1, -hh, radius * s1), Vec3::new(c1, 0.0, s1));
        push_vert(&mut mesh, Vec3::new(radius * c1, hh, radius * s1), Vec3::new(c1, 0.0, s1));
        push_vert(&mut mesh, Vec3::new(radius * c0, hh, radius * s0), Vec3::new(c0, 0.0, s0));
        mesh.indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    add_cap(&mut mesh, radius, hh, segments, Vec3::Y);
    add_cap(&mut mesh, radius, -hh, segments, Vec3::NEG_Y);
    mesh
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(mesh: &mut MeshData, p: Vec3, n: Vec3) {
    mesh.vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
}

fn push_quad(mesh: &mut MeshData, quad: &[Vec3; 4], normal: Vec3) {
    let base = mesh.vertex_count() as u32;
    for v in quad {
        push_vert(mesh, *v, normal);
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

fn add_cap(mesh: &mut MeshData, radius: f32, y: f32, segments: u32, normal: Vec3) {
    let center = mesh.vertex_count() as u32;
    push_vert(mesh, Vec3::new(0.0, y, 0.0), normal);
    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(mesh, Vec3::new(radius * angle.cos(), y, radius * angle.sin()), normal);
    }
    for i in 0..segments {
        let next = (i + 1) % segments;
        if normal.y > 0.0 {
            mesh.indices
                .extend_from_slice(&[center, center + 1 + next, center + 1 + i]);
        } else {
            mesh.indices
                .extend_from_slice(&[center, center + 1 + i, center + 1 + next]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let m = cuboid(1.0, 2.0, 3.0);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
        let (min, max) = m.bounds().unwrap();
        assert_eq!(min, Vec3::new(-0.5, -1.0, -1.5));
        assert_eq!(max, Vec3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_cuboid_winding_matches_normals() {
        for tri in cuboid(1.0, 1.0, 1.0).triangles() {
            let [a, b, c] = tri.positions;
            let geometric = (b - a).cross(c - a).normalize();
            assert!(geometric.dot(tri.normal) > 0.99, "{:?}", tri);
        }
    }

    #[test]
    fn test_cylinder_winding_matches_normals() {
        for tri in cylinder(0.5, 1.0, 12).triangles() {
            let [a, b, c] = tri.positions;
            let geometric = (b - a).cross(c - a).normalize_or_zero();
            assert!(geometric.dot(tri.normal) > 0.5, "{:?}", tri);
        }
    }

    #[test]
    fn test_plane_faces_up() {
        let m = plane(4.0, 2.0);
        assert_eq!(m.triangle_count(), 2);
        assert!(m.triangles().all(|t| t.normal == Vec3::Y));
    }

    #[test]
    fn test_large_plane_is_split_into_cells() {
        let m = plane(10.0, 2.0);
        assert_eq!(m.triangle_count(), 6);
        let (min, max) = m.bounds().unwrap();
        assert_eq!(min, Vec3::new(-5.0, 0.0, -1.0));
        assert_eq!(max, Vec3::new(5.0, 0.0, 1.0));
        for tri in m.triangles() {
            let [a, b, c] = tri.positions;
            assert!((b - a).cross(c - a).normalize().dot(Vec3::Y) > 0.99);
        }
    }

    #[test]
    fn test_transform_moves_and_rotates() {
        let placement = Placement::at(0.0, 5.0, 0.0).rotated_x(std::f32::consts::PI);
        let m = plane(2.0, 2.0).transformed(&placement.matrix());
        let (min, max) = m.bounds().unwrap();
        assert!((min.y - 5.0).abs() < 1e-5 && (max.y - 5.0).abs() < 1e-5);
        assert!(m.triangles().all(|t| (t.normal - Vec3::NEG_Y).length() < 1e-5));
    }
}
