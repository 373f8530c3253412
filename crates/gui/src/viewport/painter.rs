//! Software renderer: flat-shaded, depth-sorted triangles painted through
//! egui's painter.

use std::collections::{BTreeMap, HashMap};

use egui::{Color32, Painter, Rect};
use glam::Vec3;
use shared::Rgb;

use super::camera::ArcBallCamera;
use crate::appearance::MaterialParams;
use crate::compose::{Environment, Light, LightKind, Renderer};
use crate::geometry::{MeshData, Triangle};
use crate::model::MeshHandle;

/// Share of emissive color added on top of lit color
const EMISSIVE_GAIN: f32 = 0.4;

struct Prop {
    mesh: MeshData,
    material: MaterialParams,
}

/// Triangle ready to paint
struct ScreenTriangle {
    points: [egui::Pos2; 3],
    depth: f32,
    color: Color32,
}

/// [`Renderer`] backed by egui's 2D painter
pub struct PainterRenderer {
    geometry: HashMap<MeshHandle, MeshData>,
    /// BTreeMap keeps paint order stable between frames
    attached: BTreeMap<MeshHandle, MaterialParams>,
    base_colors: HashMap<MeshHandle, Vec3>,
    background: Rgb,
    props: Vec<Prop>,
    lights: Vec<Light>,
    camera_reset: Option<[f32; 3]>,
}

impl PainterRenderer {
    pub fn new(geometry: HashMap<MeshHandle, MeshData>) -> Self {
        Self {
            geometry,
            attached: BTreeMap::new(),
            base_colors: HashMap::new(),
            background: Rgb::BLACK,
            props: Vec::new(),
            lights: Vec::new(),
            camera_reset: None,
        }
    }

    /// Camera position requested by the last scene switch, consumed once
    pub fn take_camera_reset(&mut self) -> Option<[f32; 3]> {
        self.camera_reset.take()
    }

    pub fn paint(&self, painter: &Painter, rect: Rect, camera: &ArcBallCamera) {
        painter.rect_filled(rect, 0.0, to_color32(self.background.to_f32(), 1.0));

        let vp = camera.view_projection(rect.aspect_ratio());
        let eye = camera.eye_position();

        let mut ground = Vec::new();
        for prop in &self.props {
            let base = Vec3::from(prop.material.base_color.to_f32());
            self.collect(&prop.mesh, &prop.material, base, camera, &vp, eye, rect, &mut ground);
        }
        paint_sorted(painter, ground);

        let mut car = Vec::new();
        for (handle, material) in &self.attached {
            let Some(mesh) = self.geometry.get(handle) else {
                continue;
            };
            let base = self
                .base_colors
                .get(handle)
                .copied()
                .unwrap_or_else(|| Vec3::from(material.base_color.to_f32()));
            self.collect(mesh, material, base, camera, &vp, eye, rect, &mut car);
        }
        paint_sorted(painter, car);
    }

    #[allow(clippy::too_many_arguments)]
    fn collect(
        &self,
        mesh: &MeshData,
        material: &MaterialParams,
        base: Vec3,
        camera: &ArcBallCamera,
        vp: &glam::Mat4,
        eye: Vec3,
        rect: Rect,
        out: &mut Vec<ScreenTriangle>,
    ) {
        let alpha = material.opacity.unwrap_or(1.0);
        for tri in mesh.triangles() {
            let centroid = tri.centroid();
            if tri.normal.dot(eye - centroid) <= 0.0 {
                continue;
            }
            let Some(projected) = project_triangle(camera, vp, &tri, rect) else {
                continue;
            };
            let lit = shade(material, base, tri.normal, centroid, eye, &self.lights);
            out.push(ScreenTriangle {
                points: projected.0,
                depth: projected.1,
                color: to_color32(lit.to_array(), alpha),
            });
        }
    }
}

impl Renderer for PainterRenderer {
    fn set_background(&mut self, color: Rgb) {
        self.background = color;
    }

    fn replace_environment(&mut self, environment: &Environment) {
        self.props = environment
            .objects
            .iter()
            .map(|object| Prop {
                mesh: object.shape.mesh().transformed(&object.placement.matrix()),
                material: object.material,
            })
            .collect();
        self.lights = environment.lights.clone();
        tracing::debug!(
            "Environment: {} props, {} lights",
            self.props.len(),
            self.lights.len()
        );
    }

    fn reset_camera(&mut self, position: [f32; 3]) {
        self.camera_reset = Some(position);
    }

    fn attach(&mut self, mesh: MeshHandle, material: &MaterialParams) {
        self.attached.insert(mesh, *material);
        self.base_colors.remove(&mesh);
    }

    fn detach(&mut self, mesh: MeshHandle) {
        self.attached.remove(&mesh);
        self.base_colors.remove(&mesh);
    }

    fn set_base_color(&mut self, mesh: MeshHandle, color: Vec3) {
        self.base_colors.insert(mesh, color);
    }
}

fn project_triangle(
    camera: &ArcBallCamera,
    vp: &glam::Mat4,
    tri: &Triangle,
    rect: Rect,
) -> Option<([egui::Pos2; 3], f32)> {
    let (a, da) = camera.project(vp, tri.positions[0], rect)?;
    let (b, db) = camera.project(vp, tri.positions[1], rect)?;
    let (c, dc) = camera.project(vp, tri.positions[2], rect)?;
    Some(([a, b, c], (da + db + dc) / 3.0))
}

/// Painter's algorithm: far triangles first
fn paint_sorted(painter: &Painter, mut triangles: Vec<ScreenTriangle>) {
    if triangles.is_empty() {
        return;
    }
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut mesh = egui::Mesh::default();
    for tri in &triangles {
        let base = mesh.vertices.len() as u32;
        for p in tri.points {
            mesh.colored_vertex(p, tri.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));
}

/// Flat shading of one face, linear RGB clamped to 0..=1
pub(crate) fn shade(
    material: &MaterialParams,
    base: Vec3,
    normal: Vec3,
    position: Vec3,
    eye: Vec3,
    lights: &[Light],
) -> Vec3 {
    let view = (eye - position).normalize_or_zero();
    let shininess = 4.0 + (1.0 - material.roughness.clamp(0.0, 1.0)) * 60.0;
    let specular_weight = (1.0 - material.roughness) * (0.2 + 0.8 * material.metalness);
    // Metals tint their reflections and lose most of their diffuse term
    let diffuse_color = base * (1.0 - 0.7 * material.metalness);
    let specular_color = Vec3::ONE.lerp(base, material.metalness);

    let mut color = Vec3::ZERO;
    for light in lights {
        let light_color = Vec3::from(light.color.to_f32());
        let (direction, strength) = match light.kind {
            LightKind::Ambient => {
                color += diffuse_color * light_color * light.intensity;
                continue;
            }
            LightKind::Hemisphere => {
                let ground = light.ground_color.map_or(Vec3::ZERO, |g| Vec3::from(g.to_f32()));
                let mix = normal.y * 0.5 + 0.5;
                color += diffuse_color * ground.lerp(light_color, mix) * light.intensity;
                continue;
            }
            LightKind::Directional => (Vec3::from(light.position).normalize_or_zero(), light.intensity),
            LightKind::Point => {
                let offset = Vec3::from(light.position) - position;
                (offset.normalize_or_zero(), light.intensity / offset.length_squared().max(1.0))
            }
            LightKind::Spot => {
                let offset = Vec3::from(light.position) - position;
                let axis = (-Vec3::from(light.position)).normalize_or_zero();
                let half_angle = light.angle.unwrap_or(std::f32::consts::FRAC_PI_3);
                let to_point = (-offset).normalize_or_zero();
                if axis.dot(to_point) < half_angle.cos() {
                    continue;
                }
                (offset.normalize_or_zero(), light.intensity / offset.length_squared().max(1.0))
            }
        };

        let n_dot_l = normal.dot(direction);
        if n_dot_l <= 0.0 {
            continue;
        }
        color += diffuse_color * light_color * n_dot_l * strength;

        let half = (direction + view).normalize_or_zero();
        let spec = normal.dot(half).max(0.0).powf(shininess);
        color += specular_color * light_color * spec * specular_weight * strength;
    }

    if let Some(emission) = material.emissive {
        color += Vec3::from(emission.color.to_f32()) * emission.intensity * EMISSIVE_GAIN;
    }

    color.clamp(Vec3::ZERO, Vec3::ONE)
}

fn to_color32(rgb: [f32; 3], alpha: f32) -> Color32 {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}
