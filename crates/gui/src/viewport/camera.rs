use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec3, Vec4};

pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 20.0;
/// Keeps the eye above the ground plane and off the pole
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Orbit camera around the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Elevation above the ground plane (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::from_position([5.0, 2.0, 5.0], Vec3::ZERO)
    }
}

impl ArcBallCamera {
    /// Camera at `position` looking at `target`
    pub fn from_position(position: [f32; 3], target: Vec3) -> Self {
        let offset = Vec3::from(position) - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let (yaw, pitch) = if offset.length_squared() > f32::EPSILON {
            let dir = offset.normalize();
            (dir.x.atan2(dir.z), dir.y.clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            yaw,
            pitch: pitch.clamp(0.0, MAX_PITCH),
            distance,
            target,
            fov: 50.0_f32.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(0.0, MAX_PITCH);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        let offset = right * dx + up * dy;
        self.target += offset;
    }

    /// Idle orbit: `speed` 1.0 is one full turn per minute
    pub fn auto_rotate(&mut self, dt: f32, speed: f32) {
        self.yaw = (self.yaw + TAU / 60.0 * speed * dt).rem_euclid(TAU);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a world point to screen coords plus view depth. `None` behind
    /// the near plane.
    pub fn project(&self, vp: &Mat4, point: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let p = *vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.1 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some((egui::pos2(screen_x, screen_y), p.w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_roundtrips_eye() {
        let cam = ArcBallCamera::from_position([5.0, 2.0, 5.0], Vec3::ZERO);
        assert!((cam.eye_position() - Vec3::new(5.0, 2.0, 5.0)).length() < 1e-4);
        assert!((cam.fov - 50.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut cam = ArcBallCamera::from_position([1.0, 0.5, 1.0], Vec3::ZERO);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(-10.0);
        assert_eq!(cam.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_pitch_stays_above_ground() {
        let mut cam = ArcBallCamera::default();
        cam.rotate(0.0, -500.0);
        assert_eq!(cam.pitch, 0.0);
        cam.rotate(0.0, 500.0);
        assert!(cam.pitch < FRAC_PI_2);
        assert!(cam.eye_position().y > 0.0);
    }

    #[test]
    fn test_auto_rotate_full_turn_per_minute() {
        let mut cam = ArcBallCamera::default();
        let start = cam.yaw;
        cam.auto_rotate(15.0, 1.0);
        let delta = (cam.yaw - start).rem_euclid(TAU);
        assert!((delta - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_project_target_hits_center() {
        let cam = ArcBallCamera::default();
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let vp = cam.view_projection(rect.aspect_ratio());
        let (pos, depth) = cam.project(&vp, Vec3::ZERO, rect).unwrap();
        assert!((pos - rect.center()).length() < 1e-2);
        assert!(depth > 0.0);
    }
}
