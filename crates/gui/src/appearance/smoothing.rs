use glam::Vec3;
use shared::Rgb;

/// Fraction of the remaining distance covered per render tick
pub const BODY_COLOR_SMOOTHING: f32 = 0.1;

/// Displayed color that eases toward a target, one step per render tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedColor {
    current: Vec3,
}

impl SmoothedColor {
    pub fn new(start: Rgb) -> Self {
        Self {
            current: Vec3::from_array(start.to_f32()),
        }
    }

    /// Linear RGB in 0..=1
    pub fn current(&self) -> Vec3 {
        self.current
    }

    pub fn current_rgb(&self) -> Rgb {
        Rgb::from_f32(self.current.to_array())
    }

    /// Jump straight to `target`
    pub fn snap(&mut self, target: Rgb) {
        self.current = Vec3::from_array(target.to_f32());
    }

    /// Advance one tick toward `target` and return the new color
    pub fn step(&mut self, target: Rgb) -> Vec3 {
        self.current = self.current.lerp(Vec3::from_array(target.to_f32()), BODY_COLOR_SMOOTHING);
        self.current
    }

    /// Within 1/512 of `target`, close enough that `current_rgb` rounds to it
    pub fn is_settled(&self, target: Rgb) -> bool {
        self.current.distance(Vec3::from_array(target.to_f32())) < 1.0 / 512.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_covers_ten_percent() {
        let mut c = SmoothedColor::new(Rgb::BLACK);
        let v = c.step(Rgb::WHITE);
        assert!((v.x - 0.1).abs() < 1e-6);
        let v = c.step(Rgb::WHITE);
        assert!((v.x - 0.19).abs() < 1e-6);
    }

    #[test]
    fn test_converges() {
        let mut c = SmoothedColor::new(Rgb::BLACK);
        let target = Rgb::from_u32(0x3366ff);
        for _ in 0..100 {
            c.step(target);
        }
        assert!(c.is_settled(target));
        assert_eq!(c.current_rgb(), target);
    }

    #[test]
    fn test_snap() {
        let mut c = SmoothedColor::new(Rgb::BLACK);
        c.snap(Rgb::WHITE);
        assert_eq!(c.current(), Vec3::ONE);
    }
}
