//! Static scene contents (ground, walls, props) and light rigs per preset.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use serde::Serialize;
use shared::{scene_preset, Rgb, SceneId};

use crate::appearance::MaterialParams;
use crate::geometry::{Placement, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
    Spot,
    Hemisphere,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    pub kind: LightKind,
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: Rgb,
    /// Cone angle of spot lights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    /// Lower hemisphere color of hemisphere lights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_color: Option<Rgb>,
    pub cast_shadow: bool,
}

impl Light {
    fn new(kind: LightKind, position: [f32; 3], intensity: f32) -> Self {
        Self {
            kind,
            position,
            intensity,
            color: Rgb::WHITE,
            angle: None,
            ground_color: None,
            cast_shadow: false,
        }
    }

    pub fn ambient(intensity: f32) -> Self {
        Self::new(LightKind::Ambient, [0.0; 3], intensity)
    }

    pub fn directional(position: [f32; 3], intensity: f32) -> Self {
        Self::new(LightKind::Directional, position, intensity)
    }

    pub fn point(position: [f32; 3], intensity: f32) -> Self {
        Self::new(LightKind::Point, position, intensity)
    }

    pub fn spot(position: [f32; 3], intensity: f32, angle: f32) -> Self {
        Self {
            angle: Some(angle),
            ..Self::new(LightKind::Spot, position, intensity)
        }
    }

    pub fn hemisphere(sky: Rgb, ground: Rgb, intensity: f32) -> Self {
        Self {
            color: sky,
            ground_color: Some(ground),
            ..Self::new(LightKind::Hemisphere, [0.0, 20.0, 0.0], intensity)
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }
}

/// Static prop of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentObject {
    pub name: String,
    pub shape: Shape,
    pub placement: Placement,
    pub material: MaterialParams,
}

/// Everything a scene preset puts around the car
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub scene: SceneId,
    pub objects: Vec<EnvironmentObject>,
    pub lights: Vec<Light>,
}

impl Environment {
    pub fn for_scene(scene: SceneId) -> Self {
        let mut env = Self {
            scene,
            objects: Vec::new(),
            lights: vec![Light::ambient(scene_preset(scene).ambient_light_intensity)],
        };
        match scene {
            SceneId::Default => env.build_default(),
            SceneId::Garage => env.build_garage(),
            SceneId::Racetrack => env.build_racetrack(),
        }
        env
    }

    pub fn object(&self, name: &str) -> Option<&EnvironmentObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn lights_of(&self, kind: LightKind) -> impl Iterator<Item = &Light> {
        self.lights.iter().filter(move |l| l.kind == kind)
    }

    fn add(&mut self, name: impl Into<String>, shape: Shape, placement: Placement, material: MaterialParams) {
        self.objects.push(EnvironmentObject {
            name: name.into(),
            shape,
            placement,
            material,
        });
    }

    fn build_default(&mut self) {
        let preset = scene_preset(SceneId::Default);
        self.lights.extend([
            Light::directional([5.0, 10.0, 5.0], preset.directional_light_intensity).with_shadow(),
            Light::directional([-5.0, 5.0, -5.0], 0.5),
            Light::point([0.0, 5.0, 0.0], 0.3),
        ]);
        self.add(
            "ground",
            Shape::plane(50.0, 50.0),
            Placement::at(0.0, 0.0, 0.0),
            MaterialParams::opaque(preset.ground_color, 1.0, 0.0),
        );
    }

    fn build_garage(&mut self) {
        let wall = MaterialParams::opaque(Rgb::from_u32(0x2a2a2a), 0.9, 0.0);

        self.add(
            "floor",
            Shape::plane(20.0, 20.0),
            Placement::at(0.0, 0.0, 0.0),
            MaterialParams::opaque(Rgb::from_u32(0x3a3a3a), 0.8, 0.1),
        );
        self.add("back_wall", Shape::cuboid(20.0, 10.0, 0.5), Placement::at(0.0, 5.0, -10.0), wall);
        self.add(
            "left_wall",
            Shape::cuboid(20.0, 10.0, 0.5),
            Placement::at(-10.0, 5.0, 0.0).rotated_y(FRAC_PI_2),
            wall,
        );
        self.add(
            "right_wall",
            Shape::cuboid(20.0, 10.0, 0.5),
            Placement::at(10.0, 5.0, 0.0).rotated_y(-FRAC_PI_2),
            wall,
        );
        self.add(
            "ceiling",
            Shape::plane(20.0, 20.0),
            Placement::at(0.0, 10.0, 0.0).rotated_x(std::f32::consts::PI),
            MaterialParams::opaque(Rgb::from_u32(0x1a1a1a), 0.8, 0.0),
        );

        for (side, x) in [("left", -4.0), ("right", 4.0)] {
            self.add(
                format!("light_fixture_{side}"),
                Shape::cuboid(1.0, 0.3, 12.0),
                Placement::at(x, 9.5, 0.0),
                MaterialParams::opaque(Rgb::from_u32(0xe0e0e0), 0.3, 0.5),
            );
            for z in [-4.0, 0.0, 4.0] {
                self.lights.push(
                    Light::spot([x, 9.3, z], 150.0, FRAC_PI_3)
                        .with_color(Rgb::from_u32(0xfff8e7))
                        .with_shadow(),
                );
            }
        }

        self.add(
            "tool_cabinet",
            Shape::cuboid(1.5, 4.0, 2.0),
            Placement::at(-9.0, 2.0, -8.0),
            MaterialParams::opaque(Rgb::from_u32(0xcc0000), 0.4, 0.6),
        );
        self.add(
            "work_bench",
            Shape::cuboid(2.0, 3.0, 3.0),
            Placement::at(8.0, 1.5, -8.0),
            MaterialParams::opaque(Rgb::from_u32(0x8b4513), 0.7, 0.1),
        );
    }

    fn build_racetrack(&mut self) {
        let preset = scene_preset(SceneId::Racetrack);
        let paint = |color: u32| MaterialParams::opaque(Rgb::from_u32(color), 0.5, 0.0);

        self.add(
            "grass",
            Shape::plane(100.0, 100.0),
            Placement::at(0.0, 0.0, 0.0),
            MaterialParams::opaque(preset.ground_color, 0.9, 0.0),
        );
        self.add(
            "track",
            Shape::plane(8.0, 50.0),
            Placement::at(0.0, 0.01, 0.0),
            MaterialParams::opaque(Rgb::from_u32(0x1a1a1a), 0.7, 0.0),
        );
        self.add("start_line", Shape::plane(8.0, 0.8), Placement::at(0.0, 0.02, 20.0), paint(0xffffff));

        for i in 0..8 {
            let color = if i % 2 == 0 { 0xffffff } else { 0x1a1a1a };
            self.add(
                format!("finish_square_{i}"),
                Shape::plane(1.0, 0.8),
                Placement::at(-3.5 + i as f32, 0.02, -20.0),
                paint(color),
            );
        }
        for i in 0..10 {
            self.add(
                format!("center_dash_{i}"),
                Shape::plane(0.2, 1.5),
                Placement::at(0.0, 0.02, 18.0 - i as f32 * 4.0),
                paint(0xffff00),
            );
        }
        for (side, x) in [("left", -3.8), ("right", 3.8)] {
            self.add(format!("edge_line_{side}"), Shape::plane(0.4, 50.0), Placement::at(x, 0.02, 0.0), paint(0xffffff));
        }
        for (side, x) in [("left", -5.0), ("right", 5.0)] {
            for i in 0..25 {
                let color = if i % 2 == 0 { 0xff0000 } else { 0xffffff };
                self.add(
                    format!("barrier_{side}_{i}"),
                    Shape::cuboid(0.3, 1.0, 1.5),
                    Placement::at(x, 0.5, 22.0 - i as f32 * 2.0),
                    MaterialParams::opaque(Rgb::from_u32(color), 0.6, 0.0),
                );
            }
        }

        self.add(
            "grandstand",
            Shape::cuboid(4.0, 4.0, 30.0),
            Placement::at(-15.0, 2.0, 0.0),
            MaterialParams::opaque(Rgb::from_u32(0x4a4a4a), 0.7, 0.0),
        );
        for i in 0..5 {
            let step = i as f32 * 0.5;
            self.add(
                format!("seat_row_{i}"),
                Shape::cuboid(0.4, 0.3, 28.0),
                Placement::at(-13.0 + step, 1.0 + step, 0.0),
                MaterialParams::opaque(Rgb::from_u32(0xff6b35), 0.6, 0.0),
            );
        }

        self.lights.extend([
            Light::directional([20.0, 30.0, 10.0], preset.directional_light_intensity)
                .with_color(Rgb::from_u32(0xfffacd))
                .with_shadow(),
            Light::hemisphere(Rgb::from_u32(0x87ceeb), Rgb::from_u32(0x2d5016), 0.5),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_has_ambient_from_preset() {
        for scene in SceneId::ALL {
            let env = Environment::for_scene(scene);
            let ambient: Vec<_> = env.lights_of(LightKind::Ambient).collect();
            assert_eq!(ambient.len(), 1);
            assert_eq!(ambient[0].intensity, scene_preset(scene).ambient_light_intensity);
        }
    }

    #[test]
    fn test_default_scene_rig() {
        let env = Environment::for_scene(SceneId::Default);
        assert_eq!(env.lights_of(LightKind::Directional).count(), 2);
        assert_eq!(env.lights_of(LightKind::Point).count(), 1);
        assert_eq!(env.objects.len(), 1);
        assert_eq!(env.object("ground").unwrap().material.base_color.to_hex(), "#2a2a2a");
    }

    #[test]
    fn test_garage_has_six_spots_and_no_sun() {
        let env = Environment::for_scene(SceneId::Garage);
        let spots: Vec<_> = env.lights_of(LightKind::Spot).collect();
        assert_eq!(spots.len(), 6);
        assert!(spots.iter().all(|s| s.intensity == 150.0 && s.angle == Some(FRAC_PI_3)));
        assert_eq!(env.lights_of(LightKind::Directional).count(), 0);
        assert!(env.object("tool_cabinet").is_some());
        assert!(env.object("ceiling").is_some());
    }

    #[test]
    fn test_racetrack_props() {
        let env = Environment::for_scene(SceneId::Racetrack);
        let count = |prefix: &str| env.objects.iter().filter(|o| o.name.starts_with(prefix)).count();
        assert_eq!(count("barrier_"), 50);
        assert_eq!(count("finish_square_"), 8);
        assert_eq!(count("center_dash_"), 10);
        assert_eq!(count("seat_row_"), 5);
        let sun = env.lights_of(LightKind::Directional).next().unwrap();
        assert_eq!(sun.intensity, 2.0);
        assert_eq!(sun.color.to_hex(), "#fffacd");
        assert_eq!(env.lights_of(LightKind::Hemisphere).count(), 1);
    }
}
