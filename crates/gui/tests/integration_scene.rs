//! Integration tests for appearance derivation and scene composition.
//!
//! Drives the headless harness through user-level actions and checks what
//! the recording renderer and sound backend were told.

use configurator_lib::appearance::{derive, BACK_LAMP_MIN_INTENSITY};
use configurator_lib::compose::LightKind;
use configurator_lib::controls::ControlAction;
use configurator_lib::fixtures::{carbon_pack, garage_night, racetrack_matte};
use configurator_lib::harness::ConfiguratorHarness;
use configurator_lib::model::{ModelPart, ModelProvider, ProceduralCarModel};
use configurator_lib::persistence::MemoryStorage;
use configurator_lib::sound::{BUTTON_CLICK, GARAGE_AMBIENT};
use shared::{scene_preset, ConfigPatch, Configuration, Rgb, SceneId, SpoilerColor};

fn part_material(h: &ConfiguratorHarness, part: ModelPart) -> Option<configurator_lib::appearance::MaterialParams> {
    let mesh = h.model.sub_object_meshes(part)[0];
    h.renderer.material(mesh).copied()
}

#[test]
fn test_derived_materials_follow_configuration() {
    for config in [
        Configuration::default(),
        racetrack_matte(),
        garage_night(),
        carbon_pack(),
    ] {
        let a = derive(&config);
        assert_eq!(a.body.base_color, config.body_color);
        assert_eq!(a.wheels.base_color, config.wheel_color);
        assert_eq!(a.metal.roughness, config.metal_roughness);
        assert_eq!(a.metal.metalness, config.metal_metalness);
        assert_eq!(a.spoiler.is_some(), config.spoiler_visible);

        let opacity = a.windows.opacity.unwrap();
        assert!((0.2..=1.0).contains(&opacity));

        if !config.front_lamps_on {
            assert_eq!(a.front_lamps.emissive_intensity(), 0.0);
        }
        if config.back_lamps_on {
            assert!(a.back_lamps.emissive_intensity() >= BACK_LAMP_MIN_INTENSITY);
        } else {
            assert_eq!(a.back_lamps.emissive_intensity(), 0.0);
        }
    }
}

#[test]
fn test_dim_back_lamps_keep_a_glow_but_front_lamps_do_not() {
    let a = derive(&garage_night());
    assert_eq!(a.back_lamps.emissive_intensity(), BACK_LAMP_MIN_INTENSITY);

    let dim_front = Configuration {
        front_lamps_on: true,
        front_lamps_intensity: 0.2,
        ..Default::default()
    };
    assert!((derive(&dim_front).front_lamps.emissive_intensity() - 0.2).abs() < 1e-6);
}

#[test]
fn test_scene_switch_leaves_vehicle_materials_alone() {
    let mut h = ConfiguratorHarness::new();
    h.update(&ConfigPatch::full(&carbon_pack()));
    let before: Vec<_> = ModelPart::ALL.iter().map(|p| part_material(&h, *p)).collect();

    h.select_scene(SceneId::Racetrack);
    let after: Vec<_> = ModelPart::ALL.iter().map(|p| part_material(&h, *p)).collect();

    assert_eq!(before, after);
    assert!(h.last_report().unwrap().scene_changed);
    assert_eq!(h.renderer.environment_swaps, 2);
    assert_eq!(
        h.renderer.background,
        Some(scene_preset(SceneId::Racetrack).background_color)
    );
}

#[test]
fn test_each_scene_brings_its_own_rig() {
    let mut h = ConfiguratorHarness::new();
    for scene in SceneId::ALL {
        h.select_scene(scene);
        let env = h.renderer.environment.as_ref().unwrap();
        assert_eq!(env.scene, scene);
        assert_eq!(
            h.renderer.camera_resets.last().copied(),
            Some(scene_preset(scene).camera_position)
        );
        let ambient: Vec<_> = env.lights_of(LightKind::Ambient).collect();
        assert_eq!(ambient.len(), 1);
        assert_eq!(ambient[0].intensity, scene_preset(scene).ambient_light_intensity);
    }
    assert_eq!(h.renderer.camera_resets.len(), 3);
}

#[test]
fn test_spoiler_toggle_restores_fresh_material() {
    let mut h = ConfiguratorHarness::new();
    let spoiler_meshes = h.model.sub_object_meshes(ModelPart::Spoiler);

    h.apply(ControlAction::ToggleSpoiler);
    assert!(h.last_report().unwrap().detached.contains(&ModelPart::Spoiler));
    assert!(spoiler_meshes.iter().all(|m| h.renderer.material(*m).is_none()));

    h.apply(ControlAction::SetSpoilerColor(SpoilerColor::Carbon));
    h.apply(ControlAction::ToggleSpoiler);
    let expected = derive(h.config()).spoiler.unwrap();
    for mesh in &spoiler_meshes {
        assert_eq!(h.renderer.material(*mesh), Some(&expected));
    }
}

#[test]
fn test_body_colored_spoiler_tracks_paint() {
    let mut h = ConfiguratorHarness::new();
    h.apply(ControlAction::SetSpoilerColor(SpoilerColor::Body));
    h.apply(ControlAction::SetBodyColor(Rgb::from_u32(0x22aa44)));

    let spoiler = part_material(&h, ModelPart::Spoiler).unwrap();
    assert_eq!(spoiler.base_color, Rgb::from_u32(0x22aa44));
}

#[test]
fn test_paint_change_eases_in_over_frames() {
    let mut h = ConfiguratorHarness::new();
    h.apply(ControlAction::SetBodyColor(Rgb::from_u32(0x0000ff)));
    assert_eq!(h.composer.displayed_body_color(), Some(Rgb::from_u32(0xff0000)));

    assert!(h.frames(5));
    let midway = h.composer.displayed_body_color().unwrap();
    assert!(midway.r < 0xff && midway.b > 0);

    assert!(!h.frames(300));
    assert_eq!(h.composer.displayed_body_color(), Some(Rgb::from_u32(0x0000ff)));
}

#[test]
fn test_model_without_parts_still_composes() {
    let model = ProceduralCarModel::coupe()
        .without(ModelPart::Spoiler)
        .without(ModelPart::FrontLamps);
    let mut h = ConfiguratorHarness::with_model(MemoryStorage::new(), model);
    h.apply(ControlAction::ToggleFrontLamps);

    let report = h.last_report().unwrap();
    assert_eq!(report.missing, vec![ModelPart::Spoiler, ModelPart::FrontLamps]);
    assert!(h.config().front_lamps_on);
}

#[test]
fn test_discrete_controls_click_and_sliders_do_not() {
    let mut h = ConfiguratorHarness::new();
    h.apply(ControlAction::ToggleBackLamps);
    h.apply(ControlAction::SetBackLampsIntensity(2.0));
    h.apply(ControlAction::SetWheelColor(Rgb::WHITE));
    h.apply(ControlAction::SelectScene(SceneId::Garage));
    h.apply(ControlAction::Reset);

    assert_eq!(h.sound.effects, vec![BUTTON_CLICK; 3]);
}

#[test]
fn test_garage_ambience_follows_scene_and_audio_setting() {
    let mut h = ConfiguratorHarness::new();
    assert!(!h.sound.is_ambient_playing(GARAGE_AMBIENT));

    h.select_scene(SceneId::Garage);
    assert!(h.sound.is_ambient_playing(GARAGE_AMBIENT));

    h.select_scene(SceneId::Racetrack);
    assert!(!h.sound.is_ambient_playing(GARAGE_AMBIENT));

    h.audio_enabled = false;
    h.select_scene(SceneId::Garage);
    assert!(!h.sound.is_ambient_playing(GARAGE_AMBIENT));
}

#[test]
fn test_muting_audio_in_garage_stops_ambience_next_frame() {
    let mut h = ConfiguratorHarness::new();
    h.select_scene(SceneId::Garage);
    assert!(h.sound.is_ambient_playing(GARAGE_AMBIENT));

    h.audio_enabled = false;
    h.frames(1);
    assert!(!h.sound.is_ambient_playing(GARAGE_AMBIENT));

    h.audio_enabled = true;
    h.frames(1);
    assert!(h.sound.is_ambient_playing(GARAGE_AMBIENT));
}
