use std::sync::atomic::{AtomicU8, Ordering};

use shared::SceneId;

use crate::state::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::Pl,
        _ => Language::En,
    }
}

pub fn set_lang(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::En => 0,
            Language::Pl => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let pl = lang() == Language::Pl;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if pl { "Plik" } else { "File" },
        "menu.import" => if pl { "Importuj konfigurację..." } else { "Import configuration..." },
        "menu.import_title" => if pl { "Otwórz konfigurację JSON" } else { "Open Configuration JSON" },
        "menu.export" => if pl { "Eksportuj konfigurację..." } else { "Export configuration..." },
        "menu.export_title" => if pl { "Zapisz konfigurację JSON" } else { "Save Configuration JSON" },
        "menu.reset" => if pl { "Przywróć domyślne" } else { "Reset to defaults" },
        "menu.quit" => if pl { "Zakończ" } else { "Quit" },

        "menu.view" => if pl { "Widok" } else { "View" },
        "menu.config_panel" => if pl { "Panel konfiguracji  Tab" } else { "Configuration panel  Tab" },
        "menu.status_bar" => if pl { "Pasek stanu" } else { "Status bar" },
        "menu.fullscreen" => if pl { "Pełny ekran  F11" } else { "Fullscreen  F11" },
        "menu.reset_camera" => if pl { "Resetuj kamerę  R" } else { "Reset camera  R" },
        "menu.auto_rotate" => if pl { "Automatyczny obrót" } else { "Auto-rotate" },
        "menu.rotate_speed" => if pl { "Prędkość obrotu" } else { "Rotation speed" },
        "menu.audio" => if pl { "Dźwięk" } else { "Sound" },
        "menu.font_size" => if pl { "Rozmiar czcionki" } else { "Font size" },
        "menu.language" => if pl { "Język" } else { "Language" },

        "menu.scene" => if pl { "Scena" } else { "Scene" },

        // ── Scenes ──────────────────────────────────────────
        "scene.default" => if pl { "Studio" } else { "Studio" },
        "scene.garage" => if pl { "Garaż" } else { "Garage" },
        "scene.racetrack" => if pl { "Tor wyścigowy" } else { "Racetrack" },

        // ── Configuration panel ─────────────────────────────
        "panel.title" => if pl { "Konfigurator" } else { "Car Configurator" },
        "panel.subtitle" => if pl { "Skonfiguruj swój samochód" } else { "Customize your dream car" },
        "panel.reset" => if pl { "Resetuj" } else { "Reset" },

        "section.scene" => if pl { "Otoczenie" } else { "Environment" },
        "section.body" => if pl { "Karoseria" } else { "Body" },
        "section.wheels" => if pl { "Koła" } else { "Wheels" },
        "section.front_lamps" => if pl { "Światła przednie" } else { "Front Lamps" },
        "section.back_lamps" => if pl { "Światła tylne" } else { "Back Lamps" },
        "section.windows" => if pl { "Szyby" } else { "Windows" },
        "section.spoiler" => if pl { "Spojler" } else { "Spoiler" },
        "section.metal" => if pl { "Elementy metalowe" } else { "Metal Elements" },

        "label.paint_color" => if pl { "Kolor lakieru" } else { "Paint color" },
        "label.material" => if pl { "Wykończenie" } else { "Material" },
        "label.wheel_color" => if pl { "Kolor kół" } else { "Wheel color" },
        "label.lights_on" => if pl { "Włączone" } else { "Lights on" },
        "label.intensity" => if pl { "Natężenie" } else { "Intensity" },
        "label.light_color" => if pl { "Kolor światła" } else { "Light color" },
        "label.transparency" => if pl { "Przezroczystość" } else { "Transparency" },
        "label.tint" => if pl { "Przyciemnienie" } else { "Tint" },
        "label.visible" => if pl { "Widoczny" } else { "Visible" },
        "label.spoiler_color" => if pl { "Kolor spojlera" } else { "Spoiler color" },
        "label.metal_type" => if pl { "Rodzaj" } else { "Finish" },
        "label.roughness" => if pl { "Chropowatość" } else { "Roughness" },
        "label.metalness" => if pl { "Metaliczność" } else { "Metalness" },

        "mat.matte" => if pl { "Mat" } else { "Matte" },
        "mat.glossy" => if pl { "Połysk" } else { "Glossy" },
        "tint.clear" => if pl { "Przejrzyste" } else { "Clear" },
        "tint.tinted" => if pl { "Przyciemniane" } else { "Tinted" },
        "spoiler.body" => if pl { "Jak nadwozie" } else { "Body" },
        "spoiler.carbon" => if pl { "Karbon" } else { "Carbon" },
        "spoiler.black" => if pl { "Czarny" } else { "Black" },
        "metal.chrome" => if pl { "Chrom" } else { "Chrome" },
        "metal.brushed" => if pl { "Szczotkowany" } else { "Brushed" },
        "metal.black" => if pl { "Czarny" } else { "Black" },

        // ── Status bar ──────────────────────────────────────
        "status.scene" => if pl { "Scena" } else { "Scene" },
        "status.changed" => if pl { "Zmienione opcje" } else { "Changed options" },
        "status.defaults" => if pl { "Ustawienia fabryczne" } else { "Factory defaults" },
        "status.version" => if pl { "Wersja" } else { "Revision" },

        // ── Viewport ────────────────────────────────────────
        "viewport.reset_camera" => if pl { "🔄 Resetuj kamerę" } else { "🔄 Reset Camera" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// Display name of a scene preset
pub fn scene_name(scene: SceneId) -> &'static str {
    match scene {
        SceneId::Default => t("scene.default"),
        SceneId::Garage => t("scene.garage"),
        SceneId::Racetrack => t("scene.racetrack"),
    }
}
