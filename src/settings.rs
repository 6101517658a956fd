//! Presentation settings and preferences
//!
//! Persisted separately from tuning in LocalStorage. Nothing here affects
//! the simulation.

use serde::{Deserialize, Serialize};

/// Presentation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Debug overlays ===
    /// Draw each actor's field-of-view wedge
    pub show_field_of_view: bool,
    /// Draw each actor's flight curve
    pub show_paths: bool,
    /// Opacity of the wedge lines and arc (0.0 - 1.0)
    pub field_of_view_alpha: f32,
    /// Opacity of the flight curve (0.0 - 1.0)
    pub path_alpha: f32,

    // === Sprites ===
    /// Uniform sprite scale
    pub sprite_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_field_of_view: true,
            show_paths: true,
            field_of_view_alpha: 0.2,
            path_alpha: 0.5,
            sprite_scale: 0.33,
        }
    }
}

impl Settings {
    /// Effective wedge opacity (0 when hidden)
    pub fn effective_fov_alpha(&self) -> f32 {
        if self.show_field_of_view {
            self.field_of_view_alpha.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Effective curve opacity (0 when hidden)
    pub fn effective_path_alpha(&self) -> f32 {
        if self.show_paths {
            self.path_alpha.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Flip both debug overlays together
    pub fn toggle_overlays(&mut self) {
        let show = !(self.show_field_of_view || self.show_paths);
        self.show_field_of_view = show;
        self.show_paths = show;
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dragon_skirmish_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_overlays_have_zero_alpha() {
        let mut settings = Settings::default();
        assert!((settings.effective_fov_alpha() - 0.2).abs() < 1e-6);
        settings.show_field_of_view = false;
        assert_eq!(settings.effective_fov_alpha(), 0.0);
        assert!((settings.effective_path_alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_overlays() {
        let mut settings = Settings::default();
        settings.toggle_overlays();
        assert!(!settings.show_field_of_view && !settings.show_paths);
        settings.toggle_overlays();
        assert!(settings.show_field_of_view && settings.show_paths);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"show_paths": false}"#).unwrap();
        assert!(!settings.show_paths);
        assert!(settings.show_field_of_view);
    }
}
