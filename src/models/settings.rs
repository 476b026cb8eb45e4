//! Player settings persistence.
//!
//! Settings live in a string-keyed store with primitive values. Reads fall back to a
//! caller-supplied default, and a store that cannot be read or written never reports
//! that to its caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Well-known setting keys
pub mod keys {
    pub const MUSIC_VOLUME: &str = "musicVolume";
    pub const SFX_VOLUME: &str = "sfxVolume";
    pub const SCREEN_SHAKE: &str = "screenShake";
    pub const CRT_EFFECTS: &str = "crtEffects";
    pub const THEME: &str = "theme";
}

/// Values used when a key was never written
pub mod defaults {
    pub const MUSIC_VOLUME: f32 = 0.8;
    pub const SFX_VOLUME: f32 = 0.7;
    pub const SCREEN_SHAKE: bool = true;
    pub const CRT_EFFECTS: bool = true;
}

/// A stored setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<f32> for SettingValue {
    fn from(value: f32) -> Self {
        SettingValue::Number(value as f64)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

pub trait SettingsStore {
    /// Raw lookup, `None` when the key is unset or the store is unavailable.
    fn load(&self, key: &str) -> Option<SettingValue>;

    /// Writes a value. Failures are handled (and at most logged) by the store.
    fn set(&mut self, key: &str, value: SettingValue);

    fn get(&self, key: &str, default: SettingValue) -> SettingValue {
        self.load(key).unwrap_or(default)
    }

    fn get_f32(&self, key: &str, default: f32) -> f32 {
        match self.load(key) {
            Some(SettingValue::Number(value)) => value as f32,
            _ => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.load(key) {
            Some(SettingValue::Bool(value)) => value,
            _ => default,
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.load(key) {
            Some(SettingValue::Text(value)) => value,
            _ => default.to_string(),
        }
    }
}

/// Store kept in memory, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, SettingValue>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }
}

/// Store persisted as a flat JSON object.
///
/// The file is read once in `open` and rewritten on every `set`. A missing or corrupt file
/// starts an empty store; write failures keep the value in memory and log a warning.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
}

impl JsonSettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("SETTINGS: Ignoring corrupt settings file {:?}: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    fn save(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(|e| e.to_string())?;
        fs::write(&self.path, content).map_err(|e| e.to_string())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            log::warn!("SETTINGS: Failed to write {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_key_returns_default() {
        let mut store = MemorySettingsStore::new();
        assert_eq!(store.get_f32(keys::SFX_VOLUME, 0.7), 0.7);
        assert_eq!(
            store.get(keys::SFX_VOLUME, SettingValue::Number(0.7)),
            SettingValue::Number(0.7)
        );

        store.set(keys::SFX_VOLUME, 0.4f32.into());
        assert!((store.get_f32(keys::SFX_VOLUME, 0.7) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_mismatched_type_reads_default() {
        let mut store = MemorySettingsStore::new();
        store.set(keys::SCREEN_SHAKE, "yes".into());
        assert!(store.get_bool(keys::SCREEN_SHAKE, true));
        assert_eq!(store.get_string(keys::SCREEN_SHAKE, "no"), "yes");
    }

    #[test]
    fn test_json_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonSettingsStore::open(&path);
        store.set(keys::MUSIC_VOLUME, 0.25f32.into());
        store.set(keys::CRT_EFFECTS, false.into());
        store.set(keys::THEME, "retro".into());

        let reopened = JsonSettingsStore::open(&path);
        assert!((reopened.get_f32(keys::MUSIC_VOLUME, 1.0) - 0.25).abs() < 1e-6);
        assert!(!reopened.get_bool(keys::CRT_EFFECTS, true));
        assert_eq!(reopened.get_string(keys::THEME, "neon"), "retro");
    }

    #[test]
    fn test_json_store_reads_file_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "theme": "holo", "sfxVolume": 0.3 }"#).unwrap();

        let store = JsonSettingsStore::open(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(store.get_string(keys::THEME, "neon"), "holo");
        assert!((store.get_f32(keys::SFX_VOLUME, 0.7) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_json_store_swallows_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("settings.json");
        fs::create_dir_all(&path).unwrap();

        let mut store = JsonSettingsStore::open(&path);
        store.set(keys::SFX_VOLUME, 0.9f32.into());
        assert!((store.get_f32(keys::SFX_VOLUME, 0.7) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_json_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonSettingsStore::open(&path);
        assert!(store.get_bool(keys::SCREEN_SHAKE, true));
    }
}
