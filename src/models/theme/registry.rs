//! Theme registry.
//!
//! Holds every theme known to the process, in registration order. Contents are fixed once
//! the registry is built; switching themes hands out another `Arc<Theme>` and never
//! touches a registered descriptor.

use super::Theme;
use super::common::{load_toml, parse_toml};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Themes compiled into the binary, in menu order. The first one is the default.
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("neon", include_str!("../../../themes/neon.toml")),
    ("retro", include_str!("../../../themes/retro.toml")),
    ("minimal", include_str!("../../../themes/minimal.toml")),
    ("holo", include_str!("../../../themes/holo.toml")),
];

/// Identity of a theme as shown in a selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Arc<Theme>>,
    default_index: usize,
}

impl ThemeRegistry {
    /// Registry with the built-in themes only.
    pub fn builtin() -> Self {
        let mut themes = Vec::with_capacity(BUILTIN_THEMES.len());
        for (file, content) in BUILTIN_THEMES {
            match parse_toml::<Theme>(content) {
                Ok(theme) => themes.push(theme),
                Err(e) => log::error!("THEME: Built-in theme '{}' is invalid: {}", file, e),
            }
        }
        Self::from_themes(themes)
    }

    /// Built-in themes followed by every valid `*.toml` theme found in `dir`.
    ///
    /// Files are visited in name order. Unreadable or invalid files and ids that are
    /// already registered are logged and skipped.
    pub fn with_directory(dir: &Path) -> Self {
        let mut registry = Self::builtin();

        let mut paths = match fs::read_dir(dir) {
            Ok(entries) => entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
                .collect::<Vec<_>>(),
            Err(e) => {
                log::warn!("THEME: Cannot read theme directory {:?}: {}", dir, e);
                return registry;
            }
        };
        paths.sort();

        for path in paths {
            match load_toml::<Theme>(&path) {
                Ok(theme) => {
                    if registry.contains(&theme.id) {
                        log::warn!(
                            "THEME: Skipping {:?}, id '{}' is already registered",
                            path,
                            theme.id
                        );
                    } else {
                        log::info!("THEME: Loaded '{}' from {:?}", theme.id, path);
                        registry.themes.push(Arc::new(theme));
                    }
                }
                Err(e) => log::warn!("THEME: Skipping {:?}: {}", path, e),
            }
        }

        registry
    }

    /// Registry over an explicit list; the first theme is the default.
    ///
    /// An empty list falls back to `Theme::default()` so lookups always succeed.
    pub fn from_themes(themes: Vec<Theme>) -> Self {
        let mut themes: Vec<Arc<Theme>> = themes.into_iter().map(Arc::new).collect();
        if themes.is_empty() {
            log::warn!("THEME: No themes registered, using the fallback theme");
            themes.push(Arc::new(Theme::default()));
        }
        Self {
            themes,
            default_index: 0,
        }
    }

    /// The requested theme, or the default one when `id` is unknown.
    pub fn get(&self, id: &str) -> Arc<Theme> {
        match self.themes.iter().find(|theme| theme.id == id) {
            Some(theme) => Arc::clone(theme),
            None => {
                log::debug!("THEME: Unknown theme '{}', using default", id);
                self.default_theme()
            }
        }
    }

    pub fn default_theme(&self) -> Arc<Theme> {
        Arc::clone(&self.themes[self.default_index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.iter().any(|theme| theme.id == id)
    }

    /// Position of `id` in registration order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme.id == id)
    }

    /// Theme at `index` in registration order, wrapping around.
    pub fn get_by_index(&self, index: usize) -> Arc<Theme> {
        Arc::clone(&self.themes[index % self.themes.len()])
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Registered themes in registration order.
    pub fn list(&self) -> Vec<ThemeSummary> {
        self.themes.iter().map(|theme| theme.summary()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Theme>> {
        self.themes.iter()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_all_parse() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.len(), BUILTIN_THEMES.len());
        let ids: Vec<String> = registry.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["neon", "retro", "minimal", "holo"]);
    }

    #[test]
    fn test_unknown_id_returns_default() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.get("does-not-exist").id, "neon");
        assert_eq!(registry.get("retro").id, "retro");
    }

    #[test]
    fn test_get_shares_the_registered_descriptor() {
        let registry = ThemeRegistry::builtin();
        let a = registry.get("minimal");
        let b = registry.get("minimal");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_empty_registry_still_resolves() {
        let registry = ThemeRegistry::from_themes(Vec::new());
        assert_eq!(registry.get("anything").id, Theme::default().id);
    }

    #[test]
    fn test_directory_themes_append_after_builtins() {
        let dir = tempfile::tempdir().unwrap();

        let mut custom = fs::File::create(dir.path().join("b_custom.toml")).unwrap();
        writeln!(custom, "id = \"custom\"\nname = \"Custom\"").unwrap();

        let mut duplicate = fs::File::create(dir.path().join("a_dup.toml")).unwrap();
        writeln!(duplicate, "id = \"neon\"\nname = \"Not Neon\"").unwrap();

        let mut broken = fs::File::create(dir.path().join("c_broken.toml")).unwrap();
        writeln!(broken, "id = [").unwrap();

        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = ThemeRegistry::with_directory(dir.path());
        let ids: Vec<String> = registry.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["neon", "retro", "minimal", "holo", "custom"]);
        assert_eq!(registry.get("neon").name, "Neon");
    }

    #[test]
    fn test_missing_directory_keeps_builtins() {
        let registry = ThemeRegistry::with_directory(Path::new("/definitely/not/here"));
        assert_eq!(registry.len(), BUILTIN_THEMES.len());
    }
}
