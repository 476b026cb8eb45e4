//! Options overlay: theme picker, volume sliders and toggles on top of the HUD.
//!
//! The overlay fades in and out through `open_progress` and draws nothing while fully
//! closed. Input is debounced: every accepted command arms a cooldown that has to run out
//! before the next one is taken. Values are persisted through a `SettingsStore` and every
//! change is reported back to the owner as an `OverlayEvent`.

use crate::models::settings::{SettingValue, SettingsStore, defaults, keys};
use crate::models::theme::{Theme, ThemeSummary, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::system::bus::AudioCommand;
use crate::views::components::common::primitives::{apply_glow, clear_glow, draw_bar, draw_panel};
use std::sync::Arc;

/// Frames between two accepted inputs.
pub const INPUT_COOLDOWN: f32 = 8.0;
/// `open_progress` change per frame.
pub const OPEN_SPEED: f32 = 0.1;
const SLIDER_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    Up,
    Down,
    Left,
    Right,
    Select,
    Cancel,
}

/// What changed as a result of an input.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Show this theme while the cursor rests on it.
    PreviewTheme(String),
    /// Theme chosen and saved.
    CommitTheme(String),
    /// Overlay closed on a preview; go back to the saved theme.
    RevertTheme(String),
    SettingChanged { key: String, value: SettingValue },
    Closed,
}

impl OverlayEvent {
    /// Audio request implied by the event, if any.
    pub fn audio_command(&self) -> Option<AudioCommand> {
        match self {
            OverlayEvent::SettingChanged {
                key,
                value: SettingValue::Number(volume),
            } => match key.as_str() {
                keys::MUSIC_VOLUME => Some(AudioCommand::SetMusicVolume {
                    volume: *volume as f32,
                }),
                keys::SFX_VOLUME => Some(AudioCommand::SetSfxVolume {
                    volume: *volume as f32,
                }),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonAction {
    ResetDefaults,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionKind {
    Theme,
    Slider { key: &'static str, default: f32 },
    Toggle { key: &'static str, default: bool },
    Button(ButtonAction),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionEntry {
    pub label: &'static str,
    pub kind: OptionKind,
}

pub fn default_options() -> Vec<OptionEntry> {
    vec![
        OptionEntry {
            label: "Theme",
            kind: OptionKind::Theme,
        },
        OptionEntry {
            label: "Music Volume",
            kind: OptionKind::Slider {
                key: keys::MUSIC_VOLUME,
                default: defaults::MUSIC_VOLUME,
            },
        },
        OptionEntry {
            label: "SFX Volume",
            kind: OptionKind::Slider {
                key: keys::SFX_VOLUME,
                default: defaults::SFX_VOLUME,
            },
        },
        OptionEntry {
            label: "Screen Shake",
            kind: OptionKind::Toggle {
                key: keys::SCREEN_SHAKE,
                default: defaults::SCREEN_SHAKE,
            },
        },
        OptionEntry {
            label: "CRT Effects",
            kind: OptionKind::Toggle {
                key: keys::CRT_EFFECTS,
                default: defaults::CRT_EFFECTS,
            },
        },
        OptionEntry {
            label: "Reset Defaults",
            kind: OptionKind::Button(ButtonAction::ResetDefaults),
        },
        OptionEntry {
            label: "Close",
            kind: OptionKind::Button(ButtonAction::Close),
        },
    ]
}

/// State worth restoring when the overlay is dismissed.
#[derive(Clone, Debug)]
pub struct SettingsSnapshot {
    pub theme: String,
}

impl SettingsSnapshot {
    pub fn capture(store: &dyn SettingsStore, fallback_theme: &str) -> Self {
        Self {
            theme: store.get_string(keys::THEME, fallback_theme),
        }
    }
}

pub struct OptionsOverlay {
    theme: Arc<Theme>,
    themes: Vec<ThemeSummary>,
    store: Box<dyn SettingsStore>,
    options: Vec<OptionEntry>,
    screen: (f32, f32),

    open: bool,
    open_progress: f32,
    current: usize,
    cooldown: f32,

    theme_index: usize,
    saved: SettingsSnapshot,
}

impl OptionsOverlay {
    pub fn new(theme: Arc<Theme>, themes: Vec<ThemeSummary>, store: Box<dyn SettingsStore>) -> Self {
        let saved = SettingsSnapshot::capture(store.as_ref(), &theme.id);
        let theme_index = themes
            .iter()
            .position(|summary| summary.id == saved.theme)
            .unwrap_or(0);
        Self {
            theme,
            themes,
            store,
            options: default_options(),
            screen: (0.0, 0.0),
            open: false,
            open_progress: 0.0,
            current: 0,
            cooldown: 0.0,
            theme_index,
            saved,
        }
    }

    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        log::info!("OPTIONS: Opened");
        self.saved = SettingsSnapshot::capture(self.store.as_ref(), &self.theme.id);
        if let Some(index) = self.themes.iter().position(|t| t.id == self.saved.theme) {
            self.theme_index = index;
        }
        self.open = true;
        self.current = 0;
        self.cooldown = 0.0;
    }

    /// Starts the fade out. Reverts a theme that was previewed but not committed.
    pub fn close(&mut self) -> Vec<OverlayEvent> {
        if !self.open {
            return Vec::new();
        }
        log::info!("OPTIONS: Closed");
        self.open = false;
        let mut events = Vec::new();
        let previewing_other = self
            .previewed_theme()
            .is_some_and(|id| id != self.saved.theme);
        if previewing_other {
            if let Some(index) = self.themes.iter().position(|t| t.id == self.saved.theme) {
                self.theme_index = index;
            }
            events.push(OverlayEvent::RevertTheme(self.saved.theme.clone()));
        }
        events.push(OverlayEvent::Closed);
        events
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_progress(&self) -> f32 {
        self.open_progress
    }

    pub fn current_option(&self) -> usize {
        self.current
    }

    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    /// Whether the next command would be accepted.
    pub fn accepts_input(&self) -> bool {
        self.open && self.cooldown <= 0.0
    }

    fn previewed_theme(&self) -> Option<&str> {
        self.themes.get(self.theme_index).map(|t| t.id.as_str())
    }

    pub fn update(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
        let step = OPEN_SPEED * dt;
        self.open_progress = if self.open {
            (self.open_progress + step).min(1.0)
        } else {
            (self.open_progress - step).max(0.0)
        };
    }

    /// Applies one command. Ignored while closed or cooling down.
    pub fn handle_input(&mut self, command: OverlayCommand) -> Vec<OverlayEvent> {
        if !self.accepts_input() {
            return Vec::new();
        }
        self.cooldown = INPUT_COOLDOWN;

        let count = self.options.len();
        match command {
            OverlayCommand::Up => {
                self.current = (self.current + count - 1) % count;
                Vec::new()
            }
            OverlayCommand::Down => {
                self.current = (self.current + 1) % count;
                Vec::new()
            }
            OverlayCommand::Left => self.adjust(-1),
            OverlayCommand::Right => self.adjust(1),
            OverlayCommand::Select => self.select(),
            OverlayCommand::Cancel => self.close(),
        }
    }

    fn adjust(&mut self, direction: i32) -> Vec<OverlayEvent> {
        match self.options[self.current].kind {
            OptionKind::Theme => {
                if self.themes.is_empty() {
                    return Vec::new();
                }
                let count = self.themes.len() as i32;
                self.theme_index = (self.theme_index as i32 + direction).rem_euclid(count) as usize;
                let id = self.themes[self.theme_index].id.clone();
                log::debug!("OPTIONS: Previewing theme '{}'", id);
                vec![OverlayEvent::PreviewTheme(id)]
            }
            OptionKind::Slider { key, default } => {
                let current = self.store.get_f32(key, default);
                let next = snap_to_step(current + SLIDER_STEP * direction as f32);
                if next == current {
                    return Vec::new();
                }
                vec![self.persist(key, SettingValue::from(next))]
            }
            OptionKind::Toggle { .. } | OptionKind::Button(_) => Vec::new(),
        }
    }

    fn select(&mut self) -> Vec<OverlayEvent> {
        match self.options[self.current].kind {
            OptionKind::Theme => {
                let Some(id) = self.previewed_theme().map(str::to_string) else {
                    return Vec::new();
                };
                log::info!("OPTIONS: Theme set to '{}'", id);
                self.store.set(keys::THEME, SettingValue::from(id.as_str()));
                self.saved.theme = id.clone();
                vec![OverlayEvent::CommitTheme(id)]
            }
            OptionKind::Toggle { key, default } => {
                let flipped = !self.store.get_bool(key, default);
                vec![self.persist(key, SettingValue::from(flipped))]
            }
            OptionKind::Slider { .. } => Vec::new(),
            OptionKind::Button(ButtonAction::Close) => self.close(),
            OptionKind::Button(ButtonAction::ResetDefaults) => self.reset_defaults(),
        }
    }

    fn reset_defaults(&mut self) -> Vec<OverlayEvent> {
        let options = self.options.clone();
        options
            .iter()
            .filter_map(|entry| match entry.kind {
                OptionKind::Slider { key, default } => Some((key, SettingValue::from(default))),
                OptionKind::Toggle { key, default } => Some((key, SettingValue::from(default))),
                _ => None,
            })
            .map(|(key, value)| self.persist(key, value))
            .collect()
    }

    fn persist(&mut self, key: &str, value: SettingValue) -> OverlayEvent {
        log::debug!("OPTIONS: {} = {:?}", key, value);
        self.store.set(key, value.clone());
        OverlayEvent::SettingChanged {
            key: key.to_string(),
            value,
        }
    }

    fn value_text(&self, kind: OptionKind) -> String {
        match kind {
            OptionKind::Theme => self
                .themes
                .get(self.theme_index)
                .map(|t| format!("< {} >", t.name))
                .unwrap_or_default(),
            OptionKind::Slider { key, default } => {
                format!("{}%", (self.store.get_f32(key, default) * 100.0).round() as u32)
            }
            OptionKind::Toggle { key, default } => {
                let label = if self.store.get_bool(key, default) { "ON" } else { "OFF" };
                label.to_string()
            }
            OptionKind::Button(_) => String::new(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.open_progress <= 0.0 {
            return;
        }
        let theme = &self.theme;
        let layout = &theme.layout.options;
        let (width, height) = self.screen;
        let alpha = self.open_progress;

        surface.save();
        surface.set_fill(colors::with_alpha(colors::BLACK, layout.dim_alpha * alpha));
        surface.fill_rect(0.0, 0.0, width, height);

        surface.set_alpha(alpha);
        // Slides down slightly while fading in.
        let px = (width - layout.size.x) / 2.0;
        let py = (height - layout.size.y) / 2.0 - (1.0 - alpha) * 20.0;
        draw_panel(surface, theme, px, py, layout.size.x, layout.size.y);

        let title = FontSpec::new(&theme.fonts.title, layout.title_size);
        apply_glow(surface, theme, theme.colors.glow);
        surface.set_fill(theme.colors.primary);
        surface.fill_text("OPTIONS", width / 2.0, py + title.size * 1.4, &title, TextAlign::Center);

        clear_glow(surface);
        let font = FontSpec::new(&theme.fonts.primary, layout.font_size);
        let left = px + 24.0;
        let right = px + layout.size.x - 24.0;
        let mut y = py + title.size * 1.4 + layout.row_height;

        for (index, entry) in self.options.iter().enumerate() {
            let focused = index == self.current;
            let color = if focused { theme.colors.accent } else { theme.colors.text };
            surface.set_fill(color);
            let label = if focused {
                format!("> {}", entry.label)
            } else {
                entry.label.to_string()
            };
            surface.fill_text(&label, left, y, &font, TextAlign::Left);

            if let OptionKind::Slider { key, default } = entry.kind {
                let bar_width = layout.size.x * 0.3;
                draw_bar(
                    surface,
                    right - bar_width - font.size * 3.0,
                    y - font.size * 0.4,
                    bar_width,
                    font.size * 0.3,
                    self.store.get_f32(key, default),
                    color,
                    colors::with_alpha(theme.colors.text, 0.2),
                );
                surface.set_fill(color);
            }
            let value = self.value_text(entry.kind);
            if !value.is_empty() {
                surface.fill_text(&value, right, y, &font, TextAlign::Right);
            }
            y += layout.row_height;
        }
        surface.restore();
    }
}

/// Clamps to [0,1] and rounds onto the slider grid.
fn snap_to_step(value: f32) -> f32 {
    let steps = (value.clamp(0.0, 1.0) / SLIDER_STEP).round();
    (steps * SLIDER_STEP * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::MemorySettingsStore;
    use crate::models::theme::ThemeRegistry;
    use crate::render::commands::CommandList;

    fn overlay() -> OptionsOverlay {
        let registry = ThemeRegistry::builtin();
        let mut overlay = OptionsOverlay::new(
            registry.get("neon"),
            registry.list(),
            Box::new(MemorySettingsStore::new()),
        );
        overlay.resize(1280.0, 720.0);
        overlay
    }

    fn wait(overlay: &mut OptionsOverlay, frames: usize) {
        for _ in 0..frames {
            overlay.update(1.0);
        }
    }

    fn focus(overlay: &mut OptionsOverlay, label: &str) {
        while overlay.options()[overlay.current_option()].label != label {
            overlay.handle_input(OverlayCommand::Down);
            wait(overlay, INPUT_COOLDOWN as usize);
        }
    }

    #[test]
    fn test_inputs_inside_cooldown_apply_once() {
        let mut overlay = overlay();
        overlay.open();
        overlay.handle_input(OverlayCommand::Down);
        overlay.handle_input(OverlayCommand::Down);
        assert_eq!(overlay.current_option(), 1);

        wait(&mut overlay, INPUT_COOLDOWN as usize - 1);
        overlay.handle_input(OverlayCommand::Down);
        assert_eq!(overlay.current_option(), 1);

        wait(&mut overlay, 1);
        overlay.handle_input(OverlayCommand::Down);
        assert_eq!(overlay.current_option(), 2);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut overlay = overlay();
        overlay.open();
        overlay.handle_input(OverlayCommand::Up);
        assert_eq!(overlay.current_option(), overlay.options().len() - 1);
    }

    #[test]
    fn test_closed_overlay_ignores_input_and_draws_nothing() {
        let mut overlay = overlay();
        assert!(overlay.handle_input(OverlayCommand::Down).is_empty());
        assert_eq!(overlay.current_option(), 0);

        let mut list = CommandList::new();
        overlay.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_open_fades_in_and_close_fades_out() {
        let mut overlay = overlay();
        overlay.open();
        wait(&mut overlay, 5);
        assert!((overlay.open_progress() - 0.5).abs() < 1e-5);
        let mut list = CommandList::new();
        overlay.draw(&mut list);
        assert!(list.texts().contains(&"OPTIONS"));

        wait(&mut overlay, 10);
        assert_eq!(overlay.open_progress(), 1.0);
        assert_eq!(overlay.close(), vec![OverlayEvent::Closed]);
        wait(&mut overlay, 11);
        assert_eq!(overlay.open_progress(), 0.0);
        let mut list = CommandList::new();
        overlay.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_slider_reads_default_then_persists() {
        let mut overlay = overlay();
        assert_eq!(overlay.store().get_f32(keys::SFX_VOLUME, 0.7), 0.7);

        overlay.open();
        focus(&mut overlay, "SFX Volume");
        let events = overlay.handle_input(OverlayCommand::Right);
        assert_eq!(
            events,
            vec![OverlayEvent::SettingChanged {
                key: keys::SFX_VOLUME.to_string(),
                value: SettingValue::Number(0.8f32 as f64),
            }]
        );
        assert_eq!(overlay.store().get_f32(keys::SFX_VOLUME, 0.7), 0.8);
        assert_eq!(
            events[0].audio_command(),
            Some(AudioCommand::SetSfxVolume { volume: 0.8 })
        );
    }

    #[test]
    fn test_slider_is_clamped() {
        let mut overlay = overlay();
        overlay.open();
        focus(&mut overlay, "Music Volume");
        for _ in 0..5 {
            overlay.handle_input(OverlayCommand::Right);
            wait(&mut overlay, INPUT_COOLDOWN as usize);
        }
        assert_eq!(overlay.store().get_f32(keys::MUSIC_VOLUME, 0.0), 1.0);
        assert!(overlay.handle_input(OverlayCommand::Right).is_empty());
    }

    #[test]
    fn test_toggle_flips_on_select() {
        let mut overlay = overlay();
        overlay.open();
        focus(&mut overlay, "CRT Effects");
        overlay.handle_input(OverlayCommand::Select);
        assert!(!overlay.store().get_bool(keys::CRT_EFFECTS, true));
        wait(&mut overlay, INPUT_COOLDOWN as usize);
        overlay.handle_input(OverlayCommand::Select);
        assert!(overlay.store().get_bool(keys::CRT_EFFECTS, false));
    }

    #[test]
    fn test_theme_preview_commit_and_revert() {
        let mut overlay = overlay();
        overlay.open();
        assert_eq!(
            overlay.handle_input(OverlayCommand::Right),
            vec![OverlayEvent::PreviewTheme("retro".to_string())]
        );
        assert_eq!(
            overlay.handle_input(OverlayCommand::Cancel),
            Vec::<OverlayEvent>::new(),
            "cooldown still running"
        );
        wait(&mut overlay, INPUT_COOLDOWN as usize);
        assert_eq!(
            overlay.handle_input(OverlayCommand::Cancel),
            vec![
                OverlayEvent::RevertTheme("neon".to_string()),
                OverlayEvent::Closed
            ]
        );

        wait(&mut overlay, 20);
        overlay.open();
        overlay.handle_input(OverlayCommand::Left);
        wait(&mut overlay, INPUT_COOLDOWN as usize);
        assert_eq!(
            overlay.handle_input(OverlayCommand::Select),
            vec![OverlayEvent::CommitTheme("holo".to_string())]
        );
        assert_eq!(overlay.store().get_string(keys::THEME, "neon"), "holo");
        wait(&mut overlay, INPUT_COOLDOWN as usize);
        assert_eq!(
            overlay.handle_input(OverlayCommand::Cancel),
            vec![OverlayEvent::Closed]
        );
    }

    #[test]
    fn test_reset_defaults_restores_every_value() {
        let mut overlay = overlay();
        overlay.open();
        focus(&mut overlay, "Screen Shake");
        overlay.handle_input(OverlayCommand::Select);
        wait(&mut overlay, INPUT_COOLDOWN as usize);
        focus(&mut overlay, "Reset Defaults");
        let events = overlay.handle_input(OverlayCommand::Select);
        assert_eq!(events.len(), 4);
        assert!(overlay.store().get_bool(keys::SCREEN_SHAKE, false));
    }
}
