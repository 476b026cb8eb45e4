//! Headless demo: drives the HUD and the options overlay through a scripted session.

use arcade_hud::models::settings::{JsonSettingsStore, SettingValue, SettingsStore, defaults, keys};
use arcade_hud::models::theme::{ThemeRegistry, colors};
use arcade_hud::render::CommandList;
use arcade_hud::shared::presentation::ChannelSink;
use arcade_hud::shared::snapshot::{ActivePowerUp, BossInfo, GameSnapshot};
use arcade_hud::system::bus::{AudioCommand, AudioSink, HudBus};
use arcade_hud::views::{HudComposer, OptionsOverlay, OverlayCommand, OverlayEvent};
use std::path::PathBuf;
use std::thread;

const FRAMES: u32 = 900;
const SCREEN: (f32, f32) = (1280.0, 720.0);
const BOSS_HEALTH: f32 = 400.0;

/// Overlay inputs, keyed by frame.
const OVERLAY_SCRIPT: &[(u32, OverlayCommand)] = &[
    (705, OverlayCommand::Right),
    (720, OverlayCommand::Select),
    (735, OverlayCommand::Down),
    (745, OverlayCommand::Down),
    (755, OverlayCommand::Left),
    (770, OverlayCommand::Cancel),
];

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    log::info!("MAIN: Booting HUD demo...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("hud_settings.json"));
    let themes_dir = PathBuf::from("hud_themes");

    let bus = HudBus::new();
    let audio_rx = bus.audio_rx.clone();
    let audio = thread::spawn(move || {
        let mut handled = 0usize;
        for command in audio_rx.iter() {
            log::info!("AUDIO: {:?}", command);
            handled += 1;
        }
        handled
    });

    let registry = if themes_dir.is_dir() {
        ThemeRegistry::with_directory(&themes_dir)
    } else {
        ThemeRegistry::builtin()
    };
    let store = JsonSettingsStore::open(&settings_path);
    let theme = registry.get(&store.get_string(keys::THEME, &registry.default_theme().id));
    let crt = store.get_bool(keys::CRT_EFFECTS, defaults::CRT_EFFECTS);
    bus.audio_tx.send_audio(AudioCommand::SetMusicVolume {
        volume: store.get_f32(keys::MUSIC_VOLUME, defaults::MUSIC_VOLUME),
    });
    bus.audio_tx.send_audio(AudioCommand::SetSfxVolume {
        volume: store.get_f32(keys::SFX_VOLUME, defaults::SFX_VOLUME),
    });

    for summary in registry.list() {
        log::info!("MAIN: Theme '{}' - {}", summary.name, summary.description);
    }

    let mut composer = HudComposer::new(theme.clone());
    composer.set_crt_effects(crt);
    composer.set_presentation_sink(Box::new(ChannelSink::new(bus.presentation_tx.clone())));
    composer.resize(SCREEN.0, SCREEN.1);

    let mut overlay = OptionsOverlay::new(theme, registry.list(), Box::new(store));
    overlay.resize(SCREEN.0, SCREEN.1);

    let mut snapshot = GameSnapshot {
        lives: 3,
        bombs: 3,
        wave: 1,
        high_score: 25_000,
        ..Default::default()
    };
    let mut list = CommandList::new();
    let mut drawn = 0usize;
    let mut mirrored = 0usize;

    for frame in 0..FRAMES {
        script_gameplay(frame, &mut snapshot, &mut composer, &bus);

        if frame == 700 {
            overlay.open();
        }
        if let Some((_, command)) = OVERLAY_SCRIPT.iter().find(|(at, _)| *at == frame) {
            for event in overlay.handle_input(*command) {
                apply_overlay_event(&event, &registry, &mut composer, &mut overlay, &bus);
            }
        }

        composer.update(&snapshot, 1.0);
        overlay.update(1.0);

        list.clear();
        composer.draw(&mut list);
        overlay.draw(&mut list);
        drawn += list.commands.len();

        for update in bus.presentation_rx.try_iter() {
            log::debug!("MAIN: {:?} -> {}", update.field, update.text);
            mirrored += 1;
        }
    }

    log::info!(
        "MAIN: {} frames, {} draw commands, {} text updates mirrored, theme '{}'",
        FRAMES,
        drawn,
        mirrored,
        composer.theme().id
    );
    log::info!(
        "MAIN: Final score {} (displayed {}), new record: {}",
        snapshot.score,
        composer.score().displayed(),
        composer.high_score().is_new_record()
    );

    drop(overlay);
    drop(composer);
    drop(bus);
    match audio.join() {
        Ok(handled) => log::info!("MAIN: Audio thread handled {} commands", handled),
        Err(_) => log::error!("MAIN: Audio thread panicked"),
    }
}

/// Advances the fake game by one frame and fires the matching HUD triggers.
fn script_gameplay(frame: u32, snapshot: &mut GameSnapshot, hud: &mut HudComposer, bus: &HudBus) {
    snapshot.combo_timer = (snapshot.combo_timer - 1.0).max(0.0);
    for power_up in &mut snapshot.power_ups {
        power_up.duration = (power_up.duration - 1.0).max(0.0);
    }
    snapshot.power_ups.retain(|power_up| power_up.duration > 0.0);

    // A kill every 12 frames; the last 40 frames of each wave are quiet so the combo breaks.
    if frame % 12 == 0 && frame % 240 < 200 {
        snapshot.combo += 1;
        snapshot.combo_timer = 30.0;
        let points = 100 * u64::from(hud.combo().multiplier());
        snapshot.score += points;
        hud.score_popup(points, 640.0, 300.0 - (frame % 60) as f32);
        hud.register_kill();
        if snapshot.combo % 10 == 0 {
            hud.multiplier_popup(hud.combo().multiplier());
        }
    }
    if snapshot.combo_timer <= 0.0 {
        snapshot.combo = 0;
    }

    match frame {
        100 => {
            snapshot.power_ups.push(ActivePowerUp {
                name: "Rapid Fire".to_string(),
                icon: "R".to_string(),
                color: colors::ORANGE,
                duration: 480.0,
                max_duration: 480.0,
            });
            hud.power_up_collected();
            bus.audio_tx.send_audio(AudioCommand::Play {
                sample: "power_up".to_string(),
            });
        }
        240 => {
            hud.wave_complete();
            snapshot.wave += 1;
        }
        300 => {
            snapshot.boss = Some(BossInfo {
                name: "IRON HIVE".to_string(),
                health: BOSS_HEALTH,
                max_health: BOSS_HEALTH,
            });
            hud.show_boss("IRON HIVE");
        }
        350 => snapshot.lives = snapshot.lives.saturating_sub(1),
        420 => snapshot.bombs = snapshot.bombs.saturating_sub(1),
        _ => {}
    }

    if let Some(boss) = snapshot.boss.as_mut() {
        if frame % 6 == 0 {
            boss.health = (boss.health - 12.0).max(0.0);
        }
        if boss.health <= 0.0 {
            snapshot.boss = None;
            snapshot.score += 5_000;
            hud.boss_defeated();
            bus.audio_tx.send_audio(AudioCommand::Play {
                sample: "explosion_large".to_string(),
            });
        }
    }
}

fn apply_overlay_event(
    event: &OverlayEvent,
    registry: &ThemeRegistry,
    hud: &mut HudComposer,
    overlay: &mut OptionsOverlay,
    bus: &HudBus,
) {
    match event {
        OverlayEvent::PreviewTheme(id)
        | OverlayEvent::CommitTheme(id)
        | OverlayEvent::RevertTheme(id) => {
            let theme = registry.get(id);
            hud.set_theme(theme.clone());
            overlay.set_theme(theme);
        }
        OverlayEvent::SettingChanged { key, value } => {
            if key == keys::CRT_EFFECTS
                && let SettingValue::Bool(enabled) = value
            {
                hud.set_crt_effects(*enabled);
            }
        }
        OverlayEvent::Closed => {}
    }
    if let Some(command) = event.audio_command() {
        bus.audio_tx.send_audio(command);
    }
    bus.audio_tx.send_audio(AudioCommand::Play {
        sample: "menu_move".to_string(),
    });
}
