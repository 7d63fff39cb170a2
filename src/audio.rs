//! Sound: background loop and one-shot cues driven by [`GameEvent`]s.
//!
//! Clips load from `assets/sounds/`.  A clip that fails to load leaves an
//! unloaded handle behind and its cue silently plays nothing; the simulation
//! never waits on audio.

use crate::events::GameEvent;
use crate::menu::GameState;
use crate::simulation::game_tick_system;
use bevy::audio::Volume;
use bevy::prelude::*;

const BGM_VOLUME: f32 = 0.12;
const SFX_VOLUME: f32 = 0.6;

/// Highest playback speed of the death whisper.
const WHISPER_MAX_PITCH: f32 = 2.2;
/// Playback speed gained per kill after the first.
const WHISPER_PITCH_STEP: f32 = 0.18;

#[derive(Resource, Debug, Clone)]
pub struct AudioAssets {
    pub bgm: Handle<AudioSource>,
    pub whisper: Handle<AudioSource>,
    pub reload: Handle<AudioSource>,
    pub serve: Handle<AudioSource>,
}

/// Marker for the looping background track.
#[derive(Component)]
pub struct BackgroundMusic;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_audio_assets)
            .add_systems(OnEnter(GameState::Playing), start_background_music)
            .add_systems(
                Update,
                play_event_sounds_system
                    .after(game_tick_system)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Playback speed of the whisper after `kill_count` kills: rises with every
/// kill and saturates at 2.2×.
pub fn whisper_pitch(kill_count: u32) -> f32 {
    let extra = kill_count.saturating_sub(1) as f32 * WHISPER_PITCH_STEP;
    (1.0 + extra).min(WHISPER_MAX_PITCH)
}

pub fn load_audio_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(AudioAssets {
        bgm: asset_server.load("sounds/bgm.ogg"),
        whisper: asset_server.load("sounds/djokovic.ogg"),
        reload: asset_server.load("sounds/reload.ogg"),
        serve: asset_server.load("sounds/serve.ogg"),
    });
    eprintln!("[SETUP] Audio assets requested");
}

pub fn start_background_music(
    mut commands: Commands,
    audio: Option<Res<AudioAssets>>,
    playing: Query<(), With<BackgroundMusic>>,
) {
    let Some(audio) = audio else { return };
    if !playing.is_empty() {
        return;
    }
    commands.spawn((
        AudioPlayer::new(audio.bgm.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(BGM_VOLUME)),
        BackgroundMusic,
    ));
}

pub fn play_event_sounds_system(
    mut commands: Commands,
    audio: Option<Res<AudioAssets>>,
    mut events: MessageReader<GameEvent>,
) {
    let Some(audio) = audio else {
        events.clear();
        return;
    };
    for event in events.read() {
        let (clip, speed) = match *event {
            GameEvent::ShotFired => (audio.serve.clone(), 1.0),
            GameEvent::ReloadStarted => (audio.reload.clone(), 1.0),
            GameEvent::DeathWhisper { kill_count } => {
                (audio.whisper.clone(), whisper_pitch(kill_count))
            }
            _ => continue,
        };
        commands.spawn((
            AudioPlayer::new(clip),
            PlaybackSettings::DESPAWN
                .with_speed(speed)
                .with_volume(Volume::Linear(SFX_VOLUME)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whisper_pitch_climbs_then_caps() {
        assert_eq!(whisper_pitch(1), 1.0);
        assert!((whisper_pitch(2) - 1.18).abs() < 1e-6);
        assert!((whisper_pitch(5) - 1.72).abs() < 1e-5);
        assert_eq!(whisper_pitch(8), 2.2);
        assert_eq!(whisper_pitch(100), 2.2);
    }

    #[test]
    fn zeroth_kill_does_not_drop_below_normal_speed() {
        assert_eq!(whisper_pitch(0), 1.0);
    }
}
