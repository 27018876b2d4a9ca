//! Standalone led binary
//!
//! Run with: led_editor [world.json]

use bevy::asset::{AssetPlugin, UnapprovedPathMode};
use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use led_editor::preferences::EditorPreferences;
use led_editor::EditorPlugin;

fn main() {
    let preferences = EditorPreferences::load();

    let mut editor = EditorPlugin::default();
    if let Some(path) = std::env::args().nth(1) {
        editor = editor.with_world_path(path);
    }

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "led".to_string(),
                        // Keep egui points equal to window pixels, which the camera math assumes
                        resolution: WindowResolution::new(
                            preferences.window_width.max(320),
                            preferences.window_height.max(240),
                        )
                        .with_scale_factor_override(1.0),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Pixel-art tilesets stay crisp when zoomed
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                })
                .set(AssetPlugin {
                    // Tilesets are loaded by absolute path from wherever the world refers to them
                    unapproved_path_mode: UnapprovedPathMode::Allow,
                    ..default()
                }),
        )
        .add_plugins(editor)
        .run();
}
