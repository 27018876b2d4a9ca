//! Editor UI panels using bevy_egui

mod prompt;
mod sidebar;
mod tileset;

pub use prompt::render_new_level_prompt;
pub use sidebar::{render_sidebar, SidebarResult};
pub use tileset::{palette_cell_at, render_tileset_palette};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::preferences::EditorPreferences;
use crate::render::TilesetTextureCache;
use crate::EditorState;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, render_ui);
    }
}

fn render_ui(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
    tileset_cache: Res<TilesetTextureCache>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let result = render_sidebar(ctx, &mut editor_state, &tileset_cache);

    if result.store_preferences {
        editor_state.store_preferences(&mut preferences);
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }

    render_new_level_prompt(ctx, &mut editor_state);
    render_error_dialog(ctx, &mut editor_state);
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(message) = editor_state.error_message.clone() else {
        return;
    };
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
