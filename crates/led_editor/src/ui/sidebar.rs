//! Left panel: world file, level list, active level and its layers

use bevy_egui::egui;
use led_core::{LayerKind, LevelId, Point};

use super::render_tileset_palette;
use crate::render::TilesetTextureCache;
use crate::EditorState;

/// Actions from the sidebar that reach outside the editor state
#[derive(Default)]
pub struct SidebarResult {
    /// Session settings changed and should be written to the preferences file
    pub store_preferences: bool,
}

pub fn render_sidebar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    tileset_cache: &TilesetTextureCache,
) -> SidebarResult {
    let mut result = SidebarResult::default();

    egui::SidePanel::left("sidebar")
        .exact_width(editor_state.editor.sidebar_width)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_world_section(ui, editor_state, &mut result);
                ui.separator();
                render_level_list(ui, editor_state);
                ui.separator();
                render_active_level(ui, editor_state, &mut result);
                ui.separator();
                render_tileset_palette(ui, editor_state, tileset_cache);
                ui.separator();
                render_status(ui, editor_state);
            });
        });

    result
}

fn render_world_section(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    result: &mut SidebarResult,
) {
    ui.heading("World");
    ui.horizontal(|ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut editor_state.editor.world.name);
    });
    ui.label(format!("File: {}", editor_state.editor.world_path.display()));

    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            editor_state.save_world();
            result.store_preferences = true;
        }
        if ui.button("Load").clicked() {
            editor_state.load_world();
        }

        #[cfg(feature = "native")]
        {
            if ui.button("Save As...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("World", &["json"])
                    .save_file()
                {
                    editor_state.editor.world_path = path;
                    editor_state.save_world();
                    result.store_preferences = true;
                }
            }
            if ui.button("Open...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("World", &["json"])
                    .pick_file()
                {
                    editor_state.editor.world_path = path;
                    editor_state.load_world();
                    result.store_preferences = true;
                }
            }
        }
    });

    ui.horizontal(|ui| {
        if ui.button("Reset Camera").clicked() {
            editor_state.editor.reset_camera();
        }
        if ui.button("Center Level").clicked() {
            editor_state.editor.center_on_active_level();
        }
    });
}

fn render_level_list(ui: &mut egui::Ui, editor_state: &mut EditorState) {
    ui.horizontal(|ui| {
        ui.heading("Levels");
        if ui.button("+").on_hover_text("Add a level at the camera").clicked() {
            let at = Point::from_world(editor_state.editor.camera.target_position());
            editor_state.editor.add_level_at(at);
        }
    });

    let mut picked: Option<LevelId> = None;
    for level in editor_state.editor.world.levels() {
        let active = editor_state.editor.world.is_active(level.id());
        if ui.selectable_label(active, &level.name).clicked() && !active {
            picked = Some(level.id());
        }
    }
    if let Some(id) = picked {
        editor_state.editor.make_active(id);
    }
}

fn render_active_level(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    result: &mut SidebarResult,
) {
    let Some(bounds) = editor_state.editor.world.active_level().map(|l| l.bounds()) else {
        ui.label("No active level. Right-click the world to add one.");
        return;
    };

    ui.heading("Level");
    ui.horizontal(|ui| {
        let response = ui.text_edit_singleline(&mut editor_state.editor.level_name_buffer);
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Rename").clicked() || submitted {
            editor_state.editor.rename_active_level();
        }
    });
    ui.label(format!("Bounds: {}", bounds));
    if ui.button("Delete Level").clicked() {
        editor_state.editor.delete_active_level();
        return;
    }

    ui.add_space(4.0);
    ui.label("Layers");
    let mut remove: Option<usize> = None;
    if let Some(level) = editor_state.editor.world.active_level() {
        for (index, layer) in level.layers().iter().enumerate() {
            ui.horizontal(|ui| {
                let kind = match layer.kind() {
                    LayerKind::Tiles => "tiles",
                    LayerKind::Entities => "entities",
                };
                ui.label(format!("{} ({})", layer.name(), kind));
                if ui.small_button("x").on_hover_text("Remove layer").clicked() {
                    remove = Some(index);
                }
            });
        }
    }
    if let Some(index) = remove {
        let removed = editor_state
            .editor
            .world
            .active_level_mut()
            .and_then(|level| level.remove_layer(index));
        if removed.is_some_and(|layer| layer.kind() == LayerKind::Tiles) {
            editor_state.editor.selection.clear();
        }
    }

    ui.horizontal(|ui| {
        ui.label("Tileset");
        if ui
            .text_edit_singleline(&mut editor_state.tileset_path)
            .lost_focus()
        {
            result.store_preferences = true;
        }
    });
    ui.horizontal(|ui| {
        ui.label("Grid");
        if ui
            .add(egui::DragValue::new(&mut editor_state.tileset_grid_size).range(1..=512))
            .changed()
        {
            result.store_preferences = true;
        }
        #[cfg(feature = "native")]
        if ui.button("Browse...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg"])
                .pick_file()
            {
                editor_state.tileset_path = path.to_string_lossy().to_string();
                result.store_preferences = true;
            }
        }
    });
    ui.horizontal(|ui| {
        if ui.button("Add Tiles").clicked() {
            editor_state.add_tile_layer();
        }
        if ui.button("Add Entities").clicked() {
            editor_state.add_entity_layer();
        }
    });
}

fn render_status(ui: &mut egui::Ui, editor_state: &EditorState) {
    let editor = &editor_state.editor;
    let pointer = Point::from_world(editor.input.pointer_world());
    ui.label(format!("Pointer: {}", pointer));
    ui.label(format!("Zoom: {:.2}", editor.camera.zoom));
    if !editor.selection.is_empty() {
        ui.label(format!("Stamp: {} tiles", editor.selection.len()));
    }
    if let Some(status) = &editor_state.status_message {
        ui.weak(status);
    }
}
