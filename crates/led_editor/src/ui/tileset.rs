//! Tileset palette: pick the tiles that form the paint stamp

use bevy_egui::egui;
use led_core::Point;

use crate::render::TilesetTextureCache;
use crate::EditorState;

const MIN_SCALE: f32 = 0.25;
const MAX_SCALE: f32 = 4.0;

/// Tileset cell (col, row) under `local`, a position relative to the
/// palette's top-left corner drawn at `scale`
pub fn palette_cell_at(
    local: egui::Vec2,
    scale: f32,
    grid_size: u32,
    cols: u32,
    rows: u32,
) -> Option<Point> {
    let cell = grid_size as f32 * scale;
    if cell <= 0.0 || local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let col = (local.x / cell).floor() as u32;
    let row = (local.y / cell).floor() as u32;
    (col < cols && row < rows).then(|| Point::new(col as i32, row as i32))
}

pub fn render_tileset_palette(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    tileset_cache: &TilesetTextureCache,
) {
    ui.heading("Tileset");

    let Some(tileset) = editor_state.editor.active_tileset() else {
        ui.label("Add a tile layer to paint tiles.");
        return;
    };
    let Some((texture_id, texture_size)) = tileset_cache.texture(tileset) else {
        let failed = tileset
            .path()
            .is_some_and(|path| tileset_cache.failed.contains(path));
        ui.label(if failed {
            "Tileset texture failed to load."
        } else {
            "Loading tileset..."
        });
        return;
    };
    let (cols, rows, grid_size) = (tileset.cols(), tileset.rows(), tileset.grid_size());

    let scale = (ui.available_width() / texture_size.x.max(1.0)).clamp(MIN_SCALE, MAX_SCALE);
    let (rect, response) =
        ui.allocate_exact_size(texture_size * scale, egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.image(
        texture_id,
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let cell_size = grid_size as f32 * scale;
    let cell_rect = |index: u32| {
        let min = rect.min
            + egui::vec2(
                (index % cols.max(1)) as f32 * cell_size,
                (index / cols.max(1)) as f32 * cell_size,
            );
        egui::Rect::from_min_size(min, egui::Vec2::splat(cell_size))
    };
    for &index in editor_state.editor.selection.indices() {
        painter.rect_stroke(
            cell_rect(index),
            0.0,
            egui::Stroke::new(2.0, egui::Color32::from_rgb(0, 200, 255)),
            egui::StrokeKind::Inside,
        );
    }

    let cell_under = |pos: Option<egui::Pos2>| {
        pos.and_then(|pos| palette_cell_at(pos - rect.min, scale, grid_size, cols, rows))
    };
    if let Some(cell) = cell_under(response.hover_pos()) {
        let index = cell.y as u32 * cols + cell.x as u32;
        painter.rect_stroke(
            cell_rect(index),
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(160)),
            egui::StrokeKind::Inside,
        );
    }

    let pointer_cell = cell_under(response.interact_pointer_pos());
    if response.secondary_clicked() {
        editor_state.editor.selection.clear();
        editor_state.palette_drag_start = None;
    } else if response.drag_started_by(egui::PointerButton::Primary) {
        editor_state.palette_drag_start = pointer_cell;
        if let Some(cell) = pointer_cell {
            editor_state.editor.select_tiles(cell, cell);
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let (Some(start), Some(cell)) = (editor_state.palette_drag_start, pointer_cell) {
            editor_state.editor.select_tiles(start, cell);
        }
    } else if response.clicked() {
        if let Some(cell) = pointer_cell {
            if ui.input(|i| i.modifiers.command) {
                editor_state
                    .editor
                    .selection
                    .toggle(cell.y as u32 * cols + cell.x as u32);
            } else {
                editor_state.editor.select_tiles(cell, cell);
            }
        }
    }
    if response.drag_stopped() {
        editor_state.palette_drag_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_scaled_palette() {
        // 8 px tiles drawn at 2x
        assert_eq!(
            palette_cell_at(egui::vec2(17.0, 5.0), 2.0, 8, 4, 4),
            Some(Point::new(1, 0))
        );
        assert_eq!(
            palette_cell_at(egui::vec2(63.9, 63.9), 2.0, 8, 4, 4),
            Some(Point::new(3, 3))
        );
    }

    #[test]
    fn test_cell_at_outside_palette() {
        assert_eq!(palette_cell_at(egui::vec2(64.0, 0.0), 2.0, 8, 4, 4), None);
        assert_eq!(palette_cell_at(egui::vec2(-1.0, 0.0), 2.0, 8, 4, 4), None);
        assert_eq!(palette_cell_at(egui::vec2(1.0, 1.0), 0.0, 8, 4, 4), None);
    }
}
