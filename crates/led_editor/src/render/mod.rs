//! World rendering through egui
//!
//! The core draws in world coordinates through [`led_core::Painter`];
//! [`EguiPainter`] projects those calls with the editor camera onto the
//! egui background layer, below every panel and window.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass, EguiTextureHandle};
use led_core::{Camera, Color, Painter, RectI, RenderStyle, TileRegion, Tileset, Vec2};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::EditorState;

pub struct WorldRenderPlugin;

impl Plugin for WorldRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TilesetTextureCache>()
            .add_systems(Update, load_tileset_textures)
            .add_systems(EguiPrimaryContextPass, draw_world);
    }
}

/// Tileset sprite sheets registered with egui, keyed by the tileset's path
#[derive(Resource, Default)]
pub struct TilesetTextureCache {
    /// path -> (handle, texture_id, width, height)
    pub loaded: HashMap<PathBuf, (Handle<Image>, egui::TextureId, f32, f32)>,
    pub pending: HashMap<PathBuf, Handle<Image>>,
    pub failed: HashSet<PathBuf>,
}

impl TilesetTextureCache {
    /// Texture and pixel size for a tileset, once its image is on the GPU
    pub fn texture(&self, tileset: &Tileset) -> Option<(egui::TextureId, egui::Vec2)> {
        let path = tileset.path()?;
        self.loaded
            .get(path)
            .map(|(_, id, w, h)| (*id, egui::vec2(*w, *h)))
    }

    fn needs_load(&self, path: &Path) -> bool {
        !self.loaded.contains_key(path)
            && !self.pending.contains_key(path)
            && !self.failed.contains(path)
    }
}

/// Start loading sheets for new tile layers and register finished ones with egui
fn load_tileset_textures(
    editor_state: Res<EditorState>,
    mut cache: ResMut<TilesetTextureCache>,
    mut contexts: EguiContexts,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
) {
    use bevy::asset::LoadState;

    let paths: Vec<PathBuf> = editor_state
        .editor
        .world
        .levels()
        .iter()
        .filter_map(|level| level.tile_layer())
        .filter_map(|layer| layer.tileset())
        .filter_map(|tileset| tileset.path())
        .filter(|path| cache.needs_load(path))
        .map(Path::to_path_buf)
        .collect();

    for path in paths {
        let handle: Handle<Image> = asset_server.load(crate::to_asset_path(&path));
        bevy::log::info!("Loading tileset texture {:?}", path);
        cache.pending.insert(path, handle);
    }

    let pending: Vec<(PathBuf, Handle<Image>)> = cache
        .pending
        .iter()
        .map(|(path, handle)| (path.clone(), handle.clone()))
        .collect();

    for (path, handle) in pending {
        match asset_server.load_state(&handle) {
            LoadState::Loaded => {
                let Some(image) = images.get(&handle) else {
                    continue;
                };
                let (width, height) = (image.width() as f32, image.height() as f32);
                let texture_id = contexts.add_image(EguiTextureHandle::Strong(handle.clone()));
                cache.pending.remove(&path);
                cache.loaded.insert(path, (handle, texture_id, width, height));
            }
            LoadState::Failed(e) => {
                bevy::log::warn!("Failed to load tileset texture {:?}: {}", path, e);
                cache.pending.remove(&path);
                cache.failed.insert(path);
            }
            LoadState::Loading | LoadState::NotLoaded => {}
        }
    }
}

fn draw_world(
    mut contexts: EguiContexts,
    editor_state: Res<EditorState>,
    cache: Res<TilesetTextureCache>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let painter = ctx.layer_painter(egui::LayerId::background());
    let mut painter = EguiPainter::new(painter, &editor_state.editor.camera, &cache);
    editor_state
        .editor
        .render(&mut painter, &RenderStyle::default());
}

pub fn to_color32(color: Color) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    )
}

/// Screen rect covered by a world rect; world y grows up, screen y grows down
pub fn world_rect_to_screen(camera: &Camera, min: Vec2, size: Vec2) -> egui::Rect {
    let a = camera.project(min);
    let b = camera.project(min + size);
    egui::Rect::from_two_pos(egui::pos2(a.x, a.y), egui::pos2(b.x, b.y))
}

/// Normalized texture coordinates of a tile inside its sheet
pub fn tile_uv(region: TileRegion, texture_size: egui::Vec2) -> egui::Rect {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 {
        return egui::Rect::ZERO;
    }
    let r = region.rect;
    egui::Rect::from_min_max(
        egui::pos2(r.x as f32 / texture_size.x, r.y as f32 / texture_size.y),
        egui::pos2(
            (r.x + r.w) as f32 / texture_size.x,
            (r.y + r.h) as f32 / texture_size.y,
        ),
    )
}

/// [`Painter`] over an egui layer
pub struct EguiPainter<'a> {
    painter: egui::Painter,
    camera: &'a Camera,
    textures: &'a TilesetTextureCache,
    clip_stack: Vec<egui::Rect>,
}

impl<'a> EguiPainter<'a> {
    pub fn new(
        painter: egui::Painter,
        camera: &'a Camera,
        textures: &'a TilesetTextureCache,
    ) -> Self {
        Self {
            painter,
            camera,
            textures,
            clip_stack: Vec::new(),
        }
    }

    fn to_screen(&self, world: Vec2) -> egui::Pos2 {
        let p = self.camera.project(world);
        egui::pos2(p.x, p.y)
    }

    /// World length to screen points
    fn scale(&self, length: f32) -> f32 {
        length / self.camera.zoom.max(f32::EPSILON)
    }
}

impl Painter for EguiPainter<'_> {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let rect = world_rect_to_screen(self.camera, min, size);
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, width: f32, color: Color) {
        let rect = world_rect_to_screen(self.camera, min, size);
        self.painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(self.scale(width), to_color32(color)),
            egui::StrokeKind::Inside,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.painter.circle_filled(
            self.to_screen(center),
            self.scale(radius),
            to_color32(color),
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(self.scale(width), to_color32(color)),
        );
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, angle: f32) {
        let color = to_color32(color);
        let galley = self.painter.layout_no_wrap(
            text.to_string(),
            egui::FontId::proportional(size),
            color,
        );
        // egui rotates clockwise around the galley's top-left corner
        let rotation = egui::emath::Rot2::from_angle(-angle);
        let half = galley.size() / 2.0;
        let top_left = self.to_screen(pos) - rotation * half;
        self.painter.add(
            egui::epaint::TextShape::new(top_left, galley, color).with_angle(-angle),
        );
    }

    fn tile_image(
        &mut self,
        tileset: &Tileset,
        region: TileRegion,
        min: Vec2,
        size: Vec2,
        tint: Color,
    ) {
        let Some((texture_id, texture_size)) = self.textures.texture(tileset) else {
            return;
        };
        self.painter.image(
            texture_id,
            world_rect_to_screen(self.camera, min, size),
            tile_uv(region, texture_size),
            to_color32(tint),
        );
    }

    fn push_clip(&mut self, bounds: RectI) {
        let previous = self.painter.clip_rect();
        let rect = world_rect_to_screen(
            self.camera,
            Vec2::new(bounds.x as f32, bounds.y as f32),
            Vec2::new(bounds.w as f32, bounds.h as f32),
        );
        self.clip_stack.push(previous);
        self.painter.set_clip_rect(previous.intersect(rect));
    }

    fn pop_clip(&mut self) {
        if let Some(previous) = self.clip_stack.pop() {
            self.painter.set_clip_rect(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.position = Vec2::ZERO;
        camera.zoom = 2.0;
        camera
    }

    #[test]
    fn test_world_rect_flips_y() {
        let rect = world_rect_to_screen(&camera(), Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0));
        assert_eq!(rect.min, egui::pos2(400.0, 275.0));
        assert_eq!(rect.max, egui::pos2(450.0, 300.0));
    }

    #[test]
    fn test_tile_uv() {
        let region = TileRegion {
            index: 5,
            col: 1,
            row: 1,
            rect: RectI::new(8, 8, 8, 8),
        };
        let uv = tile_uv(region, egui::vec2(32.0, 16.0));
        assert_eq!(uv.min, egui::pos2(0.25, 0.5));
        assert_eq!(uv.max, egui::pos2(0.5, 1.0));
        assert_eq!(tile_uv(region, egui::Vec2::ZERO), egui::Rect::ZERO);
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color32(Color::WHITE), egui::Color32::WHITE);
        assert_eq!(
            to_color32(Color::rgba(1.0, 0.0, 0.0, 1.0)),
            egui::Color32::from_rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_cache_needs_load_once() {
        let mut cache = TilesetTextureCache::default();
        let path = PathBuf::from("tilesets/a.png");
        assert!(cache.needs_load(&path));
        cache.failed.insert(path.clone());
        assert!(!cache.needs_load(&path));
        let tileset = Tileset::from_image("tilesets/a.png", 16, 16, 8).unwrap();
        assert!(cache.texture(&tileset).is_none());
    }
}
