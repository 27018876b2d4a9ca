//! A full editing session driven through the public API

use led_core::{
    Camera, Editor, EditorKey, LayerKind, Point, PointerButton, RectI, Tileset, Vec2, World,
};

/// Editor whose camera sits at the world origin with zoom 1 on an 800x600 viewport,
/// so world (x, y) is screen (400 + x, 300 - y)
fn editor(dir: &std::path::Path) -> Editor {
    let mut camera = Camera::new(Vec2::new(800.0, 600.0));
    camera.position = Vec2::ZERO;
    camera.zoom = 1.0;
    // camera.update is never called here, so the transform stays fixed
    Editor::new(camera).with_world_path(dir.join("levels").join("world.json"))
}

fn screen(x: f32, y: f32) -> Vec2 {
    Vec2::new(400.0 + x, 300.0 - y)
}

fn click(editor: &mut Editor, button: PointerButton, x: f32, y: f32) {
    editor.button_down(button, screen(x, y));
    editor
        .input
        .update(&mut editor.world, &mut editor.camera, &editor.selection, screen(x, y));
    editor.button_up(button);
}

fn drag(editor: &mut Editor, from: (f32, f32), to: (f32, f32)) {
    editor.button_down(PointerButton::Left, screen(from.0, from.1));
    editor.input.update(
        &mut editor.world,
        &mut editor.camera,
        &editor.selection,
        screen(to.0, to.1),
    );
    editor.button_up(PointerButton::Left);
}

#[test]
fn test_create_resize_paint_save_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor(dir.path());

    // right-click empty space, accept the prompt
    click(&mut editor, PointerButton::Right, 0.0, 0.0);
    assert!(editor.input.is_prompt_shown());
    let id = editor.confirm_new_level().unwrap();
    assert!(editor.world.is_active(id));
    assert_eq!(editor.level_name_buffer, "Level 1");
    assert_eq!(editor.world.active_level().unwrap().bounds(), RectI::new(0, 0, 160, 96));

    // widen it with the right handle
    drag(&mut editor, (165.0, 48.0), (192.0, 48.0));
    assert_eq!(editor.world.active_level().unwrap().bounds(), RectI::new(0, 0, 192, 96));

    // attach a tile layer and paint a 2x1 stamp
    let tileset = Tileset::from_image("sheet.png", 32, 32, 8).unwrap();
    editor
        .world
        .active_level_mut()
        .unwrap()
        .add_tile_layer(tileset, 16);
    editor.select_tiles(Point::new(2, 0), Point::new(3, 0));
    click(&mut editor, PointerButton::Left, 20.0, 20.0);
    {
        let data = editor.world.active_level().unwrap().tile_data().unwrap();
        assert_eq!((data.cols(), data.rows()), (12, 6));
        assert_eq!(data.tile(1, 1).unwrap().tileset_index, 2);
        assert_eq!(data.tile(2, 1).unwrap().tileset_index, 3);
    }

    // erasing only happens with an empty selection
    editor.selection.clear();
    click(&mut editor, PointerButton::Right, 20.0, 20.0);
    assert!(!editor.input.is_prompt_shown());
    let data = editor.world.active_level().unwrap().tile_data().unwrap();
    assert_eq!(data.tile(1, 1).unwrap().tileset_index, -1);
    assert_eq!(data.tile(2, 1).unwrap().tileset_index, 3);

    // a second level, then rename and save
    editor.add_level_at(Point::new(400, 0));
    editor.level_name_buffer = "Boss Room".to_string();
    assert!(editor.rename_active_level());
    editor.save().unwrap();

    let mut reloaded = self::editor(dir.path());
    reloaded.load().unwrap();
    assert_eq!(reloaded.world.levels().len(), 2);
    assert_eq!(reloaded.level_name_buffer, "Boss Room");
    let first = &reloaded.world.levels()[0];
    assert_eq!(first.bounds(), RectI::new(0, 0, 192, 96));
    assert!(first.layer(LayerKind::Tiles).is_some());
    assert_eq!(first.tile_data().unwrap().tile(2, 1).unwrap().tileset_index, 3);
}

#[test]
fn test_resize_discards_paint_but_move_keeps_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor(dir.path());
    editor.add_level_at(Point::ZERO);
    editor
        .world
        .active_level_mut()
        .unwrap()
        .add_tile_layer(Tileset::new(), 16);
    editor
        .world
        .active_level_mut()
        .unwrap()
        .tile_layer_mut()
        .unwrap()
        .paint(0, 0, 1);

    // move by the center handle
    drag(&mut editor, (80.0, 48.0), (100.0, 48.0));
    let level = editor.world.active_level().unwrap();
    assert_eq!(level.bounds(), RectI::new(20, 0, 160, 96));
    assert_eq!(level.tile_data().unwrap().tile(0, 0).unwrap().tileset_index, 1);

    // shrink from the top
    drag(&mut editor, (100.0, 101.0), (100.0, 64.0));
    let level = editor.world.active_level().unwrap();
    assert_eq!(level.bounds(), RectI::new(20, 0, 160, 64));
    let data = level.tile_data().unwrap();
    assert_eq!((data.cols(), data.rows()), (10, 4));
    assert_eq!(data.painted_cells().count(), 0);
    assert!(data.visible);
}

#[test]
fn test_delete_and_pick() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor(dir.path());
    let a = editor.add_level(led_core::Level::with_bounds(
        "A".to_string(),
        RectI::new(0, 0, 100, 100),
    ));
    editor.add_level(led_core::Level::with_bounds(
        "B".to_string(),
        RectI::new(200, 0, 100, 100),
    ));

    click(&mut editor, PointerButton::Left, 50.0, 50.0);
    assert!(editor.world.is_active(a));

    editor.key_pressed(EditorKey::Delete);
    assert_eq!(editor.world.levels().len(), 1);
    assert_eq!(editor.world.active_level().unwrap().name, "B");
    assert_eq!(editor.level_name_buffer, "B");

    editor.key_pressed(EditorKey::Delete);
    assert!(editor.world.active_level().is_none());
    assert_eq!(World::default().name, editor.world.name);
}
