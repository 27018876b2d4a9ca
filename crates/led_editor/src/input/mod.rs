//! Forwards Bevy mouse, wheel and keyboard input to the editing core

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use led_core::{EditorKey, PointerButton};

use crate::EditorState;

/// Wheel pixels that count as one notch
const PIXELS_PER_NOTCH: f32 = 50.0;

pub struct EditorInputPlugin;

impl Plugin for EditorInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>().add_systems(
            Update,
            (
                track_pointer,
                handle_pointer_input,
                handle_scroll_input,
                handle_keyboard_input,
                tick_editor,
            )
                .chain(),
        );
    }
}

/// Cursor and UI focus as seen this frame
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerState {
    /// Last known cursor position in logical pixels, origin top-left
    pub screen: led_core::Vec2,
    /// Pointer is over an egui panel or window
    pub over_ui: bool,
    /// A text field has keyboard focus
    pub typing: bool,
}

pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Right => Some(PointerButton::Right),
        _ => None,
    }
}

pub fn editor_key(key: KeyCode) -> Option<EditorKey> {
    match key {
        KeyCode::Delete | KeyCode::Backspace => Some(EditorKey::Delete),
        KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Some(EditorKey::Confirm),
        _ => None,
    }
}

/// Wheel movement in notches, positive when scrolling toward the user (zoom out)
pub fn scroll_amount(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y,
        MouseScrollUnit::Pixel => -y / PIXELS_PER_NOTCH,
    }
}

fn track_pointer(
    mut contexts: EguiContexts,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
    mut editor_state: ResMut<EditorState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let viewport = led_core::Vec2::new(window.width(), window.height());
    if viewport.min_element() > 0.0 && editor_state.editor.camera.viewport() != viewport {
        editor_state.editor.set_viewport(viewport);
    }

    if let Some(cursor) = window.cursor_position() {
        pointer.screen = led_core::Vec2::new(cursor.x, cursor.y);
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    pointer.over_ui = ctx.is_pointer_over_area() || ctx.is_using_pointer();
    pointer.typing = ctx.wants_keyboard_input();
}

fn handle_pointer_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    mut editor_state: ResMut<EditorState>,
) {
    for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
        let Some(mapped) = pointer_button(button) else {
            continue;
        };
        let pressed = mouse_buttons.just_pressed(button) && !pointer.over_ui;
        // Releases always reach the core so a drag that ends over a panel still finishes
        let released = mouse_buttons.just_released(button);
        let editor = &mut editor_state.editor;

        // Both edges in one frame: still held means release came first
        if released && pressed && mouse_buttons.pressed(button) {
            editor.button_up(mapped);
            editor.button_down(mapped, pointer.screen);
            continue;
        }
        if pressed {
            editor.button_down(mapped, pointer.screen);
        }
        if released {
            editor.button_up(mapped);
        }
    }
}

fn handle_scroll_input(
    mut scroll_events: bevy::ecs::message::MessageReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerState>,
    mut editor_state: ResMut<EditorState>,
) {
    if pointer.over_ui {
        scroll_events.clear();
        return;
    }
    let slow = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    for event in scroll_events.read() {
        editor_state
            .editor
            .scroll(scroll_amount(event.unit, event.y), slow);
    }
}

fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerState>,
    mut editor_state: ResMut<EditorState>,
) {
    if pointer.typing {
        return;
    }
    for key in keyboard.get_just_pressed() {
        if let Some(key) = editor_key(*key) {
            editor_state.editor.key_pressed(key);
        }
    }
}

fn tick_editor(
    time: Res<Time>,
    pointer: Res<PointerState>,
    mut editor_state: ResMut<EditorState>,
) {
    editor_state
        .editor
        .update(time.delta_secs(), pointer.screen);
}
