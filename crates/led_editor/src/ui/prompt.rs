//! Popup offering to create a level where the world was right-clicked

use bevy_egui::egui;

use crate::EditorState;

pub fn render_new_level_prompt(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some((position, screen)) = editor_state.editor.input.prompt() else {
        return;
    };

    let mut confirm = false;
    let mut cancel = false;
    egui::Window::new("New Level")
        .id(egui::Id::new("new_level_prompt"))
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .fixed_pos(egui::pos2(screen.x, screen.y))
        .show(ctx, |ui| {
            ui.label(format!("New level at {}", position));
            ui.horizontal(|ui| {
                confirm = ui.button("Add Level").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if confirm {
        editor_state.editor.confirm_new_level();
    } else if cancel {
        editor_state.editor.dismiss_new_level_prompt();
    }
}
