//! Body labels using egui for text rendering.
//!
//! Each planet gets a small label next to it. Hovering a label claims
//! picking authority for that planet through [`LabelHover`].

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::MainCamera;
use crate::picking::LabelHover;
use crate::render::bodies::OrbitingBody;
use crate::ui::icons;

/// Plugin providing body label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>().add_systems(
            EguiPrimaryContextPass,
            draw_body_labels
                .after(icons::setup_fonts)
                .run_if(icons::fonts_ready),
        );
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Whether labels are visible.
    pub visible: bool,
    /// Offset from body center in screen pixels.
    pub offset: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            visible: true,
            offset: 12.0,
        }
    }
}

/// Draw labels for all planets and record which one the pointer is over.
fn draw_body_labels(
    mut contexts: EguiContexts,
    bodies: Query<(Entity, &OrbitingBody, &GlobalTransform)>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    settings: Res<LabelSettings>,
    mut hover: ResMut<LabelHover>,
) {
    let mut hovered = None;

    if settings.visible {
        let Ok((camera, camera_transform)) = camera.single() else {
            return;
        };
        let Ok(ctx) = contexts.ctx_mut() else {
            return;
        };

        for (entity, body, transform) in bodies.iter() {
            // Project world position to screen
            let Ok(screen_pos) = camera.world_to_viewport(camera_transform, transform.translation())
            else {
                continue;
            };

            let label_pos = egui::pos2(
                screen_pos.x + settings.offset,
                screen_pos.y + settings.offset,
            );
            let text = egui::RichText::new(icons::planet_text(body.name))
                .size(14.0)
                .color(egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230));

            let response = egui::Area::new(egui::Id::new(("body_label", entity)))
                .fixed_pos(label_pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| ui.add(egui::Label::new(text).sense(egui::Sense::hover())));

            if response.inner.hovered() {
                hovered = Some(entity);
            }
        }
    }

    // Only write on change so the picker sees clean transitions.
    if hover.target != hovered {
        hover.target = hovered;
    }
}
