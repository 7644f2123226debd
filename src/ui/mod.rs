//! UI module providing the egui status overlay.

pub mod icons;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::picking::ScenePicker;
use crate::render::bodies::{OrbitPath, OrbitingBody};
use crate::types::{MILLIS_PER_SECOND, SimulationTime};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                status_overlay
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            );
    }
}

/// Human-readable description of whatever the picker currently emphasizes.
pub fn describe_pick(
    entity: Entity,
    bodies: &Query<&OrbitingBody>,
    paths: &Query<&OrbitPath>,
) -> Option<String> {
    if let Ok(body) = bodies.get(entity) {
        return Some(icons::planet_text(body.name));
    }
    paths
        .get(entity)
        .ok()
        .map(|path| icons::orbit_text(path.name))
}

/// Small top-left overlay: clock state and the current highlight.
fn status_overlay(
    mut contexts: EguiContexts,
    sim_time: Res<SimulationTime>,
    picker: Res<ScenePicker>,
    bodies: Query<&OrbitingBody>,
    paths: Query<&OrbitPath>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let state_icon = icons::clock_state(sim_time.paused);
    let highlight = picker
        .0
        .emphasized()
        .and_then(|entity| describe_pick(entity, &bodies, &paths));

    egui::Area::new(egui::Id::new("status_overlay"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.label(format!(
                "{} {} {:.1} s  ×{}",
                state_icon,
                icons::CLOCK,
                sim_time.current / MILLIS_PER_SECOND,
                sim_time.scale
            ));
            if let Some(text) = highlight {
                ui.label(format!("{} {}", icons::TARGET, text));
            }
        });
}
