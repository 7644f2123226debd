//! Icon glyphs and the font setup that makes them render.
//!
//! Labels and the status overlay prefix their text with Phosphor glyphs.
//! Egui only knows about those glyphs after [`setup_fonts`] has run once
//! against the primary context, so every system that draws icon text is
//! gated on [`fonts_ready`].

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Set once the Phosphor font has been merged into the egui font table.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// Run condition for systems that draw icon text.
pub fn fonts_ready(init: Res<FontsInitialized>) -> bool {
    init.0
}

/// Merge the Phosphor glyphs into egui's default fonts on the first pass
/// where a primary context exists.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
    initialized.0 = true;

    debug!("icon font merged into egui context");
}

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
/// Shown next to planet names, both on screen labels and in the overlay.
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const ORBIT: &str = egui_phosphor::regular::PATH;
/// Marks the currently emphasized object in the overlay.
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;

/// Label text for a planet.
pub fn planet_text(name: &str) -> String {
    format!("{PLANET} {name}")
}

/// Label text for a planet's orbit path.
pub fn orbit_text(name: &str) -> String {
    format!("{ORBIT} {name} orbit")
}

/// Clock glyph for the current run state.
pub fn clock_state(paused: bool) -> &'static str {
    if paused { PAUSE } else { PLAY }
}
