//! Input handling for pointer tracking and keyboard shortcuts.
//!
//! Mouse and touch positions are normalized to device coordinates and handed
//! to the picker. Nothing here runs intersection tests or touches emphasis.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::picking::ScenePicker;
use crate::types::{PickingSet, SimulationTime};

/// Plugin providing pointer tracking and keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (track_pointer.in_set(PickingSet::Input), keyboard_shortcuts),
        );
    }
}

/// Convert a logical window position (origin top-left, Y down) to NDC
/// (origin center, Y up, both axes in [-1, 1]).
pub fn to_ndc(position: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        position.x / window_size.x * 2.0 - 1.0,
        -(position.y / window_size.y * 2.0 - 1.0),
    ))
}

/// Window position the picker should follow: the first active touch wins
/// over the mouse cursor. `None` when neither is present.
pub fn active_pointer(first_touch: Option<Vec2>, cursor: Option<Vec2>) -> Option<Vec2> {
    first_touch.or(cursor)
}

/// Feed the current pointer to the picker. A pointer outside the window or
/// a lifted finger clears it.
fn track_pointer(
    window_query: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    mut picker: ResMut<ScenePicker>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let first_touch = touches.iter().next().map(|touch| touch.position());
    let position = active_pointer(first_touch, window.cursor_position());

    let size = Vec2::new(window.width(), window.height());
    match position.and_then(|pos| to_ndc(pos, size)) {
        Some(ndc) => picker.0.update_pointer_position(ndc),
        None => picker.0.clear_pointer_position(),
    }
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut sim_time: ResMut<SimulationTime>) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        sim_time.paused = !sim_time.paused;
        info!("Simulation {}", if sim_time.paused { "paused" } else { "running" });
    }

    // Time controls: [ and ] to adjust simulation speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        sim_time.scale = (sim_time.scale * 0.5).max(0.125);
        info!("Time scale: {}x", sim_time.scale);
    }

    if keys.just_pressed(KeyCode::BracketRight) {
        sim_time.scale = (sim_time.scale * 2.0).min(64.0);
        info!("Time scale: {}x", sim_time.scale);
    }

    if keys.just_pressed(KeyCode::Digit1) {
        sim_time.scale = 1.0;
        info!("Time scale: 1x (real-time)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners_and_center() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(to_ndc(Vec2::ZERO, size), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(to_ndc(size, size), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(to_ndc(size / 2.0, size), Some(Vec2::ZERO));
    }

    #[test]
    fn test_ndc_zero_sized_window() {
        assert_eq!(to_ndc(Vec2::ONE, Vec2::ZERO), None);
    }

    #[test]
    fn test_touch_takes_precedence_over_cursor() {
        let touch = Vec2::new(10.0, 20.0);
        let cursor = Vec2::new(300.0, 400.0);
        assert_eq!(active_pointer(Some(touch), Some(cursor)), Some(touch));
        assert_eq!(active_pointer(None, Some(cursor)), Some(cursor));
    }

    #[test]
    fn test_no_touch_and_no_cursor_clears_pointer() {
        assert_eq!(active_pointer(None, None), None);
    }
}
