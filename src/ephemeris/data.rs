//! Static descriptors for the bodies of the toy system.

use bevy::math::DVec3;

/// Static description of one planet, fixed at scene-build time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetDescriptor {
    /// Display name used by the overlay label.
    pub name: &'static str,
    /// sRGB color as 0xRRGGBB.
    pub color: u32,
    /// Visual sphere radius in render units.
    pub radius: f32,
    /// Position of the empty (second) focus; the sun sits on the first focus
    /// at the origin.
    pub orbit_focus: DVec3,
    /// Semi-major axis in render units.
    pub semi_major_axis: f64,
    /// Roll of the orbit plane about its major axis, in degrees.
    pub orbit_roll_deg: f64,
}

impl PlanetDescriptor {
    /// Color split into sRGB bytes.
    pub fn color_rgb(&self) -> [u8; 3] {
        [
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        ]
    }
}

const PLANETS: [PlanetDescriptor; 4] = [
    PlanetDescriptor {
        name: "Verdant",
        color: 0x4fc400,
        radius: 1.0,
        orbit_focus: DVec3::new(15.0, -1.0, 1.0),
        semi_major_axis: 20.0,
        orbit_roll_deg: -45.0,
    },
    PlanetDescriptor {
        name: "Azure",
        color: 0x4287f5,
        radius: 2.0,
        orbit_focus: DVec3::new(3.0, -0.2, 1.0),
        semi_major_axis: 35.0,
        orbit_roll_deg: 0.0,
    },
    PlanetDescriptor {
        name: "Violet",
        color: 0x7542f5,
        radius: 3.2,
        orbit_focus: DVec3::new(6.0, 0.01, 3.0),
        semi_major_axis: 55.0,
        orbit_roll_deg: 0.0,
    },
    PlanetDescriptor {
        name: "Ashen",
        color: 0x687064,
        radius: 1.4,
        orbit_focus: DVec3::new(40.0, 26.0, 51.0),
        semi_major_axis: 90.0,
        orbit_roll_deg: 12.0,
    },
];

/// All planets in spawn order (innermost first).
pub fn all_planets() -> &'static [PlanetDescriptor] {
    &PLANETS
}
