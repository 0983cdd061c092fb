/// Animated-style description of one card, composited by the host renderer.
///
/// Rotations are in degrees. `rotation_x` tilts the card around the
/// horizontal axis under a `perspective` camera distance; `rotation_z` is the
/// in-plane rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayer {
    pub translation_x: f32,
    pub translation_y: f32,
    pub rotation_x: f32,
    pub rotation_z: f32,
    pub scale: f32,
    pub perspective: f32,
}

impl Default for CardLayer {
    fn default() -> Self {
        Self {
            translation_x: 0.0,
            translation_y: 0.0,
            rotation_x: 0.0,
            rotation_z: 0.0,
            scale: 1.0,
            perspective: 1500.0,
        }
    }
}
