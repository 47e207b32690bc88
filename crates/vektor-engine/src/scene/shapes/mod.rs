mod polygon;
mod triangle;

pub use polygon::Polygon;
pub use triangle::Triangle;

use crate::coords::Vec2;

/// Rigid placement shared by shapes: a fixed pivot plus an accumulated angle.
///
/// Vertices are stored as offsets from `center` and placed on demand, so repeated
/// rotation never accumulates error in the pivot or the shape's proportions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Pose {
    pub center: Vec2,
    /// Degrees, kept in `[0, 360)`.
    pub angle: f32,
}

impl Pose {
    #[inline]
    pub const fn at(center: Vec2) -> Self {
        Self { center, angle: 0.0 }
    }

    #[inline]
    pub fn rotate(&mut self, delta_degrees: f32) {
        if delta_degrees.is_finite() {
            self.angle = (self.angle + delta_degrees).rem_euclid(360.0);
        }
    }

    /// Maps a centroid-relative offset to target space.
    #[inline]
    pub fn place(&self, offset: Vec2) -> Vec2 {
        self.center + offset.rotated(self.angle)
    }
}

/// Splits absolute points into a pose at their centroid plus relative offsets.
pub(crate) fn decompose<const N: usize>(points: [Vec2; N]) -> (Pose, [Vec2; N]) {
    let center = Vec2::mean(&points);
    (Pose::at(center), points.map(|p| p - center))
}
