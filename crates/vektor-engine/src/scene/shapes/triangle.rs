use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{DrawContext, FrameError};
use crate::scene::Drawable;

use super::{Pose, decompose};

/// Solid triangle rotating about its centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pose: Pose,
    offsets: [Vec2; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2, color: Color) -> Self {
        let (pose, offsets) = decompose([a, b, c]);
        Self { pose, offsets, color }
    }

    /// Current vertex positions, in construction order.
    #[inline]
    pub fn vertices(&self) -> [Vec2; 3] {
        self.offsets.map(|o| self.pose.place(o))
    }
}

impl Drawable for Triangle {
    fn update(&mut self, delta_degrees: f32) {
        self.pose.rotate(delta_degrees);
    }

    fn render(&self, ctx: &mut dyn DrawContext) -> Result<(), FrameError> {
        ctx.fill_polygon(&self.vertices(), self.color)
    }

    fn centroid(&self) -> Vec2 {
        self.pose.center
    }
}
