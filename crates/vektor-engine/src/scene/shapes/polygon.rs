use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{DrawContext, FrameError};
use crate::scene::Drawable;

use super::Pose;

/// Solid simple polygon with a fixed vertex count, rotating about its centroid.
///
/// The vertex list is fixed at construction; only its placement changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pose: Pose,
    offsets: Box<[Vec2]>,
    pub color: Color,
}

impl Polygon {
    /// Returns `None` for fewer than three points.
    pub fn new(points: impl Into<Vec<Vec2>>, color: Color) -> Option<Self> {
        let points = points.into();
        if points.len() < 3 {
            return None;
        }
        let center = Vec2::mean(&points);
        let offsets: Box<[Vec2]> = points.iter().map(|&p| p - center).collect();
        Some(Self { pose: Pose::at(center), offsets, color })
    }

    /// Regular `sides`-gon of circumradius `radius`, first vertex pointing along +X.
    pub fn regular(center: Vec2, radius: f32, sides: usize, color: Color) -> Option<Self> {
        let step = 360.0 / sides.max(1) as f32;
        let points: Vec<Vec2> = (0..sides)
            .map(|i| center + Vec2::new(radius, 0.0).rotated(step * i as f32))
            .collect();
        Self::new(points, color)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }

    /// Current vertex positions, in construction order.
    pub fn vertices(&self) -> Vec<Vec2> {
        self.offsets.iter().map(|&o| self.pose.place(o)).collect()
    }
}

impl Drawable for Polygon {
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
