//! Scanline polygon fill for [`Framebuffer`].

use crate::coords::Vec2;
use crate::paint::Color;

use super::Framebuffer;

/// Fills `vertices` as a closed polygon using the even-odd rule.
///
/// Pixel `(x, y)` is covered when `(x + 0.5, y + 0.5)` is inside; coverage is
/// all or nothing, with no antialiasing. Edges are
/// half-open on their lower end, so polygons sharing an edge never double-paint.
/// Fewer than three vertices or any non-finite coordinate draws nothing.
pub fn fill_polygon(fb: &mut Framebuffer, vertices: &[Vec2], color: Color) {
    if vertices.len() < 3 || color.a == 0 || !vertices.iter().all(|v| v.is_finite()) {
        return;
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v.y), hi.max(v.y)));

    let row_start = pixel_start(min_y, fb.height());
    let row_end = pixel_start(max_y, fb.height());

    let mut crossings: Vec<f32> = Vec::with_capacity(vertices.len());

    for y in row_start..row_end {
        let sample_y = y as f32 + 0.5;

        crossings.clear();
        for (i, &a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            let spans = (a.y <= sample_y && b.y > sample_y) || (b.y <= sample_y && a.y > sample_y);
            if spans {
                let t = (sample_y - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = pixel_start(pair[0], fb.width());
            let x1 = pixel_start(pair[1], fb.width());
            fb.blend_span(y, x0, x1, color);
        }
    }
}

/// First pixel index whose center is at or past `coord`, clamped to `[0, limit]`.
#[inline]
fn pixel_start(coord: f32, limit: u32) -> u32 {
    let idx = (coord - 0.5).ceil();
    if idx <= 0.0 {
        0
    } else if idx >= limit as f32 {
        limit
    } else {
        idx as u32
    }
}
