//! Segment rasterization: path building, flattening, and stamping

use glam::Vec2;
use kurbo::{BezPath, PathEl, Point, Rect, Shape, Size};

use crate::brush::Brush;
use crate::constants::PATH_TOLERANCE;
use crate::stroke::StrokePoint;
use crate::surface::Surface;

#[inline]
fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

/// Average pressure over a segment (1.0 for an empty segment)
pub fn average_pressure(points: &[StrokePoint]) -> f32 {
    if points.is_empty() {
        return 1.0;
    }
    points.iter().map(|p| p.pressure).sum::<f32>() / points.len() as f32
}

/// Build the centerline path of a segment.
///
/// Consecutive points are joined by quadratics that use the raw point as
/// control and the pair midpoint as endpoint, so the curve passes near every
/// sample without overshooting. The first pair is a straight line to its
/// midpoint and the path closes with a line to the last point.
pub fn segment_path(points: &[StrokePoint]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(to_point(first.pos));
    for i in 0..points.len().saturating_sub(1) {
        let p0 = points[i].pos;
        let p1 = points[i + 1].pos;
        let mid = (p0 + p1) * 0.5;
        if i == 0 {
            path.line_to(to_point(mid));
        } else {
            path.quad_to(to_point(p0), to_point(mid));
        }
    }
    if points.len() > 1 {
        path.line_to(to_point(points[points.len() - 1].pos));
    }
    path
}

/// Rasterize a segment onto the surface.
///
/// The whole segment is painted at one width derived from its average
/// pressure. A single point leaves a round dot. Returns the region to
/// repaint in logical surface units (path bounds inflated by the brush
/// margin), or None when there was nothing to paint.
pub fn render_segment(
    surface: &mut Surface,
    points: &[StrokePoint],
    brush: &Brush,
) -> Option<Rect> {
    if points.is_empty() || surface.is_empty() {
        return None;
    }
    let width = brush.width_for_pressure(average_pressure(points));
    let radius = width / 2.0;
    let margin = brush.margin() as f64;

    if points.len() == 1 {
        let pos = points[0].pos;
        surface.stamp_disc(pos.x, pos.y, radius, brush.color);
        let dot = Rect::from_center_size(to_point(pos), Size::new(width as f64, width as f64));
        return Some(dot.inflate(margin, margin));
    }

    let path = segment_path(points);
    stamp_path(surface, &path, radius, brush.color);
    Some(path.bounding_box().inflate(margin, margin))
}

/// Lay round stamps along the flattened path at sub-radius spacing. The
/// union of the discs is the round-capped, round-joined stroke outline.
fn stamp_path(surface: &mut Surface, path: &BezPath, radius: f32, color: [f32; 4]) {
    let spacing = (radius * 0.5).max(0.35);
    let mut last: Option<Point> = None;
    kurbo::flatten(path.iter(), PATH_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            surface.stamp_disc(p.x as f32, p.y as f32, radius, color);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(from) = last {
                let ax = from.x as f32;
                let ay = from.y as f32;
                let dx = (p.x - from.x) as f32;
                let dy = (p.y - from.y) as f32;
                let length = (dx * dx + dy * dy).sqrt();
                let mut travelled = spacing;
                while travelled < length {
                    let t = travelled / length;
                    surface.stamp_disc(ax + dx * t, ay + dy * t, radius, color);
                    travelled += spacing;
                }
                surface.stamp_disc(p.x as f32, p.y as f32, radius, color);
            }
            last = Some(p);
        }
        // flatten only emits MoveTo and LineTo
        _ => {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32, pressure: f32) -> StrokePoint {
        StrokePoint {
            pos: Vec2::new(x, y),
            pressure,
            time_ms: 0,
        }
    }

    #[test]
    fn test_average_pressure() {
        assert_eq!(average_pressure(&[]), 1.0);
        let points = vec![point(0.0, 0.0, 1.0), point(5.0, 0.0, 0.5)];
        assert!((average_pressure(&points) - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_segment_path_element_counts() {
        let points: Vec<_> = (0..5).map(|i| point(i as f32 * 10.0, 0.0, 1.0)).collect();
        let path = segment_path(&points);
        // move, line to first midpoint, 3 quadratics, closing line
        assert_eq!(path.elements().len(), 6);

        let pair = vec![point(0.0, 0.0, 1.0), point(10.0, 0.0, 1.0)];
        let path = segment_path(&pair);
        // move, line to midpoint, closing line
        assert_eq!(path.elements().len(), 3);
    }

    #[test]
    fn test_segment_path_starts_and_ends_on_points() {
        let points = vec![
            point(1.0, 2.0, 1.0),
            point(11.0, 6.0, 1.0),
            point(19.0, 14.0, 1.0),
        ];
        let path = segment_path(&points);
        let elements = path.elements();
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(1.0, 2.0)));
        assert_eq!(
            elements[elements.len() - 1],
            PathEl::LineTo(Point::new(19.0, 14.0))
        );
    }

    #[test]
    fn test_render_segment_empty() {
        let mut surface = Surface::new(64, 64, 1.0);
        assert_eq!(render_segment(&mut surface, &[], &Brush::default()), None);
    }

    #[test]
    fn test_render_segment_single_point_dot() {
        let mut surface = Surface::new(64, 64, 1.0);
        let brush = Brush::new([1.0, 0.0, 0.0, 1.0], 10.0);
        let dirty = render_segment(&mut surface, &[point(32.0, 32.0, 1.0)], &brush);
        let dirty = dirty.unwrap();
        assert!(dirty.x0 <= 22.0 && dirty.x1 >= 42.0);
        // A dot of radius 5 covers the center
        assert!(surface.get_pixel(32, 32).unwrap()[3] > 0.9);
    }

    #[test]
    fn test_render_segment_paints_along_line() {
        let mut surface = Surface::new(64, 64, 1.0);
        let brush = Brush::new([0.0, 0.0, 1.0, 1.0], 10.0);
        let points = vec![point(10.0, 20.0, 1.0), point(50.0, 20.0, 1.0)];
        render_segment(&mut surface, &points, &brush);
        // Solid coverage on the centerline, including between endpoints
        for x in [10u32, 20, 30, 40, 49] {
            assert!(surface.get_pixel(x, 20).unwrap()[3] > 0.9, "x = {x}");
        }
        // Nothing far off the line
        assert_eq!(surface.get_pixel(30, 40).unwrap()[3], 0.0);
    }

    #[test]
    fn test_render_segment_width_follows_pressure() {
        let brush = Brush::new([0.0, 0.0, 0.0, 1.0], 10.0);

        let mut full = Surface::new(64, 64, 1.0);
        let points = vec![point(10.0, 32.0, 1.0), point(50.0, 32.0, 1.0)];
        render_segment(&mut full, &points, &brush);

        let mut light = Surface::new(64, 64, 1.0);
        let points = vec![point(10.0, 32.0, 0.4), point(50.0, 32.0, 0.4)];
        render_segment(&mut light, &points, &brush);

        // Width 10 reaches 4 units off the centerline, width 4 does not
        assert!(full.get_pixel(30, 36).unwrap()[3] > 0.4);
        assert_eq!(light.get_pixel(30, 36).unwrap()[3], 0.0);
    }

    #[test]
    fn test_render_segment_dirty_rect_covers_points() {
        let mut surface = Surface::new(128, 128, 1.0);
        let brush = Brush::new([0.0, 0.0, 0.0, 1.0], 8.0);
        let points = vec![
            point(20.0, 20.0, 1.0),
            point(40.0, 30.0, 1.0),
            point(60.0, 20.0, 1.0),
        ];
        let dirty = render_segment(&mut surface, &points, &brush).unwrap();
        for p in &points {
            assert!(dirty.contains(to_point(p.pos)));
        }
        // Inflated by the brush margin on every side
        assert!(dirty.x0 <= 20.0 - 8.0);
        assert!(dirty.x1 >= 60.0 + 8.0);
    }

    #[test]
    fn test_render_segment_overlap_repaint_is_idempotent() {
        let brush = Brush::new([0.2, 0.4, 0.6, 0.5], 10.0);
        let points = vec![
            point(10.0, 20.0, 1.0),
            point(25.0, 22.0, 1.0),
            point(40.0, 20.0, 1.0),
        ];

        let mut once = Surface::new(64, 64, 1.0);
        render_segment(&mut once, &points, &brush);
        let mut twice = Surface::new(64, 64, 1.0);
        render_segment(&mut twice, &points, &brush);
        render_segment(&mut twice, &points, &brush);

        assert_eq!(once.as_bytes(), twice.as_bytes());
    }
}
