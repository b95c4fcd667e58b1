use crate::core::types::{Point, Viewport};

/// Closed polygon; the last vertex connects back to the first.
pub type Polygon = Vec<Point>;

/// Bounding rectangle `[0, width] x [0, height]`, wound clockwise on screen.
#[must_use]
pub fn rect_polygon(bounds: Viewport) -> Polygon {
    vec![
        Point::new(0.0, 0.0),
        Point::new(bounds.width, 0.0),
        Point::new(bounds.width, bounds.height),
        Point::new(0.0, bounds.height),
    ]
}

/// Clips `polygon` to the half-plane of points at least as close to `site`
/// as to `other` (one Sutherland-Hodgman pass against their bisector).
#[must_use]
pub fn clip_to_bisector(polygon: &[Point], site: Point, other: Point) -> Polygon {
    if polygon.is_empty() {
        return Vec::new();
    }

    let normal = Point::new(other.x - site.x, other.y - site.y);
    let mid = Point::new((site.x + other.x) * 0.5, (site.y + other.y) * 0.5);
    let side = |p: Point| (p.x - mid.x) * normal.x + (p.y - mid.y) * normal.y;

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    let mut previous = polygon[polygon.len() - 1];
    let mut previous_side = side(previous);

    for &current in polygon {
        let current_side = side(current);
        let current_inside = current_side <= 0.0;
        let previous_inside = previous_side <= 0.0;

        if current_inside != previous_inside {
            let t = previous_side / (previous_side - current_side);
            clipped.push(Point::new(
                previous.x + t * (current.x - previous.x),
                previous.y + t * (current.y - previous.y),
            ));
        }
        if current_inside {
            clipped.push(current);
        }

        previous = current;
        previous_side = current_side;
    }

    clipped
}

/// Shoelace area; the sign follows the winding.
#[must_use]
pub fn signed_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        twice_area += previous.x * current.y - current.x * previous.y;
        previous = current;
    }
    twice_area * 0.5
}

/// Point-in-convex-polygon test that accepts points within `tolerance`
/// pixels outside an edge. Polygons with no area contain nothing.
#[must_use]
pub fn convex_contains(polygon: &[Point], point: Point, tolerance: f64) -> bool {
    let area = signed_area(polygon);
    if area == 0.0 {
        return false;
    }
    let orientation = area.signum();

    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        let edge_x = current.x - previous.x;
        let edge_y = current.y - previous.y;
        let length = edge_x.hypot(edge_y);
        if length > 0.0 {
            let cross = edge_x * (point.y - previous.y) - edge_y * (point.x - previous.x);
            if cross * orientation < -tolerance * length {
                return false;
            }
        }
        previous = current;
    }
    true
}
