use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::types::Point;

/// Renderer-neutral path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    Close,
}

/// Uniform cubic B-spline through `points`, emitted as Bezier segments.
///
/// The curve starts at the first point and ends at the last one; interior
/// points act as control points, so the silhouette passes near them rather
/// than through them. Fewer than three points degrade to straight lines.
#[must_use]
pub fn basis_curve(points: &[Point]) -> Vec<PathCommand> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(points.len() + 2);
    commands.push(PathCommand::MoveTo(first));
    if rest.is_empty() {
        return commands;
    }
    if rest.len() == 1 {
        commands.push(PathCommand::LineTo(rest[0]));
        return commands;
    }

    let mut p0 = first;
    let mut p1 = rest[0];
    commands.push(PathCommand::LineTo(Point::new(
        (5.0 * p0.x + p1.x) / 6.0,
        (5.0 * p0.y + p1.y) / 6.0,
    )));

    for &next in &rest[1..] {
        commands.push(basis_segment(p0, p1, next));
        p0 = p1;
        p1 = next;
    }

    // Close out against the final point twice, which clamps the end.
    commands.push(basis_segment(p0, p1, p1));
    commands.push(PathCommand::LineTo(p1));
    commands
}

fn basis_segment(p0: Point, p1: Point, p2: Point) -> PathCommand {
    PathCommand::CubicTo {
        control1: Point::new((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
        control2: Point::new((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
        to: Point::new(
            (p0.x + 4.0 * p1.x + p2.x) / 6.0,
            (p0.y + 4.0 * p1.y + p2.y) / 6.0,
        ),
    }
}

/// Approximates the path with straight segments, `segments_per_curve` per
/// cubic. `Close` repeats the current subpath's start point.
#[must_use]
pub fn flatten(commands: &[PathCommand], segments_per_curve: usize) -> Vec<Point> {
    let segments = segments_per_curve.max(1);
    let mut out = Vec::new();
    let mut current = Point::new(0.0, 0.0);
    let mut subpath_start = current;

    for command in commands {
        match *command {
            PathCommand::MoveTo(to) => {
                out.push(to);
                current = to;
                subpath_start = to;
            }
            PathCommand::LineTo(to) => {
                out.push(to);
                current = to;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => {
                for step in 1..=segments {
                    let t = step as f64 / segments as f64;
                    out.push(cubic_point(current, control1, control2, to, t));
                }
                current = to;
            }
            PathCommand::Close => {
                out.push(subpath_start);
                current = subpath_start;
            }
        }
    }
    out
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// SVG path data (`d` attribute) for the commands.
#[must_use]
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for command in commands {
        // Writing into a String cannot fail.
        let _ = match *command {
            PathCommand::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
            PathCommand::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => write!(
                out,
                "C{},{},{},{},{},{}",
                control1.x, control1.y, control2.x, control2.y, to.x, to.y
            ),
            PathCommand::Close => write!(out, "Z"),
        };
    }
    out
}
