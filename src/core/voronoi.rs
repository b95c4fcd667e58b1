use std::collections::HashMap;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::geometry::{Polygon, clip_to_bisector, convex_contains, rect_polygon};
use crate::core::types::{Accessor, DataPoint, Point, Viewport};
use crate::core::{LinearScale, PlotScales};
use crate::error::{ChartError, ChartResult};

/// Tolerance in pixels for cell membership checks.
pub const CELL_CONTAINS_TOLERANCE_PX: f64 = 1e-6;

/// Sites within this distance of an earlier site share its position.
pub const SITE_MERGE_TOLERANCE_PX: f64 = 1e-6;

type NeighborList = SmallVec<[usize; 8]>;

/// Voronoi subdivision of the plot rectangle, one cell per data point.
///
/// Built once from projected sites. Cells are indexed like the input points.
/// Sites that cannot own area (non-finite coordinates, or a site within
/// `SITE_MERGE_TOLERANCE_PX` of an earlier one) get an empty cell and are
/// never returned by `locate`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialPartition {
    bounds: Viewport,
    sites: Vec<Point>,
    neighbors: Vec<NeighborList>,
    cells: Vec<Polygon>,
    live: Vec<bool>,
    entry: Option<usize>,
}

impl SpatialPartition {
    /// Projects every point through the position scales and partitions the
    /// bounding rectangle around the projected sites.
    pub fn from_points(
        points: &[DataPoint],
        x_accessor: Accessor,
        y_accessor: Accessor,
        scales: &PlotScales,
        bounds: Viewport,
    ) -> ChartResult<Self> {
        let sites: Vec<Point> = points
            .iter()
            .map(|point| project(point, x_accessor, y_accessor, scales.x, scales.y))
            .collect();
        Self::build(sites, bounds)
    }

    pub fn build(sites: Vec<Point>, bounds: Viewport) -> ChartResult<Self> {
        let bounds = bounds.validate()?;
        let site_count = sites.len();

        // Sites closer than the merge tolerance collapse onto the first index;
        // the triangulator loses edges of near-coincident points.
        let mut unique: Vec<usize> = Vec::with_capacity(site_count);
        let mut grid: HashMap<(i64, i64), SmallVec<[usize; 2]>> =
            HashMap::with_capacity(site_count);
        for (index, site) in sites.iter().enumerate() {
            if !site.is_finite() {
                continue;
            }
            let (gx, gy) = grid_cell(*site);
            let merged = (gx.saturating_sub(1)..=gx.saturating_add(1))
                .flat_map(|cx| {
                    (gy.saturating_sub(1)..=gy.saturating_add(1)).map(move |cy| (cx, cy))
                })
                .filter_map(|key| grid.get(&key))
                .flatten()
                .any(|&kept| {
                    sites[kept].distance_squared(*site)
                        <= SITE_MERGE_TOLERANCE_PX * SITE_MERGE_TOLERANCE_PX
                });
            if !merged {
                grid.entry((gx, gy)).or_default().push(index);
                unique.push(index);
            }
        }

        let mut neighbors: Vec<NeighborList> = vec![NeighborList::new(); site_count];
        let mut live = vec![false; site_count];

        match unique.len() {
            0 => {}
            1 => live[unique[0]] = true,
            _ => {
                let input: Vec<delaunator::Point> = unique
                    .iter()
                    .map(|&index| delaunator::Point {
                        x: sites[index].x,
                        y: sites[index].y,
                    })
                    .collect();
                let triangulation = delaunator::triangulate(&input);

                for triangle in triangulation.triangles.chunks_exact(3) {
                    let [a, b, c] = [unique[triangle[0]], unique[triangle[1]], unique[triangle[2]]];
                    link(&mut neighbors, a, b);
                    link(&mut neighbors, b, c);
                    link(&mut neighbors, c, a);
                }
                // Collinear input has no triangles; consecutive hull entries
                // are then the only adjacency.
                let hull = &triangulation.hull;
                for (position, &local) in hull.iter().enumerate() {
                    let next = hull[(position + 1) % hull.len()];
                    if local != next {
                        link(&mut neighbors, unique[local], unique[next]);
                    }
                }

                for &index in &unique {
                    live[index] = !neighbors[index].is_empty();
                }
            }
        }

        let cells: Vec<Polygon> = (0..site_count)
            .map(|index| {
                if !live[index] {
                    return Vec::new();
                }
                neighbors[index]
                    .iter()
                    .fold(rect_polygon(bounds), |cell, &other| {
                        clip_to_bisector(&cell, sites[index], sites[other])
                    })
            })
            .collect();

        let entry = live.iter().position(|&is_live| is_live);
        debug!(
            sites = site_count,
            live = live.iter().filter(|&&is_live| is_live).count(),
            "spatial partition built"
        );

        Ok(Self {
            bounds,
            sites,
            neighbors,
            cells,
            live,
            entry,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[must_use]
    pub fn site(&self, index: usize) -> Option<Point> {
        self.sites.get(index).copied()
    }

    /// Clipped cell of the site at `index`; empty for sites that own no area.
    #[must_use]
    pub fn cell_polygon(&self, index: usize) -> Option<&[Point]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors
            .get(index)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn is_live(&self, index: usize) -> bool {
        self.live.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn cell_contains(&self, index: usize, x: f64, y: f64) -> bool {
        self.cell_polygon(index).is_some_and(|cell| {
            convex_contains(cell, Point::new(x, y), CELL_CONTAINS_TOLERANCE_PX)
        })
    }

    /// Index of the data point whose cell contains `(x, y)`.
    ///
    /// Positions on a shared edge resolve to whichever site the walk reaches
    /// first; the answer is stable for a given partition.
    pub fn locate(&self, x: f64, y: f64) -> ChartResult<usize> {
        let entry = self.entry.ok_or(ChartError::EmptyPartition)?;
        self.locate_from(x, y, entry)
    }

    /// Like `locate`, starting the walk at `start` (typically the previous
    /// hit) to shorten it for consecutive pointer positions.
    pub fn locate_from(&self, x: f64, y: f64, start: usize) -> ChartResult<usize> {
        let entry = self.entry.ok_or(ChartError::EmptyPartition)?;
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }

        let target = Point::new(x, y);
        let distance = |index: usize| OrderedFloat(self.sites[index].distance_squared(target));
        let mut current = if self.is_live(start) { start } else { entry };
        let mut steps = 0usize;

        // Greedy descent over Delaunay edges reaches the nearest site.
        // `current` goes first so ties keep the walk where it is.
        loop {
            let best = std::iter::once(current)
                .chain(self.neighbors[current].iter().copied())
                .min_by_key(|&index| distance(index))
                .unwrap_or(current);
            if best == current {
                break;
            }
            current = best;
            steps += 1;
        }

        trace!(x, y, index = current, steps, "partition locate");
        Ok(current)
    }
}

/// Screen position of a data point under the given position scales.
#[must_use]
pub fn project(
    point: &DataPoint,
    x_accessor: Accessor,
    y_accessor: Accessor,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> Point {
    Point::new(
        x_scale.map(x_accessor.value(point)),
        y_scale.map(y_accessor.value(point)),
    )
}

fn grid_cell(site: Point) -> (i64, i64) {
    (
        (site.x / SITE_MERGE_TOLERANCE_PX).floor() as i64,
        (site.y / SITE_MERGE_TOLERANCE_PX).floor() as i64,
    )
}

fn link(neighbors: &mut [NeighborList], a: usize, b: usize) {
    if a == b {
        return;
    }
    if !neighbors[a].contains(&b) {
        neighbors[a].push(b);
    }
    if !neighbors[b].contains(&a) {
        neighbors[b].push(a);
    }
}
