use approx::assert_relative_eq;
use chrono::NaiveDate;
use extrema_chart::core::{DataPoint, Point, SpatialPartition, Viewport, signed_area};
use extrema_chart::{ChartConfig, ChartError, ChartModel};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Deterministic pseudo-random sites so failures are reproducible.
fn scattered_sites(count: usize, width: f64, height: f64) -> Vec<Point> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|_| Point::new(next() * width, next() * height))
        .collect()
}

fn brute_force_nearest(sites: &[Point], target: Point) -> f64 {
    sites
        .iter()
        .map(|site| site.distance_squared(target))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn two_record_scenario_partitions_into_two_cells() {
    let points = vec![
        DataPoint::new(5.0, 20.0, date(2020, 1, 15)),
        DataPoint::new(-2.0, 10.0, date(2020, 7, 4)),
    ];
    let model = ChartModel::build(points, ChartConfig::for_plot(500.0, 500.0)).expect("model");

    assert_eq!(model.scales().temperature_extent, Some((-2.0, 20.0)));
    assert_eq!(model.bounds(), Viewport::new(500.0, 500.0));

    let partition = model.partition();
    assert_eq!(partition.len(), 2);
    assert!(partition.is_live(0));
    assert!(partition.is_live(1));

    let first = model.projected(0).expect("projected record 0");
    assert_relative_eq!(first.x, 7.0 / 22.0 * 500.0, epsilon = 1e-9);
    assert_relative_eq!(first.y, 0.0, epsilon = 1e-9);
    assert_eq!(partition.locate(first.x, first.y).expect("hit"), 0);

    let second = model.projected(1).expect("projected record 1");
    assert_eq!(partition.locate(second.x, second.y).expect("hit"), 1);

    let area: f64 = (0..2)
        .map(|i| signed_area(partition.cell_polygon(i).expect("cell")).abs())
        .sum();
    assert_relative_eq!(area, 500.0 * 500.0, max_relative = 1e-9);
}

#[test]
fn single_site_owns_the_whole_rectangle() {
    let partition =
        SpatialPartition::build(vec![Point::new(40.0, 70.0)], Viewport::new(200.0, 100.0))
            .expect("partition");

    let cell = partition.cell_polygon(0).expect("cell");
    assert_relative_eq!(signed_area(cell).abs(), 200.0 * 100.0);
    for (x, y) in [(0.0, 0.0), (199.0, 99.0), (200.0, 0.0), (40.0, 70.0)] {
        assert_eq!(partition.locate(x, y).expect("hit"), 0);
        assert!(partition.cell_contains(0, x, y));
    }
}

#[test]
fn empty_partition_reports_no_sites() {
    let partition = SpatialPartition::build(Vec::new(), Viewport::new(100.0, 100.0))
        .expect("partition");

    assert!(partition.is_empty());
    assert!(matches!(
        partition.locate(10.0, 10.0),
        Err(ChartError::EmptyPartition)
    ));
    assert!(matches!(
        partition.locate_from(10.0, 10.0, 3),
        Err(ChartError::EmptyPartition)
    ));
}

#[test]
fn duplicate_sites_resolve_to_the_first_index() {
    let sites = vec![
        Point::new(10.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(80.0, 60.0),
    ];
    let partition = SpatialPartition::build(sites, Viewport::new(100.0, 100.0)).expect("partition");

    assert!(partition.is_live(0));
    assert!(!partition.is_live(1));
    assert_eq!(partition.cell_polygon(1), Some(&[][..]));
    assert_eq!(partition.locate(10.0, 10.0).expect("hit"), 0);
    assert_eq!(partition.locate(12.0, 8.0).expect("hit"), 0);
    assert_eq!(partition.locate(90.0, 90.0).expect("hit"), 2);
    assert_eq!(partition.locate_from(11.0, 11.0, 1).expect("hit"), 0);
}

#[test]
fn near_coincident_sites_merge_onto_the_first_index() {
    let base = [
        Point::new(145.12, 162.81),
        Point::new(0.0, 0.0),
        Point::new(145.0, 134.0),
        Point::new(224.22, 80.78),
    ];
    let sites: Vec<Point> = base
        .iter()
        .copied()
        .chain(base.iter().map(|site| Point::new(site.x + 1e-14, site.y)))
        .collect();
    let partition =
        SpatialPartition::build(sites.clone(), Viewport::new(300.0, 200.0)).expect("partition");

    for index in 0..4 {
        assert!(partition.is_live(index));
        assert!(!partition.is_live(index + 4));
        assert_eq!(partition.cell_polygon(index + 4), Some(&[][..]));
    }

    let total: f64 = (0..sites.len())
        .map(|i| signed_area(partition.cell_polygon(i).expect("cell")).abs())
        .sum();
    assert_relative_eq!(total, 60_000.0, max_relative = 1e-9);

    let target = Point::new(60.0, 100.0);
    for start in 0..sites.len() {
        let hit = partition.locate_from(60.0, 100.0, start).expect("hit");
        assert_eq!(hit, 2);
        assert_relative_eq!(
            sites[hit].distance_squared(target),
            brute_force_nearest(&sites, target),
            max_relative = 1e-9
        );
    }
    assert!(!partition.cell_contains(5, 60.0, 100.0));
}

#[test]
fn collinear_sites_split_into_strips() {
    let sites = vec![
        Point::new(10.0, 50.0),
        Point::new(50.0, 50.0),
        Point::new(90.0, 50.0),
    ];
    let partition = SpatialPartition::build(sites, Viewport::new(100.0, 100.0)).expect("partition");

    assert_eq!(partition.locate(5.0, 95.0).expect("hit"), 0);
    assert_eq!(partition.locate(60.0, 10.0).expect("hit"), 1);
    assert_eq!(partition.locate(95.0, 99.0).expect("hit"), 2);

    let areas: Vec<f64> = (0..3)
        .map(|i| signed_area(partition.cell_polygon(i).expect("cell")).abs())
        .collect();
    assert_relative_eq!(areas[0], 3_000.0, max_relative = 1e-9);
    assert_relative_eq!(areas[1], 4_000.0, max_relative = 1e-9);
    assert_relative_eq!(areas[2], 3_000.0, max_relative = 1e-9);
}

#[test]
fn non_finite_sites_are_skipped() {
    let sites = vec![
        Point::new(f64::NAN, 10.0),
        Point::new(20.0, 20.0),
        Point::new(70.0, 70.0),
    ];
    let partition = SpatialPartition::build(sites, Viewport::new(100.0, 100.0)).expect("partition");

    assert!(!partition.is_live(0));
    assert_eq!(partition.locate(0.0, 0.0).expect("hit"), 1);
    assert!(matches!(
        partition.locate(f64::NAN, 1.0),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn invalid_bounds_are_rejected() {
    let result = SpatialPartition::build(vec![Point::new(1.0, 1.0)], Viewport::new(0.0, 10.0));
    assert!(matches!(result, Err(ChartError::InvalidGeometry { .. })));
}

#[test]
fn dense_grid_resolves_to_the_containing_nearest_cell() {
    let (width, height) = (400.0, 300.0);
    let sites = scattered_sites(150, width, height);
    let partition =
        SpatialPartition::build(sites.clone(), Viewport::new(width, height)).expect("partition");

    let total: f64 = (0..sites.len())
        .filter_map(|i| partition.cell_polygon(i))
        .map(|cell| signed_area(cell).abs())
        .sum();
    assert_relative_eq!(total, width * height, max_relative = 1e-6);

    let mut previous = None;
    for gx in 0..=40 {
        for gy in 0..=30 {
            let (x, y) = (gx as f64 * 10.0, gy as f64 * 10.0);
            let index = match previous {
                Some(start) => partition.locate_from(x, y, start),
                None => partition.locate(x, y),
            }
            .expect("grid sample resolves");
            previous = Some(index);

            assert!(
                partition.cell_contains(index, x, y),
                "cell {index} does not contain ({x}, {y})"
            );
            let nearest = brute_force_nearest(&sites, Point::new(x, y));
            assert_relative_eq!(
                sites[index].distance_squared(Point::new(x, y)),
                nearest,
                max_relative = 1e-9
            );
        }
    }
}
