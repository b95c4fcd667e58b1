use approx::assert_relative_eq;
use chrono::NaiveDate;
use extrema_chart::core::{
    Accessor, DEFAULT_BIN_COUNT, DataPoint, Histogram, HistogramAxis, LinearScale,
    MarginalHistogram, PathCommand, Point, compute_bins,
};
use extrema_chart::ChartError;

fn points_from(pairs: &[(f64, f64)]) -> Vec<DataPoint> {
    let day = NaiveDate::from_ymd_opt(2020, 3, 1).expect("valid date");
    pairs
        .iter()
        .map(|&(min, max)| DataPoint::new(min, max, day))
        .collect()
}

#[test]
fn bins_are_half_open_with_a_closed_last_bin() {
    let values = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
    let bins = compute_bins(values, (0.0, 10.0), 5).expect("bins");

    let counts: Vec<usize> = bins.iter().map(|bin| bin.count).collect();
    assert_eq!(counts, vec![1, 1, 1, 1, 2]);
    assert_eq!(bins[0].lower_bound, 0.0);
    assert_eq!(bins[4].upper_bound, 10.0);
    assert_eq!(bins[2].midpoint(), 5.0);
}

#[test]
fn values_outside_the_domain_are_not_counted() {
    let bins = compute_bins([-1.0, 0.5, 11.0, f64::NAN], (0.0, 10.0), 4).expect("bins");
    let total: usize = bins.iter().map(|bin| bin.count).sum();
    assert_eq!(total, 1);
}

#[test]
fn zero_width_domain_counts_everything_in_the_first_bin() {
    let bins = compute_bins([3.0, 3.0, 3.0], (3.0, 3.0), DEFAULT_BIN_COUNT).expect("bins");
    assert_eq!(bins.len(), DEFAULT_BIN_COUNT);
    assert_eq!(bins[0].count, 3);
    assert!(bins[1..].iter().all(|bin| bin.count == 0));
}

#[test]
fn zero_bins_is_a_config_error() {
    assert!(matches!(
        compute_bins([1.0], (0.0, 1.0), 0),
        Err(ChartError::InvalidConfig(_))
    ));
}

#[test]
fn count_scale_spans_zero_to_the_tallest_bin() {
    let points = points_from(&[(1.0, 0.0), (1.5, 0.0), (9.0, 0.0)]);
    let histogram =
        Histogram::build(&points, Accessor::TempMin, (0.0, 10.0), 5, 70.0).expect("histogram");

    assert_eq!(histogram.total_count(), 3);
    assert_eq!(histogram.count_scale().domain(), (0.0, 2.0));
    assert_eq!(histogram.count_scale().map(2.0), 0.0);
    assert_eq!(histogram.count_scale().map(0.0), 70.0);
}

#[test]
fn empty_histogram_sits_on_its_baseline() {
    let histogram =
        Histogram::build(&[], Accessor::TempMax, (0.0, 0.0), DEFAULT_BIN_COUNT, 70.0)
            .expect("histogram");

    assert_eq!(histogram.total_count(), 0);
    assert_eq!(histogram.count_scale().domain(), (0.0, 0.0));
    let position = LinearScale::new((0.0, 0.0), (0.0, 500.0));
    assert!(
        histogram
            .midpoint_vertices(position)
            .iter()
            .all(|vertex| vertex.y == 70.0)
    );
}

#[test]
fn silhouette_is_a_closed_smoothed_area() {
    let points = points_from(&[(1.0, 0.0), (2.0, 0.0), (2.5, 0.0), (7.0, 0.0), (9.5, 0.0)]);
    let histogram = Histogram::build(&points, Accessor::TempMin, (0.0, 10.0), 20, 70.0)
        .expect("histogram");
    let position = LinearScale::new((0.0, 10.0), (0.0, 500.0));
    let commands = histogram.silhouette(position);
    let vertices = histogram.midpoint_vertices(position);

    assert_eq!(commands.len(), 25);
    assert_eq!(commands.first(), Some(&PathCommand::MoveTo(vertices[0])));
    assert_eq!(commands.last(), Some(&PathCommand::Close));
    assert_eq!(
        commands[commands.len() - 2],
        PathCommand::LineTo(Point::new(vertices[0].x, 70.0))
    );
    let cubic_count = commands
        .iter()
        .filter(|command| matches!(command, PathCommand::CubicTo { .. }))
        .count();
    assert_eq!(cubic_count, 19);
}

#[test]
fn top_band_baseline_faces_the_plot() {
    let points = points_from(&[(1.0, 4.0), (3.0, 6.0)]);
    let x_scale = LinearScale::new((0.0, 10.0), (0.0, 500.0));
    let top = MarginalHistogram::top(&points, Accessor::TempMin, x_scale, 20, 10.0, 70.0)
        .expect("top histogram");

    assert_eq!(top.axis, HistogramAxis::Top);
    assert_eq!(top.near_edge(), -10.0);
    assert_eq!(top.far_edge(), -80.0);
    let baseline = top.to_plot(Point::new(125.0, 70.0));
    assert_relative_eq!(baseline.x, 125.0);
    assert_relative_eq!(baseline.y, -10.0);
}

#[test]
fn right_band_is_rotated_onto_the_y_axis() {
    let points = points_from(&[(1.0, 4.0), (3.0, 6.0)]);
    let y_scale = LinearScale::new((0.0, 10.0), (500.0, 0.0));
    let right =
        MarginalHistogram::right(&points, Accessor::TempMax, y_scale, 500.0, 20, 10.0, 70.0)
            .expect("right histogram");

    assert_eq!(right.axis, HistogramAxis::Right);
    assert_eq!(right.placement.rotation_degrees, 90.0);
    assert_eq!(right.near_edge(), 510.0);
    assert_eq!(right.far_edge(), 580.0);

    // A bin centred on temperature 4 sits level with the plot row for 4.
    let local = Point::new(y_scale.map(4.0), 70.0);
    let plotted = right.to_plot(local);
    assert_relative_eq!(plotted.x, 510.0, epsilon = 1e-9);
    assert_relative_eq!(plotted.y, y_scale.map(4.0), epsilon = 1e-9);

    let tip = right.to_plot(Point::new(y_scale.map(4.0), 0.0));
    assert_relative_eq!(tip.x, 580.0, epsilon = 1e-9);
}
