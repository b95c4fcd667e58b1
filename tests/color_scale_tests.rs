use approx::assert_relative_eq;
use chrono::NaiveDate;
use extrema_chart::core::{Color, CyclicColorScale, DateScale, hue_distance};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn year_ends_share_a_color() {
    let scale = CyclicColorScale::new(2000);
    let jan = scale.color(date(2000, 1, 1));
    let dec = scale.color(date(2000, 12, 31));

    assert_eq!(jan.to_hex(), dec.to_hex());
    assert!(hue_distance(jan.hue_degrees(), dec.hue_degrees()) < 1.0);
    assert_eq!(jan.to_hex(), "#6e40aa");
}

#[test]
fn colors_ignore_the_source_year() {
    let scale = CyclicColorScale::new(2000);
    assert_eq!(scale.color(date(1987, 5, 12)), scale.color(date(2023, 5, 12)));
    assert_eq!(scale.normalize(date(2021, 7, 4)), date(2000, 7, 4));
}

#[test]
fn leap_day_lands_on_feb_28_in_common_years() {
    let scale = CyclicColorScale::new(2001);
    assert_eq!(scale.normalize(date(2020, 2, 29)), date(2001, 2, 28));

    let leap = CyclicColorScale::new(2000);
    assert_eq!(leap.normalize(date(2020, 2, 29)), date(2000, 2, 29));
}

#[test]
fn hue_runs_against_the_day_fraction() {
    let scale = CyclicColorScale::new(2000);
    assert_eq!(scale.color_at_fraction(0.25), Color::rainbow(0.75));
    assert_eq!(scale.day_fraction(date(2000, 1, 1)), 0.0);
    assert_eq!(scale.day_fraction(date(2000, 12, 31)), 1.0);
}

#[test]
fn gradient_stops_span_the_year() {
    let stops = CyclicColorScale::new(2000).gradient_stops(10);
    assert_eq!(stops.len(), 10);
    assert_eq!(stops[0].0, 0.0);
    assert_eq!(stops[9].0, 1.0);
    assert_eq!(stops[0].1, stops[9].1);
    assert!(stops.windows(2).all(|pair| pair[0].0 < pair[1].0));

    assert!(CyclicColorScale::new(2000).gradient_stops(0).is_empty());
}

#[test]
fn date_scale_invert_floors_to_whole_days() {
    let scale = DateScale::new(date(2000, 1, 1), date(2000, 12, 31), (0.0, 365.0));
    assert_relative_eq!(scale.map(date(2000, 1, 11)), 10.0, epsilon = 1e-9);
    assert_eq!(scale.invert(10.5), date(2000, 1, 11));
    assert_eq!(scale.invert(10.99), date(2000, 1, 11));
    assert_eq!(scale.invert(0.0), date(2000, 1, 1));
    assert_eq!(scale.invert(365.0), date(2000, 12, 31));
}
