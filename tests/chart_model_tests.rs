use chrono::NaiveDate;
use extrema_chart::api::{GuideExtent, Margins};
use extrema_chart::core::{Accessor, DataPoint, Viewport};
use extrema_chart::{ChartConfig, ChartError, ChartModel};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn points() -> Vec<DataPoint> {
    vec![
        DataPoint::new(31.0, 45.0, date(2021, 3, 2)),
        DataPoint::new(58.0, 79.0, date(2021, 7, 19)),
        DataPoint::new(22.0, 30.0, date(2022, 1, 8)),
        DataPoint::new(40.0, 61.0, date(2022, 10, 11)),
    ]
}

#[test]
fn default_config_matches_the_reference_layout() {
    let config = ChartConfig::default();
    assert_eq!(config.dimensions.width, 600.0);
    assert_eq!(config.bounded(), Viewport::new(460.0, 460.0));
    assert_eq!(config.legend.bar_width(), 12.5);
    assert_eq!(config.histogram_bin_count, 20);
    assert_eq!(config.x_accessor, Accessor::TempMin);
    assert_eq!(config.y_accessor, Accessor::TempMax);
    assert_eq!(config.guide_extent, GuideExtent::NearEdge);
    assert!(config.validate().is_ok());
}

#[test]
fn model_derives_scales_partition_and_histograms() {
    let model = ChartModel::build(points(), ChartConfig::default()).expect("model");

    assert_eq!(model.points().len(), 4);
    assert_eq!(model.x_scale().domain(), model.y_scale().domain());
    assert_eq!(model.partition().len(), 4);
    assert!((0..4).all(|i| model.partition().is_live(i)));

    let top = model.top_histogram().expect("top histogram");
    let right = model.right_histogram().expect("right histogram");
    assert_eq!(top.histogram.total_count(), 4);
    assert_eq!(right.histogram.total_count(), 4);
    assert_eq!(top.histogram.accessor(), Accessor::TempMin);
    assert_eq!(right.histogram.accessor(), Accessor::TempMax);
    assert_eq!(top.histogram.bins().len(), 20);
}

#[test]
fn histograms_can_be_disabled() {
    let config = ChartConfig::default().with_histograms(false);
    let model = ChartModel::build(points(), config).expect("model");
    assert!(model.top_histogram().is_none());
    assert!(model.right_histogram().is_none());
}

#[test]
fn swapped_accessors_swap_the_axes() {
    let config = ChartConfig::default().with_accessors(Accessor::TempMax, Accessor::TempMin);
    let model = ChartModel::build(points(), config).expect("model");

    let site = model.projected(1).expect("projected");
    assert_eq!(site.x, model.x_scale().map(79.0));
    assert_eq!(site.y, model.y_scale().map(58.0));
}

#[test]
fn empty_dataset_builds_degenerate_but_usable_model() {
    let model = ChartModel::build(Vec::new(), ChartConfig::default()).expect("model");
    assert!(model.partition().is_empty());
    assert_eq!(model.scales().temperature_extent, None);
    let top = model.top_histogram().expect("top histogram");
    assert!(top.histogram.bins().iter().all(|bin| bin.count == 0));
}

#[test]
fn points_in_date_range_ignore_the_year() {
    let model = ChartModel::build(points(), ChartConfig::default()).expect("model");
    let selected = model.points_in_date_range(date(2000, 1, 1), date(2000, 3, 31));
    assert_eq!(selected, vec![0, 2]);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(matches!(
        ChartModel::build(points(), ChartConfig::new(0.0, 600.0)),
        Err(ChartError::InvalidGeometry { .. })
    ));

    let margins = Margins {
        top: 400.0,
        right: 10.0,
        bottom: 400.0,
        left: 10.0,
    };
    assert!(ChartConfig::default().with_margins(margins).validate().is_err());

    let mut config = ChartConfig::default();
    config.histogram_bin_count = 0;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

    let config = ChartConfig::default().with_date_format("%Y-%!");
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

    let mut config = ChartConfig::default();
    config.legend.highlight_bar_width_ratio = 1.5;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));
}

#[test]
fn config_json_accepts_partial_documents() {
    let config = ChartConfig::from_json_str(
        r#"{ "histogram_bin_count": 12, "dimensions": { "width": 800 }, "guide_extent": "FarEdge" }"#,
    )
    .expect("config");

    assert_eq!(config.histogram_bin_count, 12);
    assert_eq!(config.dimensions.width, 800.0);
    assert_eq!(config.dimensions.height, 600.0);
    assert_eq!(config.dimensions.margin.top, 90.0);
    assert_eq!(config.guide_extent, GuideExtent::FarEdge);

    let json = config.to_json_pretty().expect("json");
    assert_eq!(ChartConfig::from_json_str(&json).expect("round trip"), config);

    assert!(matches!(
        ChartConfig::from_json_str("{ not json"),
        Err(ChartError::InvalidConfig(_))
    ));
}
