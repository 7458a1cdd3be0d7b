//! End-to-end properties of the filter/aggregate/chart pipeline against the
//! fallback dataset: the concrete selection scenarios, idempotence, and the
//! frozen-at-startup dropdown options.

use std::sync::Arc;

use critterdash::charts::{render, ChartError};
use critterdash::config::Config;
use critterdash::model::{fallback_dataset, Criterion};
use critterdash::provider::DatasetProvider;
use critterdash::server::{router, AppState};

// ---------------------------------------------------------------------------
// Selection scenarios
// ---------------------------------------------------------------------------

#[test]
fn grass_by_overall_score_ranks_venusaur_mega_best() {
    let ds = fallback_dataset();
    let rendered = render(&ds, "Grass", Criterion::OverallScore).unwrap();
    let names: Vec<&str> = rendered.generation_chart.rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bulbasaur", "Ivysaur", "Venusaur", "VenusaurMega Venusaur"]);
    assert_eq!(rendered.best.name, "VenusaurMega Venusaur");
    assert_eq!(rendered.best.total, 625);
}

#[test]
fn fire_by_hp_selects_charmander() {
    let ds = fallback_dataset();
    let rendered = render(&ds, "Fire", Criterion::Hp).unwrap();
    let names: Vec<&str> = rendered.generation_chart.rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Charmander"]);
    assert_eq!(rendered.best.hp, 39);
}

#[test]
fn water_has_no_matches_and_errors() {
    let ds = fallback_dataset();
    let err = render(&ds, "Water", Criterion::OverallScore).unwrap_err();
    assert!(matches!(err, ChartError::EmptyCategory { .. }));
}

// ---------------------------------------------------------------------------
// Structural properties
// ---------------------------------------------------------------------------

#[test]
fn identical_inputs_render_identical_specs() {
    let ds = fallback_dataset();
    let first = render(&ds, "Grass", Criterion::Speed).unwrap();
    let second = render(&ds, "Grass", Criterion::Speed).unwrap();
    assert_eq!(first, second);
}

#[test]
fn charts_differ_only_in_color_grouping_and_title() {
    let ds = fallback_dataset();
    let rendered = render(&ds, "Grass", Criterion::Defense).unwrap();
    let (gen, leg) = (rendered.generation_chart, rendered.legendary_chart);
    assert_eq!(gen.rows, leg.rows);
    assert_eq!(gen.x_field, leg.x_field);
    assert_eq!(gen.y_field, leg.y_field);
    assert_eq!(gen.color_field, "generation");
    assert_eq!(leg.color_field, "legendary");
}

// ---------------------------------------------------------------------------
// Startup options are computed once and never refreshed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn options_are_frozen_at_startup() {
    // No table configured: startup options come from the fallback dataset.
    let provider = DatasetProvider::new(Config::default());
    let state = Arc::new(AppState::new(provider).await);
    assert_eq!(state.category_options().to_vec(), vec!["Fire", "Grass"]);
    // The router is built over the same frozen state; a later change in the
    // data source cannot alter the options it serves.
    let _app = router(state.clone());
    assert_eq!(state.category_options().to_vec(), vec!["Fire", "Grass"]);
}
