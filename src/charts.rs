//! Filtering, best-record lookup, and chart specification building.
//!
//! Pure functions over an already-loaded dataset; the HTTP layer decides
//! how errors surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Creature, Criterion, Dataset};

pub const CHART_TEMPLATE: &str = "plotly_dark";
pub const CHART_HEIGHT: u32 = 600;
pub const TEXT_SIZE: u32 = 20;
pub const UNIFORM_TEXT_MIN_SIZE: u32 = 15;
pub const TRANSITION_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("no records match category {category:?}")]
    EmptyCategory { category: String },
    #[error("unknown ranking criterion {0:?}")]
    UnknownCriterion(String),
}

/// Declarative description of one ranked bar chart, handed to the plotting
/// collaborator as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub color_field: String,
    pub template: String,
    pub height: u32,
    pub text_size: u32,
    pub uniform_text_min_size: u32,
    pub transition_ms: u32,
    pub rows: Vec<Creature>,
}

/// The two charts plus the best record, recomputed on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub generation_chart: ChartSpec,
    pub legendary_chart: ChartSpec,
    pub best: Creature,
}

/// Records whose primary category matches, in dataset order.
pub fn filter_by_category(dataset: &Dataset, category: &str) -> Vec<Creature> {
    dataset.rows.iter().filter(|c| c.type_1 == category).cloned().collect()
}

/// Record with the maximum criterion value. Ties go to the first occurrence
/// in dataset order.
pub fn best_record<'a>(rows: &'a [Creature], criterion: Criterion) -> Option<&'a Creature> {
    rows.iter().fold(None, |best, c| match best {
        Some(b) if criterion.value_of(c) > criterion.value_of(b) => Some(c),
        Some(b) => Some(b),
        None => Some(c),
    })
}

fn bar_spec(title: &str, criterion: Criterion, color_field: &str, rows: &[Creature]) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        x_field: criterion.as_str().to_string(),
        y_field: "name".to_string(),
        color_field: color_field.to_string(),
        template: CHART_TEMPLATE.to_string(),
        height: CHART_HEIGHT,
        text_size: TEXT_SIZE,
        uniform_text_min_size: UNIFORM_TEXT_MIN_SIZE,
        transition_ms: TRANSITION_MS,
        rows: rows.to_vec(),
    }
}

/// Filter to the category, find the best record, and build both chart
/// specs over the identical filtered row set.
pub fn render(dataset: &Dataset, category: &str, criterion: Criterion) -> Result<Rendered, ChartError> {
    let rows = filter_by_category(dataset, category);
    let best = best_record(&rows, criterion)
        .cloned()
        .ok_or_else(|| ChartError::EmptyCategory { category: category.to_string() })?;
    Ok(Rendered {
        generation_chart: bar_spec("Six generations of creatures", criterion, "generation", &rows),
        legendary_chart: bar_spec("Legendary and non-legendary creatures", criterion, "legendary", &rows),
        best,
    })
}
