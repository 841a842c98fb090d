use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use solace_instruments::scoring::{ScoreRange, SeverityBand};
use solace_instruments::{Instrument, all_instruments, find_instrument};

use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSummary {
    id: String,
    name: String,
    full_name: String,
    question_count: usize,
    max_score: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDetail {
    #[serde(flatten)]
    summary: InstrumentSummary,
    item_range: ScoreRange,
    severity_bands: Vec<SeverityBand>,
    question_ids: Vec<String>,
}

fn summary(instrument: &dyn Instrument) -> InstrumentSummary {
    InstrumentSummary {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        full_name: instrument.full_name().to_string(),
        question_count: instrument.question_count(),
        max_score: instrument.max_score(),
    }
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    Json(all_instruments().into_iter().map(summary).collect())
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = find_instrument(&id)?;

    Ok(Json(InstrumentDetail {
        summary: summary(instrument),
        item_range: instrument.item_range(),
        severity_bands: instrument.severity_bands().to_vec(),
        question_ids: instrument.question_ids(),
    }))
}
