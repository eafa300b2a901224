//! Prediction handler: feature record in, formatted price out.

use std::time::Instant;

use tracing::{debug, info};

use crate::common::error::{HouseError, HouseResult};
use crate::common::{money, time};
use crate::data::domain::{FeatureRecord, HouseAttributes};
use crate::data::input::FormInput;
use crate::model::domain::LoadedModel;

use super::domain::Prediction;

/// Run the model on one validated house.
pub fn predict(model: &LoadedModel, attrs: HouseAttributes) -> HouseResult<Prediction> {
    attrs.validate()?;
    predict_record(model, FeatureRecord::new(attrs))
}

/// Run the model on an already assembled record.
pub fn predict_record(model: &LoadedModel, record: FeatureRecord) -> HouseResult<Prediction> {
    let start = Instant::now();
    debug!(ev = "record_built", rooms = record.number_of_rooms(), "feature record assembled");

    let outputs = model.regressor().predict(std::slice::from_ref(&record))?;
    let price = outputs
        .first()
        .copied()
        .ok_or_else(|| HouseError::inference("model returned no value"))?;
    let text = money::prediction_text(price)?;

    let latency_ms = time::elapsed_ms(start);
    info!(
        ev = "predict",
        code = 0u32,
        model = model.version.short_fingerprint(),
        dur_ms = latency_ms,
        price,
        "prediction served"
    );
    Ok(Prediction {
        price,
        text,
        model: model.version.fingerprint.clone(),
        latency_ms,
    })
}

/// Output-region text for the current widget values.
///
/// Before the first submit (`n_clicks == 0`) the region stays empty and the
/// widgets are not even read.
pub fn update_prediction(model: &LoadedModel, n_clicks: u32, widgets: &FormInput) -> HouseResult<String> {
    if n_clicks == 0 {
        return Ok(String::new());
    }
    let record = widgets.to_record()?;
    predict_record(model, record).map(|prediction| prediction.text)
}
