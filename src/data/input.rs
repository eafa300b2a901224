//! Raw widget values as posted by the page.
//!
//! Every field is optional text: the page may submit blanks, and nothing is
//! interpreted until the user has actually clicked submit.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::{HouseError, HouseResult};

use super::domain::{FeatureRecord, HouseAttributes};

/// Current value of every named widget plus the submit click counter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "bedrooms-dropdown", default)]
    pub bedrooms: Option<String>,
    #[serde(rename = "bathrooms-dropdown", default)]
    pub bathrooms: Option<String>,
    #[serde(rename = "sqft-interior-input", default)]
    pub sqft_living: Option<String>,
    #[serde(rename = "sqft-land-input", default)]
    pub sqft_lot: Option<String>,
    #[serde(rename = "floors-dropdown", default)]
    pub floors: Option<String>,
    #[serde(rename = "waterfront-dropdown", default)]
    pub waterfront: Option<String>,
    #[serde(rename = "view-dropdown", default)]
    pub view: Option<String>,
    #[serde(rename = "condition-dropdown", default)]
    pub condition: Option<String>,
    #[serde(rename = "grade-dropdown", default)]
    pub grade: Option<String>,
    #[serde(rename = "latitude", default)]
    pub lat: Option<String>,
    #[serde(rename = "longitude", default)]
    pub long: Option<String>,
    #[serde(default)]
    pub n_clicks: Option<String>,
}

impl FormInput {
    /// Submit click count; a missing or blank counter means the page was never submitted.
    pub fn clicks(&self) -> HouseResult<u32> {
        match non_blank(&self.n_clicks) {
            None => Ok(0),
            Some(raw) => raw
                .parse()
                .map_err(|_| HouseError::invalid(format!("n_clicks must be a count, got `{raw}`"))),
        }
    }

    /// Current text of the widget with the given page id.
    pub fn widget(&self, id: &str) -> Option<&str> {
        match id {
            "bedrooms-dropdown" => self.bedrooms.as_deref(),
            "bathrooms-dropdown" => self.bathrooms.as_deref(),
            "sqft-interior-input" => self.sqft_living.as_deref(),
            "sqft-land-input" => self.sqft_lot.as_deref(),
            "floors-dropdown" => self.floors.as_deref(),
            "waterfront-dropdown" => self.waterfront.as_deref(),
            "view-dropdown" => self.view.as_deref(),
            "condition-dropdown" => self.condition.as_deref(),
            "grade-dropdown" => self.grade.as_deref(),
            "latitude" => self.lat.as_deref(),
            "longitude" => self.long.as_deref(),
            _ => None,
        }
    }

    /// Set a widget by page id. Returns false for ids the form does not have.
    pub fn set_widget(&mut self, id: &str, value: impl Into<String>) -> bool {
        let slot = match id {
            "bedrooms-dropdown" => &mut self.bedrooms,
            "bathrooms-dropdown" => &mut self.bathrooms,
            "sqft-interior-input" => &mut self.sqft_living,
            "sqft-land-input" => &mut self.sqft_lot,
            "floors-dropdown" => &mut self.floors,
            "waterfront-dropdown" => &mut self.waterfront,
            "view-dropdown" => &mut self.view,
            "condition-dropdown" => &mut self.condition,
            "grade-dropdown" => &mut self.grade,
            "latitude" => &mut self.lat,
            "longitude" => &mut self.long,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Parse and validate every widget into house attributes.
    pub fn to_attributes(&self) -> HouseResult<HouseAttributes> {
        let attrs = HouseAttributes {
            bedrooms: whole("bedrooms", &self.bedrooms)?,
            bathrooms: whole("bathrooms", &self.bathrooms)?,
            sqft_living: whole("sqft_living", &self.sqft_living)?,
            sqft_lot: whole("sqft_lot", &self.sqft_lot)?,
            floors: whole("floors", &self.floors)?,
            waterfront: whole("waterfront", &self.waterfront)?,
            view: whole("view", &self.view)?,
            condition: whole("condition", &self.condition)?,
            grade: whole("grade", &self.grade)?,
            lat: number("lat", &self.lat)?,
            long: number("long", &self.long)?,
        };
        attrs.validate()?;
        Ok(attrs)
    }

    /// Parse, validate and derive the feature record.
    pub fn to_record(&self) -> HouseResult<FeatureRecord> {
        self.to_attributes().map(FeatureRecord::new)
    }
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(name: &str, raw: &'a Option<String>) -> HouseResult<&'a str> {
    non_blank(raw).ok_or_else(|| HouseError::invalid(format!("{name} is required")))
}

fn number(name: &str, raw: &Option<String>) -> HouseResult<f64> {
    let text = required(name, raw)?;
    f64::from_str(text)
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| HouseError::invalid(format!("{name} must be a number, got `{text}`")))
}

// Number inputs may post "1500.0"; accept it as long as it is whole.
fn whole(name: &str, raw: &Option<String>) -> HouseResult<u32> {
    let value = number(name, raw)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(HouseError::invalid(format!(
            "{name} must be a non-negative whole number, got {value}"
        )));
    }
    Ok(value as u32)
}
