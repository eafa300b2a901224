//! House attributes and the fixed-schema feature record handed to the model.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::common::error::{HouseError, HouseResult};

pub const BEDROOM_CHOICES: RangeInclusive<u32> = 1..=6;
pub const BATHROOM_CHOICES: RangeInclusive<u32> = 1..=6;
pub const FLOOR_CHOICES: RangeInclusive<u32> = 1..=3;
pub const WATERFRONT_CHOICES: RangeInclusive<u32> = 0..=1;
pub const VIEW_CHOICES: RangeInclusive<u32> = 0..=4;
pub const CONDITION_CHOICES: RangeInclusive<u32> = 1..=5;
pub const GRADE_CHOICES: RangeInclusive<u32> = 1..=13;

/// Column names of a [`FeatureRecord`], in canonical order.
pub const FEATURE_NAMES: [&str; 12] = [
    "bedrooms",
    "bathrooms",
    "sqft_living",
    "sqft_lot",
    "floors",
    "waterfront",
    "view",
    "condition",
    "grade",
    "lat",
    "long",
    "NumberofRooms",
];

/// Attributes a user supplies for one house.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HouseAttributes {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft_living: u32,
    pub sqft_lot: u32,
    pub floors: u32,
    pub waterfront: u32,
    pub view: u32,
    pub condition: u32,
    pub grade: u32,
    pub lat: f64,
    pub long: f64,
}

impl HouseAttributes {
    /// Check every attribute against the choices the form offers.
    pub fn validate(&self) -> HouseResult<()> {
        check_choice("bedrooms", self.bedrooms, BEDROOM_CHOICES)?;
        check_choice("bathrooms", self.bathrooms, BATHROOM_CHOICES)?;
        check_choice("floors", self.floors, FLOOR_CHOICES)?;
        check_choice("waterfront", self.waterfront, WATERFRONT_CHOICES)?;
        check_choice("view", self.view, VIEW_CHOICES)?;
        check_choice("condition", self.condition, CONDITION_CHOICES)?;
        check_choice("grade", self.grade, GRADE_CHOICES)?;

        if self.sqft_living == 0 {
            return Err(HouseError::invalid("sqft_living must be greater than zero"));
        }
        if self.sqft_lot == 0 {
            return Err(HouseError::invalid("sqft_lot must be greater than zero"));
        }
        if !(self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)) {
            return Err(HouseError::invalid("lat must be between -90 and 90"));
        }
        if !(self.long.is_finite() && (-180.0..=180.0).contains(&self.long)) {
            return Err(HouseError::invalid("long must be between -180 and 180"));
        }
        Ok(())
    }
}

fn check_choice(name: &str, value: u32, choices: RangeInclusive<u32>) -> HouseResult<()> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(HouseError::invalid(format!(
            "{name} must be one of {}..={}, got {value}",
            choices.start(),
            choices.end()
        )))
    }
}

/// One row of model input. Built fresh per request and dropped after inference.
///
/// The room total is derived here and cannot be set independently.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(flatten)]
    attrs: HouseAttributes,
    #[serde(rename = "NumberofRooms")]
    number_of_rooms: u32,
}

impl FeatureRecord {
    pub fn new(attrs: HouseAttributes) -> Self {
        let number_of_rooms = attrs.bedrooms.saturating_add(attrs.bathrooms);
        Self {
            attrs,
            number_of_rooms,
        }
    }

    pub fn attributes(&self) -> &HouseAttributes {
        &self.attrs
    }

    pub fn number_of_rooms(&self) -> u32 {
        self.number_of_rooms
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn values(&self) -> [f64; 12] {
        let a = &self.attrs;
        [
            f64::from(a.bedrooms),
            f64::from(a.bathrooms),
            f64::from(a.sqft_living),
            f64::from(a.sqft_lot),
            f64::from(a.floors),
            f64::from(a.waterfront),
            f64::from(a.view),
            f64::from(a.condition),
            f64::from(a.grade),
            a.lat,
            a.long,
            f64::from(self.number_of_rooms),
        ]
    }

    /// Named columns in canonical order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }

    /// Position of `name` in [`FEATURE_NAMES`].
    pub fn column_index(name: &str) -> Option<usize> {
        FEATURE_NAMES.iter().position(|candidate| *candidate == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample() -> HouseAttributes {
        HouseAttributes {
            bedrooms: 3,
            bathrooms: 2,
            sqft_living: 1500,
            sqft_lot: 5000,
            floors: 1,
            waterfront: 0,
            view: 0,
            condition: 3,
            grade: 7,
            lat: 47.5112,
            long: -122.257,
        }
    }

    #[test]
    fn rooms_are_bedrooms_plus_bathrooms() {
        for bedrooms in BEDROOM_CHOICES {
            for bathrooms in BATHROOM_CHOICES {
                let record = FeatureRecord::new(HouseAttributes {
                    bedrooms,
                    bathrooms,
                    ..sample()
                });
                assert_eq!(record.number_of_rooms(), bedrooms + bathrooms);
                assert_eq!(record.values()[11], f64::from(bedrooms + bathrooms));
            }
        }
    }

    #[test]
    fn record_has_exactly_the_twelve_columns() {
        let record = FeatureRecord::new(sample());
        let json = serde_json::to_value(&record).unwrap();
        let keys: BTreeSet<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = FEATURE_NAMES.into_iter().collect();
        assert_eq!(keys, expected);

        let names: Vec<&str> = record.columns().map(|(name, _)| name).collect();
        assert_eq!(names, FEATURE_NAMES);
    }

    #[test]
    fn serialized_values_match_columns() {
        let record = FeatureRecord::new(sample());
        let json = serde_json::to_value(&record).unwrap();
        for (name, value) in record.columns() {
            assert_eq!(json[name].as_f64(), Some(value), "column {name}");
        }
    }

    #[test]
    fn column_index_follows_canonical_order() {
        assert_eq!(FeatureRecord::column_index("bedrooms"), Some(0));
        assert_eq!(FeatureRecord::column_index("NumberofRooms"), Some(11));
        assert_eq!(FeatureRecord::column_index("price"), None);
    }

    #[test]
    fn validate_accepts_form_defaults() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_set_values() {
        let cases = [
            HouseAttributes { bedrooms: 7, ..sample() },
            HouseAttributes { bathrooms: 0, ..sample() },
            HouseAttributes { floors: 4, ..sample() },
            HouseAttributes { waterfront: 2, ..sample() },
            HouseAttributes { view: 5, ..sample() },
            HouseAttributes { condition: 0, ..sample() },
            HouseAttributes { grade: 14, ..sample() },
            HouseAttributes { sqft_living: 0, ..sample() },
            HouseAttributes { lat: 91.0, ..sample() },
            HouseAttributes { long: f64::NAN, ..sample() },
        ];
        for case in cases {
            let err = case.validate().unwrap_err();
            assert!(err.is_client_error(), "{case:?}");
        }
    }
}
