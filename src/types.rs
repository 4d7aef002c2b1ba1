/**
 * RecoSplit
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::Deserialize as _;
use serde_derive::{Deserialize, Serialize};

/// Number of interactions per (dense) identifier, ordered by identifier.
pub type CountTable = BTreeMap<u32, usize>;

/// A review as it appears in the raw input. Identifiers are opaque, numbers are accepted
/// and kept in their textual form.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawRecord {
    #[serde(deserialize_with = "opaque_identifier")]
    pub uid: String,
    #[serde(deserialize_with = "opaque_identifier")]
    pub place: String,
    pub rating: f64,
}

impl RawRecord {
    pub fn new(uid: &str, place: &str, rating: f64) -> Self {
        RawRecord { uid: uid.to_owned(), place: place.to_owned(), rating }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

fn opaque_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de> {

    let identifier = match Identifier::deserialize(deserializer)? {
        Identifier::Text(text) => text,
        Identifier::Signed(value) => value.to_string(),
        Identifier::Unsigned(value) => value.to_string(),
        Identifier::Float(value) => value.to_string(),
    };

    Ok(identifier)
}

/// A deduplicated, binarized interaction between dense user and item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interaction {
    pub user: u32,
    pub item: u32,
    pub rating: u8,
}

impl Interaction {
    pub fn new(user: u32, item: u32, rating: u8) -> Self {
        Interaction { user, item, rating }
    }
}

/// A row of the output files. Field names become the CSV header.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumerizedInteraction {
    pub uid: u32,
    pub sid: u32,
    pub value: u8,
}

/// Converts a numeric score into implicit feedback.
pub fn binarize(rating: f64, threshold: f64) -> u8 {
    if rating > threshold { 1 } else { 0 }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn binarization_threshold_is_inclusive() {
        assert_eq!(binarize(30.0, 30.0), 0);
        assert_eq!(binarize(31.0, 30.0), 1);
        assert_eq!(binarize(0.0, 30.0), 0);
        assert_eq!(binarize(50.0, 30.0), 1);
    }

    #[test]
    fn identifiers_may_be_numbers() {
        let record: RawRecord =
            serde_json::from_str(r#"{"uid": 17, "place": "louvre", "rating": 40}"#).unwrap();

        assert_eq!(record, RawRecord::new("17", "louvre", 40.0));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let record: RawRecord = serde_json::from_str(
            r#"{"uid": "a", "place": "b", "rating": 10, "review": "nice"}"#).unwrap();

        assert_eq!(record.rating, 10.0);
    }

    #[test]
    fn missing_rating_is_an_error() {
        let result: Result<RawRecord, _> = serde_json::from_str(r#"{"uid": "a", "place": "b"}"#);
        assert!(result.is_err());
    }
}
