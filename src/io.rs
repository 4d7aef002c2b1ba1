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

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::PreprocessError;
use crate::types::{NumerizedInteraction, RawRecord};

/// Reads the raw reviews from a file holding either a JSON array of objects or one JSON
/// object per line.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>, PreprocessError> {
    let content = fs::read_to_string(path).map_err(|error| PreprocessError::io(path, error))?;
    parse_raw_records(&content)
}

pub fn parse_raw_records(content: &str) -> Result<Vec<RawRecord>, PreprocessError> {

    if content.trim_start().starts_with('[') {
        let records: Vec<RawRecord> = serde_json::from_str(content)?;
        return Ok(records);
    }

    let records = serde_json::Deserializer::from_str(content)
        .into_iter::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

pub fn create_output_dir(dir: &Path) -> Result<(), PreprocessError> {
    fs::create_dir_all(dir).map_err(|error| PreprocessError::io(dir, error))
}

/// Writes one identifier per line.
pub fn write_identifiers(path: &Path, identifiers: &[u32]) -> Result<(), PreprocessError> {

    let file = File::create(path).map_err(|error| PreprocessError::io(path, error))?;
    let mut out = BufWriter::new(file);

    for identifier in identifiers {
        writeln!(out, "{}", identifier).map_err(|error| PreprocessError::io(path, error))?;
    }

    out.flush().map_err(|error| PreprocessError::io(path, error))
}

/// Writes `uid,sid,value` rows with a header line. The header is written for empty
/// outputs as well.
pub fn write_interactions(path: &Path, interactions: &[NumerizedInteraction])
    -> Result<(), PreprocessError> {

    let mut writer = csv::Writer::from_path(path)?;

    if interactions.is_empty() {
        writer.write_record(&["uid", "sid", "value"])?;
    }

    for interaction in interactions {
        writer.serialize(interaction)?;
    }

    writer.flush().map_err(|error| PreprocessError::io(path, error))
}
