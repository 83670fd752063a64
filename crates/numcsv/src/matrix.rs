// Dweve numcsv - Tolerant Numeric CSV Reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Matrix assembly from parsed records.

use crate::error::CsvResult;
use ndarray::{Array2, ErrorKind, ShapeError};

/// Flatten records into a dense row-major `records.len() × columns` matrix.
///
/// Fails with [`CsvError::Shape`](crate::CsvError::Shape) if any record does
/// not have exactly `columns` values.
pub(crate) fn to_matrix(records: Vec<Vec<f64>>, columns: usize) -> CsvResult<Array2<f64>> {
    let rows = records.len();
    if records.iter().any(|record| record.len() != columns) {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }
    let values: Vec<f64> = records.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((rows, columns), values)?)
}
