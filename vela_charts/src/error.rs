// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error type of the chart builders.

use vela_transforms::{DataFormatError, InvalidStackError};

use crate::domain::EmptyDomainError;
use crate::scale::ScaleError;

/// Any failure while building a chart.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// The input data could not be normalized.
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
    /// Stacked series disagree on their keys.
    #[error(transparent)]
    InvalidStack(#[from] InvalidStackError),
    /// An axis had nothing to scan.
    #[error(transparent)]
    EmptyDomain(#[from] EmptyDomainError),
    /// A scale could not be built or could not map a value.
    #[error(transparent)]
    Scale(#[from] ScaleError),
}
