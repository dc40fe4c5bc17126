// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-datum and per-series properties.
//!
//! A property is either a literal or a callback. Resolvers evaluate callbacks once per datum into
//! plain tables before any geometry is computed, so geometry code never branches on them.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use vela_core::DataPoint;

/// The datum a property or primitive is evaluated for.
#[derive(Clone, Copy, Debug)]
pub struct DatumContext<'a> {
    /// The datum.
    pub datum: &'a DataPoint,
    /// Position of the datum within `data`.
    pub index: usize,
    /// The whole series.
    pub data: &'a [DataPoint],
}

impl<'a> DatumContext<'a> {
    /// Creates the context for `data[index]`.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn new(data: &'a [DataPoint], index: usize) -> Option<Self> {
        Some(Self {
            datum: data.get(index)?,
            index,
            data,
        })
    }

    /// Iterates the contexts of every datum in `data`.
    pub fn all(data: &'a [DataPoint]) -> impl Iterator<Item = Self> + 'a {
        data.iter().enumerate().map(move |(index, datum)| Self {
            datum,
            index,
            data,
        })
    }
}

/// A per-datum property.
pub enum DatumProp<T> {
    /// The same value for every datum.
    Value(T),
    /// A value computed from the datum.
    Fn(Arc<dyn Fn(&DatumContext<'_>) -> T + Send + Sync>),
}

impl<T> DatumProp<T> {
    /// Wraps a callback.
    pub fn func(f: impl Fn(&DatumContext<'_>) -> T + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(f))
    }
}

impl<T: Clone> DatumProp<T> {
    /// Evaluates the property for one datum.
    pub fn resolve(&self, ctx: &DatumContext<'_>) -> T {
        match self {
            Self::Value(v) => v.clone(),
            Self::Fn(f) => f(ctx),
        }
    }

    /// Evaluates the property for every datum of `data`, in order.
    pub fn resolve_all(&self, data: &[DataPoint]) -> Vec<T> {
        DatumContext::all(data)
            .map(|ctx| self.resolve(&ctx))
            .collect()
    }
}

impl DatumProp<f64> {
    /// Reads a numeric metadata field of the datum, or `default` when it is absent.
    pub fn field(key: impl Into<String>, default: f64) -> Self {
        let key = key.into();
        Self::func(move |ctx| {
            ctx.datum
                .field(&key)
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(default)
        })
    }
}

impl<T> From<T> for DatumProp<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Clone> Clone for DatumProp<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(v) => Self::Value(v.clone()),
            Self::Fn(f) => Self::Fn(f.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DatumProp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Fn(_) => f.write_str("Fn(<fn>)"),
        }
    }
}

/// The series a whole-series property or primitive is evaluated for.
#[derive(Clone, Copy, Debug)]
pub struct SeriesContext<'a> {
    /// The series points.
    pub data: &'a [DataPoint],
    /// Position of the series among its siblings (its stack index when stacked).
    pub index: usize,
}

/// A per-series property.
pub enum SeriesProp<T> {
    /// A literal value.
    Value(T),
    /// A value computed from the series.
    Fn(Arc<dyn Fn(&SeriesContext<'_>) -> T + Send + Sync>),
}

impl<T> SeriesProp<T> {
    /// Wraps a callback.
    pub fn func(f: impl Fn(&SeriesContext<'_>) -> T + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(f))
    }
}

impl<T: Clone> SeriesProp<T> {
    /// Evaluates the property.
    pub fn resolve(&self, ctx: &SeriesContext<'_>) -> T {
        match self {
            Self::Value(v) => v.clone(),
            Self::Fn(f) => f(ctx),
        }
    }
}

impl<T> From<T> for SeriesProp<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Clone> Clone for SeriesProp<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(v) => Self::Value(v.clone()),
            Self::Fn(f) => Self::Fn(f.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SeriesProp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Fn(_) => f.write_str("Fn(<fn>)"),
        }
    }
}
