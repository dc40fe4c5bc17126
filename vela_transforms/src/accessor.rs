// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field accessors over raw records.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;

use serde_json::Value;

/// Reads one field out of a raw record.
#[derive(Clone)]
pub enum Accessor {
    /// A dotted key path (`"stats.total"`); numeric segments index into arrays.
    Key(String),
    /// An array element.
    Index(usize),
    /// A caller function over the whole record.
    Fn(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl Accessor {
    /// Creates a key-path accessor.
    pub fn key(path: impl Into<String>) -> Self {
        Self::Key(path.into())
    }

    /// Creates a function accessor.
    pub fn func(f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(f))
    }

    /// Reads the field. `None` means the field is absent.
    pub fn get<'a>(&self, record: &'a Value) -> Option<Cow<'a, Value>> {
        match self {
            Self::Key(path) => lookup_path(record, path).map(Cow::Borrowed),
            Self::Index(i) => record.as_array()?.get(*i).map(Cow::Borrowed),
            Self::Fn(f) => match f(record) {
                Value::Null => None,
                v => Some(Cow::Owned(v)),
            },
        }
    }
}

impl From<&str> for Accessor {
    fn from(value: &str) -> Self {
        Self::key(value)
    }
}

impl From<usize> for Accessor {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl core::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Key(path) => f.debug_tuple("Key").field(path).finish(),
            Self::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Self::Fn(_) => f.write_str("Fn(<fn>)"),
        }
    }
}

fn lookup_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(v) = record.as_object().and_then(|o| o.get(path)) {
        return Some(v);
    }
    let mut cur = record;
    for segment in path.split('.') {
        cur = match cur {
            Value::Object(o) => o.get(segment)?,
            Value::Array(a) => a.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(cur)
}
