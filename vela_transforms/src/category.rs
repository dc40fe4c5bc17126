// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category ordinals.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// Assigns 1-based ordinals to category names in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct CategoryIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl CategoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index with a predefined category order.
    ///
    /// Names seen later that are not in `names` are appended after them.
    pub fn with_order<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for name in names {
            index.ordinal(&name.into());
        }
        index
    }

    /// Returns the ordinal for `name`, registering it if it is new.
    pub fn ordinal(&mut self, name: &str) -> f64 {
        let i = match self.lookup.get(name) {
            Some(&i) => i,
            None => {
                let i = self.names.len();
                self.names.push(String::from(name));
                self.lookup.insert(String::from(name), i);
                i
            }
        };
        (i + 1) as f64
    }

    /// Returns the ordinal for `name` without registering it.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.lookup.get(name).map(|&i| (i + 1) as f64)
    }

    /// Returns category names in ordinal order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no category has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
