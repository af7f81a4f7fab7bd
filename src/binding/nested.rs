// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed access to nested fields of schema-less objects.

use crate::error::{BinderError, Result};
use serde_json::{Map, Value};
use std::fmt;

/// A fixed path of object keys, e.g. `spec.template.spec.containers`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldPath(&'static [&'static str]);

impl FieldPath {
    pub const fn new(segments: &'static [&'static str]) -> Self {
        FieldPath(segments)
    }

    pub fn segments(&self) -> &'static [&'static str] {
        self.0
    }

    /// Read the list at this path.
    ///
    /// `Ok(None)` when any segment is missing or null. A segment holding
    /// something other than an object, or a leaf that is not a list, is an
    /// `InvalidShape` error.
    pub fn get_slice<'a>(&self, root: &'a Value) -> Result<Option<&'a Vec<Value>>> {
        let mut current = root;
        for (depth, segment) in self.0.iter().enumerate() {
            let map = current
                .as_object()
                .ok_or_else(|| self.invalid(depth, "an object"))?;
            match map.get(*segment) {
                Some(Value::Null) | None => return Ok(None),
                Some(next) => current = next,
            }
        }

        match current {
            Value::Array(items) => Ok(Some(items)),
            _ => Err(self.invalid(self.0.len(), "a list")),
        }
    }

    /// Write `items` at this path, creating missing intermediate objects.
    pub fn set_slice(&self, root: &mut Value, items: Vec<Value>) -> Result<()> {
        let Some((leaf, parents)) = self.0.split_last() else {
            *root = Value::Array(items);
            return Ok(());
        };

        let mut current = root;
        for (depth, segment) in parents.iter().enumerate() {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            let map = current
                .as_object_mut()
                .ok_or_else(|| self.invalid(depth, "an object"))?;
            let next = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = next;
        }

        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        current
            .as_object_mut()
            .ok_or_else(|| self.invalid(parents.len(), "an object"))?
            .insert(leaf.to_string(), Value::Array(items));
        Ok(())
    }

    fn invalid(&self, depth: usize, expected: &'static str) -> BinderError {
        BinderError::InvalidShape {
            path: self.0[..depth].join("."),
            expected,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
