//! Shape detection and typed field access for raw content records.
//!
//! A raw record is either CMS-nested (`{ id, attributes: {..} }`), flat
//! (`{ id, title, .. }`) or something unusable. Each canonical field declares
//! an ordered list of [`Accessor`]s; resolution walks that list and keeps the
//! first value the field accepts.

use serde::Serialize;
use serde_json::{Map, Value};

/// Where a field may live in a raw record. Pointers use JSON Pointer syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// Inside `attributes` of a CMS-nested record; skipped for other shapes.
    Cms(&'static str),
    /// On a flat record, or inside `attributes` of a CMS record that mixes
    /// in flat field names.
    Flat(&'static str),
    /// On the top-level object, whatever the shape.
    Root(&'static str),
}

/// Which known shape a record was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cms,
    Flat,
    Unknown,
}

/// A raw record viewed through its detected shape.
#[derive(Debug, Clone, Copy)]
pub enum RawShape<'a> {
    Cms {
        root: &'a Map<String, Value>,
        attributes: &'a Map<String, Value>,
    },
    Flat(&'a Map<String, Value>),
    Unknown,
}

impl<'a> RawShape<'a> {
    /// Classify a record. An object whose `attributes` member is itself an
    /// object is CMS-nested; any other object is flat.
    pub fn classify(raw: &'a Value) -> Self {
        let Value::Object(root) = raw else {
            return RawShape::Unknown;
        };
        match root.get("attributes") {
            Some(Value::Object(attributes)) => RawShape::Cms {
                root,
                attributes,
            },
            _ => RawShape::Flat(root),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            RawShape::Cms {
                ..
            } => ShapeKind::Cms,
            RawShape::Flat(_) => ShapeKind::Flat,
            RawShape::Unknown => ShapeKind::Unknown,
        }
    }

    /// Look up one accessor. `null` counts as absent.
    pub fn get(&self, accessor: Accessor) -> Option<&'a Value> {
        let value = match (*self, accessor) {
            (
                RawShape::Cms {
                    attributes,
                    ..
                },
                Accessor::Cms(pointer) | Accessor::Flat(pointer),
            ) => pointer_in(attributes, pointer),
            (RawShape::Flat(root), Accessor::Flat(pointer) | Accessor::Root(pointer)) => {
                pointer_in(root, pointer)
            },
            (
                RawShape::Cms {
                    root,
                    ..
                },
                Accessor::Root(pointer),
            ) => pointer_in(root, pointer),
            (RawShape::Flat(_), Accessor::Cms(_)) | (RawShape::Unknown, _) => None,
        };
        value.filter(|value| !value.is_null())
    }

    /// Walk `accessors` in order and return the first value `accept` maps to
    /// `Some`.
    pub fn resolve<T>(
        &self,
        accessors: &[Accessor],
        mut accept: impl FnMut(&'a Value) -> Option<T>,
    ) -> Option<T> {
        accessors
            .iter()
            .filter_map(|accessor| self.get(*accessor))
            .find_map(|value| accept(value))
    }
}

fn pointer_in<'a>(object: &'a Map<String, Value>, pointer: &str) -> Option<&'a Value> {
    let mut segments = pointer.trim_start_matches('/').split('/');
    let first = segments.next()?;
    segments.try_fold(object.get(first)?, |value, segment| value.get(segment))
}

/// A trimmed, non-empty string value.
pub fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Follow `path` from `value` and read a non-empty string at the end.
pub fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .and_then(non_empty_str)
}
