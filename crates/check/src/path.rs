//! Dotted path resolution with wildcard fan-out
//!
//! A path such as `data.products.*.price` is split on `.` into segments:
//!
//! - `*` fans out over every element of a sequence (appending `[i]`) or every
//!   entry of a mapping (appending `.key`), in order.
//! - a numeric segment indexes a sequence (appending `[i]`); on a mapping it is
//!   an ordinary key.
//! - any other segment is a mapping key (appending `.key`).
//!
//! Resolution never skips: a missing key, an out-of-range index or a segment
//! applied to a scalar is a [`StructuralError`].

use crate::error::{StructuralError, display_path};
use crate::value::type_name;
use serde_json::Value;

/// One value reached by a path, with the concrete trail that reached it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// The value at the end of the path.
    pub value: &'a Value,
    /// Human-readable concrete path, e.g. `data.products[1].price`.
    pub path: String,
}

impl<'a> Resolved<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn key(&self, value: &'a Value, key: &str) -> Self {
        Self {
            value,
            path: self.key_path(key),
        }
    }

    fn index(&self, value: &'a Value, index: usize) -> Self {
        Self {
            value,
            path: format!("{}[{index}]", self.path),
        }
    }
}

/// A parsed path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    /// `*`
    Wildcard,
    /// Any other segment; numeric ones index sequences.
    Key(&'p str),
}

impl<'p> Segment<'p> {
    fn parse(raw: &'p str) -> Self {
        if raw == "*" {
            Self::Wildcard
        } else {
            Self::Key(raw)
        }
    }
}

/// Splits a path into segments. The empty path has no segments.
pub fn segments(path: &str) -> Vec<Segment<'_>> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').map(Segment::parse).collect()
}

/// Returns true if the path contains a `*` segment.
pub fn has_wildcard(path: &str) -> bool {
    segments(path).contains(&Segment::Wildcard)
}

/// Resolves `path` against `root`, returning every match in order.
///
/// The empty path resolves to the root itself with an empty concrete path.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<Vec<Resolved<'a>>, StructuralError> {
    let mut current = vec![Resolved::root(root)];

    for segment in segments(path) {
        let mut next = Vec::with_capacity(current.len());
        for item in &current {
            step(item, segment, &mut next)?;
        }
        current = next;
    }

    Ok(current)
}

fn step<'a>(
    item: &Resolved<'a>,
    segment: Segment<'_>,
    out: &mut Vec<Resolved<'a>>,
) -> Result<(), StructuralError> {
    match (segment, item.value) {
        (Segment::Wildcard, Value::Array(items)) => {
            out.extend(items.iter().enumerate().map(|(i, v)| item.index(v, i)));
            Ok(())
        }
        (Segment::Wildcard, Value::Object(map)) => {
            out.extend(map.iter().map(|(k, v)| item.key(v, k)));
            Ok(())
        }
        (Segment::Wildcard, other) => Err(StructuralError::WildcardOnScalar {
            path: display_path(&item.path),
            found: type_name(other),
        }),
        (Segment::Key(key), Value::Object(map)) => match map.get(key) {
            Some(value) => {
                out.push(item.key(value, key));
                Ok(())
            }
            None => Err(StructuralError::MissingKey {
                path: item.key_path(key),
            }),
        },
        (Segment::Key(key), Value::Array(items)) => {
            if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
                return Err(StructuralError::InvalidIndex {
                    path: display_path(&item.path),
                    segment: key.to_owned(),
                });
            }
            match key.parse::<usize>().ok().and_then(|i| Some((i, items.get(i)?))) {
                Some((index, value)) => {
                    out.push(item.index(value, index));
                    Ok(())
                }
                None => Err(StructuralError::IndexOutOfRange {
                    path: format!("{}[{key}]", item.path),
                    index: key.to_owned(),
                    len: items.len(),
                }),
            }
        }
        (Segment::Key(key), other) => Err(StructuralError::NotTraversable {
            path: display_path(&item.path),
            segment: key.to_owned(),
            found: type_name(other),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
