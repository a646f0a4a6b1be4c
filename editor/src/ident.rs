//! Element identity: every rendered dot or shape carries an id of the form
//! `svgeditor--<kind>-<key>`, which the host hands back with pointer events so
//! they can be routed to the right key.

#[cfg(test)]
#[path = "ident_test.rs"]
mod ident_test;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::consts::ELEMENT_ID_PREFIX;
use crate::doc::ShapeKind;
use crate::keyed::Key;

const DOT_NAME: &str = "dot";

/// What a rendered element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A control dot.
    Dot,
    /// A committed shape of the given kind.
    Shape(ShapeKind),
}

impl ElementKind {
    /// The name used in element ids.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => DOT_NAME,
            Self::Shape(kind) => kind.as_str(),
        }
    }
}

/// Identifier of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub kind: ElementKind,
    pub key: Key,
}

impl ElementId {
    #[must_use]
    pub fn dot(key: Key) -> Self {
        Self { kind: ElementKind::Dot, key }
    }

    #[must_use]
    pub fn shape(kind: ShapeKind, key: Key) -> Self {
        Self { kind: ElementKind::Shape(kind), key }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ELEMENT_ID_PREFIX}{}-{}", self.kind.as_str(), self.key)
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when an element id cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    #[error("element id {0:?} has no `<kind>-<key>` separator")]
    MissingSeparator(String),
    #[error("element id {0:?} names an unknown kind")]
    UnknownKind(String),
    #[error("element id {0:?} has a non-numeric key")]
    InvalidKey(String),
}

/// Parses `svgeditor--<kind>-<key>`; the prefix is optional.
impl FromStr for ElementId {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix(ELEMENT_ID_PREFIX).unwrap_or(s);
        let Some((kind, key)) = body.rsplit_once('-') else {
            return Err(IdentError::MissingSeparator(s.to_owned()));
        };

        let kind = if kind == DOT_NAME {
            ElementKind::Dot
        } else {
            match kind.parse::<ShapeKind>() {
                Ok(shape) => ElementKind::Shape(shape),
                Err(_) => return Err(IdentError::UnknownKind(s.to_owned())),
            }
        };

        let key = key.parse::<Key>().map_err(|_| IdentError::InvalidKey(s.to_owned()))?;
        Ok(Self { kind, key })
    }
}
