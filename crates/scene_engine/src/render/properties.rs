//! Named property maps for materials and lights
//!
//! Capabilities are configured from loose maps (`"diffuse" => [0.8, 0.2, 0.2]`,
//! `"shininess" => 90`) that usually come from a config file. A malformed map
//! is a construction-time error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::Vec3;

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Scalar such as shininess
    Scalar(f32),
    /// Vector such as a color or direction
    Vector(Vec<f32>),
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl<const N: usize> From<[f32; N]> for PropertyValue {
    fn from(value: [f32; N]) -> Self {
        Self::Vector(value.to_vec())
    }
}

/// Property name to value
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Build a [`PropertyMap`] from `(name, value)` pairs
pub fn property_map<K, V, I>(entries: I) -> PropertyMap
where
    K: Into<String>,
    V: Into<PropertyValue>,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Malformed property map
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// Required key not present
    #[error("'{owner}' is missing property '{key}'")]
    Missing {
        /// Capability name
        owner: String,
        /// Property key
        key: String,
    },

    /// Vector given where a scalar was expected
    #[error("'{owner}' property '{key}' must be a scalar")]
    ExpectedScalar {
        /// Capability name
        owner: String,
        /// Property key
        key: String,
    },

    /// Scalar given where a vector was expected
    #[error("'{owner}' property '{key}' must be a vector")]
    ExpectedVector {
        /// Capability name
        owner: String,
        /// Property key
        key: String,
    },

    /// Vector of the wrong length
    #[error("'{owner}' property '{key}' needs {expected} components, got {found}")]
    WrongArity {
        /// Capability name
        owner: String,
        /// Property key
        key: String,
        /// Required length
        expected: usize,
        /// Supplied length
        found: usize,
    },
}

/// Typed accessor over a property map, naming its owner in errors
pub(crate) struct PropertyReader<'a> {
    owner: &'a str,
    map: &'a PropertyMap,
}

impl<'a> PropertyReader<'a> {
    pub(crate) const fn new(owner: &'a str, map: &'a PropertyMap) -> Self {
        Self { owner, map }
    }

    fn get(&self, key: &str) -> Result<&'a PropertyValue, PropertyError> {
        self.map.get(key).ok_or_else(|| PropertyError::Missing {
            owner: self.owner.to_string(),
            key: key.to_string(),
        })
    }

    pub(crate) fn scalar(&self, key: &str) -> Result<f32, PropertyError> {
        match self.get(key)? {
            PropertyValue::Scalar(v) => Ok(*v),
            PropertyValue::Vector(_) => Err(PropertyError::ExpectedScalar {
                owner: self.owner.to_string(),
                key: key.to_string(),
            }),
        }
    }

    pub(crate) fn vec3(&self, key: &str) -> Result<Vec3, PropertyError> {
        match self.get(key)? {
            PropertyValue::Vector(v) if v.len() == 3 => Ok(Vec3::new(v[0], v[1], v[2])),
            PropertyValue::Vector(v) => Err(PropertyError::WrongArity {
                owner: self.owner.to_string(),
                key: key.to_string(),
                expected: 3,
                found: v.len(),
            }),
            PropertyValue::Scalar(_) => Err(PropertyError::ExpectedVector {
                owner: self.owner.to_string(),
                key: key.to_string(),
            }),
        }
    }
}
