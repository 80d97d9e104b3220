//! Feature and group records.

use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a [`PolygonFeature`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

/// Opaque identifier of a [`PolygonGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(FeatureId);
string_id!(GroupId);

/// Fill and stroke attributes handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: "#4f46e5".to_string(),
            fill_opacity: 0.2,
            stroke_color: "#4f46e5".to_string(),
            stroke_width: 2.0,
        }
    }
}

/// A named polygon in the editor's collection.
///
/// Identity is by `id`; every other field is a plain value. Split and merge
/// create features with new ids, all other edits keep the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonFeature {
    pub id: FeatureId,
    pub name: String,
    pub geometry: Polygon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub style: PolygonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PolygonFeature {
    /// An ungrouped feature with the default style.
    pub fn new(id: impl Into<FeatureId>, name: impl Into<String>, geometry: Polygon) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry,
            group_id: None,
            style: PolygonStyle::default(),
            description: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<GroupId>) -> Self {
        self.group_id = Some(group.into());
        self
    }

    pub fn with_style(mut self, style: PolygonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A feature with this one's group, style and description under a new
    /// id, name and geometry.
    pub(crate) fn derive(&self, id: FeatureId, name: String, geometry: Polygon) -> Self {
        Self {
            id,
            name,
            geometry,
            group_id: self.group_id.clone(),
            style: self.style.clone(),
            description: self.description.clone(),
        }
    }
}

/// A label that features reference through `group_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGroup {
    pub id: GroupId,
    pub name: String,
}

impl PolygonGroup {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
