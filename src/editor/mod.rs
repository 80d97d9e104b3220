//! Editing state machine over a collection of polygon features.
//!
//! [`Editor`] owns the features and groups, the selection, the single active
//! [`Mode`] and the undo history. Geometry work is delegated to
//! [`split`](crate::polygon::split), [`merge`](crate::polygon::merge) and
//! [`simplify`](crate::simplify).

mod feature;
mod groups;
mod history;
mod mode;
mod state;
mod view;

pub use feature::{FeatureId, GroupId, PolygonFeature, PolygonGroup, PolygonStyle};
pub use history::{History, Snapshot};
pub use mode::{Focus, Mode};
pub use state::{Editor, SimplifyPreview};
