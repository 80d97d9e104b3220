//! The editor's single active interaction mode.

use super::feature::{FeatureId, GroupId};
use crate::error::{MergeError, SplitError};

/// Which interaction is in progress.
///
/// Exactly one mode is active at a time, so drawing, editing, splitting and
/// merging can never overlap. Split and merge keep the last failure so the
/// user can see it and retry without leaving the mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
    /// Vertex editing of one feature.
    Editing(FeatureId),
    Splitting {
        feature: FeatureId,
        error: Option<SplitError>,
    },
    /// `targets` has set semantics and keeps the order features were picked.
    Merging {
        initiator: FeatureId,
        targets: Vec<FeatureId>,
        error: Option<MergeError>,
    },
}

impl Mode {
    /// Short name used in logs and [`InvalidMode`](crate::error::EditorError::InvalidMode) errors.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Drawing => "drawing",
            Mode::Editing(_) => "editing",
            Mode::Splitting { .. } => "splitting",
            Mode::Merging { .. } => "merging",
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Mode::Drawing)
    }

    pub fn editing(&self) -> Option<&FeatureId> {
        match self {
            Mode::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn splitting(&self) -> Option<&FeatureId> {
        match self {
            Mode::Splitting { feature, .. } => Some(feature),
            _ => None,
        }
    }

    pub fn merge_initiator(&self) -> Option<&FeatureId> {
        match self {
            Mode::Merging { initiator, .. } => Some(initiator),
            _ => None,
        }
    }

    pub fn merge_targets(&self) -> &[FeatureId] {
        match self {
            Mode::Merging { targets, .. } => targets,
            _ => &[],
        }
    }

    pub fn split_error(&self) -> Option<&SplitError> {
        match self {
            Mode::Splitting { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    pub fn merge_error(&self) -> Option<&MergeError> {
        match self {
            Mode::Merging { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    /// True if the mode operates on `id`: the feature being edited or split,
    /// the merge initiator, or one of the merge targets.
    pub fn involves(&self, id: &FeatureId) -> bool {
        match self {
            Mode::Idle | Mode::Drawing => false,
            Mode::Editing(feature) | Mode::Splitting { feature, .. } => feature == id,
            Mode::Merging {
                initiator, targets, ..
            } => initiator == id || targets.contains(id),
        }
    }
}

/// Visibility overlay that narrows the map to one feature or one group.
/// Independent of [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Feature(FeatureId),
    Group(GroupId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(Mode::default().is_idle());
        assert_eq!(Mode::default().name(), "idle");
    }

    #[test]
    fn test_involves() {
        let a = FeatureId::from("a");
        let b = FeatureId::from("b");
        let c = FeatureId::from("c");

        assert!(Mode::Editing(a.clone()).involves(&a));
        assert!(!Mode::Drawing.involves(&a));

        let merging = Mode::Merging {
            initiator: a.clone(),
            targets: vec![b.clone()],
            error: None,
        };
        assert!(merging.involves(&a));
        assert!(merging.involves(&b));
        assert!(!merging.involves(&c));
        assert_eq!(merging.merge_targets(), &[b]);
    }

    #[test]
    fn test_errors_only_in_their_mode() {
        let split = Mode::Splitting {
            feature: FeatureId::from("a"),
            error: Some(SplitError::NoSplit),
        };
        assert_eq!(split.split_error(), Some(&SplitError::NoSplit));
        assert_eq!(split.merge_error(), None);
        assert_eq!(Mode::Idle.split_error(), None);
    }
}
