//! Group management and ordering.
//!
//! Groups are labels: features point at a group through `group_id`, and
//! removing a group never removes features. All operations here are
//! structural and undoable.

use super::feature::{FeatureId, GroupId, PolygonGroup};
use super::state::Editor;
use crate::error::EditorError;
use tracing::{debug, info};

impl Editor {
    /// Creates a group and moves `members` into it.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        members: &[FeatureId],
    ) -> Result<GroupId, EditorError> {
        let indices = self.positions_of(members)?;
        let id = self.mint_group_id();
        self.checkpoint();
        self.groups_mut().push(PolygonGroup::new(id.clone(), name));
        let features = self.features_mut();
        for i in indices {
            features[i].group_id = Some(id.clone());
        }
        info!("Created group {} with {} members", id, members.len());
        Ok(id)
    }

    pub fn rename_group(&mut self, id: &GroupId, name: impl Into<String>) -> Result<(), EditorError> {
        let index = self.group_position(id)?;
        self.checkpoint();
        self.groups_mut()[index].name = name.into();
        debug!("Renamed group {}", id);
        Ok(())
    }

    /// Removes a group. Its members become ungrouped.
    pub fn delete_group(&mut self, id: &GroupId) -> Result<(), EditorError> {
        let index = self.group_position(id)?;
        self.checkpoint();
        self.groups_mut().remove(index);
        for feature in self.features_mut().iter_mut() {
            if feature.group_id.as_ref() == Some(id) {
                feature.group_id = None;
            }
        }
        self.forget_group(id);
        info!("Deleted group {}", id);
        Ok(())
    }

    pub fn add_to_group(&mut self, ids: &[FeatureId], group: &GroupId) -> Result<(), EditorError> {
        self.group_position(group)?;
        let indices = self.positions_of(ids)?;
        self.checkpoint();
        let features = self.features_mut();
        for i in indices {
            features[i].group_id = Some(group.clone());
        }
        Ok(())
    }

    pub fn remove_from_group(&mut self, ids: &[FeatureId]) -> Result<(), EditorError> {
        let indices = self.positions_of(ids)?;
        self.checkpoint();
        let features = self.features_mut();
        for i in indices {
            features[i].group_id = None;
        }
        Ok(())
    }

    /// Sets fill and stroke colour of every member of `group`.
    pub fn set_group_color(&mut self, group: &GroupId, color: &str) -> Result<(), EditorError> {
        self.group_position(group)?;
        self.checkpoint();
        for feature in self.features_mut().iter_mut() {
            if feature.group_id.as_ref() == Some(group) {
                feature.style.fill_color = color.to_string();
                feature.style.stroke_color = color.to_string();
            }
        }
        Ok(())
    }

    /// Moves a feature into `group` (or out of any group with `None`).
    ///
    /// With `before` the feature is placed directly ahead of that feature
    /// (naming the feature itself keeps its position);
    /// otherwise it goes after the last feature already in `group`, or at
    /// the end of the list if the group has no other members.
    pub fn reorder_feature(
        &mut self,
        id: &FeatureId,
        group: Option<&GroupId>,
        before: Option<&FeatureId>,
    ) -> Result<(), EditorError> {
        let index = self.position_of(id)?;
        if let Some(group) = group {
            self.group_position(group)?;
        }
        if let Some(before) = before {
            self.position_of(before)?;
        }

        self.checkpoint();
        let features = self.features_mut();
        let mut feature = features.remove(index);
        feature.group_id = group.cloned();

        let target = match before {
            // Placing a feature ahead of itself keeps its slot.
            Some(before) if before == id => index,
            Some(before) => features
                .iter()
                .position(|f| &f.id == before)
                .unwrap_or(features.len()),
            None => features
                .iter()
                .rposition(|f| f.group_id.as_ref() == group)
                .map_or(features.len(), |i| i + 1),
        };
        features.insert(target, feature);
        debug!("Moved feature {} to position {}", id, target);
        Ok(())
    }

    /// Moves a group ahead of `before`, or to the end with `None`.
    pub fn reorder_group(&mut self, id: &GroupId, before: Option<&GroupId>) -> Result<(), EditorError> {
        let index = self.group_position(id)?;
        if let Some(before) = before {
            self.group_position(before)?;
        }

        self.checkpoint();
        let groups = self.groups_mut();
        let group = groups.remove(index);
        let target = before
            .filter(|&b| b != id)
            .and_then(|b| groups.iter().position(|g| &g.id == b))
            .unwrap_or(groups.len());
        groups.insert(target, group);
        Ok(())
    }

    fn positions_of(&self, ids: &[FeatureId]) -> Result<Vec<usize>, EditorError> {
        ids.iter().map(|id| self.position_of(id)).collect()
    }
}
