//! Visibility and focus.
//!
//! View state only: nothing here records history or marks unsaved changes.

use super::feature::{FeatureId, GroupId, PolygonFeature};
use super::mode::Focus;
use super::state::Editor;
use crate::error::EditorError;
use tracing::debug;

impl Editor {
    #[inline]
    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    /// A feature is visible unless it, or its group, is hidden.
    pub fn is_visible(&self, id: &FeatureId) -> bool {
        self.feature(id).is_some_and(|f| self.feature_visible(f))
    }

    /// Features the map should draw, in display order.
    pub fn visible_features(&self) -> impl Iterator<Item = &PolygonFeature> {
        self.features().iter().filter(move |f| self.feature_visible(f))
    }

    pub fn toggle_feature_visibility(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        self.position_of(id)?;
        if !self.hidden_features.remove(id) {
            self.hidden_features.insert(id.clone());
        }
        Ok(())
    }

    pub fn toggle_group_visibility(&mut self, id: &GroupId) -> Result<(), EditorError> {
        self.group_position(id)?;
        if !self.hidden_groups.remove(id) {
            self.hidden_groups.insert(id.clone());
        }
        Ok(())
    }

    pub fn hide_all(&mut self) {
        let ids: Vec<FeatureId> = self.features().iter().map(|f| f.id.clone()).collect();
        self.hidden_features.extend(ids);
    }

    /// Makes everything visible again and drops any focus.
    pub fn show_all(&mut self) {
        self.unfocus_all();
    }

    /// Hides every feature except `id`.
    pub fn focus_feature(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        self.position_of(id)?;
        self.hidden_features = self
            .features()
            .iter()
            .filter(|f| &f.id != id)
            .map(|f| f.id.clone())
            .collect();
        self.hidden_groups.clear();
        self.focus = Some(Focus::Feature(id.clone()));
        debug!("Focused feature {}", id);
        Ok(())
    }

    /// Hides every feature outside `group`.
    pub fn focus_group(&mut self, group: &GroupId) -> Result<(), EditorError> {
        self.group_position(group)?;
        self.hidden_features = self
            .features()
            .iter()
            .filter(|f| f.group_id.as_ref() != Some(group))
            .map(|f| f.id.clone())
            .collect();
        self.hidden_groups.clear();
        self.focus = Some(Focus::Group(group.clone()));
        debug!("Focused group {}", group);
        Ok(())
    }

    /// Clears focus and every hidden feature and group.
    pub fn unfocus_all(&mut self) {
        self.focus = None;
        self.hidden_features.clear();
        self.hidden_groups.clear();
    }

    fn feature_visible(&self, feature: &PolygonFeature) -> bool {
        !self.hidden_features.contains(&feature.id)
            && feature
                .group_id
                .as_ref()
                .map_or(true, |g| !self.hidden_groups.contains(g))
    }

    /// Drops view state that refers to a removed feature. Removing the
    /// focused feature ends the focus.
    pub(super) fn forget_feature(&mut self, id: &FeatureId) {
        if self.focus == Some(Focus::Feature(id.clone())) {
            self.unfocus_all();
        } else {
            self.hidden_features.remove(id);
        }
    }

    pub(super) fn forget_group(&mut self, id: &GroupId) {
        if self.focus == Some(Focus::Group(id.clone())) {
            self.unfocus_all();
        } else {
            self.hidden_groups.remove(id);
        }
    }

    /// Ends a focus whose target disappeared, e.g. after undo.
    pub(super) fn repair_focus(&mut self) {
        let dangling = match &self.focus {
            Some(Focus::Feature(id)) => self.feature(id).is_none(),
            Some(Focus::Group(id)) => self.group(id).is_none(),
            None => false,
        };
        if dangling {
            debug!("Cleared focus on a removed target");
            self.unfocus_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Polygon;

    fn fid(id: &str) -> FeatureId {
        FeatureId::from(id)
    }

    fn editor() -> Editor {
        let square = Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let mut editor = Editor::default();
        editor
            .load_features(vec![
                PolygonFeature::new("a", "A", square.clone()),
                PolygonFeature::new("b", "B", square.clone()),
                PolygonFeature::new("c", "C", square),
            ])
            .unwrap();
        editor
    }

    #[test]
    fn test_toggle_feature_visibility() {
        let mut editor = editor();
        editor.toggle_feature_visibility(&fid("b")).unwrap();
        assert!(!editor.is_visible(&fid("b")));
        assert_eq!(editor.visible_features().count(), 2);

        editor.toggle_feature_visibility(&fid("b")).unwrap();
        assert!(editor.is_visible(&fid("b")));
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_visibility_is_not_history() {
        let mut editor = editor();
        editor.mark_saved();
        editor.hide_all();
        assert_eq!(editor.visible_features().count(), 0);
        assert!(!editor.has_unsaved_changes());
        editor.show_all();
        assert_eq!(editor.visible_features().count(), 3);
    }

    #[test]
    fn test_group_visibility() {
        let mut editor = editor();
        let group = editor.create_group("G", &[fid("a"), fid("b")]).unwrap();
        editor.toggle_group_visibility(&group).unwrap();
        assert!(!editor.is_visible(&fid("a")));
        assert!(editor.is_visible(&fid("c")));
    }

    #[test]
    fn test_focus_feature() {
        let mut editor = editor();
        editor.focus_feature(&fid("b")).unwrap();
        let visible: Vec<&str> = editor.visible_features().map(|f| f.id.as_str()).collect();
        assert_eq!(visible, ["b"]);
        assert_eq!(editor.focus(), Some(&Focus::Feature(fid("b"))));

        editor.unfocus_all();
        assert_eq!(editor.visible_features().count(), 3);
        assert_eq!(editor.focus(), None);
    }

    #[test]
    fn test_focus_group() {
        let mut editor = editor();
        let group = editor.create_group("G", &[fid("a"), fid("c")]).unwrap();
        editor.focus_group(&group).unwrap();
        assert!(editor.is_visible(&fid("a")));
        assert!(!editor.is_visible(&fid("b")));
        assert!(editor.is_visible(&fid("c")));
    }

    #[test]
    fn test_focus_coexists_with_mode() {
        let mut editor = editor();
        editor.focus_feature(&fid("a")).unwrap();
        editor.start_splitting(&fid("a")).unwrap();
        assert!(editor.focus().is_some());
        assert!(editor.mode().splitting().is_some());
    }

    #[test]
    fn test_deleting_focused_feature_clears_focus() {
        let mut editor = editor();
        editor.focus_feature(&fid("a")).unwrap();
        editor.delete_feature(&fid("a")).unwrap();
        assert_eq!(editor.focus(), None);
        assert_eq!(editor.visible_features().count(), 2);
    }

    #[test]
    fn test_undo_clears_dangling_focus() {
        let mut editor = editor();
        let group = editor.create_group("G", &[fid("a")]).unwrap();
        editor.focus_group(&group).unwrap();
        editor.undo();
        assert_eq!(editor.focus(), None);
    }

    #[test]
    fn test_unknown_ids() {
        let mut editor = editor();
        assert!(editor.toggle_feature_visibility(&fid("x")).is_err());
        assert!(editor.focus_group(&GroupId::from("x")).is_err());
        assert!(!editor.is_visible(&fid("x")));
    }
}
