//! The editor: feature collection, selection, active mode and history.

use super::feature::{FeatureId, GroupId, PolygonFeature, PolygonGroup, PolygonStyle};
use super::history::{History, Snapshot};
use super::mode::{Focus, Mode};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::polygon::{merge, split, Polygon};
use crate::primitives::Position;
use crate::simplify::simplify_polygon;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the polygon collection and coordinates every edit to it.
///
/// All verbs run to completion and leave the editor consistent:
///
/// - at most one of drawing, editing, splitting and merging is active
///   (see [`Mode`])
/// - the selection, if any, names an existing feature
/// - feature ids are unique
///
/// Structural changes (anything touching features or groups) record an undo
/// step. Selection, visibility and focus are view state and never do.
///
/// Verbs that name an unknown feature or group, or that are issued in the
/// wrong mode, log a warning and return an error without changing anything.
///
/// # Example
///
/// ```
/// use regionedit::editor::{Editor, PolygonFeature};
/// use regionedit::polygon::Polygon;
/// use regionedit::Position;
///
/// let mut editor = Editor::default();
/// let square = Polygon::from_coords(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
/// let id = editor.add_feature(PolygonFeature::new("plot", "Plot", square)).unwrap();
///
/// editor.start_splitting(&id).unwrap();
/// let pieces = editor
///     .apply_split(&[Position::new(1.0, 3.0), Position::new(1.0, -1.0)])
///     .unwrap();
/// assert_eq!(pieces.len(), 2);
/// assert_eq!(editor.features()[0].name, "Plot (1)");
///
/// editor.undo();
/// assert_eq!(editor.features().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Editor {
    pub(super) config: EditorConfig,
    pub(super) features: Arc<Vec<PolygonFeature>>,
    pub(super) groups: Arc<Vec<PolygonGroup>>,
    pub(super) selected: Option<FeatureId>,
    pub(super) mode: Mode,
    pub(super) focus: Option<Focus>,
    pub(super) hidden_features: HashSet<FeatureId>,
    pub(super) hidden_groups: HashSet<GroupId>,
    pub(super) history: History,
    pub(super) unsaved: bool,
    // Not part of history, so ids are never handed out twice.
    next_id: u64,
}

/// Result of previewing a simplification.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifyPreview {
    pub epsilon: f64,
    pub geometry: Polygon,
    pub original_points: usize,
    pub simplified_points: usize,
    /// Whether applying would actually remove points.
    pub can_apply: bool,
}

impl SimplifyPreview {
    fn compute(geometry: &Polygon, epsilon: f64) -> Self {
        let simplified = simplify_polygon(geometry, epsilon.max(0.0));
        let original_points = geometry.count_points();
        let simplified_points = simplified.count_points();
        Self {
            epsilon,
            geometry: simplified,
            original_points,
            simplified_points,
            can_apply: simplified_points < original_points,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: History::new(config.history_limit),
            config,
            features: Arc::new(Vec::new()),
            groups: Arc::new(Vec::new()),
            selected: None,
            mode: Mode::Idle,
            focus: None,
            hidden_features: HashSet::new(),
            hidden_groups: HashSet::new(),
            unsaved: false,
            next_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Features in display order.
    #[inline]
    pub fn features(&self) -> &[PolygonFeature] {
        &self.features
    }

    pub fn feature(&self, id: &FeatureId) -> Option<&PolygonFeature> {
        self.features.iter().find(|f| &f.id == id)
    }

    #[inline]
    pub fn groups(&self) -> &[PolygonGroup] {
        &self.groups
    }

    pub fn group(&self, id: &GroupId) -> Option<&PolygonGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    #[inline]
    pub fn selected(&self) -> Option<&FeatureId> {
        self.selected.as_ref()
    }

    #[inline]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[inline]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Clears the unsaved-changes flag, e.g. after an export.
    pub fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- collection ----

    /// Replaces the whole collection, groups included, with imported
    /// features.
    ///
    /// Clears selection, mode and visibility state and marks the editor as
    /// saved. The loaded features start ungrouped, since no groups remain to
    /// reference, and clashing ids are re-keyed. The previous collection
    /// stays reachable via undo.
    pub fn load_features(&mut self, records: Vec<PolygonFeature>) -> Result<Vec<FeatureId>, EditorError> {
        validate_records(&records)?;
        self.checkpoint();
        self.features = Arc::new(Vec::new());
        self.groups = Arc::new(Vec::new());
        let ids = self.insert_records(records);

        self.selected = None;
        self.set_mode(Mode::Idle);
        self.unfocus_all();
        self.unsaved = false;
        info!("Loaded {} features", ids.len());
        Ok(ids)
    }

    /// Adds imported features after the existing ones.
    ///
    /// With a `group_name`, typically the source file's stem, a new group of
    /// that name is created and every appended feature joins it. Group and
    /// features are one undo step.
    pub fn append_features(
        &mut self,
        records: Vec<PolygonFeature>,
        group_name: Option<&str>,
    ) -> Result<Vec<FeatureId>, EditorError> {
        validate_records(&records)?;
        self.checkpoint();
        let ids = self.insert_records(records);

        if let Some(name) = group_name {
            let group = self.mint_group_id();
            self.groups_mut().push(PolygonGroup::new(group.clone(), name));
            for feature in self.features_mut().iter_mut() {
                if ids.contains(&feature.id) {
                    feature.group_id = Some(group.clone());
                }
            }
            info!("Appended {} features to new group {}", ids.len(), group);
        } else {
            info!("Appended {} features", ids.len());
        }
        Ok(ids)
    }

    /// Adds one feature at the end. Returns its id, which differs from the
    /// record's if that id was already taken.
    pub fn add_feature(&mut self, feature: PolygonFeature) -> Result<FeatureId, EditorError> {
        validate_records(std::slice::from_ref(&feature))?;
        self.checkpoint();
        let id = self.insert_record(feature);
        info!("Added feature {}", id);
        Ok(id)
    }

    pub fn rename_feature(&mut self, id: &FeatureId, name: impl Into<String>) -> Result<(), EditorError> {
        let name = name.into();
        self.update_feature(id, |f| f.name = name)
    }

    pub fn set_feature_style(&mut self, id: &FeatureId, style: PolygonStyle) -> Result<(), EditorError> {
        self.update_feature(id, |f| f.style = style)
    }

    pub fn set_feature_description(
        &mut self,
        id: &FeatureId,
        description: Option<String>,
    ) -> Result<(), EditorError> {
        self.update_feature(id, |f| f.description = description)
    }

    /// Replaces a feature's geometry, typically with the result of a vertex
    /// edit. Allowed in any mode.
    pub fn update_geometry(&mut self, id: &FeatureId, geometry: Polygon) -> Result<(), EditorError> {
        geometry.validate().map_err(|e| {
            warn!("Rejected geometry update for {}: {}", id, e);
            EditorError::from(e)
        })?;
        self.update_feature(id, |f| f.geometry = geometry)
    }

    /// Removes a feature. Cancels the active mode if it involves the feature.
    pub fn delete_feature(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        let index = self.position_of(id)?;
        self.checkpoint();
        let removed = self.features_mut().remove(index);

        if self.mode.involves(&removed.id) {
            debug!("Deleted feature {} was in use, cancelling {}", removed.id, self.mode.name());
            self.set_mode(Mode::Idle);
        }
        if self.selected.as_ref() == Some(&removed.id) {
            self.selected = None;
        }
        self.forget_feature(&removed.id);
        info!("Deleted feature {}", removed.id);
        Ok(())
    }

    /// Empties features and groups. Undoable.
    pub fn clear_all(&mut self) {
        self.checkpoint();
        self.features = Arc::new(Vec::new());
        self.groups = Arc::new(Vec::new());
        self.selected = None;
        self.set_mode(Mode::Idle);
        self.unfocus_all();
        self.unsaved = false;
        info!("Cleared all features");
    }

    /// Selects a feature, or clears the selection with `None`. Selecting a
    /// different feature ends vertex editing.
    pub fn select_feature(&mut self, id: Option<&FeatureId>) -> Result<(), EditorError> {
        if let Some(id) = id {
            self.position_of(id)?;
        }
        if let Mode::Editing(editing) = &self.mode {
            if Some(editing) != id {
                self.set_mode(Mode::Idle);
            }
        }
        self.selected = id.cloned();
        Ok(())
    }

    // ---- drawing ----

    pub fn start_drawing(&mut self) {
        self.set_mode(Mode::Drawing);
    }

    /// Adds the drawn polygon as a new feature, selects it and returns to idle.
    pub fn complete_drawing(&mut self, geometry: Polygon) -> Result<FeatureId, EditorError> {
        if !self.mode.is_drawing() {
            return Err(self.wrong_mode("drawing"));
        }
        geometry.validate().map_err(|e| {
            warn!("Rejected drawn polygon: {}", e);
            EditorError::from(e)
        })?;

        let id = self.mint_feature_id();
        self.checkpoint();
        let feature = PolygonFeature::new(id.clone(), self.config.new_feature_name.clone(), geometry);
        self.features_mut().push(feature);
        self.selected = Some(id.clone());
        self.set_mode(Mode::Idle);
        info!("Completed drawing {}", id);
        Ok(id)
    }

    pub fn cancel_drawing(&mut self) {
        if self.mode.is_drawing() {
            self.set_mode(Mode::Idle);
        }
    }

    // ---- vertex editing ----

    /// Starts vertex editing. Editing implies selection.
    pub fn start_editing(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        self.position_of(id)?;
        self.set_mode(Mode::Editing(id.clone()));
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn stop_editing(&mut self) {
        if self.mode.editing().is_some() {
            self.set_mode(Mode::Idle);
        }
    }

    // ---- split ----

    pub fn start_splitting(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        self.position_of(id)?;
        self.set_mode(Mode::Splitting {
            feature: id.clone(),
            error: None,
        });
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Cuts the feature being split along `cutting_line`.
    ///
    /// On success the feature is replaced in place by the pieces, named
    /// `"{name} (1)"`, `"{name} (2)"`, ..., and the first piece is selected.
    /// On failure the editor stays in split mode with the error recorded so
    /// the user can draw another line.
    pub fn apply_split(&mut self, cutting_line: &[Position]) -> Result<Vec<FeatureId>, EditorError> {
        let Some(feature_id) = self.mode.splitting().cloned() else {
            return Err(self.wrong_mode("splitting"));
        };
        let index = self.position_of(&feature_id)?;
        let source = self.features[index].clone();

        let pieces = match split(&source.geometry, cutting_line) {
            Ok(pieces) => pieces,
            Err(e) => {
                debug!("Split of {} failed: {}", feature_id, e);
                if let Mode::Splitting { error, .. } = &mut self.mode {
                    *error = Some(e.clone());
                }
                return Err(e.into());
            }
        };

        self.checkpoint();
        let mut replacements = Vec::with_capacity(pieces.len());
        for (k, geometry) in pieces.into_iter().enumerate() {
            let id = self.mint_feature_id();
            replacements.push(source.derive(id, format!("{} ({})", source.name, k + 1), geometry));
        }
        let ids: Vec<FeatureId> = replacements.iter().map(|f| f.id.clone()).collect();
        self.features_mut().splice(index..=index, replacements);

        self.forget_feature(&feature_id);
        self.selected = ids.first().cloned();
        self.set_mode(Mode::Idle);
        info!("Split {} into {} pieces", feature_id, ids.len());
        Ok(ids)
    }

    pub fn cancel_split(&mut self) {
        if self.mode.splitting().is_some() {
            self.set_mode(Mode::Idle);
        }
    }

    // ---- merge ----

    /// Enters merge mode with `id` as the initiator and no targets.
    pub fn start_merging(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        self.position_of(id)?;
        self.set_mode(Mode::Merging {
            initiator: id.clone(),
            targets: Vec::new(),
            error: None,
        });
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Adds `id` to the merge targets, or removes it if already there.
    /// Toggling the initiator does nothing.
    pub fn toggle_merge_target(&mut self, id: &FeatureId) -> Result<(), EditorError> {
        if self.mode.merge_initiator().is_none() {
            return Err(self.wrong_mode("merging"));
        }
        self.position_of(id)?;

        if let Mode::Merging {
            initiator,
            targets,
            error,
        } = &mut self.mode
        {
            if initiator == id {
                return Ok(());
            }
            match targets.iter().position(|t| t == id) {
                Some(pos) => {
                    targets.remove(pos);
                }
                None => targets.push(id.clone()),
            }
            *error = None;
        }
        Ok(())
    }

    /// Unions the initiator with every target.
    ///
    /// On success the sources are removed and the merged feature, carrying
    /// the initiator's name and style, takes the initiator's place in the
    /// list. On failure merge mode stays active with the error recorded and
    /// the targets unchanged.
    pub fn apply_merge(&mut self) -> Result<FeatureId, EditorError> {
        let (initiator, targets) = match &self.mode {
            Mode::Merging {
                initiator, targets, ..
            } => (initiator.clone(), targets.clone()),
            _ => return Err(self.wrong_mode("merging")),
        };
        let initiator_index = self.position_of(&initiator)?;
        let target_indices = targets
            .iter()
            .map(|t| self.position_of(t))
            .collect::<Result<Vec<_>, _>>()?;

        let polygons: Vec<Polygon> = std::iter::once(initiator_index)
            .chain(target_indices.iter().copied())
            .map(|i| self.features[i].geometry.clone())
            .collect();

        let merged = match merge(&polygons) {
            Ok(merged) => merged,
            Err(e) => {
                debug!("Merge of {} with {} targets failed: {}", initiator, targets.len(), e);
                if let Mode::Merging { error, .. } = &mut self.mode {
                    *error = Some(e.clone());
                }
                return Err(e.into());
            }
        };

        self.checkpoint();
        let source = self.features[initiator_index].clone();
        let id = self.mint_feature_id();
        let feature = source.derive(id.clone(), source.name.clone(), merged);

        let consumed: HashSet<FeatureId> = std::iter::once(initiator.clone())
            .chain(targets.iter().cloned())
            .collect();
        let removed_before = target_indices
            .iter()
            .filter(|&&i| i < initiator_index)
            .count();
        let features = self.features_mut();
        features.retain(|f| !consumed.contains(&f.id));
        features.insert(initiator_index - removed_before, feature);

        for source_id in &consumed {
            self.forget_feature(source_id);
        }
        self.selected = Some(id.clone());
        self.set_mode(Mode::Idle);
        info!("Merged {} features into {}", consumed.len(), id);
        Ok(id)
    }

    pub fn cancel_merge(&mut self) {
        if self.mode.merge_initiator().is_some() {
            self.set_mode(Mode::Idle);
        }
    }

    // ---- simplify ----

    /// Simplifies a feature's geometry without changing it, using the slider
    /// mapping from the configuration. `None` uses the configured default
    /// slider position.
    pub fn preview_simplify(&self, id: &FeatureId, slider: Option<f64>) -> Result<SimplifyPreview, EditorError> {
        let index = self.position_of(id)?;
        let simplify = &self.config.simplify;
        let epsilon = slider.map_or_else(|| simplify.default_epsilon(), |s| simplify.epsilon_for_slider(s));
        Ok(SimplifyPreview::compute(&self.features[index].geometry, epsilon))
    }

    /// Writes the simplified geometry back. Returns `Ok(false)` and records
    /// nothing when simplification would not remove any point.
    pub fn apply_simplify(&mut self, id: &FeatureId, epsilon: f64) -> Result<bool, EditorError> {
        let index = self.position_of(id)?;
        let preview = SimplifyPreview::compute(&self.features[index].geometry, epsilon);
        if !preview.can_apply {
            debug!("Simplifying {} at {} removes nothing", id, epsilon);
            return Ok(false);
        }

        self.checkpoint();
        self.features_mut()[index].geometry = preview.geometry;
        info!(
            "Simplified {}: {} -> {} points",
            id, preview.original_points, preview.simplified_points
        );
        Ok(true)
    }

    /// Total point count of a feature, for display next to a preview.
    pub fn count_points(&self, id: &FeatureId) -> Result<usize, EditorError> {
        let index = self.position_of(id)?;
        Ok(self.features[index].geometry.count_points())
    }

    // ---- history ----

    /// Restores the previous state. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                debug!("Undo, {} steps left", self.history.undo_depth());
                true
            }
            None => {
                debug!("Nothing to undo");
                false
            }
        }
    }

    /// Re-applies an undone step. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                debug!("Redo");
                true
            }
            None => {
                debug!("Nothing to redo");
                false
            }
        }
    }

    // ---- internals ----

    fn restore(&mut self, snapshot: Snapshot) {
        // The restored collection may not contain whatever the mode refers to.
        self.set_mode(Mode::Idle);
        self.features = snapshot.features;
        self.groups = snapshot.groups;
        self.repair_selection();
        self.repair_focus();
        self.unsaved = true;
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            features: Arc::clone(&self.features),
            groups: Arc::clone(&self.groups),
        }
    }

    /// Records the current collections as an undo step. Call after inputs
    /// are validated and before mutating.
    pub(super) fn checkpoint(&mut self) {
        let before = self.snapshot();
        self.history.record(before);
        self.unsaved = true;
        debug!("Recorded snapshot ({} undo steps)", self.history.undo_depth());
    }

    pub(super) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("Mode: {} -> {}", self.mode.name(), mode.name());
            self.mode = mode;
        }
    }

    pub(super) fn wrong_mode(&self, expected: &'static str) -> EditorError {
        warn!("Expected {} mode, editor is {}", expected, self.mode.name());
        EditorError::InvalidMode {
            expected,
            actual: self.mode.name(),
        }
    }

    pub(super) fn position_of(&self, id: &FeatureId) -> Result<usize, EditorError> {
        self.features.iter().position(|f| &f.id == id).ok_or_else(|| {
            warn!("No feature with id {}", id);
            EditorError::FeatureNotFound(id.clone())
        })
    }

    pub(super) fn group_position(&self, id: &GroupId) -> Result<usize, EditorError> {
        self.groups.iter().position(|g| &g.id == id).ok_or_else(|| {
            warn!("No group with id {}", id);
            EditorError::GroupNotFound(id.clone())
        })
    }

    #[inline]
    pub(super) fn features_mut(&mut self) -> &mut Vec<PolygonFeature> {
        Arc::make_mut(&mut self.features)
    }

    #[inline]
    pub(super) fn groups_mut(&mut self) -> &mut Vec<PolygonGroup> {
        Arc::make_mut(&mut self.groups)
    }

    pub(super) fn mint_feature_id(&mut self) -> FeatureId {
        loop {
            self.next_id += 1;
            let id = FeatureId::new(format!("feature-{}", self.next_id));
            if !self.features.iter().any(|f| f.id == id) {
                return id;
            }
        }
    }

    pub(super) fn mint_group_id(&mut self) -> GroupId {
        loop {
            self.next_id += 1;
            let id = GroupId::new(format!("group-{}", self.next_id));
            if !self.groups.iter().any(|g| g.id == id) {
                return id;
            }
        }
    }

    fn update_feature(
        &mut self,
        id: &FeatureId,
        apply: impl FnOnce(&mut PolygonFeature),
    ) -> Result<(), EditorError> {
        let index = self.position_of(id)?;
        self.checkpoint();
        apply(&mut self.features_mut()[index]);
        debug!("Updated feature {}", id);
        Ok(())
    }

    fn insert_records(&mut self, records: Vec<PolygonFeature>) -> Vec<FeatureId> {
        records
            .into_iter()
            .map(|record| self.insert_record(record))
            .collect()
    }

    fn insert_record(&mut self, mut record: PolygonFeature) -> FeatureId {
        if self.features.iter().any(|f| f.id == record.id) {
            let fresh = self.mint_feature_id();
            debug!("Re-keyed feature {} as {}", record.id, fresh);
            record.id = fresh;
        }
        if let Some(group) = &record.group_id {
            if !self.groups.iter().any(|g| &g.id == group) {
                debug!("Dropped unknown group {} from {}", group, record.id);
                record.group_id = None;
            }
        }
        let id = record.id.clone();
        self.features_mut().push(record);
        id
    }

    /// Clears the selection if it names a feature that no longer exists.
    pub(super) fn repair_selection(&mut self) {
        if let Some(id) = &self.selected {
            if !self.features.iter().any(|f| &f.id == id) {
                debug!("Cleared dangling selection {}", id);
                self.selected = None;
            }
        }
    }
}

fn validate_records(records: &[PolygonFeature]) -> Result<(), EditorError> {
    for record in records {
        record.geometry.validate().map_err(|e| {
            warn!("Rejected feature {}: {}", record.id, e);
            EditorError::from(e)
        })?;
    }
    Ok(())
}
