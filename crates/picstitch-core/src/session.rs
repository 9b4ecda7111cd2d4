//! The working set: an ordered list of image paths plus the per-image
//! transform and filter records.
//!
//! The list order is the merge order. States live in aside tables keyed
//! by path and are created lazily on first touch; removing or replacing
//! an image deletes its records so nothing outlives the list entry.

use crate::{FilterSettings, TransformState};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One editing session's working set.
#[derive(Debug, Default)]
pub struct Session {
    paths: Vec<PathBuf>,
    transforms: HashMap<PathBuf, TransformState>,
    filters: HashMap<PathBuf, FilterSettings>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Image paths in merge order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of images in the working set.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when no images are loaded.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// True when `path` is in the working set.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Append an image to the working set.
    ///
    /// Returns `false` without touching anything when the path is already
    /// present; the caller decides whether that duplicate becomes a
    /// [`replace_image`](Self::replace_image).
    pub fn add_image(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Accept a duplicate as an overwrite: the image keeps its list
    /// position and its transform/filter records are deleted, so the
    /// replacement starts from defaults.
    ///
    /// Returns `false` when the path is not in the working set.
    pub fn replace_image(&mut self, path: &Path) -> bool {
        if !self.contains(path) {
            return false;
        }
        self.transforms.remove(path);
        self.filters.remove(path);
        true
    }

    /// Remove an image and both of its state records.
    pub fn remove_image(&mut self, path: &Path) -> bool {
        let Some(index) = self.paths.iter().position(|p| p == path) else {
            return false;
        };
        self.paths.remove(index);
        self.transforms.remove(path);
        self.filters.remove(path);
        true
    }

    /// Drop every image and state record.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.transforms.clear();
        self.filters.clear();
    }

    /// Transform record for `path`, if one has been created.
    pub fn transform(&self, path: &Path) -> Option<&TransformState> {
        self.transforms.get(path)
    }

    /// Transform record for `path`, created at defaults on first touch.
    pub fn transform_mut(&mut self, path: &Path) -> &mut TransformState {
        self.transforms.entry(path.to_path_buf()).or_default()
    }

    /// Filter record for `path`, if one has been created.
    pub fn filters(&self, path: &Path) -> Option<&FilterSettings> {
        self.filters.get(path)
    }

    /// Filter record for `path`, created at defaults on first touch.
    pub fn filters_mut(&mut self, path: &Path) -> &mut FilterSettings {
        self.filters.entry(path.to_path_buf()).or_default()
    }

    /// Relative rotation as issued from the UI, in degrees
    /// (positive = counter-clockwise).
    ///
    /// When the image is mirrored, the on-screen sense of rotation is
    /// inverted, so the delta's sign flips before reaching the state.
    /// This is the one place that rule lives; absolute
    /// [`set_rotation`](Self::set_rotation) is intentionally untouched
    /// by it.
    pub fn rotate_by(&mut self, path: &Path, degrees: i32) {
        let state = self.transform_mut(path);
        let delta = if state.flipped() { -degrees } else { degrees };
        state.add_rotation(delta);
    }

    /// Absolute rotation for `path`, no flip adjustment.
    pub fn set_rotation(&mut self, path: &Path, angle: i32) {
        self.transform_mut(path).set_rotation(angle);
    }

    /// Toggle the left-right mirror for `path`.
    pub fn toggle_flip(&mut self, path: &Path) {
        self.transform_mut(path).toggle_flip();
    }

    /// Reset the transform record for `path`, if any.
    pub fn reset_transform(&mut self, path: &Path) {
        if let Some(state) = self.transforms.get_mut(path) {
            state.reset();
        }
    }

    /// Reset the filter record for `path`, if any.
    pub fn reset_filters(&mut self, path: &Path) {
        if let Some(filters) = self.filters.get_mut(path) {
            filters.reset();
        }
    }

    /// How many images carry a non-default transform.
    pub fn modified_transform_count(&self) -> usize {
        self.transforms.values().filter(|s| s.is_modified()).count()
    }

    /// How many images carry a non-default filter record.
    pub fn modified_filter_count(&self) -> usize {
        self.filters.values().filter(|f| f.is_modified()).count()
    }
}
