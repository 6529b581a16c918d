// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host lookup for interactive regions.
//!
//! A pointer-down over an interactive region (a clickable room, a desk) must
//! not start a pan. The controller does not know how the host identifies
//! targets, so it asks a [`RegionClassifier`].

use smallvec::SmallVec;

/// Decides whether a pointer target is an interactive region.
///
/// Implemented for any `Fn(&T) -> bool`:
///
/// ```
/// use understory_map_view::RegionClassifier;
///
/// let is_desk = |id: &u32| *id >= 100;
/// assert!(is_desk.is_interactive(&120));
/// assert!(!is_desk.is_interactive(&7));
/// ```
pub trait RegionClassifier<T: ?Sized> {
    /// Returns `true` if `target` is interactive.
    fn is_interactive(&self, target: &T) -> bool;
}

impl<T: ?Sized, F> RegionClassifier<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_interactive(&self, target: &T) -> bool {
        self(target)
    }
}

/// Classifies a target by the labels along its root→target path.
///
/// The host supplies the labels of the target and its ancestors (in any
/// order); the target is interactive when any of them is in the set.
///
/// ```
/// use understory_map_view::{InteractiveLabels, RegionClassifier};
///
/// let labels = InteractiveLabels::new(["DESKS", "ROOMS"]);
/// assert!(labels.is_interactive(&["layer1", "ROOMS", "room-12"][..]));
/// assert!(!labels.is_interactive(&["layer1", "WALLS"][..]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractiveLabels {
    labels: SmallVec<[String; 4]>,
}

impl InteractiveLabels {
    /// Creates a classifier matching any of `labels`.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: SmallVec<[String; 4]> = SmallVec::new();
        for label in labels {
            let label: String = label.into();
            if !list.contains(&label) {
                list.push(label);
            }
        }
        Self { labels: list }
    }

    /// Returns `true` if `label` is one of the interactive labels.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no labels are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: AsRef<str>> RegionClassifier<[S]> for InteractiveLabels {
    fn is_interactive(&self, path: &[S]) -> bool {
        path.iter().any(|label| self.contains(label.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractiveLabels, RegionClassifier};

    #[test]
    fn closures_classify_targets() {
        let threshold = 10;
        let classifier = |id: &i32| *id > threshold;
        assert!(classifier.is_interactive(&11));
        assert!(!classifier.is_interactive(&10));
    }

    #[test]
    fn labels_are_deduplicated() {
        let labels = InteractiveLabels::new(["DESKS", "ROOMS", "DESKS"]);
        assert_eq!(labels.len(), 2);
        assert!(labels.contains("DESKS"));
        assert!(!labels.contains("desks"));
    }

    #[test]
    fn empty_label_set_matches_nothing() {
        let labels = InteractiveLabels::default();
        assert!(labels.is_empty());
        let path: Vec<String> = vec!["DESKS".into()];
        assert!(!labels.is_interactive(path.as_slice()));
    }

    #[test]
    fn any_ancestor_label_matches() {
        let labels = InteractiveLabels::new(["ROOMS"]);
        let path = ["svg", "ROOMS", "g", "rect"];
        assert!(labels.is_interactive(&path[..]));
        let empty: [&str; 0] = [];
        assert!(!labels.is_interactive(&empty[..]));
    }
}
