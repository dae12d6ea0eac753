//! Lifecycle read models definitions.

use crate::domain::lifecycle;

/// Filter of a [`lifecycle::Template`]s list.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateFilter {
    /// [`lifecycle::Kind`] of the listed [`lifecycle::Template`]s, if any.
    pub kind: Option<lifecycle::Kind>,

    /// Activity of the listed [`lifecycle::Template`]s, if any.
    pub active: Option<bool>,
}

impl TemplateFilter {
    /// Checks whether the provided [`lifecycle::Template`] passes this
    /// [`TemplateFilter`].
    #[must_use]
    pub fn matches(&self, template: &lifecycle::Template) -> bool {
        self.kind.map_or(true, |k| template.kind == k)
            && self.active.map_or(true, |a| template.active == a)
    }
}

/// [`lifecycle::Assignment`] along with the details of its
/// [`lifecycle::Template`].
#[derive(Clone, Debug)]
pub struct Task {
    /// Assigned task itself.
    pub assignment: lifecycle::Assignment,

    /// [`lifecycle::Title`] of the [`lifecycle::Template`].
    pub title: lifecycle::Title,

    /// [`lifecycle::Kind`] of the [`lifecycle::Template`].
    pub kind: lifecycle::Kind,
}
