//! Structural change records delivered to observers.

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were added to or removed from `target`.
    ChildList,
    /// An attribute (data entry) on `target` changed.
    Attributes { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// Parent for child-list changes, the changed element for attributes.
    pub target: String,
    pub added: Vec<String>,
    /// Removed subtrees, kept whole so their attributes stay readable.
    pub removed: Vec<Element>,
}

impl MutationRecord {
    pub fn child_list(
        target: impl Into<String>,
        added: Vec<String>,
        removed: Vec<Element>,
    ) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target: target.into(),
            added,
            removed,
        }
    }

    pub fn attribute(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: MutationKind::Attributes { name: name.into() },
            target: target.into(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn is_child_list(&self) -> bool {
        self.kind == MutationKind::ChildList
    }
}

/// What an observer wants to be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObserveOptions {
    pub child_list: bool,
    pub attributes: bool,
    /// Include changes anywhere below the observed element.
    pub subtree: bool,
}

impl ObserveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child_list(mut self) -> Self {
        self.child_list = true;
        self
    }

    pub fn attributes(mut self) -> Self {
        self.attributes = true;
        self
    }

    pub fn subtree(mut self) -> Self {
        self.subtree = true;
        self
    }

    pub(crate) fn wants(&self, kind: &MutationKind) -> bool {
        match kind {
            MutationKind::ChildList => self.child_list,
            MutationKind::Attributes { .. } => self.attributes,
        }
    }
}
