//! Step model: one point-in-time snapshot of a sorting run.

use std::collections::BTreeMap;

/// An input value with a stable identity.
///
/// `id` is the element's index in the ingested input and never changes while
/// the element is moved around by a generator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub id: usize,
    pub value: f64,
}

impl Element {
    /// Create an element.
    #[inline]
    pub const fn new(id: usize, value: f64) -> Self {
        Self { id, value }
    }
}

/// Why an index is highlighted.
///
/// Roles are semantic; mapping them to colours is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Participates in the current comparison or swap.
    Compared,
    /// Quicksort pointer that is currently advancing.
    Scanning,
    /// Quicksort pointer that currently holds the pivot.
    Pivot,
    /// Element being inserted (insertion and shell sort).
    ActiveKey,
    /// Member of the current gap chain (shell sort).
    Chain,
    /// Position already committed.
    Settled,
}

/// Symbolic tag describing what a step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Untouched input. Always the first step.
    Initial,
    /// Two positions are being compared.
    Compare,
    /// Two positions were just exchanged.
    Swap,
    /// A position, prefix or chain was committed.
    Settle,
    /// Run finished. Always the last step.
    Sorted,
}

impl Action {
    /// String tag used on the renderer contract.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Initial => "initial",
            Action::Compare => "compare",
            Action::Swap => "swap",
            Action::Settle => "settle",
            Action::Sorted => "sorted",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index to role mapping. Keys are valid indices into the step's data.
pub type Highlight = BTreeMap<usize, Role>;

/// One observable snapshot of the array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub data: Vec<Element>,
    pub highlight: Highlight,
    pub action: Action,
}

impl Step {
    /// Values in positional order.
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|e| e.value).collect()
    }

    /// Highlighted indices without their roles, in ascending order.
    pub fn highlighted_indices(&self) -> Vec<usize> {
        self.highlight.keys().copied().collect()
    }

    /// Role of `index`, if highlighted.
    pub fn role(&self, index: usize) -> Option<Role> {
        self.highlight.get(&index).copied()
    }
}

/// An ordered, read-only sequence of steps describing one run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace(Vec<Step>);

impl Trace {
    /// Wrap a finished list of steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&Step> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.0.last()
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }

    /// Number of steps tagged with `action`.
    pub fn count(&self, action: Action) -> usize {
        self.0.iter().filter(|s| s.action == action).count()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
