//! Working array plus the steps recorded against it.

use crate::step::{Action, Element, Highlight, Role, Step, Trace};

/// Per-invocation recording state shared by all generators.
///
/// Opening a recorder emits the `initial` step; [`Recorder::finish`] emits
/// `sorted` and hands back the trace.
pub(crate) struct Recorder {
    arr: Vec<Element>,
    steps: Vec<Step>,
}

impl Recorder {
    pub fn open(input: &[Element]) -> Self {
        let mut recorder = Self {
            arr: input.to_vec(),
            steps: Vec::new(),
        };
        recorder.record(Action::Initial, Highlight::new());
        recorder
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arr.len()
    }

    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.arr[index].value
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.arr.swap(a, b);
    }

    /// Snapshot the working array.
    pub fn record(&mut self, action: Action, highlight: Highlight) {
        debug_assert!(highlight.keys().all(|&i| i < self.arr.len()));
        self.steps.push(Step {
            data: self.arr.clone(),
            highlight,
            action,
        });
    }

    pub fn finish(mut self) -> Trace {
        self.record(Action::Sorted, Highlight::new());
        Trace::new(self.steps)
    }
}

/// Highlight with every index yielded by `indices` marked `role`.
pub(crate) fn marked(indices: impl IntoIterator<Item = usize>, role: Role) -> Highlight {
    indices.into_iter().map(|i| (i, role)).collect()
}
