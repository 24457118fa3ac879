//! Selection sort.
//!
//! Roles: while scanning for the minimum, the current candidate and the probe
//! are `Compared` and the committed prefix `0..i` is `Settled`. A `swap` step
//! follows the scan when the minimum was not already in place, then a
//! `settle` step marks `0..=i`.

use crate::recorder::{marked, Recorder};
use crate::step::{Action, Element, Role, Trace};

/// Record a selection sort of `input`.
pub fn generate(input: &[Element]) -> Trace {
    let mut rec = Recorder::open(input);
    let n = rec.len();

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            let mut highlight = marked(0..i, Role::Settled);
            highlight.insert(min, Role::Compared);
            highlight.insert(j, Role::Compared);
            rec.record(Action::Compare, highlight);

            if rec.value(j) < rec.value(min) {
                min = j;
            }
        }

        if min != i {
            rec.swap(i, min);
            let mut highlight = marked(0..i, Role::Settled);
            highlight.insert(i, Role::Compared);
            highlight.insert(min, Role::Compared);
            rec.record(Action::Swap, highlight);
        }
        rec.record(Action::Settle, marked(0..=i, Role::Settled));
    }

    rec.finish()
}
