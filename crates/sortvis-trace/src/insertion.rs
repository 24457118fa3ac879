//! Insertion sort.
//!
//! The key taken from position `i` walks left by adjacent swaps, so a renderer
//! sees it travel instead of jump. Roles: the key is `ActiveKey`, the
//! predecessor it is tested against is `Compared`, and the rest of `0..=i` is
//! `Settled`. Every shift is a `swap` step; a `settle` step closes each outer
//! iteration with `0..=i` marked.

use crate::recorder::{marked, Recorder};
use crate::step::{Action, Element, Role, Trace};

/// Record an insertion sort of `input`.
pub fn generate(input: &[Element]) -> Trace {
    let mut rec = Recorder::open(input);
    let n = rec.len();

    for i in 1..n {
        let mut j = i;
        while j > 0 {
            let mut highlight = marked(0..=i, Role::Settled);
            highlight.insert(j - 1, Role::Compared);
            highlight.insert(j, Role::ActiveKey);
            rec.record(Action::Compare, highlight);

            if rec.value(j - 1) <= rec.value(j) {
                break;
            }
            rec.swap(j - 1, j);
            j -= 1;

            let mut highlight = marked(0..=i, Role::Settled);
            highlight.insert(j, Role::ActiveKey);
            highlight.insert(j + 1, Role::Compared);
            rec.record(Action::Swap, highlight);
        }
        rec.record(Action::Settle, marked(0..=i, Role::Settled));
    }

    rec.finish()
}
