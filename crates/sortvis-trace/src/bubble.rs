//! Bubble sort.
//!
//! Roles: the adjacent pair under inspection is `Compared` on both the
//! `compare` step and the `swap` step that may follow it. Equal neighbours
//! never swap, and a pass without swaps ends the run.

use crate::recorder::{marked, Recorder};
use crate::step::{Action, Element, Role, Trace};

/// Record a bubble sort of `input`.
pub fn generate(input: &[Element]) -> Trace {
    let mut rec = Recorder::open(input);
    let n = rec.len();

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            rec.record(Action::Compare, marked([j, j + 1], Role::Compared));
            if rec.value(j) > rec.value(j + 1) {
                rec.swap(j, j + 1);
                swapped = true;
                rec.record(Action::Swap, marked([j, j + 1], Role::Compared));
            }
        }
        if !swapped {
            break;
        }
    }

    rec.finish()
}
