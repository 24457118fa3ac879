//! Quicksort with a leftmost pivot and two inward-scanning pointers.
//!
//! The pivot is always held by one of the two pointers: the stationary one is
//! `Pivot`, the advancing one is `Scanning`. Each swap hands the pivot to the
//! other pointer and reverses the scan direction. Every pointer test records a
//! `compare` step, every exchange a `swap` step, and a `settle` step follows
//! each pivot landing. Indices already in their final position stay
//! `Settled` for the rest of the run.
//!
//! Values equal to the pivot never trigger a swap: the right pointer skips
//! `>= pivot`, the left pointer skips `<= pivot`.

use crate::recorder::{marked, Recorder};
use crate::step::{Action, Element, Highlight, Role, Trace};

/// Record a quicksort of `input`.
pub fn generate(input: &[Element]) -> Trace {
    let mut rec = Recorder::open(input);
    let n = rec.len();

    // Lives for this invocation only.
    let mut settled = Vec::with_capacity(n);
    if n > 0 {
        sort(&mut rec, &mut settled, 0, n - 1);
    }
    debug_assert_eq!(settled.len(), n);

    rec.finish()
}

fn sort(rec: &mut Recorder, settled: &mut Vec<usize>, l: usize, r: usize) {
    if l == r {
        settled.push(l);
        return;
    }

    let p = partition(rec, settled, l, r);
    if p > l {
        sort(rec, settled, l, p - 1);
    }
    if p < r {
        sort(rec, settled, p + 1, r);
    }
}

fn pointers(settled: &[usize], pivot: usize, scanning: usize) -> Highlight {
    let mut highlight = marked(settled.iter().copied(), Role::Settled);
    highlight.insert(pivot, Role::Pivot);
    highlight.insert(scanning, Role::Scanning);
    highlight
}

fn partition(rec: &mut Recorder, settled: &mut Vec<usize>, mut l: usize, mut r: usize) -> usize {
    let pivot = rec.value(l);

    while l < r {
        // Pivot at l, r moves left.
        while l < r {
            rec.record(Action::Compare, pointers(settled, l, r));
            if rec.value(r) < pivot {
                break;
            }
            r -= 1;
        }
        if l < r {
            rec.swap(l, r);
            rec.record(Action::Swap, pointers(settled, r, l));
        }

        // Pivot at r, l moves right.
        while l < r {
            rec.record(Action::Compare, pointers(settled, r, l));
            if rec.value(l) > pivot {
                break;
            }
            l += 1;
        }
        if l < r {
            rec.swap(l, r);
            rec.record(Action::Swap, pointers(settled, l, r));
        }
    }

    debug_assert_eq!(rec.value(l), pivot);
    settled.push(l);
    rec.record(Action::Settle, marked(settled.iter().copied(), Role::Settled));
    l
}
