//! Shell sort with the halving gap sequence `n/2, n/4, ..., 1`.
//!
//! Each gap pass is an insertion sort over stride `gap`, performed with
//! adjacent-in-chain swaps. Roles: the gap chain of the current index
//! (`i, i-gap, i-2*gap, ...`) is `Chain`, the key being inserted is
//! `ActiveKey`, and the chain member it is tested against is `Compared`.
//! A `settle` step shows the chain once the key has landed.

use crate::recorder::{marked, Recorder};
use crate::step::{Action, Element, Highlight, Role, Trace};

/// Indices reachable from `i` by repeatedly subtracting `gap`, including `i`.
fn chain(i: usize, gap: usize) -> Highlight {
    marked((0..=i / gap).map(|k| i - k * gap), Role::Chain)
}

/// Record a shell sort of `input`.
pub fn generate(input: &[Element]) -> Trace {
    let mut rec = Recorder::open(input);
    let n = rec.len();

    let mut gap = n;
    while gap > 1 {
        gap /= 2;
        for i in gap..n {
            let mut j = i;
            while j >= gap {
                let mut highlight = chain(i, gap);
                highlight.insert(j - gap, Role::Compared);
                highlight.insert(j, Role::ActiveKey);
                rec.record(Action::Compare, highlight);

                if rec.value(j - gap) <= rec.value(j) {
                    break;
                }
                rec.swap(j - gap, j);
                j -= gap;

                let mut highlight = chain(i, gap);
                highlight.insert(j, Role::ActiveKey);
                highlight.insert(j + gap, Role::Compared);
                rec.record(Action::Swap, highlight);
            }
            rec.record(Action::Settle, chain(i, gap));
        }
    }

    rec.finish()
}
