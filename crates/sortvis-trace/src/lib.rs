//! Sortvis Trace Generation
//!
//! Instrumented sorting algorithms that record every observable
//! micro-operation (comparison, swap, positional commitment) as a [`Step`].
//! The resulting [`Trace`] is an immutable, replayable film of one run.
//!
//! # Model
//!
//! - **Element**: a value plus a stable `id` (its index in the input), so a
//!   renderer can animate an element moving instead of re-creating it.
//! - **Step**: full array snapshot, a highlight map from index to [`Role`],
//!   and a symbolic [`Action`].
//! - **Trace**: `initial` first, `sorted` last, one step per operation
//!   in between.
//!
//! # Generators
//!
//! Bubble, selection, insertion, shell and quick sort. Every generator is a
//! pure function of its input; no state survives between calls.
//!
//! ```
//! use sortvis_trace::{Action, Algorithm};
//!
//! let trace = Algorithm::BubbleSort.trace_for(&[5.0, 3.0, 8.0, 1.0]).unwrap();
//! assert_eq!(trace.last().unwrap().action, Action::Sorted);
//! assert_eq!(trace.last().unwrap().values(), vec![1.0, 3.0, 5.0, 8.0]);
//! ```

mod algorithm;
mod error;
mod input;
mod recorder;
mod step;

mod bubble;
mod insertion;
mod quick;
mod selection;
mod shell;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use input::{ingest, parse_values, MAX_INPUT_LEN};
pub use step::{Action, Element, Highlight, Role, Step, Trace};

pub use bubble::generate as bubble_sort;
pub use insertion::generate as insertion_sort;
pub use quick::generate as quick_sort;
pub use selection::generate as selection_sort;
pub use shell::generate as shell_sort;
