//! Named trace generators.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::input::ingest;
use crate::step::{Element, Trace};

/// A selectable sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    ShellSort,
    QuickSort,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::ShellSort,
        Algorithm::QuickSort,
    ];

    /// Identifier used for selection (`"BubbleSort"`, ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "BubbleSort",
            Algorithm::SelectionSort => "SelectionSort",
            Algorithm::InsertionSort => "InsertionSort",
            Algorithm::ShellSort => "ShellSort",
            Algorithm::QuickSort => "QuickSort",
        }
    }

    /// Human readable label.
    pub const fn title(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "Bubble sort",
            Algorithm::SelectionSort => "Selection sort",
            Algorithm::InsertionSort => "Insertion sort",
            Algorithm::ShellSort => "Shell sort",
            Algorithm::QuickSort => "Quicksort",
        }
    }

    /// Run the instrumented algorithm over already ingested elements.
    pub fn generate(&self, input: &[Element]) -> Trace {
        match self {
            Algorithm::BubbleSort => crate::bubble::generate(input),
            Algorithm::SelectionSort => crate::selection::generate(input),
            Algorithm::InsertionSort => crate::insertion::generate(input),
            Algorithm::ShellSort => crate::shell::generate(input),
            Algorithm::QuickSort => crate::quick::generate(input),
        }
    }

    /// Ingest raw values and generate their trace.
    pub fn trace_for(&self, values: &[f64]) -> Result<Trace> {
        Ok(self.generate(&ingest(values)?))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts `BubbleSort`, `bubble-sort`, `bubble_sort` or `bubble`,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let key = key.strip_suffix("sort").unwrap_or(&key);

        match key {
            "bubble" => Ok(Algorithm::BubbleSort),
            "selection" => Ok(Algorithm::SelectionSort),
            "insertion" => Ok(Algorithm::InsertionSort),
            "shell" => Ok(Algorithm::ShellSort),
            "quick" => Ok(Algorithm::QuickSort),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}
