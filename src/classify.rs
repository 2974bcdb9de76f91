//! Ordinal classification of numeric signals against fixed breakpoints.

/// Ascending breakpoints for an ordinal level type.
///
/// `floor` is returned for any value below the lowest step (and for NaN).
#[derive(Debug, Clone, Copy)]
pub struct Breakpoints<L: 'static> {
    pub floor: L,
    pub steps: &'static [(f64, L)],
}

impl<L: Copy + 'static> Breakpoints<L> {
    pub const fn new(floor: L, steps: &'static [(f64, L)]) -> Self {
        Self { floor, steps }
    }

    pub fn classify(&self, value: f64) -> L {
        classify(value, self)
    }
}

/// Returns the level of the highest step whose threshold is `<= value`.
pub fn classify<L: Copy + 'static>(value: f64, breakpoints: &Breakpoints<L>) -> L {
    breakpoints
        .steps
        .iter()
        .rev()
        .find(|(threshold, _)| *threshold <= value)
        .map(|(_, level)| *level)
        .unwrap_or(breakpoints.floor)
}
