//! Inclusive publication year range used for queries and table columns.

use std::fmt;
use std::ops::RangeInclusive;

/// First year queried when no range is given.
pub const DEFAULT_START_YEAR: u16 = 1913;
/// Last year queried when no range is given.
pub const DEFAULT_END_YEAR: u16 = 2021;

/// Inclusive `start..=end` year range. Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: u16,
    end: u16,
}

impl YearRange {
    /// Creates a range, or `None` when `start > end`.
    #[must_use]
    pub fn new(start: u16, end: u16) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> u16 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> u16 {
        self.end
    }

    /// Number of years in the range.
    #[must_use]
    pub fn len(self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    /// A `YearRange` always holds at least one year.
    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    /// Years in increasing order.
    #[must_use]
    pub fn years(self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    /// Output table header: `journal` followed by one label per year.
    #[must_use]
    pub fn header(self) -> Vec<String> {
        std::iter::once("journal".to_string())
            .chain(self.years().map(|year| year.to_string()))
            .collect()
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
