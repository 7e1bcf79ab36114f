//! SQL time-expression factory.
//!
//! A closed set of expression kinds, each mapped to a fixed per-dialect
//! fragment from the capability profile.

use crate::dialect::Dialect;

/// Current date/time expression kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NowExpr {
    /// The current date.
    CurrentDate,
    /// The current time of day.
    CurrentTime,
    /// The current date and time.
    CurrentTimestamp,
}

impl NowExpr {
    /// Returns the SQL fragment for this expression on the given dialect.
    #[must_use]
    pub const fn sql(self, dialect: Dialect) -> &'static str {
        let profile = dialect.profile();
        match self {
            Self::CurrentDate => profile.current_date,
            Self::CurrentTime => profile.current_time,
            Self::CurrentTimestamp => profile.current_timestamp,
        }
    }
}
