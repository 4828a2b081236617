//! Forecast granularity.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularity of a series and of the forecasts made from it.
///
/// Every period other than `Daily` is calendar aligned: ISO weeks start on
/// Monday, months on the 1st, quarters in January/April/July/October and
/// years on January 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Quarterly,
        Period::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }

    /// First day of the bucket containing `date`.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Daily => date,
            Period::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Period::Monthly => first_of_month(date),
            Period::Quarterly => {
                let mut start = first_of_month(date);
                while start.month0() % 3 != 0 {
                    start = first_of_month(start - Duration::days(1));
                }
                start
            }
            Period::Yearly => date - Duration::days(i64::from(date.ordinal0())),
        }
    }

    /// Start of the bucket that follows the bucket containing `date`.
    pub fn next_start(&self, date: NaiveDate) -> NaiveDate {
        let start = self.bucket_start(date);
        match self {
            Period::Daily => start + Duration::days(1),
            Period::Weekly => start + Duration::days(7),
            Period::Monthly => next_month(start),
            Period::Quarterly => next_month(next_month(next_month(start))),
            Period::Yearly => self.bucket_start(start + Duration::days(366)),
        }
    }

    /// Whether two dates fall in the same bucket.
    pub fn same_bucket(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.bucket_start(a) == self.bucket_start(b)
    }

    /// Length of the dominant seasonal cycle, in buckets, if there is one.
    pub fn primary_season(&self) -> Option<usize> {
        match self {
            Period::Daily => Some(7),
            Period::Weekly => Some(4),
            Period::Monthly => Some(12),
            Period::Quarterly => Some(4),
            Period::Yearly => None,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown period '{}'", s))
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn next_month(first: NaiveDate) -> NaiveDate {
    // day 1 + 32 days always lands on day 2..=5 of the following month
    first_of_month(first_of_month(first) + Duration::days(32))
}
