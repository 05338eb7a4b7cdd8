//! Record type definitions

pub mod customer;
pub mod employee;
pub mod engagement;
pub mod partner;
pub mod proposal;
pub mod task;

pub use customer::Customer;
pub use employee::Employee;
pub use engagement::Engagement;
pub use partner::Partner;
pub use proposal::Proposal;
pub use task::Task;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::grid::Value;

/// Grid value for an optional day-granularity date
pub(crate) fn date_value(date: Option<NaiveDate>) -> Value {
    match date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(dt) => Value::Date(Utc.from_utc_datetime(&dt)),
        None => Value::Null,
    }
}

/// Grid value for a tag list (rendered comma-separated for search)
pub(crate) fn tags_value(tags: &[String]) -> Value {
    if tags.is_empty() {
        Value::Null
    } else {
        Value::Text(tags.join(", "))
    }
}
