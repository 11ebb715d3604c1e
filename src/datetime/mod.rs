//! Date serializer
//!
//! Dates, date-times and times are stored and compared as day-serials:
//! days since 1899-12-30, with the time of day as a fraction. Exact
//! comparisons use the numeric serial; non-exact comparisons render the
//! serial through the column's display format.

mod patterns;
mod serial;

pub use patterns::TemporalPatterns;
pub use serial::{
    date_to_serial, datetime_to_serial, default_format, parse_serial, render_serial,
    serial_to_datetime, serial_to_time, time_to_serial, DEFAULT_DATETIME_FORMAT,
    DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, SERIAL_EPSILON,
};
