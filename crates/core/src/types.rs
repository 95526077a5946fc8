/// All primary keys are 24-character lowercase hex strings (see [`crate::ids::ObjectId`]).
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time component (joining date, project dates).
pub type Date = chrono::NaiveDate;
