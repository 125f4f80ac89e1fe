//! Value objects - immutable types that represent domain concepts

mod phone;
mod record_id;

pub use phone::{PhoneNumber, PhoneNumberError};
pub use record_id::{IdGenerator, RecordId, RecordIdParseError};
