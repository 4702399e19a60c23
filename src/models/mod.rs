//! Domain models shared by the history pipeline

mod enums;
mod record;

pub use enums::{Priority, StatusBucket};
pub use record::{Attachment, Record, RecordKind};

pub(crate) use record::format_date;
