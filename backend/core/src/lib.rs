pub mod error;
pub mod types;
pub mod validate;

pub use error::SlotError;
pub use types::{
    CancelOutcome, Cancellation, Confirmation, Note, Project, WorkingDay,
};
