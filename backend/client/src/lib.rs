pub mod client;
pub mod mock;
pub mod types;

pub use client::{ApiMode, ClientConfig, SchedulerClient};
pub use types::{
    AvailableDates, CancelResult, ConfirmResult, NoteResult, RescheduleResult, TimeSlots,
    WorkingHours,
};
