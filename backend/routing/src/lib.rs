pub mod action;
pub mod params;
pub mod router;

pub use action::Action;
pub use params::ParamMap;
pub use router::{ActionOutcome, ActionRouter};
