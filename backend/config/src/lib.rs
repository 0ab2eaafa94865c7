pub mod load;
pub mod schema;

pub use load::load_config;
pub use schema::SlotlineConfig;
