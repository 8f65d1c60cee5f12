mod mock_data;
mod types;

pub use mock_data::seed_events;
pub use types::{Event, EventUpdate, Notification};
