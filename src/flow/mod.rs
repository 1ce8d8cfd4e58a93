//! Flow controller layer

mod controller;
mod form_state;

pub use controller::{ConfigEntry, ConfigFlow, FlowOutcome, FlowStep};
pub use form_state::{FormState, FormView};
