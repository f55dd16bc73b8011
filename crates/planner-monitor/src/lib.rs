//! Logging, plan reports and the interactive form.

mod form;
mod logging;
mod report;

pub use form::{FormAction, FormState, PlannerForm};
pub use logging::setup_logging;
pub use report::{format_fixed, incomplete_summary, PlanReport};
