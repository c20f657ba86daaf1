//! Workflow drivers wiring configuration, input, scraping and output together

mod emails;
mod registry;

pub use emails::{run_email_workflow, CompanyContact, EmailDiscovery};
pub use registry::run_registry_workflow;
