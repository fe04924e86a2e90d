// AI-assisted content generation flows.
// Each flow is a single linear pipeline: validate → render prompt → provider call →
// validate output → return. All provider calls go through `policy::invoke_provider`.

pub mod confidentiality;
pub mod error;
pub mod handlers;
pub mod policy;
pub mod project_description;
pub mod prompts;
pub mod skill_badges;

#[cfg(test)]
pub(crate) mod testing;

pub use error::FlowError;
