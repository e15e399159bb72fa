pub mod extraction;
pub mod prompt_templates;
pub mod analysis;
pub mod safety;
