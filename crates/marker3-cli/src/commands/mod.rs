//! CLI command implementations

pub mod install;
pub mod json_output;
pub mod menus;
pub mod plan;
pub mod template;
pub mod validate;

mod reporting;
