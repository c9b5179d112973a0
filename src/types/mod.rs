pub mod answers;
pub mod assessment;
pub mod config;
pub mod rules;
pub mod scoring;
