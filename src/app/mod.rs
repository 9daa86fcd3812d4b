pub mod commands;
pub mod pipelines;
pub mod report;
