pub mod config;
pub mod data_core;
pub mod generator;
pub mod highlight;
pub mod notification;
pub mod output_format;
pub mod workflow;
