pub mod bridge;
pub mod code_panel;
pub mod upload;
