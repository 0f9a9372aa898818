//! UI 图片转代码工具库
//!
//! 提供图片上传（data URI）、输出格式选择、模拟代码生成、语法高亮与复制/下载功能
//! 遵循MVVM架构模式：model 为纯数据与状态机，vm 为面板动作，UI 绑定在 main.rs

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::data_core::{AppError, ImageRef};
pub use model::output_format::{Language, OutputFormat};
pub use model::workflow::{CodeView, Phase, Workflow, WorkflowSnapshot};
