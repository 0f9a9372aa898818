//! VM桥接层：连接Slint UI与 Workflow 数据模型
//!
//! 注意：回调绑定在main.rs中，因为依赖于Slint生成的类型
//! 这里只提供公共常量

// === 常量定义（消除魔法值） ===
pub const APP_TITLE: &str = "UI Vision Coder";
pub const APP_SUBTITLE: &str = "From Image to Code with AI";

pub const UPLOAD_HINT: &str = "Drag and drop an image or click to browse. Supports PNG, JPG, WEBP files.";
pub const GENERATE_LABEL: &str = "Generate Code";
pub const GENERATING_LABEL: &str = "AI is analyzing the image...";

pub const LOADING_TITLE: &str = "AI is analyzing your image";
pub const LOADING_TEXT: &str = "Converting your UI design into production-ready code...";
pub const EMPTY_TITLE: &str = "No code generated yet";
pub const EMPTY_TEXT: &str = "Upload an image and click \"Generate Code\" to see the AI-generated code here.";

pub const OPEN_DIALOG_TITLE: &str = "Choose a UI image";
pub const SAVE_DIALOG_TITLE: &str = "Save generated code";
/// 文件选择对话框中的图片扩展名过滤
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "svg", "tiff", "tif",
];
