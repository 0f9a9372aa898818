//! 代码生成步骤：`CodeGenerator` 抽象与当前的模拟实现
//!
//! 模拟实现固定延迟后按格式返回硬编码代码片段。真实后端只需实现同一个 trait，
//! 工作流的进入/退出状态与失败路径保持不变。

use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::model::data_core::ImageRef;
use crate::model::output_format::{Language, OutputFormat};

/// 默认模拟延迟
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_millis(2000);

/// 未知格式时返回的占位注释
pub const PLACEHOLDER_CODE: &str = "// Generated code will appear here...";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("生成失败: {0}")]
    Failed(String),
}

/// 生成结果：代码文本 + 语言标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub text: String,
    pub language: Language,
}

/// 生成步骤接口；在后台线程上调用，允许阻塞
pub trait CodeGenerator: Send + Sync {
    fn generate(
        &self,
        image: &ImageRef,
        format: OutputFormat,
    ) -> Result<GeneratedCode, GenerationError>;
}

/// 模拟生成器：固定延迟，总是成功
#[derive(Debug, Clone)]
pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 按格式标识符选择固定代码体；未知标识符返回占位注释
    pub fn body_for(format_id: &str) -> &'static str {
        match format_id {
            "html-tailwind" => HTML_TAILWIND_BODY,
            "react-tailwind" => REACT_TAILWIND_BODY,
            "html-css" => HTML_CSS_BODY,
            _ => PLACEHOLDER_CODE,
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATION_DELAY)
    }
}

impl CodeGenerator for MockGenerator {
    fn generate(
        &self,
        image: &ImageRef,
        format: OutputFormat,
    ) -> Result<GeneratedCode, GenerationError> {
        tracing::info!(
            "模拟生成开始: 格式={}, 图片={} ({} 字节)",
            format,
            image.file_name(),
            image.byte_len()
        );
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(GeneratedCode {
            text: Self::body_for(format.id()).to_string(),
            language: format.language(),
        })
    }
}

const HTML_TAILWIND_BODY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generated UI</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-100">
    <div class="container mx-auto p-6">
        <div class="bg-white rounded-lg shadow-md p-6">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">Welcome</h1>
            <p class="text-gray-600 mb-6">This is your generated UI component.</p>
            <button class="bg-blue-500 hover:bg-blue-600 text-white px-6 py-2 rounded-lg">
                Get Started
            </button>
        </div>
    </div>
</body>
</html>"#;

const REACT_TAILWIND_BODY: &str = r#"import React from 'react';

const GeneratedComponent = () => {
  return (
    <div className="bg-gray-100 min-h-screen p-6">
      <div className="container mx-auto">
        <div className="bg-white rounded-lg shadow-md p-6">
          <h1 className="text-2xl font-bold text-gray-800 mb-4">Welcome</h1>
          <p className="text-gray-600 mb-6">This is your generated UI component.</p>
          <button className="bg-blue-500 hover:bg-blue-600 text-white px-6 py-2 rounded-lg transition-colors">
            Get Started
          </button>
        </div>
      </div>
    </div>
  );
};

export default GeneratedComponent;"#;

const HTML_CSS_BODY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generated UI</title>
    <style>
        body {
            margin: 0;
            padding: 0;
            font-family: Arial, sans-serif;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 24px;
        }
        .card {
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            padding: 24px;
        }
        .title {
            font-size: 24px;
            font-weight: bold;
            color: #333;
            margin-bottom: 16px;
        }
        .description {
            color: #666;
            margin-bottom: 24px;
        }
        .button {
            background-color: #3b82f6;
            color: white;
            padding: 8px 24px;
            border: none;
            border-radius: 6px;
            cursor: pointer;
            font-size: 16px;
        }
        .button:hover {
            background-color: #2563eb;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1 class="title">Welcome</h1>
            <p class="description">This is your generated UI component.</p>
            <button class="button">Get Started</button>
        </div>
    </div>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ImageRef {
        ImageRef::from_bytes("mock.png", "image/png", b"\x89PNG")
    }

    #[test]
    fn test_html_tailwind_body() {
        let code = MockGenerator::new(Duration::ZERO)
            .generate(&sample_image(), OutputFormat::HtmlTailwind)
            .unwrap();
        assert!(code.text.contains("<title>Generated UI</title>"));
        assert!(code.text.contains(r#"<script src="https://cdn.tailwindcss.com"></script>"#));
        assert_eq!(code.language, Language::Html);
    }

    #[test]
    fn test_react_tailwind_body() {
        let code = MockGenerator::new(Duration::ZERO)
            .generate(&sample_image(), OutputFormat::ReactTailwind)
            .unwrap();
        assert!(code.text.contains("export default GeneratedComponent;"));
        assert_eq!(code.language, Language::Jsx);
    }

    #[test]
    fn test_html_css_body() {
        let code = MockGenerator::new(Duration::ZERO)
            .generate(&sample_image(), OutputFormat::HtmlCss)
            .unwrap();
        assert!(code.text.contains("<style>"));
        assert!(code.text.contains(".card {"));
        assert_eq!(code.language, Language::Html);
    }

    #[test]
    fn test_unknown_format_yields_placeholder() {
        assert_eq!(MockGenerator::body_for("vue-tailwind"), PLACEHOLDER_CODE);
        assert_eq!(MockGenerator::body_for(""), PLACEHOLDER_CODE);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let generator = MockGenerator::new(Duration::ZERO);
        let image = sample_image();
        let first = generator.generate(&image, OutputFormat::HtmlCss).unwrap();
        let second = generator.generate(&image, OutputFormat::HtmlCss).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_delay_is_honoured() {
        let generator = MockGenerator::new(Duration::from_millis(30));
        let start = std::time::Instant::now();
        generator.generate(&sample_image(), OutputFormat::HtmlTailwind).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
