//! 输出格式与语言标签

use std::fmt;

/// 可选的输出代码格式（固定三选一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// HTML + Tailwind CSS
    #[default]
    HtmlTailwind,
    /// React 组件 + Tailwind CSS
    ReactTailwind,
    /// HTML + 内联 CSS
    HtmlCss,
}

impl OutputFormat {
    /// 选择器展示顺序
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::HtmlTailwind,
        OutputFormat::ReactTailwind,
        OutputFormat::HtmlCss,
    ];

    /// 稳定的格式标识符（UI 与配置文件共用）
    pub fn id(self) -> &'static str {
        match self {
            OutputFormat::HtmlTailwind => "html-tailwind",
            OutputFormat::ReactTailwind => "react-tailwind",
            OutputFormat::HtmlCss => "html-css",
        }
    }

    /// 人类可读标签
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::HtmlTailwind => "HTML with Tailwind CSS",
            OutputFormat::ReactTailwind => "React Component with Tailwind CSS",
            OutputFormat::HtmlCss => "HTML with inline CSS",
        }
    }

    /// 按标识符查找，未知标识符返回 None
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// 该格式对应的语言标签
    pub fn language(self) -> Language {
        Language::for_format_id(self.id())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 语言标签：决定高亮规则与下载扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Html,
    Jsx,
}

impl Language {
    /// 标识符中包含 `react` 的格式视为 jsx，其余一律是 html
    pub fn for_format_id(id: &str) -> Self {
        if id.contains("react") {
            Language::Jsx
        } else {
            Language::Html
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Jsx => "jsx",
        }
    }

    /// 下载文件扩展名：非标记语言用组件源码扩展名，否则用 html
    pub fn file_extension(self) -> &'static str {
        match self {
            Language::Jsx => "jsx",
            Language::Html => "html",
        }
    }

    /// 下载文件名，形如 `generated-ui.<ext>`
    pub fn download_file_name(self) -> String {
        format!("generated-ui.{}", self.file_extension())
    }
}
