//! 代码面板动作：复制与下载

use std::path::Path;

use crate::model::notification::Notification;
use crate::utils::clipboard::TextClipboard;
use crate::utils::fs::write_text_file;

/// 复制结果：是否成功（决定是否显示2秒勾选反馈）+ 通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub copied: bool,
    pub notification: Notification,
}

/// 把代码原样写入剪贴板；失败只产生通知，不向上传播
pub fn copy_code(clipboard: &mut dyn TextClipboard, code: &str) -> CopyOutcome {
    match clipboard.set_text(code) {
        Ok(()) => {
            tracing::info!("代码已复制到剪贴板，长度: {} 字符", code.len());
            CopyOutcome {
                copied: true,
                notification: Notification::code_copied(),
            }
        }
        Err(e) => {
            tracing::error!("复制失败: {}", e);
            CopyOutcome {
                copied: false,
                notification: Notification::copy_failed(),
            }
        }
    }
}

/// 下载：写文件并返回以实际文件名命名的通知
pub fn download_code(target: &Path, code: &str) -> Notification {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| target.display().to_string());
    match write_text_file(target, code) {
        Ok(()) => {
            tracing::info!("代码已保存: {}", target.display());
            Notification::code_downloaded(&file_name)
        }
        Err(e) => {
            tracing::error!("代码保存失败: {}: {}", target.display(), e);
            Notification::download_failed(&e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::generator::MockGenerator;
    use crate::model::output_format::{Language, OutputFormat};
    use crate::utils::clipboard::MemoryClipboard;

    #[test]
    fn test_copy_is_byte_exact() {
        let samples = [
            MockGenerator::body_for("react-tailwind"),
            "const a = `x ${y}`;\nconst b = \"q\" + 'r';",
            " ",
            "\n\n",
        ];
        for code in samples {
            let mut clipboard = MemoryClipboard::default();
            let outcome = copy_code(&mut clipboard, code);
            assert!(outcome.copied);
            assert_eq!(outcome.notification, Notification::code_copied());
            assert_eq!(clipboard.contents.as_deref(), Some(code));
        }
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let mut clipboard = MemoryClipboard { fail: true, ..Default::default() };
        let outcome = copy_code(&mut clipboard, "<div></div>");
        assert!(!outcome.copied);
        assert!(outcome.notification.is_destructive());
        assert_eq!(outcome.notification.title, "Copy failed");
    }

    #[test]
    fn test_download_writes_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let language = OutputFormat::ReactTailwind.language();
        assert_eq!(language, Language::Jsx);
        let target = dir.path().join(language.download_file_name());
        let code = MockGenerator::body_for("react-tailwind");

        let notification = download_code(&target, code);
        assert_eq!(notification.description, "File saved as generated-ui.jsx");
        assert!(!notification.is_destructive());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), code);
    }

    #[test]
    fn test_download_uses_markup_extension_for_html_formats() {
        let dir = tempfile::tempdir().unwrap();
        for format in [OutputFormat::HtmlTailwind, OutputFormat::HtmlCss] {
            let target = dir.path().join(format.language().download_file_name());
            let notification = download_code(&target, MockGenerator::body_for(format.id()));
            assert_eq!(notification.description, "File saved as generated-ui.html");
        }
    }

    #[test]
    fn test_download_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing_dir").join("generated-ui.html");
        let notification = download_code(&target, "<p></p>");
        assert!(notification.is_destructive());
        assert_eq!(notification.title, "Download failed");
    }
}
