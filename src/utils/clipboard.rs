//! Clipboard  cross-platform clipboard helpers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Clip(String),
}

/// 可写入纯文本的剪贴板
pub trait TextClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 系统剪贴板（copypasta）
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl TextClipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_clipboard(text)
    }
}

/// 将文本复制到系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

/// 内存剪贴板，测试中替代系统剪贴板
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl TextClipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Clip("permission denied".into()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_exact_text() {
        let mut clipboard = MemoryClipboard::default();
        let text = "🚀 `backtick` \"quote\"\nsecond line";
        clipboard.set_text(text).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some(text));
    }

    #[test]
    fn test_memory_clipboard_failure() {
        let mut clipboard = MemoryClipboard { fail: true, ..Default::default() };
        let err = clipboard.set_text("x").unwrap_err();
        assert_eq!(err.to_string(), "clipboard error: permission denied");
        assert!(clipboard.contents.is_none());
    }
}
