//! 用户可见的临时通知（toast）

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            severity: Severity::Default,
        }
    }

    pub fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }

    pub fn code_copied() -> Self {
        Self::info("Code copied!", "The generated code has been copied to your clipboard.")
    }

    pub fn copy_failed() -> Self {
        Self::destructive("Copy failed", "Failed to copy code to clipboard.")
    }

    pub fn code_downloaded(file_name: &str) -> Self {
        Self::info("Code downloaded!", format!("File saved as {}", file_name))
    }

    pub fn download_failed(reason: &str) -> Self {
        Self::destructive("Download failed", format!("Could not save the file: {}", reason))
    }

    pub fn no_image() -> Self {
        Self::destructive("No image uploaded", "Please upload an image first to generate code.")
    }

    pub fn generation_succeeded() -> Self {
        Self::info("Code generated successfully!", "Your UI has been converted to code.")
    }

    pub fn generation_failed() -> Self {
        Self::destructive("Generation failed", "Failed to generate code. Please try again.")
    }

    pub fn upload_failed(reason: &str) -> Self {
        Self::destructive("Upload failed", format!("Could not read the image: {}", reason))
    }
}
