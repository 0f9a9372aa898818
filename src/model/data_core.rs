//! 核心数据：图片引用（data URI）与统一错误类型

use std::path::Path;

use base64::Engine;
use thiserror::Error;

/// image crate 不识别矢量图，单独映射
const SVG_MIME: &str = "image/svg+xml";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("图片解码失败: {0}")]
    Image(#[from] image::ImageError),
    #[error("Base64解码失败: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("data URI 格式错误: {0}")]
    DataUri(String),
}

/// 根据文件扩展名推断声明的 MIME 类型（等价于浏览器 File.type）
///
/// 无法识别的扩展名返回 None，调用方据此静默忽略该文件。
pub fn declared_mime_type(path: &Path) -> Option<&'static str> {
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        return Some(SVG_MIME);
    }
    image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
}

/// MIME 前缀检查：只接受 `image/*`
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// 已上传图片的内存表示：`data:<mime>;base64,<payload>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    data_uri: String,
    mime: String,
    file_name: String,
    byte_len: usize,
}

impl ImageRef {
    /// 将原始文件字节编码为 data URI
    pub fn from_bytes(file_name: &str, mime: &str, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data_uri: format!("data:{};base64,{}", mime, payload),
            mime: mime.to_string(),
            file_name: file_name.to_string(),
            byte_len: bytes.len(),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// 从 data URI 取回原始字节
    pub fn payload_bytes(&self) -> Result<Vec<u8>, AppError> {
        let payload = self
            .data_uri
            .find(";base64,")
            .map(|pos| &self.data_uri[pos + 8..])
            .ok_or_else(|| AppError::DataUri("缺少 ;base64, 标记".into()))?;
        Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
    }

    /// 解码为 RGBA 预览像素
    pub fn decode_preview(&self) -> Result<PreviewPixels, AppError> {
        let bytes = self.payload_bytes()?;
        let rgba = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(PreviewPixels {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// 预览用的 RGBA 像素缓冲（与 UI 框架解耦，可跨线程传递）
#[derive(Debug, Clone)]
pub struct PreviewPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}
