//! 上传面板逻辑：类型过滤与图片读取（在后台线程执行）

use std::path::Path;

use crate::model::data_core::{declared_mime_type, is_image_mime, AppError, ImageRef, PreviewPixels};
use crate::utils::fs::read_bytes;

/// 读取完成的图片：data URI + 预览像素
///
/// 未编译解码器的格式（如 svg、tiff）没有预览，界面显示占位图，但图片仍可用于生成。
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: ImageRef,
    pub preview: Option<PreviewPixels>,
}

/// 返回可接受文件的 MIME 类型；非图片文件静默拒绝（仅 debug 日志）
pub fn accept_file(path: &Path) -> Option<&'static str> {
    match declared_mime_type(path) {
        Some(mime) if is_image_mime(mime) => Some(mime),
        _ => {
            tracing::debug!("忽略非图片文件: {}", path.display());
            None
        }
    }
}

/// 读取文件、编码为 data URI 并尝试解码出预览
///
/// 只有读取失败才返回错误；预览解码失败记录 warn 后继续。
pub fn load_image(path: &Path, mime: &str) -> Result<LoadedImage, AppError> {
    let bytes = read_bytes(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let image = ImageRef::from_bytes(&file_name, mime, &bytes);
    let preview = match image.decode_preview() {
        Ok(preview) => Some(preview),
        Err(e) => {
            tracing::warn!("无法生成预览，使用占位图: {}: {}", path.display(), e);
            None
        }
    };
    Ok(LoadedImage { image, preview })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_png(dir: &Path, name: &str) -> std::path::PathBuf {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, out.into_inner()).unwrap();
        path
    }

    #[test]
    fn test_accepts_images_only() {
        assert_eq!(accept_file(Path::new("shot.png")), Some("image/png"));
        assert_eq!(accept_file(Path::new("shot.jpeg")), Some("image/jpeg"));
        assert_eq!(accept_file(Path::new("icon.svg")), Some("image/svg+xml"));
        assert_eq!(accept_file(Path::new("readme.md")), None);
        assert_eq!(accept_file(Path::new("archive.zip")), None);
    }

    #[test]
    fn test_load_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "mock.png");
        let loaded = load_image(&path, "image/png").expect("加载图片应该成功");
        assert!(loaded.image.data_uri().starts_with("data:image/png;base64,"));
        assert_eq!(loaded.image.file_name(), "mock.png");
        let preview = loaded.preview.expect("PNG 应该有预览");
        assert_eq!((preview.width, preview.height), (4, 4));
    }

    #[test]
    fn test_undecodable_image_keeps_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        // 小端 TIFF 文件头；未编译 tiff 解码器
        let tiff: &[u8] = &[
            0x49, 0x49, 0x2a, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x01, 0x03, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let cases: [(&str, &[u8]); 3] = [
            ("scan.tiff", tiff),
            ("logo.svg", br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#),
            ("broken.png", b"definitely not png"),
        ];
        for (name, bytes) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, bytes).unwrap();
            let mime = accept_file(&path).expect("图片类型应该被接受");
            let loaded = load_image(&path, mime).expect("无法预览的图片也应加载成功");
            assert!(loaded.preview.is_none(), "{} 不应有预览", name);
            assert_eq!(loaded.image.file_name(), name);
            assert_eq!(loaded.image.payload_bytes().unwrap(), bytes);
        }
    }

    #[test]
    fn test_undecodable_image_enables_generation() {
        use crate::model::output_format::OutputFormat;
        use crate::model::workflow::{CodeView, Workflow};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.svg");
        std::fs::write(&path, br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        let mime = accept_file(&path).expect("svg 应该被接受");
        let loaded = load_image(&path, mime).unwrap();

        let mut workflow = Workflow::new(OutputFormat::default());
        workflow.upload_image(loaded.image);
        assert!(workflow.can_generate());
        assert_eq!(workflow.code_view(), CodeView::Empty);
    }

    #[test]
    fn test_unreadable_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        assert!(matches!(load_image(&path, "image/png"), Err(AppError::Io(_))));
    }
}
