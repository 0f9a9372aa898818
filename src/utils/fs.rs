//! IO helper: JSON 配置读取、文本与图片文件读写

use std::{fs::File, io::BufReader, io::Write, path::Path};

use serde_json::Value;
use crate::model::data_core::AppError;

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 读取整个二进制文件（上传的图片）
pub fn read_bytes(p: &Path) -> Result<Vec<u8>, AppError> {
    Ok(std::fs::read(p)?)
}

/// 将文本原样写入文件；句柄在函数返回前关闭
pub fn write_text_file(p: &Path, text: &str) -> Result<(), AppError> {
    let mut f = File::create(p)?;
    f.write_all(text.as_bytes())?;
    f.flush()?;
    Ok(())
}
