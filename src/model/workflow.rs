//! Workflow：上传 → 生成 → 展示 的状态机
//!
//! 状态只在 UI 线程上修改。后台生成以 `GenerationTicket` 标记，
//! 完成时票据不匹配（期间重新上传过图片）则丢弃结果。

use thiserror::Error;

use crate::model::data_core::ImageRef;
use crate::model::generator::{GeneratedCode, GenerationError};
use crate::model::notification::Notification;
use crate::model::output_format::{Language, OutputFormat};

/// 状态类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 无图片
    Idle,
    /// 有图片，无代码，未生成
    Ready,
    /// 生成中
    Generating,
    /// 有图片，有代码，未生成
    ReadyWithCode,
}

/// 代码面板视图，按优先级互斥：生成中 > 无代码 > 代码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeView {
    Loading,
    Empty,
    Code,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("尚未上传图片")]
    NoImage,
    #[error("生成正在进行中")]
    AlreadyGenerating,
}

impl WorkflowError {
    /// 需要提示用户的错误对应的通知；重复请求静默忽略
    pub fn notification(&self) -> Option<Notification> {
        match self {
            WorkflowError::NoImage => Some(Notification::no_image()),
            WorkflowError::AlreadyGenerating => None,
        }
    }
}

/// 一次生成请求的快照，交给后台线程
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub id: u64,
    pub image: ImageRef,
    pub format: OutputFormat,
}

/// 只读快照，供视图渲染
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub phase: Phase,
    pub view: CodeView,
    pub has_image: bool,
    pub can_generate: bool,
    pub is_generating: bool,
    pub format: OutputFormat,
    pub language: Language,
    pub code: String,
}

#[derive(Debug, Default)]
pub struct Workflow {
    image: Option<ImageRef>,
    format: OutputFormat,
    code: Option<GeneratedCode>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl Workflow {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// 新图片解码完成：任意状态 → Ready，丢弃旧代码与进行中的生成
    pub fn upload_image(&mut self, image: ImageRef) {
        if let Some(stale) = self.in_flight.take() {
            tracing::warn!("生成 #{} 进行中时重新上传了图片，其结果将被丢弃", stale);
        }
        tracing::info!("图片已上传: {} ({}, {} 字节)", image.file_name(), image.mime(), image.byte_len());
        self.image = Some(image);
        self.code = None;
    }

    /// 切换输出格式，不影响图片与已生成代码
    pub fn set_format(&mut self, format: OutputFormat) {
        if self.format != format {
            tracing::info!("输出格式切换: {} -> {}", self.format, format);
        }
        self.format = format;
    }

    /// 请求生成：成功则进入 Generating 并返回票据
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, WorkflowError> {
        if self.in_flight.is_some() {
            return Err(WorkflowError::AlreadyGenerating);
        }
        let image = self.image.clone().ok_or(WorkflowError::NoImage)?;
        self.next_ticket += 1;
        let id = self.next_ticket;
        self.in_flight = Some(id);
        tracing::info!("生成 #{} 开始，格式: {}", id, self.format);
        Ok(GenerationTicket {
            id,
            image,
            format: self.format,
        })
    }

    /// 生成结束；过期票据返回 None 且不改变状态
    pub fn complete_generation(
        &mut self,
        ticket_id: u64,
        result: Result<GeneratedCode, GenerationError>,
    ) -> Option<Notification> {
        if self.in_flight != Some(ticket_id) {
            tracing::warn!("丢弃过期的生成结果 #{}", ticket_id);
            return None;
        }
        self.in_flight = None;
        match result {
            Ok(code) => {
                tracing::info!("生成 #{} 成功，{} 字符", ticket_id, code.text.len());
                self.code = Some(code);
                Some(Notification::generation_succeeded())
            }
            Err(e) => {
                tracing::error!("生成 #{} 失败: {}", ticket_id, e);
                Some(Notification::generation_failed())
            }
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.image, self.in_flight, &self.code) {
            (None, _, _) => Phase::Idle,
            (Some(_), Some(_), _) => Phase::Generating,
            (Some(_), None, None) => Phase::Ready,
            (Some(_), None, Some(_)) => Phase::ReadyWithCode,
        }
    }

    pub fn code_view(&self) -> CodeView {
        if self.is_generating() {
            CodeView::Loading
        } else if self.code_text().is_empty() {
            CodeView::Empty
        } else {
            CodeView::Code
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_generate(&self) -> bool {
        self.image.is_some() && !self.is_generating()
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn code_text(&self) -> &str {
        self.code.as_ref().map(|c| c.text.as_str()).unwrap_or("")
    }

    /// 渲染与下载所用语言标签，跟随当前选中的格式
    pub fn display_language(&self) -> Language {
        self.format.language()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            phase: self.phase(),
            view: self.code_view(),
            has_image: self.image.is_some(),
            can_generate: self.can_generate(),
            is_generating: self.is_generating(),
            format: self.format,
            language: self.display_language(),
            code: self.code_text().to_string(),
        }
    }
}
