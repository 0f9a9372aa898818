//! 程序入口：初始化日志、加载 Slint UI，并绑定 VM 回调

use std::{
    cell::RefCell,
    path::PathBuf,
    rc::Rc,
    sync::{mpsc, Arc},
    thread,
};

use slint::{ComponentHandle, ModelRc, SharedPixelBuffer, Timer, TimerMode, VecModel};
use tracing_subscriber::fmt::SubscriberBuilder;

use ui_vision_coder::model::{
    config::AppConfig,
    data_core::{AppError, PreviewPixels},
    generator::{CodeGenerator, GeneratedCode, GenerationError, MockGenerator},
    highlight::{highlighter_for, HighlightedLine, Span, TokenKind},
    notification::Notification,
    output_format::{Language, OutputFormat},
    workflow::{CodeView, Workflow},
};
use ui_vision_coder::utils::clipboard::SystemClipboard;
use ui_vision_coder::vm::{bridge::*, code_panel, upload};

slint::include_modules!();

/// 深色主题下各类 token 的颜色
fn token_color(kind: TokenKind) -> slint::Color {
    match kind {
        TokenKind::Plain => slint::Color::from_rgb_u8(0xd4, 0xd4, 0xd4),
        TokenKind::Tag => slint::Color::from_rgb_u8(0x56, 0x9c, 0xd6),
        TokenKind::Attribute => slint::Color::from_rgb_u8(0x9c, 0xdc, 0xfe),
        TokenKind::String => slint::Color::from_rgb_u8(0xce, 0x91, 0x78),
        TokenKind::Comment => slint::Color::from_rgb_u8(0x6a, 0x99, 0x55),
        TokenKind::Keyword => slint::Color::from_rgb_u8(0xc5, 0x86, 0xc0),
        TokenKind::Punctuation => slint::Color::from_rgb_u8(0x80, 0x80, 0x80),
    }
}

// Span → CodeSegment
impl From<&Span> for CodeSegment {
    fn from(span: &Span) -> Self {
        Self {
            text: span.text.as_str().into(),
            color: token_color(span.kind),
        }
    }
}

// HighlightedLine → CodeLine
impl From<&HighlightedLine> for CodeLine {
    fn from(line: &HighlightedLine) -> Self {
        let segments: Vec<CodeSegment> = line.spans.iter().map(CodeSegment::from).collect();
        Self {
            number: line.number as i32,
            segments: ModelRc::new(VecModel::from(segments)),
        }
    }
}

fn preview_to_image(preview: &PreviewPixels) -> slint::Image {
    let buffer = SharedPixelBuffer::<slint::Rgba8Pixel>::clone_from_slice(
        &preview.rgba,
        preview.width,
        preview.height,
    );
    slint::Image::from_rgba8(buffer)
}

fn code_view_name(view: CodeView) -> &'static str {
    match view {
        CodeView::Loading => "loading",
        CodeView::Empty => "empty",
        CodeView::Code => "code",
    }
}

/// 后台线程的完成消息，经通道送回 UI 线程
enum WorkerEvent {
    ImageLoaded(Result<upload::LoadedImage, AppError>),
    Generated {
        ticket_id: u64,
        result: Result<GeneratedCode, GenerationError>,
    },
}

/// VM桥接器：管理UI与 Workflow 的交互
#[derive(Clone)]
struct ViewModelBridge {
    workflow: Rc<RefCell<Workflow>>,
    config: Rc<AppConfig>,
    generator: Arc<dyn CodeGenerator>,
    events_tx: mpsc::Sender<WorkerEvent>,
    events_rx: Rc<mpsc::Receiver<WorkerEvent>>,
    // 当前已渲染的代码与语言，避免重复构建高亮模型
    rendered: Rc<RefCell<Option<(String, Language)>>>,
    toast_timer: Rc<Timer>,
    copied_timer: Rc<Timer>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, config: AppConfig, generator: Arc<dyn CodeGenerator>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        let bridge = Self {
            workflow: Rc::new(RefCell::new(Workflow::new(config.initial_format()))),
            config: Rc::new(config),
            generator,
            events_tx,
            events_rx: Rc::new(events_rx),
            rendered: Rc::new(RefCell::new(None)),
            toast_timer: Rc::new(Timer::default()),
            copied_timer: Rc::new(Timer::default()),
        };

        bridge.setup_callbacks(app_window);
        bridge.setup_file_drop(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        // === 选择图片 ===
        {
            let bridge = self.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_pick_image(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    bridge.handle_pick_image(&app_window);
                }
            });
        }

        // === 切换输出格式 ===
        {
            let bridge = self.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_format_changed(move |index| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    bridge.handle_format_changed(&app_window, index);
                }
            });
        }

        // === 生成代码 ===
        {
            let bridge = self.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_generate(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    bridge.handle_generate(&app_window);
                }
            });
        }

        // === 复制 ===
        {
            let bridge = self.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_copy_code(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    bridge.handle_copy(&app_window);
                }
            });
        }

        // === 下载 ===
        {
            let bridge = self.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_download_code(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    bridge.handle_download(&app_window);
                }
            });
        }

        // === 关闭通知 ===
        {
            let toast_timer = self.toast_timer.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_dismiss_toast(move || {
                toast_timer.stop();
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_window.set_toast_visible(false);
                }
            });
        }

        // === 后台任务完成 ===
        {
            let bridge = self.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_worker_finished(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    bridge.drain_worker_events(&app_window);
                }
            });
        }
    }

    /// 窗口级文件拖放（winit 事件）
    fn setup_file_drop(&self, app_window: &AppWindow) {
        use slint::winit_030::{winit::event::WindowEvent, EventResult, WinitWindowAccessor};

        let bridge = self.clone();
        let app_window_weak = app_window.as_weak();
        app_window.window().on_winit_window_event(move |_window, event| {
            if let Some(app_window) = app_window_weak.upgrade() {
                match event {
                    WindowEvent::HoveredFile(_) => app_window.set_drag_over(true),
                    WindowEvent::HoveredFileCancelled => app_window.set_drag_over(false),
                    WindowEvent::DroppedFile(path) => {
                        app_window.set_drag_over(false);
                        tracing::info!("拖入文件: {}", path.display());
                        bridge.handle_file(&app_window, path.clone());
                    }
                    _ => {}
                }
            }
            EventResult::Propagate
        });
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_app_title(APP_TITLE.into());
        app_window.set_app_subtitle(APP_SUBTITLE.into());
        app_window.set_upload_hint(UPLOAD_HINT.into());
        app_window.set_generate_label(GENERATE_LABEL.into());
        app_window.set_generating_label(GENERATING_LABEL.into());
        app_window.set_loading_title(LOADING_TITLE.into());
        app_window.set_loading_text(LOADING_TEXT.into());
        app_window.set_empty_title(EMPTY_TITLE.into());
        app_window.set_empty_text(EMPTY_TEXT.into());

        let labels: Vec<slint::SharedString> =
            OutputFormat::ALL.iter().map(|f| f.label().into()).collect();
        app_window.set_format_labels(ModelRc::new(VecModel::from(labels)));

        self.refresh_ui(app_window);
    }

    /// 按 Workflow 快照刷新界面
    fn refresh_ui(&self, app_window: &AppWindow) {
        let snapshot = self.workflow.borrow().snapshot();

        let format_index = OutputFormat::ALL
            .iter()
            .position(|f| *f == snapshot.format)
            .unwrap_or(0) as i32;
        app_window.set_format_index(format_index);
        app_window.set_has_image(snapshot.has_image);
        app_window.set_can_generate(snapshot.can_generate);
        app_window.set_is_generating(snapshot.is_generating);
        app_window.set_code_view(code_view_name(snapshot.view).into());
        app_window.set_language_badge(snapshot.language.tag().to_uppercase().into());

        let key = (snapshot.code, snapshot.language);
        if self.rendered.borrow().as_ref() != Some(&key) {
            let lines: Vec<CodeLine> = highlighter_for(key.1)
                .highlight(&key.0)
                .iter()
                .map(CodeLine::from)
                .collect();
            app_window.set_code_lines(ModelRc::new(VecModel::from(lines)));
            *self.rendered.borrow_mut() = Some(key);
        }
    }

    /// 显示通知，到时自动隐藏
    fn show_toast(&self, app_window: &AppWindow, notification: &Notification) {
        app_window.set_toast_title(notification.title.as_str().into());
        app_window.set_toast_description(notification.description.as_str().into());
        app_window.set_toast_destructive(notification.is_destructive());
        app_window.set_toast_visible(true);

        let app_window_weak = app_window.as_weak();
        self.toast_timer.start(TimerMode::SingleShot, self.config.toast_duration(), move || {
            if let Some(app_window) = app_window_weak.upgrade() {
                app_window.set_toast_visible(false);
            }
        });
    }

    /// 显示文件选择对话框
    fn show_file_dialog() -> Option<PathBuf> {
        use rfd::FileDialog;

        let file_path = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .set_title(OPEN_DIALOG_TITLE)
            .pick_file();

        match file_path {
            Some(path) => {
                tracing::info!("用户选择了文件: {}", path.display());
                Some(path)
            }
            None => {
                tracing::info!("用户取消了文件选择");
                None
            }
        }
    }

    fn handle_pick_image(&self, app_window: &AppWindow) {
        if let Some(path) = Self::show_file_dialog() {
            self.handle_file(app_window, path);
        }
    }

    /// 过滤并在后台读取图片；非图片静默忽略
    fn handle_file(&self, app_window: &AppWindow, path: PathBuf) {
        let Some(mime) = upload::accept_file(&path) else {
            return;
        };

        let events_tx = self.events_tx.clone();
        let app_window_weak = app_window.as_weak();
        thread::spawn(move || {
            let result = upload::load_image(&path, mime);
            Self::deliver(events_tx, app_window_weak, WorkerEvent::ImageLoaded(result));
        });
    }

    fn handle_format_changed(&self, app_window: &AppWindow, index: i32) {
        let format = usize::try_from(index)
            .ok()
            .and_then(|i| OutputFormat::ALL.get(i).copied());
        let Some(format) = format else {
            tracing::warn!("无效的格式索引: {}", index);
            return;
        };
        self.workflow.borrow_mut().set_format(format);
        self.refresh_ui(app_window);
    }

    fn handle_generate(&self, app_window: &AppWindow) {
        let ticket = match self.workflow.borrow_mut().begin_generation() {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!("拒绝生成: {}", e);
                if let Some(notification) = e.notification() {
                    self.show_toast(app_window, &notification);
                }
                return;
            }
        };
        self.refresh_ui(app_window);

        let generator = self.generator.clone();
        let events_tx = self.events_tx.clone();
        let app_window_weak = app_window.as_weak();
        thread::spawn(move || {
            let result = generator.generate(&ticket.image, ticket.format);
            Self::deliver(
                events_tx,
                app_window_weak,
                WorkerEvent::Generated {
                    ticket_id: ticket.id,
                    result,
                },
            );
        });
    }

    fn handle_copy(&self, app_window: &AppWindow) {
        let code = self.workflow.borrow().code_text().to_string();
        let outcome = code_panel::copy_code(&mut SystemClipboard, &code);
        if outcome.copied {
            app_window.set_copied(true);
            let app_window_weak = app_window.as_weak();
            self.copied_timer.start(TimerMode::SingleShot, self.config.copy_feedback(), move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_window.set_copied(false);
                }
            });
        }
        self.show_toast(app_window, &outcome.notification);
    }

    fn handle_download(&self, app_window: &AppWindow) {
        let (code, language) = {
            let workflow = self.workflow.borrow();
            (workflow.code_text().to_string(), workflow.display_language())
        };

        let target = rfd::FileDialog::new()
            .set_title(SAVE_DIALOG_TITLE)
            .set_file_name(language.download_file_name())
            .add_filter(language.tag(), &[language.file_extension()])
            .save_file();

        match target {
            Some(path) => {
                let notification = code_panel::download_code(&path, &code);
                self.show_toast(app_window, &notification);
            }
            None => tracing::info!("用户取消了保存"),
        }
    }

    /// 后台线程：投递完成消息并唤醒 UI 线程
    fn deliver(
        events_tx: mpsc::Sender<WorkerEvent>,
        app_window_weak: slint::Weak<AppWindow>,
        event: WorkerEvent,
    ) {
        if events_tx.send(event).is_err() {
            tracing::warn!("UI 已关闭，丢弃后台结果");
            return;
        }
        let wake = slint::invoke_from_event_loop(move || {
            if let Some(app_window) = app_window_weak.upgrade() {
                app_window.invoke_worker_finished();
            }
        });
        if let Err(e) = wake {
            tracing::warn!("事件循环已停止，无法唤醒 UI: {}", e);
        }
    }

    /// UI 线程：处理所有已到达的完成消息
    fn drain_worker_events(&self, app_window: &AppWindow) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                WorkerEvent::ImageLoaded(Ok(loaded)) => {
                    let preview = loaded.preview.as_ref().map(preview_to_image);
                    app_window.set_has_preview(preview.is_some());
                    app_window.set_preview_image(preview.unwrap_or_default());
                    app_window.set_image_name(loaded.image.file_name().into());
                    self.workflow.borrow_mut().upload_image(loaded.image);
                }
                WorkerEvent::ImageLoaded(Err(e)) => {
                    tracing::error!("图片读取失败: {}", e);
                    self.show_toast(app_window, &Notification::upload_failed(&e.to_string()));
                }
                WorkerEvent::Generated { ticket_id, result } => {
                    let notification = self
                        .workflow
                        .borrow_mut()
                        .complete_generation(ticket_id, result);
                    if let Some(notification) = notification {
                        self.show_toast(app_window, &notification);
                    }
                }
            }
        }
        self.refresh_ui(app_window);
    }
}

fn main() -> anyhow::Result<()> {
    // 先读配置以确定日志级别；加载情况在日志系统就绪后再记录
    let (config, source) = AppConfig::load();

    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(config.tracing_level())
        .try_init();
    source.log();
    tracing::info!("配置: {:?}", config);

    let app = AppWindow::new()?;
    let generator: Arc<dyn CodeGenerator> = Arc::new(MockGenerator::new(config.generation_delay()));

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, config, generator);
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run()?;
    Ok(())
}
