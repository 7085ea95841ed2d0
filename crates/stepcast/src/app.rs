use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, error, info};

use stepcast::{Engine, Navigation, PlaybackError, PlaybackResult, Presentation};

use crate::config::Config;
use crate::render;
use crate::render::image_cache::ImageCache;
use crate::render::viewer::ViewerHost;
use crate::theme::Theme;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;

/// Input collected during a frame, applied once the input lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    Restart,
    ToggleTheme,
    ToggleHelp,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

struct PlayerApp {
    engine: Engine<ViewerHost>,
    file_path: PathBuf,
    theme: Theme,
    images: ImageCache,
    cursor_size: f32,
    show_help: bool,
    toast: Option<Toast>,
}

impl PlayerApp {
    fn new(file: PathBuf, engine: Engine<ViewerHost>, config: &Config) -> Self {
        let base_path = file
            .parent()
            .unwrap_or(std::path::Path::new("."))
            .to_path_buf();
        Self {
            engine,
            file_path: file,
            theme: Theme::from_name(config.theme()),
            images: ImageCache::new(base_path),
            cursor_size: config.cursor_size(),
            show_help: false,
            toast: None,
        }
    }

    fn display_title(&self) -> String {
        self.engine
            .presentation()
            .metadata()
            .title
            .clone()
            .unwrap_or_else(|| {
                self.file_path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string()
            })
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Next => match self.engine.advance() {
                Ok(Navigation::Finished) => {
                    self.toast = Some(Toast::new("End of presentation".to_string()));
                }
                Ok(Navigation::Busy) => debug!("next ignored while animating"),
                Ok(_) => {}
                Err(e) => self.report(e),
            },
            Command::Previous => match self.engine.retreat() {
                Ok(Navigation::AtStart) => {
                    self.toast = Some(Toast::new("Start of presentation".to_string()));
                }
                Ok(Navigation::Busy) => debug!("previous ignored while animating"),
                Ok(_) => {}
                Err(e) => self.report(e),
            },
            Command::Restart => {
                if let Err(e) = self.engine.restart() {
                    self.report(e);
                }
            }
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
            }
            Command::ToggleHelp => self.show_help = !self.show_help,
        }
    }

    /// Report every tween that finished since the previous frame.
    fn pump_completions(&mut self) {
        let finished = self.engine.host_mut().tick(Instant::now());
        for id in finished {
            if let Err(e) = self.engine.finish(id) {
                self.report(e);
            }
        }
    }

    fn report(&mut self, e: PlaybackError) {
        error!(error = %e, "playback halted");
        self.toast = Some(Toast::new(e.to_string()));
    }

    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect) {
        let position = self.engine.position();
        let text = format!(
            "{}  {}/{}",
            self.display_title(),
            position.slide + 1,
            self.engine.presentation().slide_count()
        );
        let color = Theme::with_opacity(self.theme.foreground, 0.6);
        let galley = ui
            .painter()
            .layout_no_wrap(text, egui::FontId::proportional(14.0), color);
        let pos = egui::pos2(
            rect.right() - galley.rect.width() - 12.0,
            rect.bottom() - galley.rect.height() - 10.0,
        );
        ui.painter().galley(pos, galley, color);
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(self.theme.body_size),
            Theme::with_opacity(self.theme.heading_color, opacity),
        );
        let size = galley.size() + egui::vec2(32.0, 16.0);
        let toast_rect = egui::Rect::from_center_size(
            egui::pos2(rect.center().x, rect.bottom() - 60.0),
            size,
        );
        ui.painter().rect_filled(
            toast_rect,
            8.0,
            Theme::with_opacity(self.theme.panel_background, 0.9 * opacity),
        );
        ui.painter().galley(
            toast_rect.min + egui::vec2(16.0, 8.0),
            galley,
            self.theme.heading_color,
        );
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_completions();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut commands: Vec<Command> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            if i.key_pressed(egui::Key::D) {
                commands.push(Command::ToggleTheme);
            }
            if i.key_pressed(egui::Key::H) {
                commands.push(Command::ToggleHelp);
            }
            if i.key_pressed(egui::Key::Home) {
                commands.push(Command::Restart);
            }
            // Forward: Right, N, Space, left click
            if i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::N)
                || i.key_pressed(egui::Key::Space)
                || i.pointer.primary_clicked()
            {
                commands.push(Command::Next);
            }
            // Backward: Left, P, Backspace, right click
            if i.key_pressed(egui::Key::ArrowLeft)
                || i.key_pressed(egui::Key::P)
                || i.key_pressed(egui::Key::Backspace)
                || i.pointer.secondary_clicked()
            {
                commands.push(Command::Previous);
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        for command in commands {
            self.apply(command);
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                render::render_stage(
                    ui,
                    self.engine.presentation(),
                    self.engine.host(),
                    &self.images,
                    &self.theme,
                    rect,
                    self.cursor_size,
                );
                self.draw_chrome(ui, rect);
                if self.show_help {
                    draw_help(ui, &self.theme, rect);
                }
                self.draw_toast(ui, rect);
            });

        if self.engine.host().is_animating() || self.toast.is_some() {
            ctx.request_repaint();
        }
    }
}

fn draw_help(ui: &egui::Ui, theme: &Theme, rect: egui::Rect) {
    let shortcuts = [
        ("Space / N / \u{2192}", "Next step"),
        ("P / Backspace / \u{2190}", "Previous step"),
        ("Left click", "Next step"),
        ("Right click", "Previous step"),
        ("Home", "Restart"),
        ("D", "Toggle theme"),
        ("F", "Toggle fullscreen"),
        ("H", "Toggle this help"),
        ("Esc / Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.panel_background, 0.9);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0;
    let line_height = 30.0;
    let help_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0;
    let help_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(380.0, help_height));
    ui.painter().rect_filled(help_rect, 12.0, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(20.0),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    let title_pos = egui::pos2(help_rect.left() + padding, help_rect.top() + padding);
    ui.painter().galley(title_pos, title_galley, text_color);

    let mut y = help_rect.top() + padding + 40.0;
    for (key, desc) in &shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(15.0),
            key_color,
        );
        ui.painter()
            .galley(egui::pos2(help_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(15.0),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(help_rect.left() + padding + 190.0, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

/// Complete every running tween at once, including those the completions
/// themselves start.
fn settle(engine: &mut Engine<ViewerHost>) -> PlaybackResult<()> {
    loop {
        let ids = engine.host_mut().complete_all();
        if ids.is_empty() {
            return Ok(());
        }
        for id in ids {
            engine.finish(id)?;
        }
    }
}

/// Play every click before `slide` without animating, then stop on the first
/// click at or past it, unplayed. A slide with no clicks lands on the next one
/// that has some; with none left, playback finishes on the last slide.
fn fast_forward(engine: &mut Engine<ViewerHost>, slide: usize) -> PlaybackResult<()> {
    loop {
        match engine.upcoming() {
            Some(step) if step.slide >= slide => {
                engine.cue_next()?;
                return Ok(());
            }
            Some(_) => {
                engine.advance()?;
                settle(engine)?;
            }
            None => {
                engine.advance()?;
                return Ok(());
            }
        }
    }
}

pub fn run(file: PathBuf, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let presentation = Presentation::load(&file)
        .with_context(|| format!("Cannot play {}", file.display()))?;
    let config = Config::load_or_default();
    let windowed = windowed || config.windowed();

    let title = presentation.metadata().title.clone().unwrap_or_else(|| {
        format!(
            "stepcast - {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let host = ViewerHost::new(&presentation, Duration::from_millis(config.animation_ms()));
    let mut engine = Engine::start(presentation, host)?;
    if let Some(slide) = start_slide {
        fast_forward(&mut engine, slide.saturating_sub(1))?;
    }
    info!(
        file = %file.display(),
        windowed,
        slide = engine.position().slide,
        "opening viewer"
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PlayerApp::new(file, engine, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
