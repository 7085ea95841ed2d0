pub mod image_cache;
pub mod transition;
pub mod viewer;

use eframe::egui;

use stepcast::{ObjectKind, Point, Presentation, Slide, SlideObject};

use crate::theme::Theme;

use image_cache::ImageCache;
use viewer::ViewerHost;

/// Stage aspect used when the visible slide has no background image.
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Largest rect of the given aspect ratio centered inside `outer`.
pub fn fit_stage(outer: egui::Rect, aspect: f32) -> egui::Rect {
    let (w, h) = if outer.width() / outer.height() > aspect {
        (outer.height() * aspect, outer.height())
    } else {
        (outer.width(), outer.width() / aspect)
    };
    egui::Rect::from_center_size(outer.center(), egui::vec2(w, h))
}

/// Map a stage-relative point to screen space.
pub fn to_screen(stage: egui::Rect, at: Point) -> egui::Pos2 {
    egui::pos2(
        stage.left() + at.abs as f32 * stage.width(),
        stage.top() + at.ord as f32 * stage.height(),
    )
}

/// Outline of the cursor arrow with its tip at `tip`.
pub fn cursor_polygon(tip: egui::Pos2, size: f32) -> Vec<egui::Pos2> {
    [
        (0.0, 0.0),
        (0.0, 1.0),
        (0.27, 0.76),
        (0.45, 1.12),
        (0.6, 1.05),
        (0.42, 0.7),
        (0.72, 0.7),
    ]
    .iter()
    .map(|&(x, y)| egui::pos2(tip.x + x * size, tip.y + y * size))
    .collect()
}

/// Draw every visible slide, its objects, and the cursor on top.
pub fn render_stage(
    ui: &egui::Ui,
    presentation: &Presentation,
    host: &ViewerHost,
    images: &ImageCache,
    theme: &Theme,
    rect: egui::Rect,
    cursor_size: f32,
) {
    let visible: Vec<&Slide> = presentation
        .slides()
        .iter()
        .filter(|s| {
            host.object(&s.primary_object().id)
                .is_some_and(|state| state.visible)
        })
        .collect();

    let background = visible.first().and_then(|slide| {
        let img = slide.primary_object().image.as_deref()?;
        images.get_or_load(ui.ctx(), img)
    });
    let aspect = background
        .as_ref()
        .map(|t| t.aspect_ratio())
        .unwrap_or(DEFAULT_ASPECT);
    let stage = fit_stage(rect, aspect);
    ui.painter().rect_filled(stage, 0.0, theme.panel_background);

    // Objects keep their natural pixel size relative to the background.
    let scale = background
        .as_ref()
        .map(|t| stage.width() / t.size_vec2().x)
        .unwrap_or(1.0);

    for slide in visible {
        draw_primary(ui, slide.primary_object(), images, stage);
        for object in slide.objects.iter().skip(1) {
            if let Some(state) = host.object(&object.id) {
                if state.visible && state.opacity > 0.0 {
                    draw_object(ui, object, images, theme, stage, scale, state.at, state.opacity);
                }
            }
        }
    }

    let cursor = host.cursor();
    if cursor.visible && cursor.opacity > 0.0 {
        draw_cursor(ui, theme, to_screen(stage, cursor.at), cursor_size, cursor.opacity);
    }
}

fn draw_primary(ui: &egui::Ui, object: &SlideObject, images: &ImageCache, stage: egui::Rect) {
    let Some(img) = object.image.as_deref() else {
        return;
    };
    if let Some(texture) = images.get_or_load(ui.ctx(), img) {
        ui.painter().image(
            texture.id(),
            stage,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_object(
    ui: &egui::Ui,
    object: &SlideObject,
    images: &ImageCache,
    theme: &Theme,
    stage: egui::Rect,
    scale: f32,
    at: Point,
    opacity: f32,
) {
    let origin = to_screen(stage, at);
    let texture = object
        .image
        .as_deref()
        .and_then(|img| images.get_or_load(ui.ctx(), img));

    match (texture, object.kind) {
        (Some(texture), _) => {
            let rect = egui::Rect::from_min_size(origin, texture.size_vec2() * scale);
            ui.painter().image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Theme::with_opacity(egui::Color32::WHITE, opacity),
            );
        }
        (None, ObjectKind::Tooltip) => {
            let galley = ui.painter().layout_no_wrap(
                object.id.clone(),
                egui::FontId::proportional(theme.body_size),
                Theme::with_opacity(egui::Color32::BLACK, opacity),
            );
            let rect = egui::Rect::from_min_size(origin, galley.size()).expand(6.0);
            ui.painter()
                .rect_filled(rect, 4.0, Theme::with_opacity(theme.tooltip_background, opacity));
            ui.painter().galley(origin, galley, egui::Color32::BLACK);
        }
        (None, _) => {}
    }
}

fn draw_cursor(ui: &egui::Ui, theme: &Theme, tip: egui::Pos2, size: f32, opacity: f32) {
    let points = cursor_polygon(tip, size);
    let fill = Theme::with_opacity(theme.cursor_fill, opacity);
    // The arrow is not convex: fill the head and the tail separately.
    let head = vec![points[0], points[1], points[6]];
    let tail = points[2..6].to_vec();
    for part in [head, tail] {
        ui.painter()
            .add(egui::Shape::convex_polygon(part, fill, egui::Stroke::NONE));
    }
    ui.painter().add(egui::Shape::closed_line(
        points,
        egui::Stroke::new(1.5, Theme::with_opacity(theme.cursor_outline, opacity)),
    ));
}
