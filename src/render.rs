//! Interactive raylib window hosting one presenter.

use std::time::Duration;

use raylib::prelude::*;
use tracing::{info, warn};

use crate::constants::{FPS, RENDER_HEIGHT, RENDER_WIDTH};
use crate::gesture::NavigationCommand;
use crate::presenter::{Glyph, Presenter, Shape, Tone, TransitionFrame, Viewport};
use crate::texture_loader::{AssetStatus, TextureCache};

const BEIGE: Color = Color::new(214, 193, 169, 255);

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

fn color(tone: Tone) -> Color {
    match tone {
        Tone::Accent => BEIGE,
        Tone::Muted => Color::new(214, 193, 169, 102),
        Tone::Text => Color::WHITE,
        Tone::Backdrop => Color::new(90, 30, 43, 204),
    }
}

/// Runs the window until it is closed, or until escape is pressed while the
/// instance is not showing.
pub fn run(presenter: &mut dyn Presenter) -> anyhow::Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title(&format!("showreel: {}", presenter.name()))
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_exit_key(None);

    let textures = TextureCache::preload(&mut rl, &thread, &presenter.image_paths())?;
    info!(instance = presenter.name(), "window open");

    while !rl.window_should_close() {
        let dt = Duration::from_secs_f32(rl.get_frame_time().max(0.0));
        let viewport = Viewport::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);

        if !handle_input(&rl, presenter, viewport)? {
            break;
        }
        presenter.update(dt);
        for event in presenter.sequencer_mut().drain_events() {
            info!(instance = presenter.name(), ?event, "event");
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        match presenter.image_path(viewport) {
            Some(path) => {
                let (texture, status) = textures.get(path);
                draw_image(&mut d, texture, presenter.transition(), viewport);
                if status == AssetStatus::Placeholder {
                    draw_centered(&mut d, "image unavailable", viewport.width * 0.5, viewport.height * 0.5, 20, Color::WHITE);
                }
            }
            None => {
                let hint = format!("press 1-{} to open", presenter.sequencer().count().min(9));
                draw_centered(&mut d, &hint, viewport.width * 0.5, viewport.height * 0.5, 24, BEIGE);
            }
        }

        for shape in presenter.chrome(viewport) {
            draw_shape(&mut d, &shape);
        }
    }

    Ok(())
}

/// Maps this frame's mouse and keyboard input onto the presenter. Returns
/// false when the window should close.
fn handle_input(rl: &RaylibHandle, presenter: &mut dyn Presenter, viewport: Viewport) -> anyhow::Result<bool> {
    let mouse = rl.get_mouse_position();
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        presenter.pointer_pressed(mouse.x, mouse.y);
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        presenter.pointer_released(mouse.x, mouse.y, viewport)?;
    }

    let is_open = presenter.sequencer().state().is_open;
    if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
        if !is_open {
            return Ok(false);
        }
        presenter.command(NavigationCommand::Close)?;
    }
    if is_open {
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            presenter.command(NavigationCommand::Advance)?;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            presenter.command(NavigationCommand::Retreat)?;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            presenter.command(NavigationCommand::TogglePause)?;
        }
    }

    let count = presenter.sequencer().count();
    for (index, key) in DIGIT_KEYS.iter().enumerate().take(count) {
        if !rl.is_key_pressed(*key) {
            continue;
        }
        if presenter.sequencer().state().is_open {
            presenter.command(NavigationCommand::JumpTo(index))?;
        } else {
            presenter.open_at(index)?;
        }
    }

    Ok(true)
}

// --- Fit the texture to the viewport, then apply the transition ---
fn draw_image(d: &mut RaylibDrawHandle, texture: &Texture2D, transition: TransitionFrame, viewport: Viewport) {
    let (tw, th) = (texture.width() as f32, texture.height() as f32);
    if tw <= 0.0 || th <= 0.0 {
        warn!("skipping empty texture");
        return;
    }

    let scale = (viewport.width / tw).max(viewport.height / th) * transition.scale;
    let (w, h) = (tw * scale, th * scale);
    let x = (viewport.width - w) * 0.5 + transition.offset_x * viewport.width;
    let y = (viewport.height - h) * 0.5;
    let alpha = (transition.opacity.clamp(0.0, 1.0) * 255.0) as u8;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tw, th),
        Rectangle::new(x, y, w, h),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::new(255, 255, 255, alpha),
    );
}

fn draw_shape(d: &mut RaylibDrawHandle, shape: &Shape) {
    match shape {
        Shape::Disc { x, y, radius, tone } => {
            d.draw_circle_v(Vector2::new(*x, *y), *radius, color(*tone));
        }
        Shape::Ring { x, y, radius, thickness, sweep_degrees, tone } => {
            // raylib measures angles from three o'clock
            let start = -90.0;
            d.draw_ring(
                Vector2::new(*x, *y),
                radius - thickness,
                *radius,
                start,
                start + sweep_degrees,
                48,
                color(*tone),
            );
        }
        Shape::Bar { x, y, width, height, fill } => {
            let (x, y, h) = (*x as i32, *y as i32, *height as i32);
            d.draw_rectangle(x, y, *width as i32, h, Color::new(255, 255, 255, 77));
            d.draw_rectangle(x, y, (width * fill.clamp(0.0, 1.0)) as i32, h, Color::WHITE);
        }
        Shape::Icon { glyph, x, y, size, tone } => {
            let text = match glyph {
                Glyph::Play | Glyph::ChevronRight => ">",
                Glyph::Pause => "||",
                Glyph::Close => "X",
                Glyph::ChevronLeft => "<",
            };
            draw_centered(d, text, *x, *y, *size as i32, color(*tone));
        }
        Shape::Label { text, x, y, size, tone } => {
            draw_centered(d, text, *x, *y, *size as i32, color(*tone));
        }
    }
}

fn draw_centered(d: &mut RaylibDrawHandle, text: &str, x: f32, y: f32, size: i32, tint: Color) {
    let width = d.measure_text(text, size);
    d.draw_text(text, x as i32 - width / 2, y as i32 - size / 2, size, tint);
}
