// Interactive preview window.
// Visual: the current polygon fills the window; Space draws a fresh one,
// Tab flips convex/concave, I shows the inverted buffer, S saves a snapshot.

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use log::info;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::generator::{PolygonGenerator, ShapeKind};

pub struct Preview {
    window: Window,
}

impl Preview {
    /// Open a window sized to the canvas.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let mut window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| Error::Window(format!("create: {e}")))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the canvas pixels to the screen.
    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        let buffer = canvas.to_argb_buffer();
        self.window
            .update_with_buffer(&buffer, canvas.width() as usize, canvas.height() as usize)
            .map_err(|e| Error::Window(format!("update: {e}")))?;
        Ok(())
    }

    /// False once the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn space_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    pub fn tab_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Tab, KeyRepeat::No)
    }

    pub fn i_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::I, KeyRepeat::No)
    }

    pub fn s_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}

/// Run the preview loop until the window closes or ESC is pressed.
pub fn run_preview(mut generator: PolygonGenerator) -> Result<()> {
    let width = generator.config().width;
    let height = generator.config().height;
    let mut preview = Preview::new(
        "polygen | Space: new  Tab: kind  I: invert  S: save  Esc: quit",
        width,
        height,
    )?;

    generator.generate()?;
    let mut show_inverted = false;
    let mut snapshots = 0usize;

    while preview.is_open() && !preview.esc_pressed() {
        if preview.space_pressed_once() {
            generator.generate()?;
        }
        if preview.tab_pressed_once() {
            let next = match generator.config().kind {
                ShapeKind::Convex => ShapeKind::Concave,
                ShapeKind::Concave => ShapeKind::Convex,
            };
            generator.set_kind(next);
            generator.generate()?;
        }
        if preview.i_pressed_once() {
            show_inverted = !show_inverted;
        }
        if preview.s_pressed_once() {
            let path = format!("polygon_{snapshots}.png");
            let shown = if show_inverted {
                generator.canvas().inverted()
            } else {
                generator.canvas().clone()
            };
            shown.to_image().save(&path)?;
            snapshots += 1;
            info!("saved snapshot {path}");
        }

        // minifb wants a buffer every iteration to keep pumping events.
        if show_inverted {
            let inverted = generator.canvas().inverted();
            preview.present(&inverted)?;
        } else {
            preview.present(generator.canvas())?;
        }
    }

    Ok(())
}
