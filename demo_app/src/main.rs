//! Clear color demo
//!
//! Cycles the window's clear color and prints the FPS through the overlay.
//! Escape quits, Shift+S takes a screenshot, Space pauses the cycle and the
//! scroll wheel changes its speed.
//!
//! Usage: `clear_color_demo [config.toml|config.ron]`

use glfw_app::prelude::*;

/// Overlay text renderer that writes to the log instead of the framebuffer
struct LogTextRenderer {
    last: String,
}

impl TextRenderer for LogTextRenderer {
    fn render(
        &mut self,
        text: &str,
        cursor: Vec2,
        _size: f32,
        _projection: &Mat4,
        _modelview: &Mat4,
    ) {
        if text != self.last {
            log::debug!("overlay ({:.2}, {:.2}): {text}", cursor.x, cursor.y);
            self.last = text.to_string();
        }
    }
}

struct ClearColorDemo {
    hue: f32,
    speed: f32,
    paused: bool,
}

impl ClearColorDemo {
    fn new() -> Self {
        Self {
            hue: 0.0,
            speed: 0.25,
            paused: false,
        }
    }

    /// Fully saturated color for a hue in `0.0..1.0`
    fn color(&self) -> [f32; 4] {
        let h = self.hue * 6.0;
        let x = 1.0 - (h % 2.0 - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        [r * 0.6, g * 0.6, b * 0.6, 1.0]
    }
}

impl AppHandler for ClearColorDemo {
    fn init_graphics(&mut self, ctx: &mut AppContext<'_>) -> AppResult<()> {
        log::info!(
            "Demo ready: {}x{} window, aspect {:.3}",
            ctx.window_size().width,
            ctx.window_size().height,
            ctx.aspect()
        );
        Ok(())
    }

    fn update(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<()> {
        if !self.paused {
            // assume roughly 60 frames per second
            self.hue = (self.hue + self.speed / 60.0).fract();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut AppContext<'_>) -> AppResult<()> {
        let color = self.color();
        ctx.graphics().clear(color);

        let text = format!("FPS: {:.1}", ctx.fps());
        ctx.render_overlay_text(&text, Vec2::new(-0.95, 0.9));
        Ok(())
    }

    fn shutdown_graphics(&mut self, ctx: &mut AppContext<'_>) {
        log::info!("Demo finished after {} frames", ctx.frame());
    }

    fn on_key(
        &mut self,
        ctx: &mut AppContext<'_>,
        key: Key,
        _scancode: i32,
        action: Action,
        mods: Modifiers,
    ) {
        if key == Key::Space && action == Action::Press {
            self.paused = !self.paused;
            log::info!("Color cycle {}", if self.paused { "paused" } else { "resumed" });
        }
        default_key_policy(ctx, key, action, mods);
    }

    fn on_scroll(&mut self, _ctx: &mut AppContext<'_>, _x: f64, y: f64) {
        self.speed = (self.speed + y as f32 * 0.05).clamp(0.0, 2.0);
        log::debug!("Cycle speed {:.2}", self.speed);
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "clear_color_demo.toml".to_string());
    let config = match AppConfig::load_or_default(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(AppError::from(e).exit_code());
        }
    };

    glfw_app::foundation::logging::init(&config.log_level);
    log::info!("Starting clear color demo");

    let mut app = match WindowedApp::with_glfw(config, ClearColorDemo::new()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(e.exit_code());
        }
    };
    app.set_text_renderer(Box::new(LogTextRenderer {
        last: String::new(),
    }));

    let code = app.run();
    drop(app);
    std::process::exit(code);
}
