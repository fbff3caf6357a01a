use crate::narrative_log::NarrativeLog;
use crate::palette;
use anyhow::anyhow;
use bunny_sim::{Population, TurnOutcome};
use error_iter::ErrorIter as _;
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const TITLE: &str = "Bunny Simulator";

type Warren = Population<NarrativeLog>;

pub fn run(population: Warren, step: Duration) -> anyhow::Result<()> {
    let grid = population.grid();
    let size = window_size(grid.width(), grid.height(), grid.tile_size())?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new(population, size, step))?;
    Ok(())
}

/// Window size in physical pixels, or an error if it does not fit in `u32`.
fn window_size(width: u32, height: u32, tile_size: u32) -> anyhow::Result<PhysicalSize<u32>> {
    match (width.checked_mul(tile_size), height.checked_mul(tile_size)) {
        (Some(w), Some(h)) => Ok(PhysicalSize::new(w, h)),
        _ => Err(anyhow!(
            "A {width}x{height} grid of {tile_size}-pixel tiles is too large for a window"
        )),
    }
}

fn background_color(population: &Warren) -> Color {
    let [r, g, b, a] = palette::color_rgba(population.floor_tile()).map(|c| f64::from(c) / 255.0);
    Color { r, g, b, a }
}

struct App {
    population: Warren,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    iterations: u64,
    auto_run: bool,
    step: Duration,
    next_update: Instant,
}

impl App {
    fn new(
        event_loop: &ActiveEventLoop,
        population: Warren,
        size: PhysicalSize<u32>,
        step: Duration,
    ) -> anyhow::Result<Self> {
        let window = Arc::new(Self::build_window(event_loop, size)?);
        let pixels = Self::build_pixels(&window, &population)?;
        Ok(Self {
            population,
            window,
            pixels,
            iterations: 0,
            auto_run: false,
            step,
            next_update: Instant::now(),
        })
    }

    fn build_window(event_loop: &ActiveEventLoop, size: PhysicalSize<u32>) -> anyhow::Result<Window> {
        let window_attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(size)
            .with_visible(false);
        Ok(event_loop.create_window(window_attributes)?)
    }

    fn build_pixels(window: &Arc<Window>, population: &Warren) -> anyhow::Result<Pixels<'static>> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let grid = population.grid();
        let pixels = PixelsBuilder::new(grid.width(), grid.height(), surface_texture)
            .clear_color(background_color(population))
            .build()?;
        Ok(pixels)
    }

    fn on_create(&mut self) {
        self.update_title();
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_turn(&mut self) {
        match self.population.next_turn() {
            TurnOutcome::Continuing => {
                self.iterations += 1;
                self.update_title();
            }
            TurnOutcome::Finished => {
                if self.auto_run {
                    info!("Warren died out after {} turns", self.iterations);
                    self.auto_run = false;
                }
            }
        }
        self.window.request_redraw();
    }

    fn on_time_step(&mut self) {
        self.on_turn();

        while self.next_update < Instant::now() {
            self.next_update += self.step;
        }
    }

    fn on_reset(&mut self) {
        if let Err(err) = self.population.narrative_mut().clear() {
            log_error("clear", err);
        }
        self.population.reset();
        self.iterations = 0;
        self.update_title();
        self.window.request_redraw();
    }

    fn toggle_console(&mut self) {
        let narrative = self.population.narrative_mut();
        narrative.to_console = !narrative.to_console;
        info!("Console narrative {}", if narrative.to_console { "on" } else { "off" });
    }

    fn toggle_auto_run(&mut self) {
        self.auto_run = !self.auto_run;
        self.next_update = Instant::now() + self.step;
    }

    fn update_title(&self) {
        self.window
            .set_title(&format!("{TITLE} - Iterations: {}", self.iterations));
    }

    /// Repaints only the cells that changed since the last redraw.
    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let width = self.population.grid().width() as usize;
        let changed = self.population.grid_mut().drain_changed();
        let grid = self.population.grid();
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * grid.num_cells());

        for loc in changed {
            let offset = 4 * (loc.row as usize * width + loc.col as usize);
            screen[offset..offset + 4].copy_from_slice(&palette::color_rgba(grid[loc]));
        }
        self.pixels.render()
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(size.width, size.height)
    }
}

struct AppEventHandler {
    population: Option<Warren>,
    size: PhysicalSize<u32>,
    step: Duration,
    app: Option<App>,
}

impl AppEventHandler {
    fn new(population: Warren, size: PhysicalSize<u32>, step: Duration) -> Self {
        Self {
            population: Some(population),
            size,
            step,
            app: None,
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match code {
            KeyCode::KeyT => app.on_turn(),
            KeyCode::KeyR => app.on_reset(),
            KeyCode::KeyC => app.toggle_console(),
            KeyCode::Space => app.toggle_auto_run(),
            KeyCode::Escape | KeyCode::KeyQ => event_loop.exit(),
            _ => (),
        }
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
            && app.auto_run
        {
            app.on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(population) = self.population.take() else {
            return;
        };
        match App::new(event_loop, population, self.size, self.step) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => {
                error!("Cannot open the simulator window: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.on_key(event_loop, code),
            WindowEvent::Resized(size) => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_resize(size)
                {
                    log_error("resize_surface", err);
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_redraw()
                {
                    log_error("render", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.app.as_ref() {
            Some(app) if app.auto_run => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
            }
            _ => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
