use std::error::Error;
use std::sync::Arc;

use glam::Vec2;
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes};

use dda_grid::render::{render_scene, save_snapshot};
use dda_grid::{PointerButton, Scene, SceneConfig, Viewport};

const INITIAL_SIZE: u32 = 720;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };
    let scene = config.into_scene()?;
    log::info!(
        "left drag: paint walls / move markers, right drag: erase, R: reset, S: snapshot, Esc: quit"
    );

    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}

struct ViewerApp {
    scene: Scene,
    viewport: Viewport,
    cursor_px: Vec2,
    snapshots: u32,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
}

impl ViewerApp {
    fn new(scene: Scene) -> Self {
        let viewport = Viewport::new(INITIAL_SIZE, INITIAL_SIZE, scene.grid().dimension());
        Self {
            scene,
            viewport,
            cursor_px: Vec2::ZERO,
            snapshots: 0,
            window: None,
            pixels: None,
        }
    }

    fn cursor_cells(&self) -> Vec2 {
        self.viewport.pixel_to_cells(self.cursor_px)
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::Escape) => event_loop.exit(),
            Key::Character(ref c) if c.eq_ignore_ascii_case("r") => self.scene.reset(),
            Key::Character(ref c) if c.eq_ignore_ascii_case("s") => self.snapshot(),
            _ => {}
        }
    }

    fn snapshot(&mut self) {
        let cast = match self.scene.cast() {
            Ok(cast) => cast,
            Err(err) => {
                log::warn!("cast failed: {err}");
                return;
            }
        };
        let img = render_scene(&self.scene, &cast, &self.viewport);
        self.snapshots += 1;
        let path = format!("dda-snapshot-{:03}.png", self.snapshots);
        if let Err(err) = save_snapshot(&img, &path) {
            log::warn!("failed to save {path}: {err}");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        // Nothing is carried between frames: cast fresh from the current state.
        let cast = match self.scene.cast() {
            Ok(cast) => cast,
            Err(err) => {
                log::warn!("cast failed: {err}");
                Default::default()
            }
        };
        let img = render_scene(&self.scene, &cast, &self.viewport);

        let frame = pixels.frame_mut();
        if frame.len() != img.as_raw().len() {
            log::debug!("frame size mismatch, skipping redraw");
            return;
        }
        frame.copy_from_slice(img.as_raw());
        if pixels.render().is_err() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("DDA Ray Traversal")
                .with_inner_size(PhysicalSize::new(INITIAL_SIZE, INITIAL_SIZE)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        let surface_texture = SurfaceTexture::new(width, height, window.clone());
        let pixels = match Pixels::new(width, height, surface_texture) {
            Ok(pixels) => pixels,
            Err(err) => {
                log::error!("failed to create pixels surface: {err}");
                event_loop.exit();
                return;
            }
        };

        self.viewport.resize(width, height);
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    let width = size.width.max(1);
                    let height = size.height.max(1);
                    if pixels.resize_buffer(width, height).is_err()
                        || pixels.resize_surface(width, height).is_err()
                    {
                        event_loop.exit();
                        return;
                    }
                    self.viewport.resize(width, height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_px = Vec2::new(position.x as f32, position.y as f32);
                let pos = self.cursor_cells();
                self.scene.pointer_move(pos);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return,
                };
                match state {
                    ElementState::Pressed => {
                        let pos = self.cursor_cells();
                        let radius = self.viewport.capture_radius();
                        self.scene.pointer_down(pos, button, radius);
                    }
                    ElementState::Released => self.scene.pointer_up(),
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event_loop, event),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
