use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use grid_raycaster::config::Config;
use grid_raycaster::frame::Simulation;
use grid_raycaster::framebuffer::Framebuffer;
use grid_raycaster::player::Move;
use grid_raycaster::renderer::palette;
use grid_raycaster::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut, internal_size};

/// Idle until the host hands us a window, then Running until it closes.
enum Phase {
    Idle,
    Running {
        window: Rc<Window>,
        surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    },
}

struct App {
    config: Config,
    phase: Phase,
    sim: Simulation,

    // Internal render target, stretched to the window on present
    frame: Framebuffer,
    scale_lut: ScaleLut,
    presented_size: (usize, usize),

    // Reported from main once the event loop returns
    fatal: Option<anyhow::Error>,

    // HUD
    frame_counter: u32,
    last_fps_log: Instant,
}

impl App {
    fn new(config: Config) -> Self {
        let sim = Simulation::new(&config);
        Self {
            config,
            phase: Phase::Idle,
            sim,
            frame: Framebuffer::new(0, 0, palette::BACKGROUND),
            scale_lut: ScaleLut::empty(),
            presented_size: (0, 0),
            fatal: None,
            frame_counter: 0,
            last_fps_log: Instant::now(),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Raycaster")
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("creating window: {e}"))?,
        );

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("creating softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("creating softbuffer surface: {e}"))?;

        // Mouse look wants relative motion; not every platform can lock
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            warn!("cursor grab unavailable: {err}");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        info!("window ready at {}x{}", size.width, size.height);
        self.rebuild_internal_fb_and_lut(size.width as usize, size.height as usize);

        window.request_redraw();
        self.phase = Phase::Running { window, surface };
        self.last_fps_log = Instant::now();
        Ok(())
    }

    fn rebuild_internal_fb_and_lut(&mut self, dst_w: usize, dst_h: usize) {
        let (fb_w, fb_h) = internal_size(dst_w, dst_h, self.config.internal_height);
        self.frame.resize(fb_w, fb_h);
        self.scale_lut = build_scale_lut(dst_w, dst_h, fb_w, fb_h);
        self.presented_size = (dst_w, dst_h);
        debug!("internal buffer {fb_w}x{fb_h} for window {dst_w}x{dst_h}");
    }

    fn redraw(&mut self) -> Result<()> {
        let size = match &self.phase {
            Phase::Running { window, .. } => window.inner_size(),
            Phase::Idle => return Ok(()),
        };
        let (dw, dh) = (size.width as usize, size.height as usize);
        if dw > 0 && dh > 0 && (dw, dh) != self.presented_size {
            self.rebuild_internal_fb_and_lut(dw, dh);
        }

        let (fb_w, fb_h) = (self.frame.width, self.frame.height);
        self.sim.tick(&mut self.frame, fb_w, fb_h);

        let Phase::Running { window, surface } = &mut self.phase else {
            return Ok(());
        };

        let (w, h) = match (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                // Minimized window, skip presenting
                window.request_redraw();
                return Ok(());
            }
        };

        surface.resize(w, h).map_err(|e| anyhow!("resizing surface: {e}"))?;

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("acquiring surface buffer: {e}"))?;
        blit_nearest_stretch(&mut buf, dw, &self.frame.pixels, fb_w, &self.scale_lut);
        buf.present().map_err(|e| anyhow!("presenting frame: {e}"))?;

        window.request_redraw();
        Ok(())
    }

    fn log_fps(&mut self) {
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_log).as_secs_f32();
        if elapsed >= 1.0 {
            debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_log = now;
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, state: ElementState) {
        let player = &mut self.sim.player;
        match (code, state) {
            (KeyCode::KeyW, ElementState::Pressed) => player.press(Move::Forward),
            (KeyCode::KeyS, ElementState::Pressed) => player.press(Move::Backward),
            (KeyCode::KeyW | KeyCode::KeyS, ElementState::Released) => player.release(),
            (KeyCode::Escape, ElementState::Pressed) => {
                info!("escape pressed; stopping");
                event_loop.exit();
            }
            _ => (),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if matches!(self.phase, Phase::Running { .. }) {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match &self.phase {
            Phase::Running { window, .. } if window.id() == id => (),
            _ => return,
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code, state),

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                    return;
                }
                self.log_fps();
            }

            WindowEvent::Resized(new_size) => {
                let (dw, dh) = (new_size.width as usize, new_size.height as usize);
                if dw > 0 && dh > 0 {
                    self.rebuild_internal_fb_and_lut(dw, dh);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        let DeviceEvent::MouseMotion { delta: (dx, _) } = event else {
            return;
        };
        if matches!(self.phase, Phase::Running { .. }) {
            self.sim.player.turn_degrees(dx as f32 * self.config.turn_rate);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Phase::Running { window, .. } = &self.phase {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;
    info!(
        "starting: window {}x{}, internal height {}, fov {} deg, max ray distance {}",
        config.width, config.height, config.internal_height, config.fov, config.max_ray_distance
    );

    let event_loop = EventLoop::new().map_err(|e| anyhow!("creating event loop: {e}"))?;

    // Redraws are requested after every present, so waiting still ticks once
    // per display refresh without spinning between frames.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop: {e}"))?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => {
            info!("window closed");
            Ok(())
        }
    }
}
