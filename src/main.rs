use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use jump_climb::actor::Actor;
use jump_climb::camera::Camera;
use jump_climb::config::Config;
use jump_climb::error::{GameError, GameResult};
use jump_climb::input::{Control, InputState};
use jump_climb::map::load_map;
use jump_climb::renderer;
use jump_climb::scaler::{ScaleMap, blit_nearest, build_scale_map};
use jump_climb::world::World;

/// Fixed simulation step; velocities are expressed per tick.
const TICK: Duration = Duration::from_micros(16_667);
const MAX_FRAME: Duration = Duration::from_millis(100);

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,
    camera: Camera,
    actor: Actor,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Logical framebuffer, one viewport in size
    fb: Vec<u32>,
    fb_w: usize,
    fb_h: usize,

    scale_map: ScaleMap,

    // Input and stepping
    input: InputState,
    cursor: [f32; 2],
    last_tick: Instant,
    accumulator: Duration,

    // Set when setup fails inside the event loop
    error: Option<GameError>,
}

impl App {
    fn new(config: &Config, world: World) -> Self {
        let fb_w = config.width as usize;
        let fb_h = config.height as usize;
        let mut camera = Camera::new(config.height as f32, world.height);
        let actor = Actor::new(config.start_position(camera.max_level));
        camera.follow(actor.center_y());

        Self {
            window: None,
            surface: None,
            world,
            camera,
            actor,

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb: vec![0; fb_w * fb_h],
            fb_w,
            fb_h,

            scale_map: ScaleMap::empty(),

            input: InputState::default(),
            cursor: [0.0, 0.0],
            last_tick: Instant::now(),
            accumulator: Duration::ZERO,

            error: None,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> GameResult<()> {
        let attributes = Window::default_attributes()
            .with_title("Jump Climb")
            .with_inner_size(LogicalSize::new(self.fb_w as f64, self.fb_h as f64));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| GameError::Window(e.to_string()))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| GameError::Window(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| GameError::Window(e.to_string()))?;

        let size = window.inner_size();
        self.scale_map =
            build_scale_map(size.width as usize, size.height as usize, self.fb_w, self.fb_h);

        self.surface = Some(surface);
        self.last_tick = Instant::now();
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn tick(&mut self) {
        // Cap dt to avoid a burst of steps if the app was paused
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(MAX_FRAME);
        self.last_tick = now;

        self.accumulator += dt;
        while self.accumulator >= TICK {
            self.input.apply(&mut self.actor.vel);
            self.actor.step(&self.world.surfaces);
            self.accumulator -= TICK;
        }
        self.camera.follow(self.actor.center_y());
    }

    fn redraw(&mut self, id: WindowId) {
        self.tick();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let dw = size.width as usize;
        let (Some(nw), Some(nh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // Minimized window, skip drawing
        };

        if let Err(e) = surface.resize(nw, nh) {
            log::error!("surface resize failed: {e}");
            return;
        }

        renderer::render_frame(
            &mut self.fb,
            self.fb_w,
            self.fb_h,
            &self.world,
            &self.camera,
            &self.actor,
        );

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                log::error!("buffer_mut failed: {e}");
                return;
            }
        };
        blit_nearest(&mut buf, dw, &self.fb, self.fb_w, &self.scale_map);

        if let Err(e) = buf.present() {
            log::error!("present failed: {e}");
        }

        // Log FPS
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
    }

    fn click(&mut self) {
        let Some(p) = self.scale_map.window_to_logical(self.cursor[0], self.cursor[1]) else {
            return;
        };
        self.actor.teleport(self.camera.screen_to_world(p));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
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
            } => {
                let Some(control) = Control::from_key(code) else {
                    return;
                };
                match state {
                    ElementState::Pressed => self.input.press(control),
                    ElementState::Released => self.input.release(control, &mut self.actor.vel),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = [position.x as f32, position.y as f32];
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.click(),

            WindowEvent::RedrawRequested => self.redraw(id),

            WindowEvent::Resized(new_size) => {
                self.scale_map = build_scale_map(
                    new_size.width as usize,
                    new_size.height as usize,
                    self.fb_w,
                    self.fb_h,
                );
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run(config: &Config) -> GameResult<()> {
    let world = load_map(&config.map)?;
    let mut app = App::new(config, world);

    let event_loop = EventLoop::new()?;
    // Games redraw continuously, so keep the loop spinning
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = run(&config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
