pub mod core;
pub mod platform;
pub mod renderer;

use anyhow::{Context, Result};
use self::core::FrameTimer;
use glam::Vec2;
use orrery::control::CommandSender;
use orrery::viz::{InputState, MeshKind};
use orrery::{OrreryConfig, Simulation};
use platform::{KeyAction, map_key};
use renderer::Renderer;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

/// Opens the window and drives the simulation until the user quits.
pub fn run(config: OrreryConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => {
            tracing::info!(target: "engine", frames = app.frames(), "shutdown complete");
            Ok(())
        }
    }
}

struct App {
    config: OrreryConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    sim: Option<Simulation>,
    commands: Option<CommandSender>,
    input: InputState,
    timer: FrameTimer,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: OrreryConfig) -> Self {
        Self {
            config,
            window: None,
            renderer: None,
            sim: None,
            commands: None,
            input: InputState::new(),
            timer: FrameTimer::new(),
            failure: None,
        }
    }

    fn frames(&self) -> u64 {
        self.sim.as_ref().map_or(0, Simulation::frames)
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width,
                window_config.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("failed to create window")?,
        );

        let (sim, commands) = Simulation::new(&self.config)?;
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            sim.mesh(MeshKind::Sun),
            sim.mesh(MeshKind::Particle),
            window_config.clear_color,
        ))?;

        tracing::info!(
            target: "engine",
            title = %window_config.title,
            particles = sim.arena.len(),
            "window open"
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.sim = Some(sim);
        self.commands = Some(commands);
        self.timer.restart();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!(target: "engine", error = %err, "fatal error");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(action) = map_key(code) else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        match action {
            KeyAction::Move(direction) => self.input.set_held(direction, pressed),
            KeyAction::Command(cmd) if pressed && !event.repeat => {
                if let Some(commands) = self.commands.as_ref() {
                    commands.send(cmd);
                }
            }
            KeyAction::Command(_) => {}
            KeyAction::Quit if pressed => event_loop.exit(),
            KeyAction::Quit => {}
        }
    }

    fn set_capture(&mut self, captured: bool) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if captured {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(err) = grabbed {
                tracing::warn!(target: "engine", %err, "cursor grab unavailable");
            }
            window.set_cursor_visible(false);
            self.input.begin_capture();
        } else {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!(target: "engine", %err, "cursor release failed");
            }
            window.set_cursor_visible(true);
            self.input.release_capture();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(sim)) = (self.renderer.as_mut(), self.sim.as_mut()) else {
            return;
        };

        let clock = self.timer.tick();
        sim.frame(clock, &mut self.input, renderer);

        match renderer.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!(target: "engine", "surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!(target: "engine", "surface timed out, skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("out of GPU memory"));
            }
            Err(err) => {
                tracing::warn!(target: "engine", %err, "frame dropped");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, event),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.set_capture(state == ElementState::Pressed),
            WindowEvent::Focused(false) if self.input.mode().is_captured() => {
                self.set_capture(false)
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    // Look uses raw motion: cursor positions stop changing once the grabbed
    // cursor is locked or pinned at the window edge.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.mouse_motion(Vec2::new(dx as f32, dy as f32));
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
