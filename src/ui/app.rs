use parking_lot::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::config::AppConfig;

use super::common::PageActivity;
use super::window::WindowState;

pub fn run(app_config: AppConfig) {
    let event_loop = EventLoop::new().unwrap();
    let mut app = WindowApp {
        window: None,
        activity: None,
        running: None,
        app_config,
    };
    event_loop.run_app(&mut app).unwrap();
}

pub fn run_with_activity(
    activity: Arc<RwLock<PageActivity>>,
    running: Arc<AtomicBool>,
    app_config: AppConfig,
) {
    let event_loop = EventLoop::new().unwrap();
    let mut app = WindowApp {
        window: None,
        activity: Some(activity),
        running: Some(running),
        app_config,
    };
    event_loop.run_app(&mut app).unwrap();
}

pub struct WindowApp {
    pub window: Option<WindowState>,
    pub activity: Option<Arc<RwLock<PageActivity>>>,
    pub running: Option<Arc<AtomicBool>>,
    pub app_config: AppConfig,
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("MetaMates")
            .with_inner_size(LogicalSize::new(
                self.app_config.window_width,
                self.app_config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attributes).unwrap());
        let state = WindowState::new(
            window,
            self.app_config.clone(),
            self.activity.clone(),
            self.running.clone(),
        );
        state.window.request_redraw();
        self.window = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        if window.window.id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                window.quit();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                window.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                window.draw();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                window.handle_scroll(delta);
            }
            WindowEvent::CursorMoved { position, .. } => {
                window.handle_cursor_moved(position);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                window.handle_mouse_input(button, state);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if window.is_exit_key(key_code) {
                    window.quit();
                    event_loop.exit();
                } else {
                    window.handle_key(key_code);
                }
            }
            _ => {}
        }
    }
}
