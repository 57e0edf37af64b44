//! Demo stage control bar: mic, cam, screen-share and VR toggles.
//!
//! Buttons are drawn entirely in the shader. Hover and press states play
//! a short scale animation; a click toggles the persistent active state.

use std::time::Instant;

use wgpu::{self, util::DeviceExt};
use winit::event::{ElementState, MouseButton};

use super::layout_manager::RectPx;

const ANIMATION_DURATION: f32 = 0.1;
const HOVER_SCALE: f32 = 1.1;
const PRESS_SCALE: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Mic,
    Cam,
    Screen,
    Vr,
}

impl ControlKind {
    pub const ALL: [ControlKind; 4] = [
        ControlKind::Mic,
        ControlKind::Cam,
        ControlKind::Screen,
        ControlKind::Vr,
    ];

    fn fragment_entry(self) -> &'static str {
        match self {
            ControlKind::Mic => "fs_mic",
            ControlKind::Cam => "fs_cam",
            ControlKind::Screen => "fs_screen",
            ControlKind::Vr => "fs_vr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Hover,
    Pressed,
}

impl ButtonState {
    fn target_scale(self) -> f32 {
        match self {
            ButtonState::Normal => 1.0,
            ButtonState::Hover => HOVER_SCALE,
            ButtonState::Pressed => PRESS_SCALE,
        }
    }
}

struct ControlButton {
    kind: ControlKind,
    state: ButtonState,
    previous_state: ButtonState,
    active: bool,
    rect: RectPx,
    scale: f32,
    animation_active: bool,
    animation_start: Instant,
    vertices: wgpu::Buffer,
    pipeline: wgpu::RenderPipeline,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ControlButton {
    fn new(device: &wgpu::Device, kind: ControlKind, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Control Button Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("control_button.wgsl").into()),
        });

        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Control Button State"),
            contents: bytemuck::cast_slice(&[0.0f32; 4]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Control Button Bind Group Layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
            label: Some("Control Button Bind Group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Control Button Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Control Button Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 8,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(kind.fragment_entry()),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Control Button Vertices"),
            contents: bytemuck::cast_slice(&[
                -1.0f32, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0,
            ]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            kind,
            state: ButtonState::Normal,
            previous_state: ButtonState::Normal,
            active: false,
            rect: RectPx {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
            },
            scale: 1.0,
            animation_active: false,
            animation_start: Instant::now(),
            vertices,
            pipeline,
            uniform,
            bind_group,
        }
    }

    fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.previous_state = self.state;
            self.state = state;
            self.animation_active = true;
            self.animation_start = Instant::now();
        }
    }

    fn update_animation(&mut self) {
        if !self.animation_active {
            return;
        }
        let progress =
            (self.animation_start.elapsed().as_secs_f32() / ANIMATION_DURATION).min(1.0);
        let start = self.previous_state.target_scale();
        let end = self.state.target_scale();
        self.scale = start + progress * (end - start);
        if progress >= 1.0 {
            self.animation_active = false;
        }
    }

    fn render(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        queue: &wgpu::Queue,
    ) {
        let hover_glow = match self.state {
            ButtonState::Normal => 0.0,
            ButtonState::Hover | ButtonState::Pressed => 1.0,
        };
        queue.write_buffer(
            &self.uniform,
            0,
            bytemuck::cast_slice(&[
                if self.active { 1.0f32 } else { 0.0 },
                hover_glow,
                0.0,
                0.0,
            ]),
        );

        // Scale around the button center, the press/hover animation.
        let center_x = self.rect.x + self.rect.w / 2.0;
        let center_y = self.rect.y + self.rect.h / 2.0;
        let w = self.rect.w * self.scale;
        let h = self.rect.h * self.scale;
        render_pass.set_viewport(center_x - w / 2.0, center_y - h / 2.0, w, h, 0.0, 1.0);

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.slice(..));
        render_pass.draw(0..4, 0..1);
    }
}

pub struct ControlBar {
    buttons: Vec<ControlButton>,
    hovered: Option<ControlKind>,
    pressed: Option<ControlKind>,
    visible: bool,
}

impl ControlBar {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let buttons = ControlKind::ALL
            .iter()
            .map(|&kind| ControlButton::new(device, kind, format))
            .collect();
        Self {
            buttons,
            hovered: None,
            pressed: None,
            visible: false,
        }
    }

    /// Place the buttons; called each frame since the bar scrolls with
    /// the page. Buttons scrolled offscreen are not rendered.
    pub fn set_rects(&mut self, rects: &[RectPx], visible: bool) {
        for (button, rect) in self.buttons.iter_mut().zip(rects.iter()) {
            button.rect = *rect;
        }
        self.visible = visible;
    }

    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let current = self
            .buttons
            .iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.kind);

        // Only touch states on an actual change to avoid restarting the
        // animation while the cursor rests on a button.
        if current != self.hovered {
            for button in &mut self.buttons {
                let state = if Some(button.kind) == current {
                    ButtonState::Hover
                } else {
                    ButtonState::Normal
                };
                button.set_state(state);
            }
            self.hovered = current;
        }
    }

    /// Returns the toggled control on a completed click
    pub fn handle_pointer_event(
        &mut self,
        button: MouseButton,
        state: ElementState,
        x: f32,
        y: f32,
    ) -> Option<ControlKind> {
        if button != MouseButton::Left || !self.visible {
            return None;
        }
        let target = self
            .buttons
            .iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.kind);

        match state {
            ElementState::Pressed => {
                if let Some(kind) = target {
                    self.pressed = Some(kind);
                    if let Some(b) = self.buttons.iter_mut().find(|b| b.kind == kind) {
                        b.set_state(ButtonState::Pressed);
                    }
                }
                None
            }
            ElementState::Released => {
                let completed = match (target, self.pressed) {
                    (Some(t), Some(p)) if t == p => Some(t),
                    _ => None,
                };
                self.pressed = None;
                if let Some(kind) = completed {
                    self.toggle(kind);
                    if let Some(b) = self.buttons.iter_mut().find(|b| b.kind == kind) {
                        b.set_state(ButtonState::Hover);
                    }
                }
                completed
            }
        }
    }

    pub fn toggle(&mut self, kind: ControlKind) {
        if let Some(b) = self.buttons.iter_mut().find(|b| b.kind == kind) {
            b.active = !b.active;
        }
    }

    pub fn is_active(&self, kind: ControlKind) -> bool {
        self.buttons
            .iter()
            .find(|b| b.kind == kind)
            .map(|b| b.active)
            .unwrap_or(false)
    }

    pub fn update_animations(&mut self) {
        for button in &mut self.buttons {
            button.update_animation();
        }
    }

    pub fn render(
        &mut self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        viewport: (f32, f32),
    ) {
        if !self.visible {
            return;
        }
        self.update_animations();

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Control Bar Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        for button in &self.buttons {
            // Leave room for the hover/press scale around the center so
            // the viewport always stays inside the framebuffer.
            let margin = button.rect.w * (HOVER_SCALE - 1.0);
            let onscreen = button.rect.w > 0.0
                && button.rect.x - margin >= 0.0
                && button.rect.y - margin >= 0.0
                && button.rect.x + button.rect.w + margin <= viewport.0
                && button.rect.y + button.rect.h + margin <= viewport.1;
            if onscreen {
                button.render(&mut render_pass, queue);
            }
        }
    }
}
