//! Hero background scene.
//!
//! A particle point cloud, a sparse random line network, three slowly
//! desynchronizing rings and an orbiting wireframe sphere, viewed by a
//! perspective camera that eases toward a cursor-derived parallax offset
//! every frame. All geometry is generated once from a seeded RNG; per
//! frame only rotation angles and the camera move.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{EulerRot, Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wgpu::{util::DeviceExt, Buffer, Device, Queue, RenderPipeline};
use winit::dpi::PhysicalSize;

use crate::config::HeroConfig;

// Field extents the random geometry is scattered over
const PARTICLE_FIELD: [f32; 3] = [300.0, 220.0, 200.0];
const LINE_FIELD: [f32; 3] = [260.0, 180.0, 180.0];

const PARTICLE_SIZE_MIN: f32 = 0.5;
const PARTICLE_SIZE_RANGE: f32 = 2.5;
const PARTICLE_OPACITY: f32 = 0.75;
const POINT_SCALE: f32 = 1.2;

const LINE_OPACITY: f32 = 0.06;

const RING_COUNT: usize = 3;
const RING_SEGMENTS: usize = 100;
const RING_BASE_RADIUS: f32 = 18.0;
const RING_RADIUS_STEP: f32 = 10.0;
const RING_Z: f32 = -20.0;
const RING_BASE_OPACITY: f32 = 0.18;
const RING_OPACITY_STEP: f32 = 0.04;
const RING_TILT_SPREAD: f32 = 0.8;

const SPHERE_RADIUS: f32 = 6.0;
const SPHERE_LAT_LINES: usize = 12;
const SPHERE_LON_LINES: usize = 16;
const SPHERE_SEGMENTS: usize = 32;
const SPHERE_POSITION: Vec3 = Vec3::new(32.0, 10.0, -30.0);
const SPHERE_OPACITY: f32 = 0.08;

const CAMERA_FOV_DEG: f32 = 60.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 2000.0;
const CAMERA_DISTANCE: f32 = 90.0;
const CAMERA_EASE: f32 = 0.03;
const PARALLAX_X: f32 = 12.0;
const PARALLAX_Y: f32 = 8.0;

// Particle palette: cyan, purple, teal, violet
const PALETTE: [[f32; 3]; 4] = [
    [0.000, 0.831, 1.000],
    [0.659, 0.333, 0.969],
    [0.024, 0.714, 0.831],
    [0.482, 0.184, 1.000],
];

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Corner {
    position: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleInstance {
    position: [f32; 3],
    size: f32,
    color: [f32; 3],
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    position: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl Corner {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Corner>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

impl ParticleInstance {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

impl LineVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// One drawable scene object: its uniform buffer and bind group
struct SceneObject {
    uniform: Buffer,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    fn new(device: &Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[ObjectUniform {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color: [1.0, 1.0, 1.0, 1.0],
                params: [1.0, 0.0, 0.0, 0.0],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self {
            uniform,
            bind_group,
        }
    }

    fn write(&self, queue: &Queue, model: Mat4, color: [f32; 4], params: [f32; 4]) {
        queue.write_buffer(
            &self.uniform,
            0,
            bytemuck::cast_slice(&[ObjectUniform {
                model: model.to_cols_array_2d(),
                color,
                params,
            }]),
        );
    }
}

pub struct HeroScene {
    queue: Arc<Queue>,

    point_pipeline: RenderPipeline,
    line_pipeline: RenderPipeline,
    globals_buffer: Buffer,
    globals_bind_group: wgpu::BindGroup,

    corner_buffer: Buffer,
    particle_buffer: Buffer,
    particle_count: u32,
    particles: SceneObject,

    line_buffer: Buffer,
    line_vertex_count: u32,
    lines: SceneObject,

    ring_buffer: Buffer,
    ring_ranges: Vec<(u32, u32)>,
    ring_tilts: Vec<f32>,
    rings: Vec<SceneObject>,

    sphere_buffer: Buffer,
    sphere_vertex_count: u32,
    sphere: SceneObject,

    camera_position: Vec3,
    pointer: (f32, f32),
    parallax_strength: f32,
    aspect: f32,
}

impl HeroScene {
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        size: PhysicalSize<u32>,
        surface_format: wgpu::TextureFormat,
        config: &HeroConfig,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Hero Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("hero.wgsl").into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Hero Globals Layout"),
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Hero Object Layout"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hero Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            push_constant_ranges: &[],
        });

        // Additive blending so overlapping glow accumulates
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let point_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hero Point Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_point"),
                buffers: &[Corner::desc(), ParticleInstance::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_point"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
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

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hero Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                buffers: &[LineVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
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

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hero Globals"),
            contents: bytemuck::cast_slice(&[Globals {
                view: Mat4::IDENTITY.to_cols_array_2d(),
                proj: Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
            label: Some("Hero Globals Bind Group"),
        });

        let corners = [
            Corner { position: [-1.0, -1.0] },
            Corner { position: [1.0, -1.0] },
            Corner { position: [-1.0, 1.0] },
            Corner { position: [1.0, 1.0] },
        ];
        let corner_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hero Corner Buffer"),
            contents: bytemuck::cast_slice(&corners),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let mut rng = SmallRng::seed_from_u64(config.seed);

        let particle_data = build_particles(config.particle_count, &mut rng);
        let particle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hero Particle Buffer"),
            contents: bytemuck::cast_slice(&particle_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let line_data = build_lines(config.line_count, &mut rng);
        let line_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hero Line Buffer"),
            contents: bytemuck::cast_slice(&line_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let (ring_data, ring_ranges) = build_rings();
        let ring_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hero Ring Buffer"),
            contents: bytemuck::cast_slice(&ring_data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ring_tilts = (0..RING_COUNT)
            .map(|_| FRAC_PI_2 + (rng.random::<f32>() - 0.5) * RING_TILT_SPREAD)
            .collect();

        let sphere_data = build_sphere_wireframe();
        let sphere_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hero Sphere Buffer"),
            contents: bytemuck::cast_slice(&sphere_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let particles = SceneObject::new(&device, &object_layout, "Hero Particles Uniform");
        let lines = SceneObject::new(&device, &object_layout, "Hero Lines Uniform");
        let rings = (0..RING_COUNT)
            .map(|_| SceneObject::new(&device, &object_layout, "Hero Ring Uniform"))
            .collect();
        let sphere = SceneObject::new(&device, &object_layout, "Hero Sphere Uniform");

        // The line network never rotates; its uniform is written once.
        lines.write(
            &queue,
            Mat4::IDENTITY,
            [PALETTE[0][0], PALETTE[0][1], PALETTE[0][2], LINE_OPACITY],
            [0.0; 4],
        );

        Self {
            queue,
            point_pipeline,
            line_pipeline,
            globals_buffer,
            globals_bind_group,
            corner_buffer,
            particle_buffer,
            particle_count: particle_data.len() as u32,
            particles,
            line_buffer,
            line_vertex_count: line_data.len() as u32,
            lines,
            ring_buffer,
            ring_ranges,
            ring_tilts,
            rings,
            sphere_buffer,
            sphere_vertex_count: sphere_data.len() as u32,
            sphere,
            camera_position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            pointer: (0.0, 0.0),
            parallax_strength: config.parallax_strength,
            aspect: size.width as f32 / size.height.max(1) as f32,
        }
    }

    /// Cursor position normalized to [-1, 1] on both axes
    pub fn set_pointer(&mut self, nx: f32, ny: f32) {
        self.pointer = (nx, ny);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.aspect = size.width as f32 / size.height.max(1) as f32;
    }

    /// Advance all rotation angles and the camera to elapsed time `t`
    pub fn update(&mut self, t: f32) {
        // Camera eases 3% per frame toward the parallax target, then
        // looks back at the scene origin.
        let target_x = self.pointer.0 * PARALLAX_X * self.parallax_strength;
        let target_y = -self.pointer.1 * PARALLAX_Y * self.parallax_strength;
        self.camera_position.x += (target_x - self.camera_position.x) * CAMERA_EASE;
        self.camera_position.y += (target_y - self.camera_position.y) * CAMERA_EASE;

        let view = Mat4::look_at_rh(self.camera_position, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(
            CAMERA_FOV_DEG.to_radians(),
            self.aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::cast_slice(&[Globals {
                view: view.to_cols_array_2d(),
                proj: proj.to_cols_array_2d(),
            }]),
        );

        // Particle cloud rotates rigidly on two axes.
        self.particles.write(
            &self.queue,
            Mat4::from_euler(EulerRot::XYZ, t * 0.008, t * 0.018, 0.0),
            [1.0, 1.0, 1.0, PARTICLE_OPACITY],
            [POINT_SCALE, 0.0, 0.0, 0.0],
        );

        // Rings desynchronize through per-ring rate multipliers; the
        // whole group yaws slowly on top.
        let group = Mat4::from_rotation_y(t * 0.05);
        let ring_offset = Mat4::from_translation(Vec3::new(0.0, 0.0, RING_Z));
        for (i, ring) in self.rings.iter().enumerate() {
            let fi = i as f32;
            let spin = Mat4::from_euler(
                EulerRot::XYZ,
                self.ring_tilts[i],
                t * (0.12 + 0.07 * fi),
                t * (0.06 + 0.04 * fi),
            );
            let color = PALETTE[i];
            ring.write(
                &self.queue,
                group * ring_offset * spin,
                [
                    color[0],
                    color[1],
                    color[2],
                    RING_BASE_OPACITY - RING_OPACITY_STEP * fi,
                ],
                [0.0; 4],
            );
        }

        self.sphere.write(
            &self.queue,
            Mat4::from_translation(SPHERE_POSITION)
                * Mat4::from_euler(EulerRot::XYZ, t * 0.2, t * 0.3, 0.0),
            [PALETTE[0][0], PALETTE[0][1], PALETTE[0][2], SPHERE_OPACITY],
            [0.0; 4],
        );
    }

    pub fn render_with_custom_pass<'a, 'b>(&'a self, render_pass: &mut wgpu::RenderPass<'b>)
    where
        'a: 'b,
    {
        render_pass.set_pipeline(&self.point_pipeline);
        render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
        render_pass.set_bind_group(1, &self.particles.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.corner_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.particle_buffer.slice(..));
        render_pass.draw(0..4, 0..self.particle_count);

        render_pass.set_pipeline(&self.line_pipeline);
        render_pass.set_bind_group(1, &self.lines.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
        render_pass.draw(0..self.line_vertex_count, 0..1);

        render_pass.set_vertex_buffer(0, self.ring_buffer.slice(..));
        for (ring, &(start, count)) in self.rings.iter().zip(self.ring_ranges.iter()) {
            render_pass.set_bind_group(1, &ring.bind_group, &[]);
            render_pass.draw(start..start + count, 0..1);
        }

        render_pass.set_bind_group(1, &self.sphere.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.sphere_buffer.slice(..));
        render_pass.draw(0..self.sphere_vertex_count, 0..1);
    }
}

fn build_particles(count: usize, rng: &mut SmallRng) -> Vec<ParticleInstance> {
    (0..count)
        .map(|_| {
            let position = [
                (rng.random::<f32>() - 0.5) * PARTICLE_FIELD[0],
                (rng.random::<f32>() - 0.5) * PARTICLE_FIELD[1],
                (rng.random::<f32>() - 0.5) * PARTICLE_FIELD[2],
            ];
            let color = PALETTE[rng.random_range(0..PALETTE.len())];
            ParticleInstance {
                position,
                size: PARTICLE_SIZE_MIN + rng.random::<f32>() * PARTICLE_SIZE_RANGE,
                color,
                _pad: 0.0,
            }
        })
        .collect()
}

fn build_lines(count: usize, rng: &mut SmallRng) -> Vec<LineVertex> {
    let mut vertices = Vec::with_capacity(count * 2);
    for _ in 0..count {
        for _ in 0..2 {
            vertices.push(LineVertex {
                position: [
                    (rng.random::<f32>() - 0.5) * LINE_FIELD[0],
                    (rng.random::<f32>() - 0.5) * LINE_FIELD[1],
                    (rng.random::<f32>() - 0.5) * LINE_FIELD[2],
                ],
            });
        }
    }
    vertices
}

/// Concentric circles as line lists; one vertex range per ring
fn build_rings() -> (Vec<LineVertex>, Vec<(u32, u32)>) {
    let mut vertices = Vec::new();
    let mut ranges = Vec::new();
    for i in 0..RING_COUNT {
        let radius = RING_BASE_RADIUS + RING_RADIUS_STEP * i as f32;
        let start = vertices.len() as u32;
        for seg in 0..RING_SEGMENTS {
            let a0 = seg as f32 / RING_SEGMENTS as f32 * 2.0 * PI;
            let a1 = (seg + 1) as f32 / RING_SEGMENTS as f32 * 2.0 * PI;
            vertices.push(LineVertex {
                position: [radius * a0.cos(), radius * a0.sin(), 0.0],
            });
            vertices.push(LineVertex {
                position: [radius * a1.cos(), radius * a1.sin(), 0.0],
            });
        }
        ranges.push((start, vertices.len() as u32 - start));
    }
    (vertices, ranges)
}

/// Latitude/longitude wireframe approximating the orbiting sphere
fn build_sphere_wireframe() -> Vec<LineVertex> {
    let mut vertices = Vec::new();
    let point = |theta: f32, phi: f32| -> [f32; 3] {
        [
            SPHERE_RADIUS * phi.sin() * theta.cos(),
            SPHERE_RADIUS * phi.cos(),
            SPHERE_RADIUS * phi.sin() * theta.sin(),
        ]
    };

    for lat in 1..SPHERE_LAT_LINES {
        let phi = lat as f32 / SPHERE_LAT_LINES as f32 * PI;
        for seg in 0..SPHERE_SEGMENTS {
            let t0 = seg as f32 / SPHERE_SEGMENTS as f32 * 2.0 * PI;
            let t1 = (seg + 1) as f32 / SPHERE_SEGMENTS as f32 * 2.0 * PI;
            vertices.push(LineVertex { position: point(t0, phi) });
            vertices.push(LineVertex { position: point(t1, phi) });
        }
    }

    for lon in 0..SPHERE_LON_LINES {
        let theta = lon as f32 / SPHERE_LON_LINES as f32 * 2.0 * PI;
        for seg in 0..SPHERE_SEGMENTS {
            let p0 = seg as f32 / SPHERE_SEGMENTS as f32 * PI;
            let p1 = (seg + 1) as f32 / SPHERE_SEGMENTS as f32 * PI;
            vertices.push(LineVertex { position: point(theta, p0) });
            vertices.push(LineVertex { position: point(theta, p1) });
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_positions_stay_inside_the_field() {
        let mut rng = SmallRng::seed_from_u64(11);
        let particles = build_particles(500, &mut rng);
        assert_eq!(particles.len(), 500);
        for p in &particles {
            assert!(p.position[0].abs() <= PARTICLE_FIELD[0] / 2.0);
            assert!(p.position[1].abs() <= PARTICLE_FIELD[1] / 2.0);
            assert!(p.position[2].abs() <= PARTICLE_FIELD[2] / 2.0);
            assert!(p.size >= PARTICLE_SIZE_MIN);
            assert!(p.size <= PARTICLE_SIZE_MIN + PARTICLE_SIZE_RANGE);
            assert!(PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn layout_is_reproducible_for_a_seed() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        let pa = build_particles(64, &mut a);
        let pb = build_particles(64, &mut b);
        for (x, y) in pa.iter().zip(pb.iter()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn lines_come_in_pairs() {
        let mut rng = SmallRng::seed_from_u64(2);
        let lines = build_lines(60, &mut rng);
        assert_eq!(lines.len(), 120);
    }

    #[test]
    fn ring_ranges_are_disjoint_and_complete() {
        let (vertices, ranges) = build_rings();
        assert_eq!(ranges.len(), RING_COUNT);
        let total: u32 = ranges.iter().map(|(_, count)| count).sum();
        assert_eq!(total as usize, vertices.len());
        for window in ranges.windows(2) {
            assert_eq!(window[0].0 + window[0].1, window[1].0);
        }
    }

    #[test]
    fn sphere_vertices_sit_on_the_sphere() {
        let vertices = build_sphere_wireframe();
        assert!(!vertices.is_empty());
        for v in &vertices {
            let r = (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((r - SPHERE_RADIUS).abs() < 1e-3);
        }
    }
}
