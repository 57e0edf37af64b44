use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer, Viewport,
};
use std::sync::Arc;
use wgpu::{Device, Queue, TextureView};
use winit::dpi::PhysicalSize;

/// One positioned run of text queued for the current frame
pub struct TextSpec {
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub size: f32,
    pub color: [f32; 4],
    /// Clip bounds as (left, top, right, bottom) in pixels
    pub bounds: (i32, i32, i32, i32),
    /// Wrap width; text wider than this breaks onto new lines
    pub wrap_width: f32,
    pub mono: bool,
}

/// A text renderer that uses glyphon to render text
///
/// Text is queued spec by spec while the frame is assembled, then shaped
/// and drawn in a single prepare/render pass.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    renderer: GlyphonTextRenderer,
    buffers: Vec<Buffer>,
    specs: Vec<TextSpec>,
    device: Arc<Device>,
    queue: Arc<Queue>,
    size: PhysicalSize<u32>,
    cache_ref: Cache,
    viewport: Viewport,
}

impl TextRenderer {
    /// Create a new text renderer
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        size: PhysicalSize<u32>,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let mut font_system = FontSystem::new();
        let swash_cache = SwashCache::new();

        // Without system fonts nothing renders at all
        font_system.db_mut().load_system_fonts();

        let cache_ref = Cache::new(&device);
        let viewport = Viewport::new(&device, &cache_ref);
        let mut atlas = TextAtlas::new(&device, &queue, &cache_ref, surface_format);
        let renderer =
            GlyphonTextRenderer::new(&mut atlas, &device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            atlas,
            renderer,
            buffers: Vec::new(),
            specs: Vec::new(),
            device,
            queue,
            size,
            cache_ref,
            viewport,
        }
    }

    /// Resize the text renderer
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
        self.viewport.update(
            &self.queue,
            Resolution {
                width: size.width,
                height: size.height,
            },
        );
    }

    /// Queue a text run for this frame
    pub fn queue_text(&mut self, spec: TextSpec) {
        if !spec.text.is_empty() && spec.color[3] > 0.003 {
            self.specs.push(spec);
        }
    }

    /// Shape and draw everything queued since the last call
    pub fn render(&mut self, view: &TextureView, encoder: &mut wgpu::CommandEncoder) {
        if self.specs.is_empty() {
            return;
        }

        while self.buffers.len() < self.specs.len() {
            self.buffers
                .push(Buffer::new(&mut self.font_system, Metrics::new(16.0, 20.0)));
        }

        for (buffer, spec) in self.buffers.iter_mut().zip(self.specs.iter()) {
            let metrics = Metrics::new(spec.size, spec.size * 1.2);
            buffer.set_metrics(&mut self.font_system, metrics);
            buffer.set_size(&mut self.font_system, Some(spec.wrap_width.max(1.0)), None);
            let family = if spec.mono {
                Family::Monospace
            } else {
                Family::SansSerif
            };
            let color = Color::rgba(
                (spec.color[0] * 255.0) as u8,
                (spec.color[1] * 255.0) as u8,
                (spec.color[2] * 255.0) as u8,
                (spec.color[3] * 255.0) as u8,
            );
            buffer.set_text(
                &mut self.font_system,
                &spec.text,
                Attrs::new().family(family).color(color),
                Shaping::Advanced,
            );
            buffer.shape_until_scroll(&mut self.font_system, true);
        }

        self.viewport.update(
            &self.queue,
            Resolution {
                width: self.size.width,
                height: self.size.height,
            },
        );

        let areas: Vec<TextArea> = self
            .buffers
            .iter()
            .zip(self.specs.iter())
            .map(|(buffer, spec)| {
                let color = Color::rgba(
                    (spec.color[0] * 255.0) as u8,
                    (spec.color[1] * 255.0) as u8,
                    (spec.color[2] * 255.0) as u8,
                    (spec.color[3] * 255.0) as u8,
                );
                TextArea {
                    buffer,
                    left: spec.left,
                    top: spec.top,
                    scale: 1.0,
                    bounds: TextBounds {
                        left: spec.bounds.0,
                        top: spec.bounds.1,
                        right: spec.bounds.2,
                        bottom: spec.bounds.3,
                    },
                    default_color: color,
                    custom_glyphs: &[],
                }
            })
            .collect();

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Text Render Pass"),
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

        if let Ok(_) = self.renderer.prepare(
            &self.device,
            &self.queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            let _ = self
                .renderer
                .render(&self.atlas, &self.viewport, &mut render_pass);
        }

        drop(render_pass);

        // Trim the atlas to free up memory
        self.atlas.trim();
        self.specs.clear();
    }
}
