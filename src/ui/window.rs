//! Window state and per-frame page assembly.
//!
//! `draw()` runs the observers against the current scroll position,
//! samples the choreography, then rebuilds the frame: hero scene first,
//! then every panel as an instanced quad, then text, then the control
//! bar. The window redraws continuously for the page's lifetime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
    window::Window,
};

use crate::avatar::Mouth;
use crate::chain_log::EntryStatus;
use crate::choreography::{
    hero_scrub, step_float_offset, Choreography, EmotionFill, HoverScale, TweenSample,
    TweenTarget,
};
use crate::config::AppConfig;
use crate::nav::NavObserver;
use crate::page::{PageModel, SectionId};
use crate::reveal::{RevealController, RevealKey, REVEAL_BOTTOM_MARGIN};
use crate::tilt::{CardKey, TiltEffect};

use super::common::PageActivity;
use super::control_bar::{ControlBar, ControlKind};
use super::event_handler::EventHandler;
use super::hero::HeroScene;
use super::layout_manager::{LayoutManager, RectPx, NAV_HEIGHT};
use super::panels::{PanelInstance, PanelRenderer};
use super::text_renderer::{TextRenderer, TextSpec};

// Page chrome palette
const COLOR_TEXT: [f32; 4] = [0.90, 0.94, 1.00, 1.0];
const COLOR_DIM: [f32; 4] = [0.58, 0.64, 0.75, 1.0];
const COLOR_ACCENT: [f32; 4] = [0.00, 0.83, 1.00, 1.0];
const COLOR_PURPLE: [f32; 4] = [0.66, 0.33, 0.97, 1.0];
const COLOR_PANEL: [f32; 4] = [1.0, 1.0, 1.0, 0.05];
const COLOR_PANEL_BORDER: [f32; 4] = [0.0, 0.83, 1.0, 0.22];
const COLOR_NAV_BG: [f32; 4] = [0.016, 0.024, 0.066, 0.6];
const COLOR_NAV_BG_SCROLLED: [f32; 4] = [0.016, 0.024, 0.066, 0.92];
const COLOR_LIVE: [f32; 4] = [1.0, 0.45, 0.35, 1.0];
const COLOR_VERIFIED: [f32; 4] = [0.25, 0.90, 0.55, 1.0];

const SCROLLBAR_WIDTH: f32 = 6.0;

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Rough left edge for horizontally centered text
fn centered_left(center_x: f32, text: &str, size: f32) -> f32 {
    center_x - text.chars().count() as f32 * size * 0.27
}

pub struct WindowState {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub hero: Option<HeroScene>,
    panels: PanelRenderer,
    text: TextRenderer,
    control_bar: ControlBar,
    layout: LayoutManager,
    page: PageModel,
    nav: NavObserver,
    reveal: RevealController,
    choreography: Choreography,
    emotion_fill: EmotionFill,
    tilt: TiltEffect,
    pill_hover: Vec<HoverScale>,
    event_handler: EventHandler,
    activity: Option<Arc<RwLock<PageActivity>>>,
    pub running: Option<Arc<AtomicBool>>,
    scroll_offset: f32,
    started_at: Instant,
    app_config: AppConfig,
}

impl WindowState {
    pub fn new(
        window: Arc<Window>,
        app_config: AppConfig,
        activity: Option<Arc<RwLock<PageActivity>>>,
        running: Option<Arc<AtomicBool>>,
    ) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .unwrap();

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .unwrap();

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .filter(|f| f.is_srgb())
            .next()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let panels = PanelRenderer::new(&device, &config);
        let text = TextRenderer::new(
            Arc::new(device.clone()),
            Arc::new(queue.clone()),
            PhysicalSize::new(width, height),
            config.format,
        );
        let control_bar = ControlBar::new(&device, config.format);
        let layout = LayoutManager::new(width, height);

        let page = PageModel::standard();
        let nav = NavObserver::new(page.nav_entries().map(|(s, _)| s.id).collect());
        let reveal = RevealController::new([
            (RevealKey(SectionId::About), page.about_cards.len()),
            (RevealKey(SectionId::Timeline), page.timeline_steps.len()),
            (RevealKey(SectionId::Features), page.feature_cards.len()),
            (RevealKey(SectionId::Demo), 1),
        ]);
        let emotion_fill =
            EmotionFill::new(page.emotion_bars.iter().map(|b| b.target_pct).collect());
        let pill_hover = page.tech_pills.iter().map(|_| HoverScale::new()).collect();

        Self {
            window,
            surface,
            device,
            queue,
            config,
            hero: None,
            panels,
            text,
            control_bar,
            layout,
            page,
            nav,
            reveal,
            choreography: Choreography::standard(),
            emotion_fill,
            tilt: TiltEffect::new(),
            pill_hover,
            event_handler: EventHandler::new(),
            activity,
            running,
            scroll_offset: 0.0,
            started_at: Instant::now(),
            app_config,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.layout.update_dimensions(width, height);
            self.panels.resize(&self.queue, width, height);
            self.text.resize(PhysicalSize::new(width, height));
            if let Some(hero) = &mut self.hero {
                hero.resize(PhysicalSize::new(width, height));
            }
            self.scroll_offset = self.scroll_offset.min(self.layout.max_scroll());
        }
    }

    pub fn draw(&mut self) {
        let t = self.started_at.elapsed().as_secs_f32();
        let now = self.started_at.elapsed();
        let scroll = self.scroll_offset;

        // Run the observers before anything is positioned.
        self.nav.on_scroll(scroll);
        let fractions: Vec<(SectionId, f32)> = SectionId::ALL
            .iter()
            .map(|&id| (id, self.layout.visible_fraction(id, scroll)))
            .collect();
        self.nav.observe(fractions);
        for id in [
            SectionId::About,
            SectionId::Timeline,
            SectionId::Features,
            SectionId::Demo,
        ] {
            let fraction =
                self.layout
                    .visible_fraction_clipped(id, scroll, REVEAL_BOTTOM_MARGIN);
            self.reveal.observe(RevealKey(id), fraction, now);
        }
        self.reveal.tick(now);

        let layout = &self.layout;
        self.choreography
            .update(t, |section, frac| layout.section_top_crossed(section, scroll, frac));
        self.emotion_fill
            .update(t, layout.section_top_crossed(SectionId::Demo, scroll, 0.8));

        let activity = self
            .activity
            .as_ref()
            .map(|a| a.read().clone())
            .unwrap_or_else(|| PageActivity::empty(self.page.avatar_pods.len()));

        // The hero is created lazily; if that is ever impossible the
        // page simply runs without the background scene.
        if self.hero.is_none() {
            self.hero = Some(HeroScene::new(
                Arc::new(self.device.clone()),
                Arc::new(self.queue.clone()),
                PhysicalSize::new(self.config.width, self.config.height),
                self.config.format,
                &self.app_config.hero,
            ));
        }

        let output = self.surface.get_current_texture().unwrap();
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.panels.clear_background(&mut encoder, &view);

        if let Some(hero) = &mut self.hero {
            let (nx, ny) = self.event_handler.pointer_norm;
            hero.set_pointer(nx, ny);
            hero.update(t);

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Hero Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            hero.render_with_custom_pass(&mut render_pass);
        }

        // Assemble the scrolled page.
        let mut panels: Vec<PanelInstance> = Vec::with_capacity(128);
        self.draw_hero_content(t, scroll, &mut panels);
        self.draw_about(t, scroll, &mut panels);
        self.draw_timeline(t, scroll, &mut panels);
        self.draw_features(t, scroll, &mut panels);
        self.draw_demo(t, scroll, &activity, &mut panels);
        self.draw_nav(&mut panels);
        self.draw_scrollbar(scroll, &mut panels);

        self.panels
            .draw(&self.device, &self.queue, &mut encoder, &view, &panels);
        self.text.render(&view, &mut encoder);

        let viewport = self.layout.viewport();
        self.control_bar
            .render(&view, &mut encoder, &self.queue, viewport);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // Request redraw to keep animation loop going
        self.window.request_redraw();
    }

    fn full_bounds(&self) -> (i32, i32, i32, i32) {
        (0, 0, self.config.width as i32, self.config.height as i32)
    }

    fn section_onscreen(&self, id: SectionId, scroll: f32) -> bool {
        let (top, bottom) = self.layout.section_range(id);
        let (_, vh) = self.layout.viewport();
        bottom - scroll > 0.0 && top - scroll < vh
    }

    fn queue_label(
        &mut self,
        text: &str,
        left: f32,
        top: f32,
        size: f32,
        color: [f32; 4],
        mono: bool,
    ) {
        let bounds = self.full_bounds();
        let wrap = self.config.width as f32;
        self.text.queue_text(TextSpec {
            text: text.to_string(),
            left,
            top,
            size,
            color,
            bounds,
            wrap_width: wrap,
            mono,
        });
    }

    fn draw_nav(&mut self, panels: &mut Vec<PanelInstance>) {
        let nav_rect = self.layout.nav_rect();
        let bg = if self.nav.scrolled() {
            COLOR_NAV_BG_SCROLLED
        } else {
            COLOR_NAV_BG
        };
        panels.push(PanelInstance::filled(nav_rect, bg, 0.0));
        if self.nav.scrolled() {
            // Hairline under the condensed bar
            panels.push(PanelInstance::filled(
                RectPx {
                    x: 0.0,
                    y: NAV_HEIGHT - 1.0,
                    w: nav_rect.w,
                    h: 1.0,
                },
                with_alpha(COLOR_ACCENT, 0.35),
                0.0,
            ));
        }

        let brand = self.page.brand;
        self.queue_label(brand, 28.0, 20.0, 20.0, COLOR_ACCENT, false);

        let entries: Vec<(SectionId, &'static str)> = self
            .page
            .nav_entries()
            .map(|(s, label)| (s.id, label))
            .collect();
        let rects = self.layout.nav_link_rects(entries.len());
        let active = self.nav.active_link();
        for ((id, label), rect) in entries.into_iter().zip(rects.into_iter()) {
            let is_active = active == Some(id);
            let color = if is_active { COLOR_ACCENT } else { COLOR_DIM };
            self.queue_label(
                label,
                centered_left(rect.x + rect.w / 2.0, label, 14.0),
                rect.y + 7.0,
                14.0,
                color,
                false,
            );
            if is_active {
                panels.push(PanelInstance::filled(
                    RectPx {
                        x: rect.x + 14.0,
                        y: rect.y + rect.h - 2.0,
                        w: rect.w - 28.0,
                        h: 2.0,
                    },
                    COLOR_ACCENT,
                    1.0,
                ));
            }
        }
    }

    fn draw_hero_content(&mut self, t: f32, scroll: f32, panels: &mut Vec<PanelInstance>) {
        if !self.section_onscreen(SectionId::Hero, scroll) {
            return;
        }
        let (vw, vh) = self.layout.viewport();
        let center_x = vw / 2.0;
        let (hero_top, hero_bottom) = self.layout.section_range(SectionId::Hero);
        let scrub = hero_scrub(scroll, hero_bottom - hero_top);

        // Every hero element combines its entrance tween with the scrub.
        let place = |sample: TweenSample, y: f32| -> (f32, f32) {
            (
                sample.opacity * scrub.opacity,
                y - scroll + sample.dy + scrub.dy,
            )
        };

        let sample = self.choreography.sample(TweenTarget::HeroBadge, 0, t);
        let (alpha, y) = place(sample, vh * 0.22);
        let badge = self.page.hero_badge;
        let badge_w = badge.chars().count() as f32 * 7.4 + 36.0;
        let badge_rect = RectPx {
            x: center_x - badge_w / 2.0,
            y,
            w: badge_w,
            h: 30.0,
        };
        panels.push(PanelInstance::outline(
            badge_rect,
            with_alpha(COLOR_PURPLE, alpha * 0.8),
            15.0,
            1.0,
        ));
        self.queue_label(
            badge,
            centered_left(center_x, badge, 13.0),
            y + 8.0,
            13.0,
            with_alpha(COLOR_DIM, alpha),
            false,
        );

        let sample = self.choreography.sample(TweenTarget::HeroTitle, 0, t);
        let (alpha, y) = place(sample, vh * 0.30);
        let title = self.page.section(SectionId::Hero).map(|s| s.title).unwrap_or("");
        self.queue_label(
            title,
            centered_left(center_x, title, 56.0),
            y,
            56.0,
            with_alpha(COLOR_TEXT, alpha),
            false,
        );

        let sample = self.choreography.sample(TweenTarget::HeroSubtitle, 0, t);
        let (alpha, y) = place(sample, vh * 0.42);
        let subtitle = self.page.hero_subtitle;
        self.queue_label(
            subtitle,
            centered_left(center_x, subtitle, 17.0),
            y,
            17.0,
            with_alpha(COLOR_DIM, alpha),
            false,
        );

        let sample = self.choreography.sample(TweenTarget::HeroButtons, 0, t);
        let (alpha, y) = place(sample, vh * 0.52);
        let button_w = 180.0;
        let gap = 18.0;
        let buttons = self.page.hero_buttons.clone();
        let total = buttons.len() as f32 * button_w + (buttons.len() as f32 - 1.0) * gap;
        for (i, label) in buttons.iter().enumerate() {
            let rect = RectPx {
                x: center_x - total / 2.0 + i as f32 * (button_w + gap),
                y,
                w: button_w,
                h: 46.0,
            };
            if i == 0 {
                panels.push(PanelInstance::filled(
                    rect,
                    with_alpha(COLOR_ACCENT, alpha * 0.85),
                    23.0,
                ));
            } else {
                panels.push(PanelInstance::outline(
                    rect,
                    with_alpha(COLOR_ACCENT, alpha * 0.7),
                    23.0,
                    1.0,
                ));
            }
            let text_color = if i == 0 {
                [0.01, 0.03, 0.08, alpha]
            } else {
                with_alpha(COLOR_ACCENT, alpha)
            };
            self.queue_label(
                label,
                centered_left(rect.x + rect.w / 2.0, label, 15.0),
                y + 14.0,
                15.0,
                text_color,
                false,
            );
        }

        let sample = self.choreography.sample(TweenTarget::HeroStats, 0, t);
        let (alpha, y) = place(sample, vh * 0.64);
        let stats = self.page.hero_stats.clone();
        let stat_w = 150.0;
        let total = stats.len() as f32 * stat_w;
        for (i, stat) in stats.iter().enumerate() {
            let x = center_x - total / 2.0 + i as f32 * stat_w + stat_w / 2.0;
            self.queue_label(
                stat.value,
                centered_left(x, stat.value, 26.0),
                y,
                26.0,
                with_alpha(COLOR_ACCENT, alpha),
                false,
            );
            self.queue_label(
                stat.label,
                centered_left(x, stat.label, 12.0),
                y + 34.0,
                12.0,
                with_alpha(COLOR_DIM, alpha),
                false,
            );
        }

        let sample = self.choreography.sample(TweenTarget::ScrollIndicator, 0, t);
        let (alpha, _) = place(sample, 0.0);
        let indicator = self.layout.scroll_indicator_rect().shifted(0.0, -scroll);
        panels.push(PanelInstance::outline(
            indicator,
            with_alpha(COLOR_DIM, alpha * 0.9),
            12.0,
            1.5,
        ));
        // Dot drifts down the well on a 1.5s loop
        let drift = (t % 1.5) / 1.5;
        panels.push(PanelInstance::filled(
            RectPx {
                x: indicator.x + indicator.w / 2.0 - 2.0,
                y: indicator.y + 7.0 + drift * 16.0,
                w: 4.0,
                h: 7.0,
            },
            with_alpha(COLOR_ACCENT, alpha * (1.0 - drift)),
            2.0,
        ));
    }

    fn heading_alpha_and_offset(&self, id: SectionId, t: f32) -> (f32, f32) {
        let sample = self.choreography.sample(TweenTarget::SectionTitle(id), 0, t);
        (sample.opacity, sample.dy)
    }

    fn draw_section_heading(&mut self, id: SectionId, t: f32, scroll: f32) {
        let (alpha, dy) = self.heading_alpha_and_offset(id, t);
        let rect = self.layout.section_title_rect(id).shifted(0.0, dy - scroll);
        let (title, subtitle) = self
            .page
            .section(id)
            .map(|s| (s.title, s.subtitle))
            .unwrap_or(("", ""));
        let center = rect.x + rect.w / 2.0;
        self.queue_label(
            title,
            centered_left(center, title, 34.0),
            rect.y,
            34.0,
            with_alpha(COLOR_TEXT, alpha),
            false,
        );
        self.queue_label(
            subtitle,
            centered_left(center, subtitle, 15.0),
            rect.y + 46.0,
            15.0,
            with_alpha(COLOR_DIM, alpha),
            false,
        );
    }

    /// Shared card body: panel, optional tilt highlight, title and copy
    fn draw_card(
        &mut self,
        key: CardKey,
        rect: RectPx,
        title: &str,
        body: &str,
        alpha: f32,
        panels: &mut Vec<PanelInstance>,
    ) {
        let tilted = self.tilt.transform(key);
        let rect = match tilted {
            Some(transform) => rect.shifted(0.0, transform.lift),
            None => rect,
        };
        panels.push(PanelInstance::filled(
            rect,
            with_alpha(COLOR_PANEL, alpha),
            14.0,
        ));
        let border = if tilted.is_some() {
            with_alpha(COLOR_ACCENT, alpha * 0.6)
        } else {
            with_alpha(COLOR_PANEL_BORDER, alpha)
        };
        panels.push(PanelInstance::outline(rect, border, 14.0, 1.0));
        let bounds = self.full_bounds();
        self.text.queue_text(TextSpec {
            text: title.to_string(),
            left: rect.x + 20.0,
            top: rect.y + 20.0,
            size: 18.0,
            color: with_alpha(COLOR_TEXT, alpha),
            bounds,
            wrap_width: rect.w - 40.0,
            mono: false,
        });
        self.text.queue_text(TextSpec {
            text: body.to_string(),
            left: rect.x + 20.0,
            top: rect.y + 52.0,
            size: 13.0,
            color: with_alpha(COLOR_DIM, alpha),
            bounds,
            wrap_width: rect.w - 40.0,
            mono: false,
        });
    }

    fn draw_about(&mut self, t: f32, scroll: f32, panels: &mut Vec<PanelInstance>) {
        if !self.section_onscreen(SectionId::About, scroll) {
            return;
        }
        self.draw_section_heading(SectionId::About, t, scroll);

        let area = self.layout.section_content(SectionId::About);
        let cards = self.page.about_cards.clone();
        let rects = self.layout.grid(area, cards.len(), 3, 240.0, 24.0);
        for (i, (card, rect)) in cards.iter().zip(rects.into_iter()).enumerate() {
            let sample = self.choreography.sample(TweenTarget::AboutCards, i, t);
            let gate = self.reveal.child_visible(RevealKey(SectionId::About), i);
            let alpha = sample.opacity * if gate { 1.0 } else { 0.0 };
            if alpha <= 0.003 {
                continue;
            }
            let key = CardKey {
                section: SectionId::About,
                index: i,
            };
            self.draw_card(
                key,
                rect.shifted(sample.dx, sample.dy - scroll),
                card.title,
                card.body,
                alpha,
                panels,
            );
        }
    }

    fn draw_timeline(&mut self, t: f32, scroll: f32, panels: &mut Vec<PanelInstance>) {
        if !self.section_onscreen(SectionId::Timeline, scroll) {
            return;
        }
        self.draw_section_heading(SectionId::Timeline, t, scroll);

        let area = self.layout.section_content(SectionId::Timeline);
        let steps = self.page.timeline_steps.clone();
        let rects = self.layout.grid(area, steps.len(), 1, 104.0, 18.0);
        for (i, (step, rect)) in steps.iter().zip(rects.into_iter()).enumerate() {
            let sample = self.choreography.sample(TweenTarget::TimelineSteps, i, t);
            let gate = self.reveal.child_visible(RevealKey(SectionId::Timeline), i);
            let alpha = sample.opacity * if gate { 1.0 } else { 0.0 };
            if alpha <= 0.003 {
                continue;
            }
            let rect = rect.shifted(sample.dx, sample.dy - scroll);

            panels.push(PanelInstance::filled(
                rect,
                with_alpha(COLOR_PANEL, alpha),
                12.0,
            ));
            panels.push(PanelInstance::outline(
                rect,
                with_alpha(COLOR_PANEL_BORDER, alpha),
                12.0,
                1.0,
            ));

            // The step number floats on its own endless yoyo.
            let float_y = step_float_offset(i, t);
            let badge = RectPx {
                x: rect.x + 22.0,
                y: rect.y + rect.h / 2.0 - 24.0 + float_y,
                w: 48.0,
                h: 48.0,
            };
            panels.push(PanelInstance::outline(
                badge,
                with_alpha(COLOR_PURPLE, alpha * 0.9),
                24.0,
                1.5,
            ));
            self.queue_label(
                step.number,
                badge.x + 13.0,
                badge.y + 14.0,
                17.0,
                with_alpha(COLOR_PURPLE, alpha),
                true,
            );

            self.queue_label(
                step.title,
                rect.x + 96.0,
                rect.y + 22.0,
                18.0,
                with_alpha(COLOR_TEXT, alpha),
                false,
            );
            self.queue_label(
                step.body,
                rect.x + 96.0,
                rect.y + 52.0,
                13.0,
                with_alpha(COLOR_DIM, alpha),
                false,
            );
        }
    }

    fn draw_features(&mut self, t: f32, scroll: f32, panels: &mut Vec<PanelInstance>) {
        if !self.section_onscreen(SectionId::Features, scroll) {
            return;
        }
        self.draw_section_heading(SectionId::Features, t, scroll);

        let area = self.layout.section_content(SectionId::Features);
        let cards = self.page.feature_cards.clone();
        let rects = self.layout.grid(area, cards.len(), 3, 170.0, 20.0);
        for (i, (card, rect)) in cards.iter().zip(rects.into_iter()).enumerate() {
            let sample = self.choreography.sample(TweenTarget::FeatureCards, i, t);
            let gate = self.reveal.child_visible(RevealKey(SectionId::Features), i);
            let alpha = sample.opacity * if gate { 1.0 } else { 0.0 };
            if alpha <= 0.003 {
                continue;
            }
            let key = CardKey {
                section: SectionId::Features,
                index: i,
            };
            self.draw_card(
                key,
                rect.shifted(sample.dx, sample.dy - scroll),
                card.title,
                card.body,
                alpha,
                panels,
            );
        }
    }

    fn draw_demo(
        &mut self,
        t: f32,
        scroll: f32,
        activity: &PageActivity,
        panels: &mut Vec<PanelInstance>,
    ) {
        if !self.section_onscreen(SectionId::Demo, scroll) {
            self.control_bar.set_rects(&[], false);
            return;
        }
        self.draw_section_heading(SectionId::Demo, t, scroll);

        let sample = self.choreography.sample(TweenTarget::DemoBrowser, 0, t);
        let gate = self.reveal.child_visible(RevealKey(SectionId::Demo), 0);
        let alpha = sample.opacity * if gate { 1.0 } else { 0.0 };
        let dy = sample.dy - scroll;

        let stage = self.layout.demo_browser_rect().shifted(0.0, dy);
        if alpha <= 0.003 {
            self.control_bar.set_rects(&[], false);
            return;
        }

        panels.push(PanelInstance::filled(
            stage,
            [0.03, 0.04, 0.10, 0.92 * alpha],
            16.0,
        ));
        panels.push(PanelInstance::outline(
            stage,
            with_alpha(COLOR_PANEL_BORDER, alpha),
            16.0,
            1.0,
        ));

        // Browser chrome dots
        for i in 0..3 {
            panels.push(PanelInstance::filled(
                RectPx {
                    x: stage.x + 18.0 + i as f32 * 18.0,
                    y: stage.y + 14.0,
                    w: 10.0,
                    h: 10.0,
                },
                with_alpha(COLOR_DIM, alpha * 0.6),
                5.0,
            ));
        }

        // Avatar pods
        let pods = self.page.avatar_pods.clone();
        let pod_rects: Vec<RectPx> = self
            .layout
            .avatar_pod_rects(pods.len())
            .into_iter()
            .map(|r| r.shifted(0.0, dy))
            .collect();
        for (i, (pod, rect)) in pods.iter().zip(pod_rects.iter()).enumerate() {
            let state = activity.pods.get(i).copied();
            let speaking = state.map(|s| s.speaking).unwrap_or(false);

            panels.push(PanelInstance::filled(
                *rect,
                with_alpha(COLOR_PANEL, alpha),
                12.0,
            ));
            if state.map(|s| s.ring).unwrap_or(false) {
                panels.push(PanelInstance::outline(
                    RectPx {
                        x: rect.x - 3.0,
                        y: rect.y - 3.0,
                        w: rect.w + 6.0,
                        h: rect.h + 6.0,
                    },
                    with_alpha(COLOR_ACCENT, alpha * 0.85),
                    14.0,
                    2.0,
                ));
            }

            // Face placeholder and mouth decoration
            let face = RectPx {
                x: rect.x + rect.w / 2.0 - 22.0,
                y: rect.y + 14.0,
                w: 44.0,
                h: 44.0,
            };
            panels.push(PanelInstance::filled(
                face,
                with_alpha(if speaking { COLOR_ACCENT } else { COLOR_DIM }, alpha * 0.35),
                22.0,
            ));
            let mouth_speaking = state.map(|s| s.mouth == Mouth::Speaking).unwrap_or(false);
            let mouth = if mouth_speaking {
                RectPx {
                    x: face.x + face.w / 2.0 - 7.0,
                    y: face.y + 28.0,
                    w: 14.0,
                    h: 8.0,
                }
            } else {
                RectPx {
                    x: face.x + face.w / 2.0 - 8.0,
                    y: face.y + 31.0,
                    w: 16.0,
                    h: 2.0,
                }
            };
            panels.push(PanelInstance::filled(
                mouth,
                with_alpha(COLOR_TEXT, alpha * 0.8),
                if mouth_speaking { 4.0 } else { 1.0 },
            ));

            self.queue_label(
                pod.name,
                centered_left(rect.x + rect.w / 2.0, pod.name, 14.0),
                rect.y + rect.h - 42.0,
                14.0,
                with_alpha(COLOR_TEXT, alpha),
                false,
            );
            self.queue_label(
                pod.role,
                centered_left(rect.x + rect.w / 2.0, pod.role, 11.0),
                rect.y + rect.h - 22.0,
                11.0,
                with_alpha(COLOR_DIM, alpha),
                false,
            );
        }

        // Control bar geometry follows the stage
        let control_rects: Vec<RectPx> = self
            .layout
            .control_button_rects(ControlKind::ALL.len())
            .into_iter()
            .map(|r| r.shifted(0.0, dy))
            .collect();
        self.control_bar.set_rects(&control_rects, alpha > 0.5);

        // Side panel: session chain log, clock and emotion meters
        let side = self.layout.demo_side_panel_rect().shifted(0.0, dy);
        panels.push(PanelInstance::filled(
            side,
            [0.0, 0.0, 0.0, 0.35 * alpha],
            12.0,
        ));
        self.queue_label(
            "SESSION CHAIN",
            side.x + 12.0,
            side.y + 14.0,
            12.0,
            with_alpha(COLOR_DIM, alpha),
            true,
        );
        let clock = activity.clock_text.clone();
        self.queue_label(
            &clock,
            side.x + side.w - 12.0 - clock.chars().count() as f32 * 7.4,
            side.y + 14.0,
            12.0,
            with_alpha(COLOR_ACCENT, alpha),
            true,
        );

        let log_rect = self.layout.chain_log_rect().shifted(0.0, dy);
        let log_bounds = (
            log_rect.x as i32,
            log_rect.y as i32,
            (log_rect.x + log_rect.w) as i32,
            (log_rect.y + log_rect.h) as i32,
        );
        for (i, entry) in activity.chain_entries.iter().enumerate() {
            let row = self.layout.chain_row_rect(i).shifted(0.0, dy);
            let live = entry.status == EntryStatus::Live;
            panels.push(PanelInstance::filled(
                row,
                [1.0, 1.0, 1.0, if live { 0.07 } else { 0.03 } * alpha],
                5.0,
            ));
            self.text.queue_text(TextSpec {
                text: format!("{}...", entry.hash),
                left: row.x + 8.0,
                top: row.y + 4.0,
                size: 12.0,
                color: with_alpha(COLOR_ACCENT, alpha),
                bounds: log_bounds,
                wrap_width: row.w,
                mono: true,
            });
            self.text.queue_text(TextSpec {
                text: entry.label.to_string(),
                left: row.x + 76.0,
                top: row.y + 4.0,
                size: 12.0,
                color: with_alpha(COLOR_DIM, alpha),
                bounds: log_bounds,
                wrap_width: row.w,
                mono: false,
            });
            let (glyph, color) = if live {
                ("\u{25cf}", COLOR_LIVE)
            } else {
                ("\u{2713}", COLOR_VERIFIED)
            };
            self.text.queue_text(TextSpec {
                text: glyph.to_string(),
                left: row.x + row.w - 18.0,
                top: row.y + 4.0,
                size: 12.0,
                color: with_alpha(color, alpha),
                bounds: log_bounds,
                wrap_width: 20.0,
                mono: false,
            });
        }

        let bars = self.page.emotion_bars.clone();
        let bar_rects: Vec<RectPx> = self
            .layout
            .emotion_bar_rects(bars.len())
            .into_iter()
            .map(|r| r.shifted(0.0, dy))
            .collect();
        for (i, (bar, track)) in bars.iter().zip(bar_rects.into_iter()).enumerate() {
            self.queue_label(
                bar.label,
                track.x,
                track.y - 16.0,
                11.0,
                with_alpha(COLOR_DIM, alpha),
                false,
            );
            panels.push(PanelInstance::filled(
                track,
                [1.0, 1.0, 1.0, 0.08 * alpha],
                4.0,
            ));
            let level = self.emotion_fill.level(i, t);
            panels.push(PanelInstance::filled(
                RectPx {
                    x: track.x,
                    y: track.y,
                    w: track.w * (level / 100.0).clamp(0.0, 1.0),
                    h: track.h,
                },
                with_alpha(COLOR_ACCENT, alpha * 0.9),
                4.0,
            ));
        }

        // Tech pills under the stage, scaled by their hover tweens
        let pills = self.page.tech_pills.clone();
        let pill_rects: Vec<RectPx> = self
            .layout
            .tech_pill_rects(pills.len())
            .into_iter()
            .map(|r| r.shifted(0.0, dy))
            .collect();
        for (i, (label, rect)) in pills.iter().zip(pill_rects.into_iter()).enumerate() {
            let scale = self.pill_hover.get(i).map(|h| h.value(t)).unwrap_or(1.0);
            let grown = RectPx {
                x: rect.x - rect.w * (scale - 1.0) / 2.0,
                y: rect.y - rect.h * (scale - 1.0) / 2.0,
                w: rect.w * scale,
                h: rect.h * scale,
            };
            panels.push(PanelInstance::outline(
                grown,
                with_alpha(COLOR_PANEL_BORDER, alpha * 2.0),
                grown.h / 2.0,
                1.0,
            ));
            self.queue_label(
                label,
                centered_left(grown.x + grown.w / 2.0, label, 12.0),
                grown.y + 8.0,
                12.0,
                with_alpha(COLOR_DIM, alpha),
                true,
            );
        }
    }

    fn draw_scrollbar(&mut self, scroll: f32, panels: &mut Vec<PanelInstance>) {
        let (vw, vh) = self.layout.viewport();
        let page_height = self.layout.page_height();
        if page_height <= vh {
            return;
        }
        let track = RectPx {
            x: vw - SCROLLBAR_WIDTH,
            y: 0.0,
            w: SCROLLBAR_WIDTH,
            h: vh,
        };
        panels.push(PanelInstance::filled(track, [1.0, 1.0, 1.0, 0.05], 3.0));

        let visible_ratio = vh / page_height;
        let thumb_height = (vh * visible_ratio).max(20.0).min(vh);
        let progress = scroll / self.layout.max_scroll().max(1.0);
        panels.push(PanelInstance::filled(
            RectPx {
                x: track.x + 1.0,
                y: progress * (vh - thumb_height),
                w: SCROLLBAR_WIDTH - 2.0,
                h: thumb_height,
            },
            with_alpha(COLOR_ACCENT, 0.4),
            2.0,
        ));
    }

    // ---- input plumbing ----

    /// Screen-space rects of every tiltable card at the current scroll
    fn tilt_card_rects(&self) -> Vec<(CardKey, RectPx)> {
        let scroll = self.scroll_offset;
        let mut out = Vec::new();
        let about = self.layout.section_content(SectionId::About);
        for (i, rect) in self
            .layout
            .grid(about, self.page.about_cards.len(), 3, 240.0, 24.0)
            .into_iter()
            .enumerate()
        {
            out.push((
                CardKey {
                    section: SectionId::About,
                    index: i,
                },
                rect.shifted(0.0, -scroll),
            ));
        }
        let features = self.layout.section_content(SectionId::Features);
        for (i, rect) in self
            .layout
            .grid(features, self.page.feature_cards.len(), 3, 170.0, 20.0)
            .into_iter()
            .enumerate()
        {
            out.push((
                CardKey {
                    section: SectionId::Features,
                    index: i,
                },
                rect.shifted(0.0, -scroll),
            ));
        }
        out
    }

    fn pill_screen_rects(&self) -> Vec<RectPx> {
        self.layout
            .tech_pill_rects(self.page.tech_pills.len())
            .into_iter()
            .map(|r| r.shifted(0.0, -self.scroll_offset))
            .collect()
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let max = self.layout.max_scroll();
        self.event_handler
            .handle_scroll(&mut self.scroll_offset, max, delta);
        self.window.request_redraw();
    }

    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let cards = self.tilt_card_rects();
        let pills = self.pill_screen_rects();
        let viewport = self.layout.viewport();
        let changes = self.event_handler.handle_cursor_moved(
            position,
            viewport,
            &cards,
            &pills,
            &mut self.tilt,
        );

        let t = self.started_at.elapsed().as_secs_f32();
        if let Some(i) = changes.pill_left {
            if let Some(hover) = self.pill_hover.get_mut(i) {
                hover.leave(t);
            }
        }
        if let Some(i) = changes.pill_entered {
            if let Some(hover) = self.pill_hover.get_mut(i) {
                hover.enter(t);
            }
        }

        self.control_bar
            .handle_mouse_move(position.x as f32, position.y as f32);

        self.window.request_redraw();
    }

    pub fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        let Some(position) = self.event_handler.cursor_position else {
            return;
        };
        let x = position.x as f32;
        let y = position.y as f32;

        // Nav links jump straight to their section.
        if button == MouseButton::Left && state == ElementState::Released {
            let entries: Vec<SectionId> = self.page.nav_entries().map(|(s, _)| s.id).collect();
            let rects = self.layout.nav_link_rects(entries.len());
            for (id, rect) in entries.into_iter().zip(rects.into_iter()) {
                if rect.contains(x, y) {
                    let (top, _) = self.layout.section_range(id);
                    self.scroll_offset = top.min(self.layout.max_scroll());
                    self.window.request_redraw();
                    return;
                }
            }
        }

        if self
            .control_bar
            .handle_pointer_event(button, state, x, y)
            .is_some()
        {
            self.window.request_redraw();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let shortcuts = self.app_config.keyboard_shortcuts.clone();
        let mapping = [
            (shortcuts.to_key_code(&shortcuts.toggle_mic), ControlKind::Mic),
            (shortcuts.to_key_code(&shortcuts.toggle_cam), ControlKind::Cam),
            (
                shortcuts.to_key_code(&shortcuts.toggle_screen),
                ControlKind::Screen,
            ),
            (shortcuts.to_key_code(&shortcuts.toggle_vr), ControlKind::Vr),
        ];
        for (key, kind) in mapping {
            if key == Some(code) {
                self.control_bar.toggle(kind);
                self.window.request_redraw();
                return;
            }
        }
    }

    pub fn is_exit_key(&self, code: KeyCode) -> bool {
        self.app_config
            .keyboard_shortcuts
            .to_key_code(&self.app_config.keyboard_shortcuts.exit_application)
            == Some(code)
    }

    pub fn quit(&mut self) {
        if let Some(running) = &self.running {
            running.store(false, Ordering::Relaxed);
        }
    }
}
