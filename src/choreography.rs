//! Entrance and scroll animation choreography.
//!
//! A fixed declarative table of tweens drives the page's entrance
//! effects: load-delayed hero reveals, scroll-armed section groups with
//! per-child stagger, one scrubbed tween bound to scroll position, a
//! one-shot emotion-bar fill, looping step-number floats and hover scale
//! tweens. Everything samples against injected elapsed time so the whole
//! timeline is testable without a real clock.

use std::f32::consts::PI;

use crate::page::SectionId;

/// Delay between the fill trigger firing and the bars starting to fill
pub const FILL_DELAY_SECS: f32 = 0.3;

/// Duration of the emotion-bar fill animation
pub const FILL_DURATION_SECS: f32 = 1.0;

/// Scale applied to a tech pill while hovered
pub const PILL_HOVER_SCALE: f32 = 1.08;

/// Duration of the pill hover scale tween
pub const PILL_HOVER_SECS: f32 = 0.2;

/// Peak upward drift of a floating step number, in pixels
pub const STEP_FLOAT_AMPLITUDE: f32 = 6.0;

/// Downward shift of the hero content at full scrub, in pixels
pub const SCRUB_MAX_SHIFT: f32 = 120.0;

/// Hero content opacity at full scrub
pub const SCRUB_MIN_OPACITY: f32 = 0.3;

pub fn power3_out(p: f32) -> f32 {
    let q = 1.0 - p.clamp(0.0, 1.0);
    1.0 - q * q * q
}

pub fn power1_out(p: f32) -> f32 {
    let q = 1.0 - p.clamp(0.0, 1.0);
    1.0 - q * q
}

pub fn sine_in_out(p: f32) -> f32 {
    (1.0 - (PI * p.clamp(0.0, 1.0)).cos()) / 2.0
}

/// Element group animated by one tween in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    HeroBadge,
    HeroTitle,
    HeroSubtitle,
    HeroButtons,
    HeroStats,
    ScrollIndicator,
    AboutCards,
    TimelineSteps,
    FeatureCards,
    DemoBrowser,
    SectionTitle(SectionId),
}

/// The visual state an element starts from before its tween completes
#[derive(Debug, Clone, Copy)]
pub struct StartState {
    pub opacity: f32,
    pub dx: f32,
    pub dy: f32,
    pub rot_x_deg: f32,
}

impl StartState {
    pub const fn fade() -> Self {
        Self {
            opacity: 0.0,
            dx: 0.0,
            dy: 0.0,
            rot_x_deg: 0.0,
        }
    }

    /// Start below the resting position and rise into place
    pub const fn rise(dy: f32) -> Self {
        Self {
            opacity: 0.0,
            dx: 0.0,
            dy,
            rot_x_deg: 0.0,
        }
    }

    /// Start beside the resting position and slide into place
    pub const fn slide(dx: f32) -> Self {
        Self {
            opacity: 0.0,
            dx,
            dy: 0.0,
            rot_x_deg: 0.0,
        }
    }
}

/// What arms a tween
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Armed at page load; the tween's delay counts from t = 0
    Load,
    /// Armed once when the section's top crosses the given viewport
    /// fraction
    SectionTop {
        section: SectionId,
        viewport_frac: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: StartState,
    pub trigger: Trigger,
    pub delay: f32,
    pub duration: f32,
    pub stagger: f32,
}

/// Current values to apply to an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub opacity: f32,
    pub dx: f32,
    pub dy: f32,
    pub rot_x_deg: f32,
}

impl TweenSample {
    pub const IDENTITY: TweenSample = TweenSample {
        opacity: 1.0,
        dx: 0.0,
        dy: 0.0,
        rot_x_deg: 0.0,
    };
}

pub struct Choreography {
    tweens: Vec<Tween>,
    armed: Vec<Option<f32>>,
}

impl Choreography {
    pub fn new(tweens: Vec<Tween>) -> Self {
        let armed = vec![None; tweens.len()];
        Self { tweens, armed }
    }

    /// The standard MetaMates timeline
    pub fn standard() -> Self {
        let mut tweens = vec![
            Tween {
                target: TweenTarget::HeroBadge,
                from: StartState::rise(30.0),
                trigger: Trigger::Load,
                delay: 0.3,
                duration: 0.8,
                stagger: 0.0,
            },
            Tween {
                target: TweenTarget::HeroTitle,
                from: StartState::rise(50.0),
                trigger: Trigger::Load,
                delay: 0.5,
                duration: 1.0,
                stagger: 0.0,
            },
            Tween {
                target: TweenTarget::HeroSubtitle,
                from: StartState::rise(30.0),
                trigger: Trigger::Load,
                delay: 0.9,
                duration: 0.8,
                stagger: 0.0,
            },
            Tween {
                target: TweenTarget::HeroButtons,
                from: StartState::rise(30.0),
                trigger: Trigger::Load,
                delay: 1.1,
                duration: 0.8,
                stagger: 0.0,
            },
            Tween {
                target: TweenTarget::HeroStats,
                from: StartState::rise(30.0),
                trigger: Trigger::Load,
                delay: 1.3,
                duration: 0.8,
                stagger: 0.0,
            },
            Tween {
                target: TweenTarget::ScrollIndicator,
                from: StartState::fade(),
                trigger: Trigger::Load,
                delay: 2.0,
                duration: 1.0,
                stagger: 0.0,
            },
            Tween {
                target: TweenTarget::AboutCards,
                from: StartState::rise(60.0),
                trigger: Trigger::SectionTop {
                    section: SectionId::About,
                    viewport_frac: 0.8,
                },
                delay: 0.0,
                duration: 0.8,
                stagger: 0.15,
            },
            Tween {
                target: TweenTarget::TimelineSteps,
                from: StartState::slide(-50.0),
                trigger: Trigger::SectionTop {
                    section: SectionId::Timeline,
                    viewport_frac: 0.75,
                },
                delay: 0.0,
                duration: 0.7,
                stagger: 0.2,
            },
            Tween {
                target: TweenTarget::FeatureCards,
                from: StartState::rise(50.0),
                trigger: Trigger::SectionTop {
                    section: SectionId::Features,
                    viewport_frac: 0.8,
                },
                delay: 0.0,
                duration: 0.8,
                stagger: 0.12,
            },
            Tween {
                target: TweenTarget::DemoBrowser,
                from: StartState {
                    opacity: 0.0,
                    dx: 0.0,
                    dy: 60.0,
                    rot_x_deg: 15.0,
                },
                trigger: Trigger::SectionTop {
                    section: SectionId::Demo,
                    viewport_frac: 0.8,
                },
                delay: 0.0,
                duration: 1.2,
                stagger: 0.0,
            },
        ];
        for id in [
            SectionId::About,
            SectionId::Timeline,
            SectionId::Features,
            SectionId::Demo,
        ] {
            tweens.push(Tween {
                target: TweenTarget::SectionTitle(id),
                from: StartState::rise(30.0),
                trigger: Trigger::SectionTop {
                    section: id,
                    viewport_frac: 0.85,
                },
                delay: 0.0,
                duration: 0.8,
                stagger: 0.0,
            });
        }
        Self::new(tweens)
    }

    /// Arm any tween whose trigger condition currently holds. Arming is
    /// one-way; a condition that later stops holding changes nothing.
    pub fn update<F>(&mut self, t: f32, mut trigger_hit: F)
    where
        F: FnMut(SectionId, f32) -> bool,
    {
        for (tween, armed) in self.tweens.iter().zip(self.armed.iter_mut()) {
            if armed.is_some() {
                continue;
            }
            match tween.trigger {
                Trigger::Load => *armed = Some(0.0),
                Trigger::SectionTop {
                    section,
                    viewport_frac,
                } => {
                    if trigger_hit(section, viewport_frac) {
                        *armed = Some(t);
                    }
                }
            }
        }
    }

    /// Sample the tween for `target` at time `t`. `child` selects the
    /// stagger slot within a group. Targets with no tween, and armed
    /// tweens that have run to completion, sample as identity.
    pub fn sample(&self, target: TweenTarget, child: usize, t: f32) -> TweenSample {
        let Some(i) = self.tweens.iter().position(|tw| tw.target == target) else {
            return TweenSample::IDENTITY;
        };
        let tween = &self.tweens[i];
        let from = tween.from;
        let eased = match self.armed[i] {
            None => 0.0,
            Some(t0) => {
                let local = t - t0 - tween.delay - tween.stagger * child as f32;
                power3_out(local / tween.duration)
            }
        };
        TweenSample {
            opacity: from.opacity + (1.0 - from.opacity) * eased,
            dx: from.dx * (1.0 - eased),
            dy: from.dy * (1.0 - eased),
            rot_x_deg: from.rot_x_deg * (1.0 - eased),
        }
    }
}

/// Hero content scrub: progress bound linearly to scroll position across
/// the hero section's height, not to time.
pub fn hero_scrub(scroll_y: f32, hero_height: f32) -> TweenSample {
    let p = if hero_height > 0.0 {
        (scroll_y / hero_height).clamp(0.0, 1.0)
    } else {
        0.0
    };
    TweenSample {
        opacity: 1.0 - (1.0 - SCRUB_MIN_OPACITY) * p,
        dx: 0.0,
        dy: SCRUB_MAX_SHIFT * p,
        rot_x_deg: 0.0,
    }
}

/// Vertical float offset of step number `index` at time `t`: an endless
/// sine in-out yoyo with per-element period and phase delay.
pub fn step_float_offset(index: usize, t: f32) -> f32 {
    let delay = 0.3 * index as f32;
    let duration = 1.5 + 0.2 * index as f32;
    if t <= delay {
        return 0.0;
    }
    let phase = (t - delay) / duration;
    let cycle = phase % 2.0;
    let p = if cycle > 1.0 { 2.0 - cycle } else { cycle };
    -STEP_FLOAT_AMPLITUDE * sine_in_out(p)
}

/// One-shot emotion-bar fill: on the first trigger the authored widths
/// are captured and forced to zero, then animated back after a short
/// delay. Never replays.
pub struct EmotionFill {
    targets: Vec<f32>,
    fired_at: Option<f32>,
}

impl EmotionFill {
    pub fn new(targets: Vec<f32>) -> Self {
        Self {
            targets,
            fired_at: None,
        }
    }

    pub fn update(&mut self, t: f32, triggered: bool) {
        if self.fired_at.is_none() && triggered {
            self.fired_at = Some(t);
        }
    }

    pub fn fired(&self) -> bool {
        self.fired_at.is_some()
    }

    /// Current fill percent of bar `index` at time `t`
    pub fn level(&self, index: usize, t: f32) -> f32 {
        let Some(&target) = self.targets.get(index) else {
            return 0.0;
        };
        match self.fired_at {
            None => target,
            Some(t0) => {
                let local = t - t0 - FILL_DELAY_SECS;
                if local <= 0.0 {
                    0.0
                } else {
                    target * power3_out(local / FILL_DURATION_SECS)
                }
            }
        }
    }
}

/// Hover scale tween for a tech pill
pub struct HoverScale {
    start: f32,
    target: f32,
    changed_at: f32,
}

impl HoverScale {
    pub fn new() -> Self {
        Self {
            start: 1.0,
            target: 1.0,
            changed_at: -PILL_HOVER_SECS,
        }
    }

    pub fn enter(&mut self, t: f32) {
        if self.target != PILL_HOVER_SCALE {
            self.start = self.value(t);
            self.target = PILL_HOVER_SCALE;
            self.changed_at = t;
        }
    }

    pub fn leave(&mut self, t: f32) {
        if self.target != 1.0 {
            self.start = self.value(t);
            self.target = 1.0;
            self.changed_at = t;
        }
    }

    pub fn value(&self, t: f32) -> f32 {
        let p = (t - self.changed_at) / PILL_HOVER_SECS;
        self.start + (self.target - self.start) * power1_out(p)
    }
}

impl Default for HoverScale {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: SectionId, _: f32) -> bool {
        false
    }

    #[test]
    fn load_tween_counts_from_page_load() {
        let mut chor = Choreography::standard();
        chor.update(0.0, never);

        // Hidden before its delay elapses.
        let early = chor.sample(TweenTarget::HeroTitle, 0, 0.4);
        assert_eq!(early.opacity, 0.0);
        assert_eq!(early.dy, 50.0);

        // Fully in place after delay + duration (0.5 + 1.0).
        let done = chor.sample(TweenTarget::HeroTitle, 0, 1.6);
        assert!((done.opacity - 1.0).abs() < 1e-6);
        assert!(done.dy.abs() < 1e-3);
    }

    #[test]
    fn scroll_tween_stays_hidden_until_armed() {
        let mut chor = Choreography::standard();
        chor.update(3.0, never);
        let s = chor.sample(TweenTarget::AboutCards, 0, 3.0);
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.dy, 60.0);

        // Trigger fires at t = 4.0.
        chor.update(4.0, |section, frac| {
            section == SectionId::About && (frac - 0.8).abs() < 1e-6
        });
        let done = chor.sample(TweenTarget::AboutCards, 0, 4.8);
        assert!((done.opacity - 1.0).abs() < 1e-6);

        // Arming is one-way.
        chor.update(5.0, never);
        let still = chor.sample(TweenTarget::AboutCards, 0, 5.0);
        assert!((still.opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn stagger_delays_later_children() {
        let mut chor = Choreography::standard();
        chor.update(1.0, |section, _| section == SectionId::About);

        // 0.4s in: child 0 is mid-tween, child 2 (stagger 0.15 * 2 = 0.3)
        // has barely started.
        let a = chor.sample(TweenTarget::AboutCards, 0, 1.4);
        let c = chor.sample(TweenTarget::AboutCards, 2, 1.4);
        assert!(a.opacity > c.opacity);
        assert!(a.dy < c.dy);
    }

    #[test]
    fn demo_browser_untilts_as_it_arrives() {
        let mut chor = Choreography::standard();
        chor.update(0.5, |section, _| section == SectionId::Demo);
        let start = chor.sample(TweenTarget::DemoBrowser, 0, 0.5);
        assert_eq!(start.rot_x_deg, 15.0);
        let done = chor.sample(TweenTarget::DemoBrowser, 0, 2.0);
        assert!(done.rot_x_deg.abs() < 1e-3);
    }

    #[test]
    fn scrub_follows_scroll_not_time() {
        let rest = hero_scrub(0.0, 800.0);
        assert_eq!(rest, TweenSample::IDENTITY);

        let mid = hero_scrub(400.0, 800.0);
        assert!((mid.dy - 60.0).abs() < 1e-3);
        assert!((mid.opacity - 0.65).abs() < 1e-3);

        let past = hero_scrub(5000.0, 800.0);
        assert!((past.dy - SCRUB_MAX_SHIFT).abs() < 1e-3);
        assert!((past.opacity - SCRUB_MIN_OPACITY).abs() < 1e-3);
    }

    #[test]
    fn fill_fires_exactly_once() {
        let mut fill = EmotionFill::new(vec![86.0, 72.0]);

        // Before the trigger the authored width stands.
        assert_eq!(fill.level(0, 0.0), 86.0);

        fill.update(2.0, true);
        // Forced to zero until the delay elapses.
        assert_eq!(fill.level(0, 2.0), 0.0);
        assert_eq!(fill.level(0, 2.29), 0.0);
        // Then eases back to the captured target.
        let mid = fill.level(0, 2.7);
        assert!(mid > 0.0 && mid < 86.0);
        assert!((fill.level(0, 4.0) - 86.0).abs() < 1e-3);

        // A second trigger must not replay the effect.
        fill.update(10.0, true);
        assert!((fill.level(0, 10.0) - 86.0).abs() < 1e-3);
    }

    #[test]
    fn step_float_is_bounded_and_phased() {
        for index in 0..4 {
            let delay = 0.3 * index as f32;
            assert_eq!(step_float_offset(index, delay * 0.5), 0.0);
            for k in 0..100 {
                let t = delay + k as f32 * 0.173;
                let y = step_float_offset(index, t);
                assert!(y <= 0.0 && y >= -STEP_FLOAT_AMPLITUDE, "index {index} t {t}");
            }
        }
        // Peak of the first element's yoyo sits one period in.
        let peak = step_float_offset(0, 1.5);
        assert!((peak + STEP_FLOAT_AMPLITUDE).abs() < 1e-3);
    }

    #[test]
    fn pill_hover_scales_up_and_back() {
        let mut hover = HoverScale::new();
        assert!((hover.value(0.0) - 1.0).abs() < 1e-6);

        hover.enter(1.0);
        assert!((hover.value(1.0 + PILL_HOVER_SECS) - PILL_HOVER_SCALE).abs() < 1e-4);

        hover.leave(2.0);
        assert!((hover.value(2.0 + PILL_HOVER_SECS) - 1.0).abs() < 1e-4);
    }
}
