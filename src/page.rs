//! Typed page content model.
//!
//! This is the equivalent of the page markup: every other module queries
//! the model for the elements it cares about. An empty collection simply
//! means the dependent effect never appears.

/// Identifier for a top-level page section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Timeline,
    Features,
    Demo,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Timeline,
        SectionId::Features,
        SectionId::Demo,
    ];
}

/// A top-level page section with its anchor and heading copy
#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    pub anchor: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Label shown in the nav bar; sections without one have no nav link
    pub nav_label: Option<&'static str>,
}

/// A content card (about cards and feature cards share the shape)
#[derive(Debug, Clone)]
pub struct Card {
    pub title: &'static str,
    pub body: &'static str,
}

/// A numbered step in the how-it-works timeline
#[derive(Debug, Clone)]
pub struct TimelineStep {
    pub number: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// An avatar placeholder in the demo stage
#[derive(Debug, Clone)]
pub struct AvatarPod {
    pub name: &'static str,
    pub role: &'static str,
}

/// An emotion meter in the demo stage; `target_pct` is the authored fill
#[derive(Debug, Clone)]
pub struct EmotionBar {
    pub label: &'static str,
    pub target_pct: f32,
}

/// A headline statistic shown under the hero copy
#[derive(Debug, Clone)]
pub struct HeroStat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct PageModel {
    pub brand: &'static str,
    pub sections: Vec<Section>,
    pub hero_badge: &'static str,
    pub hero_subtitle: &'static str,
    pub hero_buttons: Vec<&'static str>,
    pub hero_stats: Vec<HeroStat>,
    pub about_cards: Vec<Card>,
    pub timeline_steps: Vec<TimelineStep>,
    pub feature_cards: Vec<Card>,
    pub avatar_pods: Vec<AvatarPod>,
    pub emotion_bars: Vec<EmotionBar>,
    pub tech_pills: Vec<&'static str>,
}

impl PageModel {
    /// The standard MetaMates landing page content
    pub fn standard() -> Self {
        Self {
            brand: "MetaMates",
            sections: vec![
                Section {
                    id: SectionId::Hero,
                    anchor: "hero",
                    title: "Meet Beyond Reality",
                    subtitle: "Spatial presence for distributed teams",
                    nav_label: None,
                },
                Section {
                    id: SectionId::About,
                    anchor: "about",
                    title: "Why MetaMates",
                    subtitle: "Presence, not screens",
                    nav_label: Some("About"),
                },
                Section {
                    id: SectionId::Timeline,
                    anchor: "how",
                    title: "How It Works",
                    subtitle: "From handshake to hologram",
                    nav_label: Some("How It Works"),
                },
                Section {
                    id: SectionId::Features,
                    anchor: "features",
                    title: "Features",
                    subtitle: "Built for embodied collaboration",
                    nav_label: Some("Features"),
                },
                Section {
                    id: SectionId::Demo,
                    anchor: "demo",
                    title: "Live Demo",
                    subtitle: "A session in progress",
                    nav_label: Some("Demo"),
                },
            ],
            hero_badge: "IEEE Research Prototype 2026",
            hero_subtitle: "Photoreal avatars, spatial audio and verifiable \
                            sessions in one shared room.",
            hero_buttons: vec!["Enter the Room", "Read the Paper"],
            hero_stats: vec![
                HeroStat { value: "12K", label: "sessions hosted" },
                HeroStat { value: "38ms", label: "median latency" },
                HeroStat { value: "99.2%", label: "proof uptime" },
            ],
            about_cards: vec![
                Card {
                    title: "Embodied Presence",
                    body: "Expressive avatars track voice and gesture so a \
                           meeting feels like a room, not a grid of tiles.",
                },
                Card {
                    title: "Spatial Audio",
                    body: "Voices are placed in space. Turn toward a speaker \
                           and the mix follows, just like standing together.",
                },
                Card {
                    title: "Verified Sessions",
                    body: "Every exchange is sealed into a lightweight event \
                           chain that anyone in the room can audit.",
                },
            ],
            timeline_steps: vec![
                TimelineStep {
                    number: "01",
                    title: "Create a room",
                    body: "Spin up a persistent space with one link.",
                },
                TimelineStep {
                    number: "02",
                    title: "Invite your mates",
                    body: "Avatars join from desktop, mobile or headset.",
                },
                TimelineStep {
                    number: "03",
                    title: "Meet in space",
                    body: "Talk, sketch and share with spatial presence.",
                },
                TimelineStep {
                    number: "04",
                    title: "Seal the session",
                    body: "Key moments are signed into the session chain.",
                },
            ],
            feature_cards: vec![
                Card {
                    title: "Photoreal Avatars",
                    body: "Neural rendering drives skin, hair and light.",
                },
                Card {
                    title: "Gesture Mirroring",
                    body: "Hands and posture stream at frame rate.",
                },
                Card {
                    title: "Live Translation",
                    body: "Speak your language; mates hear theirs.",
                },
                Card {
                    title: "Shared Whiteboard",
                    body: "Sketches float in the room for everyone.",
                },
                Card {
                    title: "Session Chain",
                    body: "Tamper-evident log of decisions and files.",
                },
                Card {
                    title: "Headset Optional",
                    body: "Full experience from a plain laptop screen.",
                },
            ],
            avatar_pods: vec![
                AvatarPod { name: "Aya", role: "Host" },
                AvatarPod { name: "Marcus", role: "Design" },
                AvatarPod { name: "Ines", role: "Research" },
                AvatarPod { name: "Kenji", role: "Engineering" },
            ],
            emotion_bars: vec![
                EmotionBar { label: "Engagement", target_pct: 86.0 },
                EmotionBar { label: "Focus", target_pct: 72.0 },
                EmotionBar { label: "Energy", target_pct: 64.0 },
            ],
            tech_pills: vec![
                "WebRTC", "Neural Codec", "Spatial DSP", "zk-Attest", "Rust Core",
            ],
        }
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Sections that carry a nav link, in page order
    pub fn nav_entries(&self) -> impl Iterator<Item = (&Section, &'static str)> {
        self.sections
            .iter()
            .filter_map(|s| s.nav_label.map(|label| (s, label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_page_has_all_sections_in_order() {
        let page = PageModel::standard();
        let ids: Vec<SectionId> = page.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, SectionId::ALL);
    }

    #[test]
    fn hero_has_no_nav_link() {
        let page = PageModel::standard();
        assert!(page.section(SectionId::Hero).unwrap().nav_label.is_none());
        assert_eq!(page.nav_entries().count(), 4);
    }

    #[test]
    fn demo_stage_is_populated() {
        let page = PageModel::standard();
        assert_eq!(page.avatar_pods.len(), 4);
        assert!(!page.emotion_bars.is_empty());
        assert!(page.emotion_bars.iter().all(|b| b.target_pct <= 100.0));
    }
}
