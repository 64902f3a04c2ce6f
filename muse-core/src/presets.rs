//! Canned example prompts
//!
//! Four fixed prompts the console offers as quick examples. Applying one
//! overwrites the prompt field; nothing else about the form changes.

/// A canned prompt selectable from the console menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Stable identifier used on the command line.
    pub id: &'static str,
    /// Menu title.
    pub title: &'static str,
    /// One-line menu description.
    pub summary: &'static str,
    /// Text written into the prompt field.
    pub prompt: &'static str,
}

/// Every preset offered by the console, in menu order
pub const PRESETS: [Preset; 4] = [
    Preset {
        id: "vfx-workflow",
        title: "VFX Workflow",
        summary: "Learn about visual effects pipeline",
        prompt: "Explain VFX pipeline workflow in simple terms",
    },
    Preset {
        id: "creative-brief",
        title: "Creative Brief",
        summary: "Generate project ideas",
        prompt: "Generate a creative brief for a sci-fi movie project",
    },
    Preset {
        id: "timeline-analysis",
        title: "Timeline Analysis",
        summary: "Optimize project schedules",
        prompt: "Analyze this project timeline and suggest optimizations",
    },
    Preset {
        id: "documentation",
        title: "Documentation",
        summary: "Create technical standards",
        prompt: "Write technical documentation for 3D asset creation standards",
    },
];

/// Look up a preset by its id
pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Look up a preset by 1-based menu position
pub fn nth(index: usize) -> Option<&'static Preset> {
    index.checked_sub(1).and_then(|i| PRESETS.get(i))
}
