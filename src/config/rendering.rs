#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireframeMode {
    /// Filled polygons for the whole run.
    Fill,
    /// Outlines only, set once before the first frame.
    Line,
    /// Alternate between fill and line every `period` frames, starting filled.
    Toggle { period: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    pub wireframe: WireframeMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            wireframe: WireframeMode::Fill,
        }
    }
}
