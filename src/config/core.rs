/// Window and context settings shared by every program.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL core-profile version as (major, minor).
    pub gl_version: (u8, u8),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL",
            width: 1000,
            height: 800,
            gl_version: (4, 6),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }
}
