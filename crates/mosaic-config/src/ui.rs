use serde::{Deserialize, Serialize};

fn default_render_on_update() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw the frame after every visible change
    #[serde(default = "default_render_on_update")]
    pub render_on_update: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            render_on_update: default_render_on_update(),
        }
    }
}
