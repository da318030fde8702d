use serde::{Deserialize, Serialize};

/// A stack of items sitting in an inventory or container slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifying category, used for stack matching (e.g., "wood")
    pub kind: String,

    /// Stack size, always at least 1
    pub count: u32,

    /// Equipped items are never stashed
    #[serde(default)]
    pub equipped: bool,
}

impl Item {
    pub fn new(kind: impl Into<String>, count: u32) -> Self {
        Self {
            kind: kind.into(),
            count,
            equipped: false,
        }
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }

    /// Get display text for listings
    pub fn display_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.kind, self.count)
        } else {
            self.kind.clone()
        }
    }
}
