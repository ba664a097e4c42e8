//! Minimal screens: a titled leaf and a navigation stack.

use std::any::Any;
use std::sync::{Arc, Mutex};

use waypoint_core::screen::{Container, Screen, ScreenRef};

pub struct TitledScreen {
    pub title: String,
}

impl TitledScreen {
    pub fn new(title: impl Into<String>) -> ScreenRef {
        Arc::new(Self {
            title: title.into(),
        })
    }
}

impl Screen for TitledScreen {
    fn title(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Stack whose visible entry is the last one pushed.
pub struct StackScreen {
    pub title: String,
    pub entries: Mutex<Vec<ScreenRef>>,
}

impl StackScreen {
    pub fn new(title: impl Into<String>, entries: Vec<ScreenRef>) -> Arc<Self> {
        Arc::new(Self {
            title: title.into(),
            entries: Mutex::new(entries),
        })
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.title().unwrap_or_default())
            .collect()
    }
}

impl Screen for StackScreen {
    fn title(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn container(&self) -> Container {
        Container::Stack {
            visible: self.entries.lock().unwrap().last().cloned(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wraps a screen in a fresh stack; usable as a `ContainerFactory`.
pub fn wrap_in_stack(screen: ScreenRef) -> ScreenRef {
    let title = format!("nav({})", screen.title().unwrap_or_default());
    StackScreen::new(title, vec![screen])
}
