//! Screens as seen by the router.
//!
//! A screen is an opaque presentable unit owned by the UI layer. The router
//! only needs enough of its shape to find where a new screen should go: the
//! modal it currently presents, whether it is a tab/stack/page container, its
//! eligible children, and its parent.

mod hierarchy;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use hierarchy::{foreground_stack, top_most};

/// Shared handle to a screen.
pub type ScreenRef = Arc<dyn Screen>;

/// Wraps a screen in a new stack container (for `present`/`show_detail`).
pub type ContainerFactory = Arc<dyn Fn(ScreenRef) -> ScreenRef + Send + Sync>;

/// Container role a screen plays in the presentation hierarchy.
#[derive(Clone, Default)]
pub enum Container {
    /// Plain content screen.
    #[default]
    Leaf,
    /// Tab container; `selected` is the tab currently shown.
    Tabs { selected: Option<ScreenRef> },
    /// Navigation stack; `visible` is the entry currently shown.
    Stack { visible: Option<ScreenRef> },
    /// Paged container; pages in display order.
    Pages { pages: Vec<ScreenRef> },
}

impl Container {
    pub fn is_stack(&self) -> bool {
        matches!(self, Container::Stack { .. })
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Leaf => f.write_str("Leaf"),
            Container::Tabs { selected } => f
                .debug_struct("Tabs")
                .field("selected", &selected.as_ref().map(|s| s.title()))
                .finish(),
            Container::Stack { visible } => f
                .debug_struct("Stack")
                .field("visible", &visible.as_ref().map(|s| s.title()))
                .finish(),
            Container::Pages { pages } => f
                .debug_struct("Pages")
                .field("count", &pages.len())
                .finish(),
        }
    }
}

/// A presentable unit produced by a screen provider.
///
/// Only [`Screen::as_any`] is required; the defaults describe a parentless
/// leaf with nothing presented.
pub trait Screen: Send + Sync + 'static {
    fn title(&self) -> Option<String> {
        None
    }

    fn container(&self) -> Container {
        Container::Leaf
    }

    /// Modal screen this one currently presents.
    fn presented(&self) -> Option<ScreenRef> {
        None
    }

    /// Child screens eligible for display, in order.
    fn children(&self) -> Vec<ScreenRef> {
        Vec::new()
    }

    /// Containing screen (stack, tabs, pages or plain parent).
    fn parent(&self) -> Option<ScreenRef> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("title", &self.title())
            .field("container", &self.container())
            .finish()
    }
}

/// Whether two handles point at the same screen.
pub fn same_screen(a: &ScreenRef, b: &ScreenRef) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Downcast a screen handle to its concrete type.
pub fn downcast_screen<T: Screen>(screen: &ScreenRef) -> Option<&T> {
    screen.as_any().downcast_ref::<T>()
}
