//! The UI layer that actually changes what is on screen.

use crate::screen::ScreenRef;

/// Called on the UI thread once a presentation transition has finished.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Presentation primitives provided by the UI layer.
///
/// Every method is called on the UI thread only.
pub trait Presenter: Send + Sync {
    /// Root of the key window's hierarchy, if a window is up.
    fn root(&self) -> Option<ScreenRef>;

    /// Show `screen` the way `from` prefers (push inside a stack, present
    /// otherwise).
    fn show(&self, from: &ScreenRef, screen: ScreenRef);

    /// Show `screen` as the detail of `from`.
    fn show_detail(&self, from: &ScreenRef, screen: ScreenRef);

    /// Push `screen` onto the navigation stack `stack`.
    fn push(&self, stack: &ScreenRef, screen: ScreenRef, animated: bool);

    /// Present `screen` modally over `from`, then run `completion`.
    fn present(
        &self,
        from: &ScreenRef,
        screen: ScreenRef,
        animated: bool,
        completion: Option<Completion>,
    );
}
