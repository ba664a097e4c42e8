//! Performing navigation for a produced screen on the UI thread.
//!
//! The dispatcher never touches the UI from the calling thread. Each
//! operation captures its inputs, queues a job on the [`UiExecutor`] and
//! returns; the job works out the source screen or stack from the live
//! hierarchy at the time it runs.

mod presenter;
mod ui_thread;

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::screen::{foreground_stack, top_most, ContainerFactory, ScreenRef};

pub use presenter::{Completion, Presenter};
pub use ui_thread::{UiExecutor, UiJob, UiThread};

/// Inputs to a modal presentation.
#[derive(Default)]
pub struct PresentOptions {
    /// Screen to present over; the top-most screen when `None`.
    pub from: Option<ScreenRef>,
    /// Wraps the presented screen unless `from` is already a stack.
    pub wrap_in: Option<ContainerFactory>,
    /// `None` uses the dispatcher default.
    pub animated: Option<bool>,
    pub completion: Option<Completion>,
}

impl std::fmt::Debug for PresentOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentOptions")
            .field("from", &self.from)
            .field("wrap_in", &self.wrap_in.is_some())
            .field("animated", &self.animated)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

pub struct NavigationDispatcher {
    presenter: Arc<dyn Presenter>,
    ui: Arc<dyn UiExecutor>,
    default_animated: bool,
}

impl std::fmt::Debug for NavigationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationDispatcher")
            .field("default_animated", &self.default_animated)
            .finish_non_exhaustive()
    }
}

impl NavigationDispatcher {
    pub fn new(presenter: Arc<dyn Presenter>, ui: Arc<dyn UiExecutor>) -> Self {
        Self {
            presenter,
            ui,
            default_animated: true,
        }
    }

    pub fn with_config(
        presenter: Arc<dyn Presenter>,
        ui: Arc<dyn UiExecutor>,
        config: &RouterConfig,
    ) -> Self {
        Self {
            default_animated: config.default_animated,
            ..Self::new(presenter, ui)
        }
    }

    pub fn default_animated(&self) -> bool {
        self.default_animated
    }

    /// Show `screen` from `from`, or from the top-most screen.
    pub fn show(&self, screen: ScreenRef, from: Option<ScreenRef>) {
        let presenter = Arc::clone(&self.presenter);
        self.ui.dispatch(Box::new(move || {
            let Some(from) = from.or_else(|| front_screen(presenter.as_ref())) else {
                tracing::debug!("no screen to show from");
                return;
            };
            presenter.show(&from, screen);
        }));
    }

    /// Push `screen` onto `stack`, or onto the stack holding the foreground
    /// screen. Nothing happens when there is no such stack.
    pub fn push(&self, screen: ScreenRef, stack: Option<ScreenRef>, animated: Option<bool>) {
        let presenter = Arc::clone(&self.presenter);
        let animated = animated.unwrap_or(self.default_animated);
        self.ui.dispatch(Box::new(move || {
            let stack = stack.or_else(|| {
                presenter
                    .root()
                    .and_then(|root| foreground_stack(&root))
            });
            let Some(stack) = stack else {
                tracing::debug!("no navigation stack to push onto");
                return;
            };
            presenter.push(&stack, screen, animated);
        }));
    }

    pub fn present(&self, screen: ScreenRef, options: PresentOptions) {
        let presenter = Arc::clone(&self.presenter);
        let animated = options.animated.unwrap_or(self.default_animated);
        let PresentOptions {
            from,
            wrap_in,
            completion,
            ..
        } = options;
        self.ui.dispatch(Box::new(move || {
            let Some(from) = from.or_else(|| front_screen(presenter.as_ref())) else {
                tracing::debug!("no screen to present from");
                return;
            };
            let screen = wrap_unless_stack(&from, screen, wrap_in.as_ref());
            presenter.present(&from, screen, animated, completion);
        }));
    }

    pub fn show_detail(
        &self,
        screen: ScreenRef,
        from: Option<ScreenRef>,
        wrap_in: Option<ContainerFactory>,
    ) {
        let presenter = Arc::clone(&self.presenter);
        self.ui.dispatch(Box::new(move || {
            let Some(from) = from.or_else(|| front_screen(presenter.as_ref())) else {
                tracing::debug!("no screen to show detail from");
                return;
            };
            let screen = wrap_unless_stack(&from, screen, wrap_in.as_ref());
            presenter.show_detail(&from, screen);
        }));
    }
}

fn front_screen(presenter: &dyn Presenter) -> Option<ScreenRef> {
    presenter.root().map(|root| top_most(&root))
}

fn wrap_unless_stack(
    from: &ScreenRef,
    screen: ScreenRef,
    wrap_in: Option<&ContainerFactory>,
) -> ScreenRef {
    match wrap_in {
        Some(wrap) if !from.container().is_stack() => wrap(screen),
        _ => screen,
    }
}
