//! Presenter that records every call and the thread it arrived on.

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use waypoint_core::dispatch::{Completion, Presenter};
use waypoint_core::screen::{downcast_screen, ScreenRef};

use super::screens::StackScreen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show,
    ShowDetail,
    Push { animated: bool },
    Present { animated: bool },
}

#[derive(Debug, Clone)]
pub struct Call {
    pub action: Action,
    pub from: String,
    pub screen: String,
    pub thread: ThreadId,
}

#[derive(Default)]
pub struct RecordingPresenter {
    root: Mutex<Option<ScreenRef>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingPresenter {
    pub fn with_root(root: ScreenRef) -> Arc<Self> {
        let presenter = Self::default();
        *presenter.root.lock().unwrap() = Some(root);
        Arc::new(presenter)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, action: Action, from: &ScreenRef, screen: &ScreenRef) {
        self.calls.lock().unwrap().push(Call {
            action,
            from: from.title().unwrap_or_default(),
            screen: screen.title().unwrap_or_default(),
            thread: thread::current().id(),
        });
    }
}

impl Presenter for RecordingPresenter {
    fn root(&self) -> Option<ScreenRef> {
        self.root.lock().unwrap().clone()
    }

    fn show(&self, from: &ScreenRef, screen: ScreenRef) {
        self.record(Action::Show, from, &screen);
    }

    fn show_detail(&self, from: &ScreenRef, screen: ScreenRef) {
        self.record(Action::ShowDetail, from, &screen);
    }

    fn push(&self, stack: &ScreenRef, screen: ScreenRef, animated: bool) {
        self.record(Action::Push { animated }, stack, &screen);
        if let Some(stack) = downcast_screen::<StackScreen>(stack) {
            stack.entries.lock().unwrap().push(screen);
        }
    }

    fn present(
        &self,
        from: &ScreenRef,
        screen: ScreenRef,
        animated: bool,
        completion: Option<Completion>,
    ) {
        self.record(Action::Present { animated }, from, &screen);
        if let Some(done) = completion {
            done();
        }
    }
}
