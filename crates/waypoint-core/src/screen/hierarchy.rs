//! Walking the presentation hierarchy.

use std::sync::Arc;

use super::{Container, ScreenRef};

/// Upper bound on hierarchy depth; a deeper walk means the UI layer reported
/// a cycle.
const MAX_DEPTH: usize = 128;

/// The screen directly in front of `screen`, if any: its presented modal,
/// selected tab, visible stack entry, first page, or first eligible child.
fn next_in_front(screen: &ScreenRef) -> Option<ScreenRef> {
    if let Some(presented) = screen.presented() {
        return Some(presented);
    }
    match screen.container() {
        Container::Tabs {
            selected: Some(selected),
        } => return Some(selected),
        Container::Stack {
            visible: Some(visible),
        } => return Some(visible),
        Container::Pages { pages } => {
            if let Some(first) = pages.into_iter().next() {
                return Some(first);
            }
        }
        _ => {}
    }
    screen.children().into_iter().next()
}

/// Follow [`next_in_front`] from `screen`. Returns the front-most screen and
/// the deepest stack container passed on the way (the front-most included).
fn walk_to_front(screen: &ScreenRef) -> (ScreenRef, Option<ScreenRef>) {
    let mut current = Arc::clone(screen);
    let mut stack = None;
    for _ in 0..MAX_DEPTH {
        if current.container().is_stack() {
            stack = Some(Arc::clone(&current));
        }
        match next_in_front(&current) {
            Some(next) => current = next,
            None => return (current, stack),
        }
    }
    tracing::warn!(
        depth = MAX_DEPTH,
        "presentation hierarchy too deep, stopping top-most walk"
    );
    (current, stack)
}

/// Screen currently in front when starting from `screen`.
pub fn top_most(screen: &ScreenRef) -> ScreenRef {
    walk_to_front(screen).0
}

/// Nearest navigation stack containing the foreground screen of `screen`
/// (the foreground screen itself included). Stacks on the way down from
/// `screen` win; otherwise the parents of the foreground screen are searched.
pub fn foreground_stack(screen: &ScreenRef) -> Option<ScreenRef> {
    let (front, stack) = walk_to_front(screen);
    if stack.is_some() {
        return stack;
    }
    let mut current = front.parent();
    for _ in 0..MAX_DEPTH {
        let candidate = current?;
        if candidate.container().is_stack() {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}
