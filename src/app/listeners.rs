//! Global interaction listeners.
//!
//! The registry plays the part of the window-wide listener table: the main
//! window's event hook forwards every press and key event to
//! [`ListenerRegistry::dispatch`], and only the listeners currently installed
//! get to see it. Listeners answer with a message instead of touching panel
//! state, so dispatching never re-enters the controller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::messages::PanelMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Escape,
    Other,
}

/// A global pointer press or key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Pointer(Point),
    Key(KeyPress),
}

impl Interaction {
    pub fn class(&self) -> ListenerClass {
        match self {
            Self::Pointer(_) => ListenerClass::Pointer,
            Self::Key(_) => ListenerClass::Key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerClass {
    Pointer,
    Key,
}

type Listener = Rc<dyn Fn(&Interaction) -> Option<PanelMessage>>;

struct Entry {
    id: u64,
    class: ListenerClass,
    listener: Listener,
}

#[derive(Default)]
struct RegistryState {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared table of installed listeners. Clones refer to the same table.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener; it stays installed until the handle is dropped.
    #[must_use = "the listener is removed as soon as the handle is dropped"]
    pub fn install<F>(&self, class: ListenerClass, listener: F) -> ListenerHandle
    where
        F: Fn(&Interaction) -> Option<PanelMessage> + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.entries.push(Entry {
            id,
            class,
            listener: Rc::new(listener),
        });
        tracing::debug!(id, ?class, "listener installed");
        ListenerHandle {
            id,
            class,
            registry: Rc::downgrade(&self.state),
        }
    }

    /// Number of listeners currently installed for `class`
    pub fn count(&self, class: ListenerClass) -> usize {
        self.state
            .borrow()
            .entries
            .iter()
            .filter(|e| e.class == class)
            .count()
    }

    /// Run every listener of the interaction's class and collect their messages.
    pub fn dispatch(&self, interaction: &Interaction) -> Vec<PanelMessage> {
        let class = interaction.class();
        // Snapshot first so listeners run without the table borrowed
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .entries
            .iter()
            .filter(|e| e.class == class)
            .map(|e| e.listener.clone())
            .collect();
        listeners
            .iter()
            .filter_map(|listener| listener(interaction))
            .collect()
    }
}

/// Keeps one listener installed; dropping it removes the listener.
pub struct ListenerHandle {
    id: u64,
    class: ListenerClass,
    registry: Weak<RefCell<RegistryState>>,
}

impl ListenerHandle {
    pub fn class(&self) -> ListenerClass {
        self.class
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(state) = self.registry.upgrade() {
            state.borrow_mut().entries.retain(|e| e.id != self.id);
            tracing::debug!(id = self.id, class = ?self.class, "listener removed");
        }
    }
}
