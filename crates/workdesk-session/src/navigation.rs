//! Folder navigation state machine.
//!
//! Classic browser-history semantics: entering a folder pushes the previous
//! one onto the back stack and clears the forward stack; back/forward swap
//! between the stacks. A folder value lives in exactly one of
//! {current, back stack, forward stack} at any instant.

use workdesk_entity::Folder;

/// Navigation state for the open project.
#[derive(Debug, Default)]
pub struct NavigationState {
    current: Option<Folder>,
    back_stack: Vec<Folder>,
    forward_stack: Vec<Folder>,
}

impl NavigationState {
    /// Create a fresh state at project root.
    pub fn new() -> Self {
        Self::default()
    }

    /// The folder currently being viewed (None = project root).
    pub fn current(&self) -> Option<&Folder> {
        self.current.as_ref()
    }

    /// Whether `go_back` would do anything.
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    /// Whether `go_forward` would do anything.
    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Enter a folder. The previous location becomes back-history and any
    /// forward-history is discarded.
    pub fn select_folder(&mut self, folder: Folder) {
        if let Some(previous) = self.current.take() {
            self.back_stack.push(previous);
        }
        self.current = Some(folder);
        self.forward_stack.clear();
    }

    /// Step back one folder. No-op when the back stack is empty.
    pub fn go_back(&mut self) {
        let Some(previous) = self.back_stack.pop() else {
            return;
        };
        if let Some(current) = self.current.take() {
            self.forward_stack.push(current);
        }
        self.current = Some(previous);
    }

    /// Step forward one folder. No-op when the forward stack is empty.
    pub fn go_forward(&mut self) {
        let Some(next) = self.forward_stack.pop() else {
            return;
        };
        if let Some(current) = self.current.take() {
            self.back_stack.push(current);
        }
        self.current = Some(next);
    }

    /// Return to project root and clear both stacks.
    pub fn go_home(&mut self) {
        self.current = None;
        self.back_stack.clear();
        self.forward_stack.clear();
    }

    /// Drop history entries (and the current folder) that no longer pass
    /// the filter. Called after a refresh when folders may have vanished
    /// server-side.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Folder) -> bool,
    {
        if self.current.as_ref().is_some_and(|f| !keep(f)) {
            self.current = None;
        }
        self.back_stack.retain(|f| keep(f));
        self.forward_stack.retain(|f| keep(f));
    }
}
