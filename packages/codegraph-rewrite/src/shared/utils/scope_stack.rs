//! Lexical scope stack
//!
//! Tracks nested block scopes during tree traversal. Inner scopes shadow
//! outer ones; lookups walk from the innermost frame outwards.

use rustc_hash::FxHashMap;

/// Stack of lexical binding frames
#[derive(Debug, Clone)]
pub struct ScopeStack<T> {
    frames: Vec<FxHashMap<String, T>>,
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScopeStack<T> {
    /// Create a stack with a single (outermost) frame
    pub fn new() -> Self {
        Self {
            frames: vec![FxHashMap::default()],
        }
    }

    /// Push a new frame
    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    /// Pop the current frame. The outermost frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind `name` in the current frame
    pub fn declare(&mut self, name: impl Into<String>, value: T) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), value);
        }
    }

    /// Resolve `name`, innermost frame first
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Current depth
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Every visible binding, inner frames shadowing outer ones
    pub fn flatten(&self) -> FxHashMap<String, T>
    where
        T: Clone,
    {
        let mut visible = FxHashMap::default();
        for frame in &self.frames {
            for (name, value) in frame {
                visible.insert(name.clone(), value.clone());
            }
        }
        visible
    }

    /// Execute a closure within a new frame
    pub fn with_scope<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.push();
        let result = f(self);
        self.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", 1);
        scopes.with_scope(|s| {
            s.declare("x", 2);
            assert_eq!(s.lookup("x"), Some(&2));
        });
        assert_eq!(scopes.lookup("x"), Some(&1));
    }

    #[test]
    fn test_outermost_frame_survives_pop() {
        let mut scopes: ScopeStack<u8> = ScopeStack::new();
        scopes.pop();
        scopes.pop();
        assert_eq!(scopes.depth(), 1);
        scopes.declare("y", 3);
        assert_eq!(scopes.lookup("y"), Some(&3));
        assert_eq!(scopes.lookup("z"), None);
    }

    #[test]
    fn test_flatten_prefers_inner_frames() {
        let mut scopes = ScopeStack::new();
        scopes.declare("a", 1);
        scopes.declare("b", 1);
        scopes.push();
        scopes.declare("a", 2);
        let visible = scopes.flatten();
        assert_eq!(visible.get("a"), Some(&2));
        assert_eq!(visible.get("b"), Some(&1));
    }
}
