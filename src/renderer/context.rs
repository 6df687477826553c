//! Scope stack used to resolve tag names during rendering

use std::ops::{Deref, DerefMut};

use crate::value::Value;

/// Stack of borrowed values, searched innermost first
///
/// The stack never owns what it holds: every frame borrows a value that
/// outlives the render call.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    frames: Vec<&'a Value>,
}

impl<'a> Context<'a> {
    /// Create a stack whose only frame is the render input
    pub fn new(root: &'a Value) -> Self {
        Self { frames: vec![root] }
    }

    /// Add an innermost frame
    pub fn push(&mut self, value: &'a Value) {
        self.frames.push(value);
    }

    /// Remove the innermost frame
    pub fn pop(&mut self) -> Option<&'a Value> {
        self.frames.pop()
    }

    /// Push `value` for as long as the returned guard lives
    pub fn scope(&mut self, value: &'a Value) -> Scope<'_, 'a> {
        self.push(value);
        Scope { context: self }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Find `name` in the innermost object frame that defines it
    ///
    /// Frames that are not objects are passed over.
    pub fn resolve(&self, name: &str) -> Option<&'a Value> {
        self.frames.iter().rev().copied().find_map(|frame| frame.get(name))
    }
}

/// A pushed frame that is popped again on drop, whichever way the
/// enclosing code exits
#[derive(Debug)]
pub struct Scope<'c, 'a> {
    context: &'c mut Context<'a>,
}

impl<'a> Deref for Scope<'_, 'a> {
    type Target = Context<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.context
    }
}

impl<'a> DerefMut for Scope<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.context
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.context.pop();
    }
}
