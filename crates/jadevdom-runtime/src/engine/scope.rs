//! Lexical scope chain for evaluation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use super::value::Value;

/// Shared handle to one scope frame. Closures keep their defining frame alive.
#[derive(Clone)]
pub(crate) struct Scope(Rc<Frame>);

struct Frame {
    vars: RefCell<IndexMap<String, Value>>,
    parent: Option<Scope>,
}

impl Scope {
    /// The render-wide top scope, seeded with the locals.
    pub(crate) fn root(vars: IndexMap<String, Value>) -> Self {
        Scope(Rc::new(Frame {
            vars: RefCell::new(vars),
            parent: None,
        }))
    }

    pub(crate) fn child(&self) -> Self {
        Scope(Rc::new(Frame {
            vars: RefCell::new(IndexMap::new()),
            parent: Some(self.clone()),
        }))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Value> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.0.vars.borrow().get(name) {
                return Some(value.clone());
            }
            scope = current.0.parent.as_ref();
        }
        None
    }

    /// Bind `name` in this frame, shadowing outer bindings.
    pub(crate) fn define(&self, name: impl Into<String>, value: Value) {
        self.0.vars.borrow_mut().insert(name.into(), value);
    }

    /// Write the innermost frame that binds `name`, or the top scope when none does.
    pub(crate) fn assign(&self, name: &str, value: Value) {
        let mut current = self;
        loop {
            if current.0.vars.borrow().contains_key(name) {
                break;
            }
            match current.0.parent.as_ref() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current.define(name, value);
    }
}

/// Frames captured by closures during one render, held weakly.
#[derive(Default)]
pub(crate) struct CapturedFrames(Vec<Weak<Frame>>);

impl CapturedFrames {
    pub(crate) fn record(&mut self, scope: &Scope) {
        // Loop callbacks capture the same frame once per evaluation.
        if self
            .0
            .last()
            .is_some_and(|last| std::ptr::eq(last.as_ptr(), Rc::as_ptr(&scope.0)))
        {
            return;
        }
        self.0.push(Rc::downgrade(&scope.0));
    }

    /// Drop the bindings of every captured frame still alive.
    pub(crate) fn release(&mut self) {
        for frame in self.0.drain(..) {
            if let Some(frame) = frame.upgrade() {
                let vars = std::mem::take(&mut *frame.vars.borrow_mut());
                drop(vars);
            }
        }
    }
}

/// Weak handle that reports whether a frame has been freed.
#[cfg(test)]
pub(crate) struct FrameHandle(Weak<Frame>);

#[cfg(test)]
impl FrameHandle {
    pub(crate) fn of(scope: &Scope) -> Self {
        FrameHandle(Rc::downgrade(&scope.0))
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}
