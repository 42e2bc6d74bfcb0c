// ABOUTME: Environment module for managing variable bindings and lexical scopes

use crate::value::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Object>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no outer scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates a new child environment extending `outer`.
    pub fn with_parent(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Binds `name` in THIS scope (doesn't walk the outer chain), overwriting
    /// any existing binding in place.
    pub fn define(&self, name: String, value: Object) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up `name` in this scope and, recursively, in outer scopes.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }
}
