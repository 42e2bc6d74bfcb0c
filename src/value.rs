// ABOUTME: Runtime value types (the "Object" model) plus hashable-key identity

use crate::ast::{BlockStatement, Identifier};
use crate::env::Environment;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(u64),
}

impl HashKey {
    pub fn from_object(obj: &Object) -> Option<HashKey> {
        match obj {
            Object::Integer(i) => Some(HashKey::Integer(*i)),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            Object::String(s) => {
                let mut hasher = DefaultHasher::new();
                s.hash(&mut hasher);
                Some(HashKey::String(hasher.finish()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Vec<Object>),
    Hash(HashMap<HashKey, (Object, Object)>),
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        env: Rc<Environment>,
    },
    Builtin(fn(&[Object]) -> Object),
    ReturnValue(Box<Object>),
    Error(String),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function { .. } => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Truthiness rule: only FALSE and NULL are false (spec.md 4.3).
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// Rendering used by `puts` and as the value-inspection test oracle.
    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(i) => i.to_string(),
            Object::Boolean(b) => b.to_string(),
            Object::String(s) => s.clone(),
            Object::Null => "null".to_string(),
            Object::Array(items) => {
                let parts: Vec<String> = items.iter().map(|o| o.inspect()).collect();
                format!("[{}]", parts.join(", "))
            }
            Object::Hash(pairs) => {
                let parts: Vec<String> = pairs
                    .values()
                    .map(|(k, v)| format!("{}: {}", k.inspect(), v.inspect()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Object::Function {
                parameters, body, ..
            } => {
                let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(msg) => format!("ERROR: {}", msg),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}
