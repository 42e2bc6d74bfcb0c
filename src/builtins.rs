// ABOUTME: Built-in functions exposed by name to the evaluator's identifier lookup

use crate::error::EvalError;
use crate::value::Object;

/// Looks up a builtin by name, returning the function pointer the evaluator
/// wraps in `Object::Builtin` and later invokes via `apply_function`.
pub fn lookup_builtin(name: &str) -> Option<fn(&[Object]) -> Object> {
    match name {
        "len" => Some(builtin_len),
        "first" => Some(builtin_first),
        "last" => Some(builtin_last),
        "rest" => Some(builtin_rest),
        "push" => Some(builtin_push),
        "puts" => Some(builtin_puts),
        _ => None,
    }
}

fn to_error(e: EvalError) -> Object {
    Object::Error(e.to_string())
}

fn builtin_len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return to_error(EvalError::arity(args.len(), "1"));
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(items) => Object::Integer(items.len() as i64),
        other => to_error(EvalError::argument_not_supported("len", other.type_name())),
    }
}

fn builtin_first(args: &[Object]) -> Object {
    if args.len() != 1 {
        return to_error(EvalError::arity(args.len(), "1"));
    }
    match &args[0] {
        Object::Array(items) => items.first().cloned().unwrap_or(Object::Null),
        other => to_error(EvalError::argument_not_supported(
            "first",
            other.type_name(),
        )),
    }
}

fn builtin_last(args: &[Object]) -> Object {
    if args.len() != 1 {
        return to_error(EvalError::arity(args.len(), "1"));
    }
    match &args[0] {
        Object::Array(items) => items.last().cloned().unwrap_or(Object::Null),
        other => to_error(EvalError::argument_not_supported(
            "last",
            other.type_name(),
        )),
    }
}

fn builtin_rest(args: &[Object]) -> Object {
    if args.len() != 1 {
        return to_error(EvalError::arity(args.len(), "1"));
    }
    match &args[0] {
        Object::Array(items) => {
            if items.is_empty() {
                Object::Null
            } else {
                Object::Array(items[1..].to_vec())
            }
        }
        other => to_error(EvalError::argument_not_supported(
            "rest",
            other.type_name(),
        )),
    }
}

fn builtin_push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return to_error(EvalError::arity(args.len(), "2"));
    }
    match &args[0] {
        Object::Array(items) => {
            let mut new_items = items.clone();
            new_items.push(args[1].clone());
            Object::Array(new_items)
        }
        other => to_error(EvalError::argument_not_supported(
            "push",
            other.type_name(),
        )),
    }
}

fn builtin_puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg.inspect());
        log::debug!(target: "monkey::puts", "{}", arg.inspect());
    }
    Object::Null
}
