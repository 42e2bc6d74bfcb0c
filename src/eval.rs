// ABOUTME: Tree-walking evaluator - executes a parsed program against an environment

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::builtins::lookup_builtin;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{HashKey, Object};
use std::rc::Rc;

fn err(e: EvalError) -> Object {
    Object::Error(e.to_string())
}

pub fn eval_program(program: &Program, env: Rc<Environment>) -> Object {
    let mut result = Object::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env.clone());
        match result {
            Object::ReturnValue(inner) => return *inner,
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block_statement(block: &BlockStatement, env: Rc<Environment>) -> Object {
    let mut result = Object::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env.clone());
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: Rc<Environment>) -> Object {
    match stmt {
        Statement::Let { name, value, .. } => {
            let val = eval_expression(value, env.clone());
            if val.is_error() {
                return val;
            }
            env.define(name.value.clone(), val);
            Object::Null
        }
        Statement::Return { return_value, .. } => {
            let val = eval_expression(return_value, env);
            if val.is_error() {
                return val;
            }
            Object::ReturnValue(Box::new(val))
        }
        Statement::While {
            condition, body, ..
        } => eval_while_statement(condition, body, env),
        Statement::Expression { expression, .. } => eval_expression(expression, env),
    }
}

fn eval_while_statement(
    condition: &Expression,
    body: &BlockStatement,
    env: Rc<Environment>,
) -> Object {
    loop {
        let cond = eval_expression(condition, env.clone());
        if cond.is_error() {
            return cond;
        }
        if !cond.is_truthy() {
            return Object::Null;
        }

        let result = eval_block_statement(body, env.clone());
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
}

fn eval_expression(expr: &Expression, env: Rc<Environment>) -> Object {
    match expr {
        Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
        Expression::StringLiteral { value, .. } => Object::String(value.clone()),
        Expression::Boolean { value, .. } => Object::Boolean(*value),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env.clone());
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Object::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env,
        },
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let func = eval_expression(function, env.clone());
            if func.is_error() {
                return func;
            }
            let args = eval_expressions(arguments, env);
            if args.len() == 1 && args[0].is_error() {
                return args.into_iter().next().unwrap();
            }
            apply_function(func, args)
        }
        Expression::ArrayLiteral { elements, .. } => {
            let elements = eval_expressions(elements, env);
            if elements.len() == 1 && elements[0].is_error() {
                return elements.into_iter().next().unwrap();
            }
            Object::Array(elements)
        }
        Expression::Index { left, index, .. } => {
            let left = eval_expression(left, env.clone());
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env),
    }
}

fn eval_expressions(exprs: &[Expression], env: Rc<Environment>) -> Vec<Object> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let evaluated = eval_expression(expr, env.clone());
        if evaluated.is_error() {
            return vec![evaluated];
        }
        result.push(evaluated);
    }
    result
}

fn eval_identifier(name: &str, env: Rc<Environment>) -> Object {
    if let Some(val) = env.get(name) {
        return val;
    }
    if let Some(builtin) = lookup_builtin(name) {
        return Object::Builtin(builtin);
    }
    err(EvalError::IdentifierNotFound(name.to_string()))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(i) => Object::Integer(-i),
            other => err(EvalError::unknown_prefix(operator, other.type_name())),
        },
        _ => err(EvalError::unknown_prefix(operator, right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            "==" => Object::Boolean(l == r),
            "!=" => Object::Boolean(l != r),
            _ => err(EvalError::unknown_infix(
                left.type_name(),
                operator,
                right.type_name(),
            )),
        },
        _ if left.type_name() != right.type_name() => err(EvalError::type_mismatch(
            left.type_name(),
            operator,
            right.type_name(),
        )),
        _ => err(EvalError::unknown_infix(
            left.type_name(),
            operator,
            right.type_name(),
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => {
            if right == 0 {
                err(EvalError::DivisionByZero)
            } else {
                Object::Integer(left / right)
            }
        }
        "%" => {
            if right == 0 {
                err(EvalError::DivisionByZero)
            } else {
                Object::Integer(left % right)
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => err(EvalError::unknown_infix("INTEGER", operator, "INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(format!("{}{}", left, right)),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => err(EvalError::unknown_infix("STRING", operator, "STRING")),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: Rc<Environment>,
) -> Object {
    let condition = eval_expression(condition, env.clone());
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block_statement(consequence, env)
    } else if let Some(alt) = alternative {
        eval_block_statement(alt, env)
    } else {
        Object::Null
    }
}

fn apply_function(func: Object, args: Vec<Object>) -> Object {
    match func {
        Object::Function {
            parameters, body, env,
        } => {
            // Argument-count mismatches are not validated, matching the
            // source language: extra arguments are ignored, missing ones
            // leave the corresponding parameter unbound.
            let call_env = Environment::with_parent(env);
            for (param, arg) in parameters.iter().zip(args) {
                call_env.define(param.value.clone(), arg);
            }
            let evaluated = eval_block_statement(&body, call_env);
            unwrap_return_value(evaluated)
        }
        Object::Builtin(func) => func(&args),
        other => err(EvalError::NotAFunction(other.type_name().to_string())),
    }
}

fn unwrap_return_value(obj: Object) -> Object {
    match obj {
        Object::ReturnValue(inner) => *inner,
        other => other,
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            eval_array_index_expression(elements, *i)
        }
        (Object::Hash(_), _) => eval_hash_index_expression(left, index),
        _ => err(EvalError::IndexNotSupported(left.type_name().to_string())),
    }
}

fn eval_array_index_expression(elements: &[Object], index: i64) -> Object {
    if index < 0 || index as usize >= elements.len() {
        return Object::Null;
    }
    elements[index as usize].clone()
}

fn eval_hash_index_expression(hash: Object, index: Object) -> Object {
    let key = match HashKey::from_object(&index) {
        Some(key) => key,
        None => return err(EvalError::UnusableHashKey(index.type_name().to_string())),
    };
    match hash {
        Object::Hash(pairs) => pairs
            .get(&key)
            .map(|(_, v)| v.clone())
            .unwrap_or(Object::Null),
        _ => unreachable!("caller guarantees a Hash"),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: Rc<Environment>) -> Object {
    let mut map = std::collections::HashMap::new();

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env.clone());
        if key.is_error() {
            return key;
        }

        let hash_key = match HashKey::from_object(&key) {
            Some(hash_key) => hash_key,
            None => return err(EvalError::UnusableHashKey(key.type_name().to_string())),
        };

        let value = eval_expression(value_expr, env.clone());
        if value.is_error() {
            return value;
        }

        map.insert(hash_key, (key, value));
    }

    Object::Hash(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval_source(input: &str) -> Object {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "parser errors: {:?}", errors);
        eval_program(&program, Environment::new())
    }

    #[test]
    fn test_integer_arithmetic() {
        let cases = vec![
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("50 / 2 * 2 + 10", 60),
            ("5 * (2 + 10)", 60),
            ("10 % 3", 1),
        ];
        for (input, expected) in cases {
            match eval_source(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("input {}: expected integer, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_boolean_expressions() {
        let cases = vec![
            ("true", true),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("true == true", true),
            ("(1 < 2) == true", true),
        ];
        for (input, expected) in cases {
            match eval_source(input) {
                Object::Boolean(b) => assert_eq!(b, expected, "input: {}", input),
                other => panic!("input {}: expected boolean, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_bang_operator() {
        let cases = vec![("!true", false), ("!false", true), ("!5", false), ("!!5", true)];
        for (input, expected) in cases {
            match eval_source(input) {
                Object::Boolean(b) => assert_eq!(b, expected, "input: {}", input),
                other => panic!("input {}: expected boolean, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_if_else_expressions() {
        assert!(matches!(eval_source("if (true) { 10 }"), Object::Integer(10)));
        assert!(matches!(eval_source("if (false) { 10 }"), Object::Null));
        assert!(matches!(eval_source("if (1 < 2) { 10 } else { 20 }"), Object::Integer(10)));
        assert!(matches!(eval_source("if (1 > 2) { 10 } else { 20 }"), Object::Integer(20)));
    }

    #[test]
    fn test_return_statements() {
        let cases = vec![
            ("return 10;", 10),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
        ];
        for (input, expected) in cases {
            match eval_source(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("input {}: expected integer, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_nested_return_propagates_through_if() {
        let input = "if (10 > 1) { if (10 > 1) { return 10; } return 1; }";
        assert!(matches!(eval_source(input), Object::Integer(10)));
    }

    #[test]
    fn test_while_loop_accumulates() {
        // while-bodies share the enclosing frame rather than pushing a new
        // one, so each `let a = a + i;` mutates the single outer binding.
        let input = "let a = 0; let i = 0; while (i < 5) { let a = a + i; let i = i + 1; } a;";
        assert!(matches!(eval_source(input), Object::Integer(10)));
    }

    #[test]
    fn test_while_loop_return_escapes() {
        let input = "let i = 0; while (true) { let i = i + 1; if (i == 3) { return i; } }";
        assert!(matches!(eval_source(input), Object::Integer(3)));
    }

    #[test]
    fn test_error_handling() {
        let cases = vec![
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            (r#""Hello" - "World""#, "unknown operator: STRING - STRING"),
        ];
        for (input, expected) in cases {
            match eval_source(input) {
                Object::Error(msg) => assert_eq!(msg, expected, "input: {}", input),
                other => panic!("input {}: expected error, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_let_statements() {
        let cases = vec![
            ("let a = 5; a;", 5),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ];
        for (input, expected) in cases {
            match eval_source(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("input {}: expected integer, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_function_application_and_closures() {
        assert!(matches!(
            eval_source("let identity = fn(x) { x; }; identity(5);"),
            Object::Integer(5)
        ));
        assert!(matches!(
            eval_source("let double = fn(x) { x * 2; }; double(5);"),
            Object::Integer(10)
        ));
        assert!(matches!(
            eval_source("let add = fn(x, y) { x + y; }; add(5, 5);"),
            Object::Integer(10)
        ));

        let closure = "\
            let newAdder = fn(x) { fn(y) { x + y }; };\n\
            let addTwo = newAdder(2);\n\
            addTwo(3);";
        assert!(matches!(eval_source(closure), Object::Integer(5)));
    }

    #[test]
    fn test_closure_captures_defining_env_not_caller_env() {
        let input = "\
            let x = 10;\n\
            let makeAdder = fn() { fn(y) { x + y } };\n\
            let addX = makeAdder();\n\
            let x = 1000;\n\
            addX(5);";
        assert!(matches!(eval_source(input), Object::Integer(15)));
    }

    #[test]
    fn test_string_literal_and_concatenation() {
        assert!(matches!(eval_source(r#""hello world""#), Object::String(s) if s == "hello world"));
        match eval_source(r#""Hello" + " " + "World!""#) {
            Object::String(s) => assert_eq!(s, "Hello World!"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_functions() {
        assert!(matches!(eval_source(r#"len("")"#), Object::Integer(0)));
        assert!(matches!(eval_source(r#"len("four")"#), Object::Integer(4)));
        match eval_source(r#"len(1)"#) {
            Object::Error(msg) => assert_eq!(msg, "argument to `len` not supported, got INTEGER"),
            other => panic!("expected error, got {:?}", other),
        }
        match eval_source(r#"len("one", "two")"#) {
            Object::Error(msg) => assert_eq!(msg, "wrong number of arguments. got=2, want=1"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_array_literals_and_indexing() {
        match eval_source("[1, 2 * 2, 3 + 3]") {
            Object::Array(elements) => {
                assert_eq!(elements.len(), 3);
                assert!(matches!(elements[0], Object::Integer(1)));
                assert!(matches!(elements[1], Object::Integer(4)));
                assert!(matches!(elements[2], Object::Integer(6)));
            }
            other => panic!("expected array, got {:?}", other),
        }

        assert!(matches!(eval_source("[1, 2, 3][0]"), Object::Integer(1)));
        assert!(matches!(eval_source("[1, 2, 3][2]"), Object::Integer(3)));
        assert!(matches!(eval_source("let i = 0; [1][i];"), Object::Integer(1)));
        assert!(matches!(eval_source("[1, 2, 3][3]"), Object::Null));
        assert!(matches!(eval_source("[1, 2, 3][-1]"), Object::Null));
    }

    #[test]
    fn test_hash_literal_with_unhashable_key_errors() {
        match eval_source("{fn(x) { x }: 1}") {
            Object::Error(msg) => assert_eq!(msg, "unusable as hash key: FUNCTION"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_hash_index_lookup() {
        let input = r#"let two = "two";
            {
                "one": 10 - 9,
                two: 1 + 1,
                "thr" + "ee": 6 / 2,
                4: 4,
                true: 5,
                false: 6
            }["one"]"#;
        assert!(matches!(eval_source(input), Object::Integer(1)));

        assert!(matches!(eval_source(r#"{"foo": 5}["bar"]"#), Object::Null));
        assert!(matches!(eval_source(r#"let key = "foo"; {"foo": 5}[key]"#), Object::Integer(5)));
        assert!(matches!(eval_source("{5: 5}[5]"), Object::Integer(5)));
        assert!(matches!(eval_source("{true: 5}[true]"), Object::Integer(5)));
        assert!(matches!(eval_source("{false: 5}[false]"), Object::Integer(5)));
    }
}
