use numtower_runtime::*;

fn argument() -> NumberValue {
    NumberValue::matrix(2, 2, vec![4.into(), 7.into(), 2.into(), 6.into()])
}

fn check_unary(name: &str, direct: fn(NumberValue) -> NumberValue) {
    let by_name = call_builtin(name, vec![argument()]).unwrap();
    assert_eq!(by_name, direct(argument()), "{name}");
}

fn check_binary(name: &str, direct: fn(NumberValue, NumberValue) -> NumberValue) {
    let by_name = call_builtin(name, vec![argument(), NumberValue::Integer(3)]).unwrap();
    assert_eq!(by_name, direct(argument(), NumberValue::Integer(3)), "{name}");
}

#[test]
fn call_registered_builtin() {
    let result = call_builtin("add", vec![NumberValue::Integer(2), NumberValue::Integer(3)]).unwrap();
    assert!(matches!(result, NumberValue::Integer(5)));
}

#[test]
fn named_calls_match_direct_calls() {
    check_unary("sqrt", sqrt);
    check_unary("cos", cos);
    check_unary("asinh", asinh);
    check_unary("acoth", acoth);
    check_unary("factorial", factorial);
    check_unary("not", not);
    check_unary("transpose", transpose);
    check_unary("det", det);
    check_unary("rref", rref);
    check_unary("inv", inverse);

    check_binary("mul", mul);
    check_binary("pow", pow);
    check_binary("xor", xor);
    check_binary("root", root);
    check_binary("log", log);
    check_binary("shl", shl);
    check_binary("div", div);
}

#[test]
fn registry_lists_every_module() {
    let names: Vec<&str> = builtins().into_iter().map(|b| b.name).collect();
    for name in [
        "add", "neg", "pow", "ln", "factorial", "asinh", "csch", "xor", "not", "det", "adj",
        "rank", "rref", "trace",
    ] {
        assert!(names.contains(&name), "missing builtin {name}");
    }
    assert_eq!(find_builtin("pow").map(|b| b.function.arity()), Some(2));
    assert_eq!(find_builtin("trace").map(|b| b.function.arity()), Some(1));
}

#[test]
fn unknown_builtin_is_an_error() {
    assert_eq!(
        call_builtin("frobnicate", vec![]),
        Err(RuntimeError::UnknownBuiltin("frobnicate".to_string()))
    );
}

#[test]
fn arity_is_checked() {
    match call_builtin("sin", vec![NumberValue::Integer(1), NumberValue::Integer(2)]) {
        Err(RuntimeError::ArityMismatch {
            name,
            expected,
            actual,
        }) => {
            assert_eq!(name, "sin");
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("expected arity error, got {other:?}"),
    }
}
