use serde_json::{Value, json};
use tfunction::{ArgMap, Function, HandlerError, InvokeError};
use tschema::{Field, RecordType, ValueType};

fn args(value: Value) -> ArgMap {
    value.as_object().cloned().expect("arguments should be an object")
}

fn add() -> Function {
    Function::builder("add")
        .doc(
            "Returns the sum of two numbers.

            :param x: The first number
            :param y: The second number",
        )
        .param(Field::new("x", ValueType::Integer))
        .param(Field::new("y", ValueType::Integer))
        .returns(ValueType::Integer)
        .sync_handler(|args| {
            let x = args["x"].as_i64().unwrap_or_default();
            let y = args["y"].as_i64().unwrap_or_default();
            Ok(json!(x + y))
        })
        .build()
        .expect("descriptor should build")
}

#[tokio::test]
async fn invoke_round_trips_valid_arguments() {
    let result = add()
        .invoke(args(json!({"x": 1, "y": 2})))
        .await
        .expect("invocation should succeed");

    assert_eq!(result, json!(3));
}

#[tokio::test]
async fn invoke_rejects_mistyped_arguments_naming_the_field() {
    let error = add()
        .invoke(args(json!({"x": "a", "y": 2})))
        .await
        .expect_err("invocation should fail");

    match error {
        InvokeError::InvalidInput(validation) => assert!(validation.mentions("x")),
        other => panic!("expected input validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn invoke_rejects_unknown_and_missing_fields() {
    let error = add()
        .invoke(args(json!({"x": 1, "z": 3})))
        .await
        .expect_err("invocation should fail");

    match error {
        InvokeError::InvalidInput(validation) => {
            assert!(validation.mentions("y"));
            assert!(validation.mentions("z"));
        }
        other => panic!("expected input validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn handler_errors_propagate_verbatim() {
    let failing = Function::builder("broken")
        .description("Always fails")
        .sync_handler(|_| Err(HandlerError::new("tool exploded")))
        .build()
        .expect("descriptor should build");

    let error = failing
        .invoke(ArgMap::new())
        .await
        .expect_err("invocation should fail");

    assert_eq!(
        error,
        InvokeError::Handler(HandlerError::new("tool exploded"))
    );
}

#[tokio::test]
async fn async_and_sync_handlers_produce_the_same_result() {
    let sync_double = Function::builder("double")
        .description("Doubles a number")
        .param(Field::new("n", ValueType::Integer))
        .returns(ValueType::Integer)
        .sync_handler(|args| Ok(json!(args["n"].as_i64().unwrap_or_default() * 2)))
        .build()
        .expect("sync descriptor should build");

    let async_double = Function::builder("double")
        .description("Doubles a number")
        .param(Field::new("n", ValueType::Integer))
        .returns(ValueType::Integer)
        .handler(|args: ArgMap| async move {
            Ok(json!(args["n"].as_i64().unwrap_or_default() * 2))
        })
        .build()
        .expect("async descriptor should build");

    let from_sync = sync_double
        .invoke(args(json!({"n": 21})))
        .await
        .expect("sync invocation should succeed");
    let from_async = async_double
        .invoke(args(json!({"n": 21})))
        .await
        .expect("async invocation should succeed");

    assert_eq!(from_sync, from_async);
    assert_eq!(from_sync, json!(42));
}

#[tokio::test]
async fn output_is_validated_against_the_declared_shape() {
    let lying = Function::builder("lying")
        .description("Claims to return an integer")
        .returns(ValueType::Integer)
        .sync_handler(|_| Ok(json!("not a number")))
        .build()
        .expect("descriptor should build");

    let error = lying
        .invoke(ArgMap::new())
        .await
        .expect_err("output validation should fail");

    match error {
        InvokeError::InvalidOutput(validation) => assert!(validation.mentions("root")),
        other => panic!("expected output validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn record_returns_round_trip_through_verbatim_output() {
    let record = RecordType::builder("Forecast")
        .field(Field::new("summary", ValueType::String))
        .field(Field::new("high", ValueType::Integer))
        .build()
        .expect("record should build");

    let forecast = Function::builder("forecast")
        .description("Reports the weather")
        .returns_record(record)
        .sync_handler(|_| Ok(json!({"summary": "clear", "high": 23})))
        .build()
        .expect("descriptor should build");

    let result = forecast
        .invoke(ArgMap::new())
        .await
        .expect("invocation should succeed");
    assert_eq!(result, json!({"summary": "clear", "high": 23}));

    let wrong = Function::builder("forecast")
        .description("Reports the weather")
        .returns_record(
            RecordType::builder("Forecast")
                .field(Field::new("summary", ValueType::String))
                .build()
                .expect("record should build"),
        )
        .sync_handler(|_| Ok(json!(17)))
        .build()
        .expect("descriptor should build");

    let error = wrong
        .invoke(ArgMap::new())
        .await
        .expect_err("non-record output should fail");
    assert!(matches!(error, InvokeError::InvalidOutput(_)));
}
