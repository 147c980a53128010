use serde_urlquery::{query, serialize, Number, QueryMap, QueryValue, SerializeOptions};

#[test]
fn test_query_macro_null() {
    let value = query!(null);
    assert_eq!(value, QueryValue::Null);
}

#[test]
fn test_query_macro_booleans() {
    assert_eq!(query!(true), QueryValue::Bool(true));
    assert_eq!(query!(false), QueryValue::Bool(false));
}

#[test]
fn test_query_macro_numbers() {
    assert_eq!(query!(42), QueryValue::Number(Number::Integer(42)));
    assert_eq!(query!(3.5), QueryValue::Number(Number::Float(3.5)));
    assert_eq!(query!(-123), QueryValue::Number(Number::Integer(-123)));
}

#[test]
fn test_query_macro_strings() {
    assert_eq!(
        query!("hello world"),
        QueryValue::String("hello world".to_string())
    );
    assert_eq!(query!(""), QueryValue::String(String::new()));
}

#[test]
fn test_query_macro_arrays() {
    assert_eq!(query!([]), QueryValue::Array(vec![]));
    assert_eq!(
        query!(["a", 1, true, null]),
        QueryValue::Array(vec![
            QueryValue::String("a".to_string()),
            QueryValue::Number(Number::Integer(1)),
            QueryValue::Bool(true),
            QueryValue::Null,
        ])
    );
}

#[test]
fn test_query_macro_objects() {
    assert_eq!(query!({}), QueryValue::Object(QueryMap::new()));

    let object = query!({
        "q": "rust",
        "page": 2
    });

    match object {
        QueryValue::Object(ref obj) => {
            assert_eq!(obj.len(), 2);
            assert_eq!(obj.get("q"), Some(&QueryValue::String("rust".to_string())));
            assert_eq!(obj.get("page"), Some(&QueryValue::Number(Number::Integer(2))));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_query_macro_keeps_key_order() {
    let object = query!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<_> = object.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_query_macro_expressions() {
    let page = 7u32;
    assert_eq!(query!(page), QueryValue::Number(Number::Integer(7)));

    let tags = vec!["x", "y"];
    assert_eq!(query!(tags), query!(["x", "y"]));
}

#[test]
fn test_query_macro_serializes() {
    let filter = query!({
        "filter": {
            "status": ["open", "closed"],
            "owner": "sam"
        },
        "sort": null
    });

    assert_eq!(
        serialize(&filter, &SerializeOptions::new()),
        "filter[status][]=open&filter[status][]=closed&filter[owner]=sam&sort="
    );
}

#[test]
fn test_query_value_methods() {
    let null_val = query!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());

    let bool_val = query!(true);
    assert!(bool_val.is_bool());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = query!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = query!([1, 2, 3]);
    assert!(array_val.is_array());
    assert_eq!(array_val.as_array().unwrap().len(), 3);

    let obj_val = query!({"key": "value"});
    assert!(obj_val.is_object());
    assert_eq!(obj_val.as_object().unwrap().len(), 1);
}

#[test]
fn test_query_value_display() {
    assert_eq!(query!(null).to_string(), "");
    assert_eq!(query!(["a", null, 1]).to_string(), "a,,1");
    assert_eq!(query!({ "a": 1 }).to_string(), "[object Object]");
    assert_eq!(query!(2.5).to_string(), "2.5");
}
