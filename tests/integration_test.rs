use merry_tree::{Config, ConfigError, Error, Key, Modifier, Node, NodeError, Value};
use serde_json::json;

#[test]
fn test_container_round_trip() {
    let input = json!({
        "name": "svc",
        "replicas": 3,
        "enabled": true,
        "limits": {"cpu": 0.5, "memory": "512Mi"},
        "tags": ["a", "b"],
        "plugins": []
    });
    assert_eq!(Node::from(input.clone()).to_flat(), input);
}

#[test]
fn test_container_set_array() {
    let mut object = Node::from(json!({"foo": "bar", "arr": [1, 2, 3]}));
    let foo = object["foo"].clone();
    object["foo"] = Value::from(vec![foo, Value::from("baz")]);
    object.child_mut("arr").unwrap().push(4);

    assert_eq!(object["foo"].as_node().unwrap().to_flat(), json!(["bar", "baz"]));
    assert_eq!(object["arr"].as_node().unwrap().to_flat(), json!([1, 2, 3, 4]));
    assert_eq!(
        object.to_flat(),
        json!({"foo": ["bar", "baz"], "arr": [1, 2, 3, 4]})
    );
}

#[test]
fn test_container_json_serialize() {
    let mut container = Node::vivifying();
    container["foo"] = "bar".into();
    container["bar"]["foo"] = "bar".into();

    let encoded: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&container).unwrap()).unwrap();
    assert_eq!(encoded, json!({"foo": "bar", "bar": {"foo": "bar"}}));
    assert_eq!(container.to_string(), r#"{"foo":"bar","bar":{"foo":"bar"}}"#);
}

#[test]
fn test_container_apply_and_iterate() {
    let mut object = Node::from(json!({
        "level1": {
            "level2": {"level3": "123"},
            "level2-1": {"level3-1": "321"}
        }
    }));
    let reverse = || {
        Modifier::function(|v: Value, _: &Key| {
            v.as_str().unwrap_or_default().chars().rev().collect::<String>()
        })
    };
    object.apply(Modifier::nested([(
        "level1",
        Modifier::nested([
            ("level2", Modifier::nested([("level3", reverse())])),
            ("level2-1", Modifier::nested([("level3-1", reverse())])),
        ]),
    )]));

    let leaves: Vec<String> = object
        .leaves()
        .map(|(k, v)| format!("{k}={}", v.as_str().unwrap()))
        .collect();
    assert_eq!(leaves, ["level3=321", "level3-1=123"]);
}

#[test]
fn test_config_sections_with_dotted_keys() {
    let raw = json!({
        "production": {
            "db.host": "db.internal",
            "db.port": 5432,
            "cache.ttl": 300
        },
        "staging : production": {"db.host": "db.staging"},
        "dev : staging": {"db.host": "localhost", "cache.ttl": 0}
    });

    let dev = Config::builder().with_section("dev").build(raw.clone()).unwrap();
    assert_eq!(
        dev.to_flat(),
        json!({"db": {"host": "localhost", "port": 5432}, "cache": {"ttl": 0}})
    );

    let staging = Config::builder().with_section("staging").build(raw).unwrap();
    assert_eq!(staging.get_path("db.host").unwrap(), "db.staging");
    assert_eq!(staging.get_path("cache.ttl").unwrap().as_i64(), Some(300));
}

#[test]
fn test_config_errors_convert_to_crate_error() {
    fn load(section: &str) -> Result<Node, Error> {
        let config = Config::builder()
            .with_section(section)
            .build(json!({"base": {"a": 1}}))?;
        config.get("a")?;
        Ok(config)
    }

    assert!(load("base").is_ok());
    assert!(matches!(
        load("other"),
        Err(Error::Config(ConfigError::SectionNotFound(_)))
    ));
}

#[test]
fn test_missing_key_error() {
    let config = Config::builder().build(json!({"a": 1})).unwrap();
    let err = config.get("b").unwrap_err();
    assert_eq!(err, NodeError::KeyNotFound(Key::from("b")));
    assert_eq!(err.to_string(), "key not found: b");
}
