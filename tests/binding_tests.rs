//! Precedence tests for flag / env / config / default binding

use clap::Command;
use cmdkit::config::{init_flags, Binding, ConfigContext, Format, StringMap};
use similar_asserts::assert_eq;
use std::time::Duration;

/// One destination per supported kind, plus variants for each layer.
#[derive(Debug, Default, PartialEq)]
struct TargetVars {
    str_default: String,
    str_reader: String,
    str_env: String,
    str_flag: String,
    nested: String,
    number: i64,
    boolean: bool,
    single_key: StringMap,
    multi_keys: StringMap,
    single_key_json: StringMap,
    multi_keys_json: StringMap,
    str_list: Vec<String>,
    duration: Duration,
}

fn map(pairs: &[(&str, &str)]) -> StringMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn hms(h: u64, m: u64, s: u64) -> Duration {
    Duration::from_secs(h * 3600 + m * 60 + s)
}

fn bind(target: &mut TargetVars, ctx: &ConfigContext, args: &[&str]) {
    let bindings = vec![
        Binding::with_default("str-default", &mut target.str_default, "str_default".to_string())
            .usage("test string with default value"),
        Binding::with_default("str-reader", &mut target.str_reader, "str_reader_default".to_string())
            .usage("test string to be overridden by reader"),
        Binding::with_default("str-env", &mut target.str_env, "str_env_default".to_string())
            .usage("test string to be overridden by env variable"),
        Binding::with_default("str-flag", &mut target.str_flag, "str_flag_default".to_string())
            .usage("test string to be overridden by flag"),
        Binding::with_default("deep.nested.str", &mut target.nested, "nested_flag_default".to_string())
            .usage("test nested flag"),
        Binding::with_default("number", &mut target.number, 123).usage("test int flag"),
        Binding::with_default("boolean", &mut target.boolean, false).usage("test bool flag"),
        Binding::with_default("single-key", &mut target.single_key, map(&[("key", "default")]))
            .usage("test map flag with a single key-value"),
        Binding::with_default(
            "multi-keys",
            &mut target.multi_keys,
            map(&[("map.key1", "map.default1"), ("map.key2", "map.default2")]),
        )
        .usage("test map flag with multi key-values"),
        Binding::with_default(
            "single-key-json",
            &mut target.single_key_json,
            map(&[("key", "defaultJSON")]),
        )
        .usage("test map flag with a single key-value (in json format)"),
        Binding::with_default(
            "multi-keys-json",
            &mut target.multi_keys_json,
            map(&[("map.key1", "map.defaultJSON1"), ("map.key2", "map.defaultJSON2")]),
        )
        .usage("test map flag with multi key-values (in json format)"),
        Binding::with_default(
            "str-list",
            &mut target.str_list,
            list(&["list.default1", "list.default2", "list.default3"]),
        )
        .usage("test string slice flag"),
        Binding::with_default("duration", &mut target.duration, hms(1, 2, 3))
            .usage("test duration flag"),
    ];

    let argv = std::iter::once("app_test").chain(args.iter().copied());
    init_flags(ctx, Command::new("app_test"), bindings, argv).expect("init flags");
}

fn no_env() -> ConfigContext {
    ConfigContext::new("GL").with_env_vars(Vec::<(String, String)>::new())
}

fn defaults() -> TargetVars {
    TargetVars {
        str_default: "str_default".to_string(),
        str_reader: "str_reader_default".to_string(),
        str_env: "str_env_default".to_string(),
        str_flag: "str_flag_default".to_string(),
        nested: "nested_flag_default".to_string(),
        number: 123,
        boolean: false,
        single_key: map(&[("key", "default")]),
        multi_keys: map(&[("map.key1", "map.default1"), ("map.key2", "map.default2")]),
        single_key_json: map(&[("key", "defaultJSON")]),
        multi_keys_json: map(&[("map.key1", "map.defaultJSON1"), ("map.key2", "map.defaultJSON2")]),
        str_list: list(&["list.default1", "list.default2", "list.default3"]),
        duration: hms(1, 2, 3),
    }
}

#[test]
fn test_init_flags_defaults() {
    let mut target = TargetVars::default();
    bind(&mut target, &no_env(), &[]);

    assert_eq!(target, defaults());
}

#[test]
fn test_init_flags_config_source() {
    let yaml = r#"
str-reader: str_reader
deep:
  nested:
    str: nested_str_reader
number: 234
boolean: true
single-key:
  key: reader
single-key-json:
  key: readerJSON
multi-keys:
  map.key1: map.reader1
  map.key2: map.reader2
str-list:
  - list.reader1
  - list.reader2
  - list.reader3
duration: 2h3m4s
"#;
    let mut ctx = no_env();
    ctx.read_config(yaml.as_bytes(), Format::Yaml).expect("yaml config");

    let mut target = TargetVars::default();
    bind(&mut target, &ctx, &[]);

    let want = TargetVars {
        str_reader: "str_reader".to_string(),
        nested: "nested_str_reader".to_string(),
        number: 234,
        boolean: true,
        single_key: map(&[("key", "reader")]),
        multi_keys: map(&[("map.key1", "map.reader1"), ("map.key2", "map.reader2")]),
        single_key_json: map(&[("key", "readerJSON")]),
        str_list: list(&["list.reader1", "list.reader2", "list.reader3"]),
        duration: hms(2, 3, 4),
        ..defaults()
    };
    assert_eq!(target, want);
}

#[test]
fn test_init_flags_env() {
    let ctx = ConfigContext::new("GL").with_env_vars([
        ("GL_STR_ENV", "str_env"),
        ("GL_NUMBER", "345"),
        ("GL_BOOLEAN", "true"),
        ("GL_DEEP_NESTED_STR", "nested_str_env"),
        ("GL_SINGLE_KEY", "key=env"),
        ("GL_SINGLE_KEY_JSON", r#"{"key": "envJSON"}"#),
        ("GL_MULTI_KEYS", r#"{"map.key1": "map.env1", "map.key2": "map.env2"}"#),
        ("GL_MULTI_KEYS_JSON", r#"{"map.key1": "map.envJSON1", "map.key2": "map.envJSON2"}"#),
        ("GL_STR_LIST", r#""list.env1","list.env2","list.env3""#),
        ("GL_DURATION", "3h4m5s"),
    ]);

    let mut target = TargetVars::default();
    bind(&mut target, &ctx, &[]);

    let want = TargetVars {
        str_env: "str_env".to_string(),
        nested: "nested_str_env".to_string(),
        number: 345,
        boolean: true,
        single_key: map(&[("key", "env")]),
        multi_keys: map(&[("map.key1", "map.env1"), ("map.key2", "map.env2")]),
        single_key_json: map(&[("key", "envJSON")]),
        multi_keys_json: map(&[("map.key1", "map.envJSON1"), ("map.key2", "map.envJSON2")]),
        str_list: list(&["list.env1", "list.env2", "list.env3"]),
        duration: hms(3, 4, 5),
        ..defaults()
    };
    assert_eq!(target, want);
}

/// Config source and environment both set for every supported kind.
fn layered_ctx() -> ConfigContext {
    let yaml = r#"
str-reader: str_reader
deep:
  nested:
    str: nested_str_reader
number: 234
boolean: false
single-key:
  key: reader
single-key-json:
  key: readerJSON
multi-keys:
  map.key1: map.reader1
  map.key2: map.reader2
str-list:
  - list.reader1
  - list.reader2
duration: 2h3m4s
"#;
    let mut ctx = ConfigContext::new("GL").with_env_vars([
        ("GL_STR_READER", "str_env"),
        ("GL_DEEP_NESTED_STR", "nested_str_env"),
        ("GL_NUMBER", "345"),
        ("GL_BOOLEAN", "true"),
        ("GL_SINGLE_KEY", "key=env"),
        ("GL_SINGLE_KEY_JSON", r#"{"key": "envJSON"}"#),
        ("GL_MULTI_KEYS", "map.key1=map.env1,map.key2=map.env2"),
        ("GL_STR_LIST", r#"list.env1,"list,env2""#),
        ("GL_DURATION", "3h4m5s"),
    ]);
    ctx.read_config(yaml.as_bytes(), Format::Yaml).expect("yaml config");
    ctx
}

#[test]
fn test_init_flags_env_beats_config_source() {
    let mut target = TargetVars::default();
    bind(&mut target, &layered_ctx(), &[]);

    let want = TargetVars {
        str_reader: "str_env".to_string(),
        nested: "nested_str_env".to_string(),
        number: 345,
        boolean: true,
        single_key: map(&[("key", "env")]),
        multi_keys: map(&[("map.key1", "map.env1"), ("map.key2", "map.env2")]),
        single_key_json: map(&[("key", "envJSON")]),
        str_list: list(&["list.env1", "list,env2"]),
        duration: hms(3, 4, 5),
        ..defaults()
    };
    assert_eq!(target, want);
}

#[test]
fn test_init_flags_flags() {
    let mut target = TargetVars::default();
    bind(
        &mut target,
        &no_env(),
        &[
            "--str-flag=str_flag",
            "--deep.nested.str=nested_str_flag",
            "--number=456",
            "--boolean=true",
            "--single-key",
            "key=flag",
            "--single-key-json",
            "key=flagJSON",
            "--multi-keys",
            "map.key1=map.flag1",
            "--multi-keys",
            "map.key2=map.flag2",
            "--str-list=list.flag1",
            "--str-list=list.flag2",
            "--str-list=list.flag3",
            "--duration=4h5m6s",
        ],
    );

    let want = TargetVars {
        str_flag: "str_flag".to_string(),
        nested: "nested_str_flag".to_string(),
        number: 456,
        boolean: true,
        single_key: map(&[("key", "flag")]),
        multi_keys: map(&[("map.key1", "map.flag1"), ("map.key2", "map.flag2")]),
        single_key_json: map(&[("key", "flagJSON")]),
        str_list: list(&["list.flag1", "list.flag2", "list.flag3"]),
        duration: hms(4, 5, 6),
        ..defaults()
    };
    assert_eq!(target, want);
}

#[test]
fn test_init_flags_flag_beats_every_layer() {
    let mut target = TargetVars::default();
    bind(
        &mut target,
        &layered_ctx(),
        &[
            "--str-reader",
            "str_flag",
            "--deep.nested.str=nested_str_flag",
            "--number",
            "456",
            "--boolean=false",
            "--single-key",
            "key=flag",
            "--single-key-json",
            r#"{"key": "flagJSON"}"#,
            "--multi-keys",
            "map.key1=map.flag1",
            "--str-list",
            "z",
            "--duration=4h5m6s",
        ],
    );

    let want = TargetVars {
        str_reader: "str_flag".to_string(),
        nested: "nested_str_flag".to_string(),
        number: 456,
        boolean: false,
        single_key: map(&[("key", "flag")]),
        multi_keys: map(&[("map.key1", "map.flag1")]),
        single_key_json: map(&[("key", "flagJSON")]),
        str_list: list(&["z"]),
        duration: hms(4, 5, 6),
        ..defaults()
    };
    assert_eq!(target, want);
}

#[test]
fn test_init_flags_map_encodings() {
    struct Case {
        description: &'static str,
        args: &'static [&'static str],
        env: Option<(&'static str, &'static str)>,
        want: StringMap,
    }

    let cases = [
        Case {
            description: "flag with key=value format",
            args: &["--arg", "key1=val1", "--arg", "key2=val2"],
            env: None,
            want: map(&[("key1", "val1"), ("key2", "val2")]),
        },
        Case {
            description: "flag with json format",
            args: &["--arg", r#"{"key1": "val1", "key2": "val2"}"#],
            env: None,
            want: map(&[("key1", "val1"), ("key2", "val2")]),
        },
        Case {
            description: "env variable with json format",
            args: &[],
            env: Some(("GL_ARG", r#"{"key1": "val1", "key2": "val2"}"#)),
            want: map(&[("key1", "val1"), ("key2", "val2")]),
        },
        Case {
            description: "env variable with key=value format",
            args: &[],
            env: Some(("GL_ARG", "key1=val1")),
            want: map(&[("key1", "val1")]),
        },
    ];

    for case in cases {
        let ctx = ConfigContext::new("GL").with_env_vars(case.env);
        let mut target = StringMap::new();

        let argv = std::iter::once("app_test").chain(case.args.iter().copied());
        init_flags(
            &ctx,
            Command::new("app_test"),
            vec![Binding::with_default("arg", &mut target, StringMap::new())
                .usage("test map flag")],
            argv,
        )
        .unwrap_or_else(|e| panic!("{}: {e}", case.description));

        assert_eq!(target, case.want, "{}", case.description);
    }
}
