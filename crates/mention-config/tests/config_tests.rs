//! Tests for option merging and settings resolution

use mention_config::{Error, MentionConfig, MentionSettings, ResolvedConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

mod settings_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_parse_with_defaults_table() {
        let toml_content = r##"
[defaults]
character = "#"
rules = "{2,30}"

[pools.tags]
route = "/tags/"
"##;

        let settings = MentionSettings::parse(toml_content).expect("Should parse valid TOML");
        let options = settings.options(&json!({ "pool": "tags" })).unwrap();

        assert_eq!(options.character, "#");
        assert_eq!(options.rules, "{2,30}");
        assert_eq!(options.pool, "tags");
    }

    #[test]
    fn test_settings_parse_rejects_invalid_toml() {
        let result = MentionSettings::parse("[pools.users\nroute = 1");
        assert!(matches!(result, Err(Error::TomlDe(_))));
    }

    #[test]
    fn test_settings_defaults_with_bad_type_fail_on_resolve() {
        let settings = MentionSettings::parse(
            r#"
[defaults]
mention = "sometimes"

[pools.users]
route = "/u/"
"#,
        )
        .unwrap();

        let result = settings.resolve(&Value::Null);
        assert!(matches!(result, Err(Error::InvalidOverrides { .. })));
    }
}

mod resolution_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> MentionSettings {
        MentionSettings::new().with_pool("users", "/users/profile/")
    }

    #[rstest]
    #[case(json!({}), "hey @admin", Some("@admin"))]
    #[case(json!({ "character": "#" }), "hey #admin", Some("#admin"))]
    #[case(json!({ "character": "#" }), "hey @admin", None)]
    #[case(json!({ "character": "+" }), "hey +admin", Some("+admin"))]
    #[case(json!({ "pattern": "[a-z_]" }), "hey @snake_case", Some("@snake_case"))]
    #[case(json!({ "rules": "{1,3}" }), "hey @abc", Some("@abc"))]
    fn test_scanner_follows_options(
        #[case] overrides: Value,
        #[case] input: &str,
        #[case] expected: Option<&str>,
    ) {
        let resolved = settings().resolve(&overrides).unwrap();
        let token = resolved
            .scanner()
            .find(input)
            .map(|m| m.as_str().trim().to_string());

        assert_eq!(token.as_deref(), expected);
    }

    #[test]
    fn test_resolved_config_is_built_from_merged_options() {
        let options = MentionConfig::with_overrides(&json!({ "notify": false })).unwrap();
        let resolved = ResolvedConfig::new(options.clone(), &settings()).unwrap();

        assert_eq!(resolved.options(), &options);
        assert_eq!(resolved.trigger(), '@');
    }

    #[test]
    fn test_config_errors_mention_offending_value() {
        let err = MentionConfig::with_overrides(&json!({ "character": "ab" })).unwrap_err();
        let display = err.to_string();

        assert!(
            display.contains("\"ab\""),
            "Error display should contain the character, got: {}",
            display
        );
    }
}
