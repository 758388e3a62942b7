mod common;

use common::StorefrontTest;

#[test]
fn test_config_set_and_get() {
    let t = StorefrontTest::new();

    t.run_success(&["config", "set", "app.url", "https://shop.example.com/"]);
    let value = t.run_success(&["config", "get", "app.url"]);
    assert_eq!(value.trim(), "https://shop.example.com");

    t.run_success(&["config", "set", "page_size", "25"]);
    let config = t.read_config();
    assert!(config.contains("page_size: 25"));
}

#[test]
fn test_rating_color_set_and_get() {
    let t = StorefrontTest::new();

    let default = t.run_success(&["config", "get", "rating_colors.2"]);
    assert_eq!(default.trim(), "#f59e0b");

    t.run_success(&["config", "set", "rating_colors.2", "#112233"]);
    let value = t.run_success(&["config", "get", "rating_colors.2"]);
    assert_eq!(value.trim(), "#112233");

    let shown = t.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(json["rating_colors"]["2"], "#112233");

    let stderr = t.run_failure(&["config", "set", "rating_colors.7", "#112233"]);
    assert!(stderr.contains("expected 1-5"));
    let stderr = t.run_failure(&["config", "set", "rating_colors.2", "blue"]);
    assert!(stderr.contains("invalid color"));
}

#[test]
fn test_config_get_defaults() {
    let t = StorefrontTest::new();
    let api = t.run_success(&["config", "get", "api.url"]);
    assert_eq!(api.trim(), "http://localhost:5000/api");
    let token = t.run_success(&["config", "get", "auth.token"]);
    assert_eq!(token.trim(), "not configured");
}

#[test]
fn test_token_is_masked() {
    let t = StorefrontTest::new();
    let output = t.run_success(&["config", "set", "auth.token", "secret-token-1234"]);
    assert!(!output.contains("secret-token-1234"));

    let value = t.run_success(&["config", "get", "auth.token"]);
    assert!(value.contains("se...34"));
    assert!(!value.contains("secret-token-1234"));

    let shown = t.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(json["auth"]["token_configured"], true);
    assert!(!shown.contains("secret-token-1234"));
}

#[test]
fn test_env_overrides_config_file() {
    let t = StorefrontTest::new().with_env("STOREFRONT_API_URL", "https://api.example.com");
    t.run_success(&["config", "set", "api.url", "https://file.example.com"]);
    let value = t.run_success(&["config", "get", "api.url"]);
    assert_eq!(value.trim(), "https://api.example.com");
}

#[test]
fn test_invalid_keys_and_values() {
    let t = StorefrontTest::new();

    let stderr = t.run_failure(&["config", "set", "shop.name", "x"]);
    assert!(stderr.contains("unknown config key"));

    let stderr = t.run_failure(&["config", "get", "api_url"]);
    assert!(stderr.contains("api.url"));

    let stderr = t.run_failure(&["config", "set", "page_size", "0"]);
    assert!(stderr.contains("positive integer"));

    let stderr = t.run_failure(&["config", "set", "app.url", "not a url"]);
    assert!(stderr.contains("invalid URL"));
}

#[test]
fn test_config_show_json_defaults() {
    let t = StorefrontTest::new();
    let shown = t.run_success(&["config", "show", "--json"]);
    insta::assert_snapshot!(shown.trim(), @r#"
    {
      "api": {
        "url": "http://localhost:5000/api"
      },
      "app": {
        "url": "http://localhost:3000"
      },
      "auth": {
        "token_configured": false
      },
      "config_file": ".storefront/config.yaml",
      "page_size": 10,
      "rating_colors": {}
    }
    "#);
}
