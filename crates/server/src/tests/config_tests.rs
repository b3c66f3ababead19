use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| pairs.get(key).cloned()
}

#[test]
fn defaults_serve_basquiat_catalog() {
    let settings = Settings::default();
    assert_eq!(settings.catalog_name, "basquiat");
    assert_eq!(settings.cache_control, DEFAULT_CACHE_CONTROL);
    assert_eq!(settings.public_url(), "http://127.0.0.1:8080");
}

#[test]
fn file_overrides_known_keys() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
        bind_addr = "0.0.0.0:9000"
        data_path = "/srv/art/data.json"
        catalog_name = "warhol"
        unrelated = "ignored"
        "#,
    );

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.data_path, PathBuf::from("/srv/art/data.json"));
    assert_eq!(settings.catalog_name, "warhol");
    assert_eq!(settings.cache_control, DEFAULT_CACHE_CONTROL);
}

#[test]
fn malformed_file_changes_nothing() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "bind_addr = [1, 2");
    assert_eq!(settings.server_bind, Settings::default().server_bind);
}

#[test]
fn app_prefixed_env_wins_over_short_form() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("ARTWORK_DATA_PATH", "./a.json"),
            ("APP__DATA_PATH", "./b.json"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.data_path, PathBuf::from("./b.json"));
}

#[test]
fn env_normalizes_catalog_name_and_public_url() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("APP__CATALOG_NAME", " /haring/ "),
            ("SERVER_PUBLIC_URL", "https://cards.example.org/"),
        ]),
    );
    assert_eq!(settings.catalog_name, "haring");
    assert_eq!(settings.public_url(), "https://cards.example.org");

    apply_env_overrides(&mut settings, lookup_from(&[("APP__CATALOG_NAME", "//")]));
    assert_eq!(settings.catalog_name, "haring");
}
