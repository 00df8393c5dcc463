use scout::config::Config;
use scout::test_utils::fixtures::UnitTestFixture;
use scout::test_utils::{TestCase, run_table_tests};

#[test]
fn config_sections_from_toml() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "empty file keeps defaults",
            input: "",
            expected: (10usize, true, 10.0f64, 0usize),
        },
        TestCase {
            name: "search section",
            input: "[search]\ndefault_limit = 3\nparallel = false\n",
            expected: (3, false, 10.0, 0),
        },
        TestCase {
            name: "weights are partial",
            input: "[search.weights]\nexact = 12.5\n",
            expected: (10, true, 12.5, 0),
        },
        TestCase {
            name: "custom categories",
            input: "[[categories]]\nlabel = \"gardening\"\nkeywords = [\"plant\", \"soil\"]\n\n[[categories]]\nlabel = \"cooking\"\nkeywords = [\"recipe\"]\n",
            expected: (10, true, 10.0, 2),
        },
    ];

    run_table_tests(cases, |raw| {
        let config: Config = toml::from_str(raw).expect("parse config");
        (
            config.search.default_limit,
            config.search.parallel,
            config.search.weights.exact,
            config.categories.len(),
        )
    })
}

#[test]
fn explicit_config_file_is_loaded() {
    let fixture = UnitTestFixture::new();
    let path = fixture.create_file(
        "scout.toml",
        "[data]\ndir = \"snapshots\"\n\n[search.weights]\nstar_boost = 0.5\n",
    );

    let config = Config::load(Some(path.as_path()), &fixture.data_path).unwrap();
    assert_eq!(
        config.data_dir(&fixture.data_path),
        fixture.data_path.join("snapshots")
    );
    assert!((config.search.weights.star_boost - 0.5).abs() < f64::EPSILON);
}

#[test]
fn invalid_weights_are_rejected() {
    let fixture = UnitTestFixture::new();
    let path = fixture.create_file("scout.toml", "[search.weights]\npartial = -1.0\n");
    let err = Config::load(Some(path.as_path()), &fixture.data_path).unwrap_err();
    assert_eq!(err.code(), "config_error");
}

#[test]
fn configured_categories_replace_builtin_table() {
    let config: Config =
        toml::from_str("[[categories]]\nlabel = \"gardening\"\nkeywords = [\"Plant\"]\n").unwrap();
    let table = config.category_table().unwrap();
    assert_eq!(table.labels(), vec!["gardening"]);
    assert!(!table.contains_label("trading"));
}
