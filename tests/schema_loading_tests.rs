/// Schema loading tests
///
/// The shipped JSON schema file and config-driven engine construction.
/// Run with: cargo test --test schema_loading_tests
use formdeck::schema::{registry_from_file, sample_schemas};
use formdeck::{FieldEdit, FormConfig, FormEngine, FormError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn shipped_schemas() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas/sample_forms.json")
}

#[test]
fn test_shipped_file_matches_builtin_samples() {
    let registry = registry_from_file(shipped_schemas()).unwrap();
    assert_eq!(registry.schemas(), sample_schemas().as_slice());
}

#[test]
fn test_engine_from_schema_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"[{"typeName":"Pet","fields":[
            {"name":"name","label":"Name","kind":"text","required":true},
            {"name":"species","label":"Species","kind":"singleChoice","options":["Cat","Dog"]}
        ]}]"#,
    )
    .unwrap();

    let config = FormConfig::new().schema_file(file.path());
    let mut engine = FormEngine::from_config(&config).unwrap();
    assert_eq!(engine.list_types(), vec!["Pet"]);

    engine.select("Pet");
    engine.apply_edit(FieldEdit::new("name", "Rex")).unwrap();
    let id = engine.submit().unwrap().id();
    assert_eq!(engine.store().get("Pet", id).unwrap().get("species"), None);
}

#[test]
fn test_engine_rejects_bad_config() {
    let config = FormConfig::new().notice_ttl(Duration::ZERO);
    assert!(matches!(
        FormEngine::from_config(&config),
        Err(FormError::Config(_))
    ));

    let config = FormConfig::new().schema_file("/no/such/forms.json");
    assert!(matches!(
        FormEngine::from_config(&config),
        Err(FormError::Io(_))
    ));
}
