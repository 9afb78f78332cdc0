use anyhow::Result;
use dflow::config::{ConfigStore, MergeMode, CONFIG_FILE_NAME, CWD_OVERRIDE_ENV};
use dflow::core::init::{build_config, InitAnswers};
use dflow::error::DflowError;
use serial_test::serial;
use tempfile::TempDir;

fn answers() -> InitAnswers {
    InitAnswers {
        main: "master".into(),
        develop: "dev".into(),
        uat: "staging".into(),
        default_merge_mode: MergeMode::Auto,
        exceptions: vec!["master".into()],
        push: false,
    }
}

#[test]
#[serial]
fn test_discover_honours_override() -> Result<()> {
    let dir = TempDir::new()?;
    std::env::set_var(CWD_OVERRIDE_ENV, dir.path());
    let store = ConfigStore::discover();
    std::env::remove_var(CWD_OVERRIDE_ENV);

    let store = store?;
    assert_eq!(store.dir(), dir.path());
    assert_eq!(store.path(), dir.path().join(CONFIG_FILE_NAME));
    Ok(())
}

#[test]
#[serial]
fn test_discover_defaults_to_current_dir() -> Result<()> {
    std::env::remove_var(CWD_OVERRIDE_ENV);
    let store = ConfigStore::discover()?;
    assert_eq!(store.dir(), std::env::current_dir()?);
    Ok(())
}

#[test]
#[serial]
fn test_empty_override_is_ignored() -> Result<()> {
    std::env::set_var(CWD_OVERRIDE_ENV, "");
    let store = ConfigStore::discover();
    std::env::remove_var(CWD_OVERRIDE_ENV);

    assert_eq!(store?.dir(), std::env::current_dir()?);
    Ok(())
}

#[test]
fn test_missing_file_is_not_initialized() -> Result<()> {
    let dir = TempDir::new()?;
    let store = ConfigStore::new(dir.path());
    assert!(!store.exists());
    assert!(matches!(
        store.load(),
        Err(DflowError::NotInitialized { .. })
    ));
    Ok(())
}

#[test]
fn test_init_config_survives_save_and_load() -> Result<()> {
    let dir = TempDir::new()?;
    let store = ConfigStore::new(dir.path());
    let config = build_config(&answers());

    store.save(&config)?;
    assert!(store.exists());
    assert_eq!(store.load()?, config);

    let text = std::fs::read_to_string(store.path())?;
    assert!(text.starts_with("\n#"));
    assert!(text.contains("autogenerated by 'dflow init'"));
    assert!(text.contains("bugfix_base: dev"));
    assert!(text.contains("master: manual"));
    Ok(())
}

#[test]
fn test_save_replaces_whole_document() -> Result<()> {
    let dir = TempDir::new()?;
    let store = ConfigStore::new(dir.path());
    std::fs::write(store.path(), "branches:\n  main: trunk\nextra: kept?\n")?;

    let config = build_config(&answers());
    store.save(&config)?;

    let text = std::fs::read_to_string(store.path())?;
    assert!(!text.contains("trunk"));
    assert!(!text.contains("extra"));
    // No temp files are left behind next to the config.
    let leftovers = std::fs::read_dir(dir.path())?.count();
    assert_eq!(leftovers, 1);
    Ok(())
}

#[test]
fn test_malformed_yaml_is_a_parse_error() -> Result<()> {
    let dir = TempDir::new()?;
    let store = ConfigStore::new(dir.path());
    std::fs::write(store.path(), "branches: [unclosed\n")?;
    match store.load() {
        Err(DflowError::Parse { path, .. }) => assert_eq!(path, store.path()),
        other => panic!("expected parse error, got {other:?}"),
    }
    Ok(())
}
