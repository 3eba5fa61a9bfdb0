use cloudwiz_credentials::{
    Credential, CredentialError, CredentialManager, CredentialProvider, EnvProvider, FileProvider,
    StaticProvider, StorageKind,
};

#[test]
fn test_first_provider_with_an_answer_wins() {
    let manager = CredentialManager::default()
        .push(StaticProvider::new().with("staging", "stage-token"))
        .push(StaticProvider::new().with("default", "main-token").with("staging", "shadowed"));

    let resolved = manager.resolve("staging").unwrap();
    assert_eq!(resolved.credential.token(), "stage-token");
    assert_eq!(resolved.kind, StorageKind::Memory);
    assert!(!resolved.secure);

    assert_eq!(manager.resolve("default").unwrap().credential.token(), "main-token");
}

#[test]
fn test_not_found_lists_every_provider() {
    let dir = tempfile::tempdir().unwrap();
    let providers: Vec<Box<dyn CredentialProvider>> = vec![
        Box::new(EnvProvider::new("CLOUDWIZ_TEST_UNSET_TOKEN_1")),
        Box::new(FileProvider::new(dir.path().join("missing.toml"))),
    ];
    let manager = CredentialManager::new(providers);

    match manager.resolve("default") {
        Err(CredentialError::NotFound { profile, tried }) => {
            assert_eq!(profile, "default");
            assert_eq!(tried.len(), 2);
            assert_eq!(tried[0], "env:CLOUDWIZ_TEST_UNSET_TOKEN_1");
            assert!(tried[1].starts_with("file:"));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_environment_is_never_secure() {
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("CLOUDWIZ_TEST_ENV_TOKEN_2", "env-token") };
    let manager = CredentialManager::default().push(EnvProvider::new("CLOUDWIZ_TEST_ENV_TOKEN_2"));

    let resolved = manager.resolve("anything").unwrap();
    assert_eq!(resolved.credential.token(), "env-token");
    assert_eq!(resolved.kind, StorageKind::Environment);
    assert!(!resolved.secure);
}

#[test]
fn test_blank_environment_value_is_absent() {
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("CLOUDWIZ_TEST_BLANK_TOKEN_3", "  ") };
    let provider = EnvProvider::new("CLOUDWIZ_TEST_BLANK_TOKEN_3");
    assert!(provider.fetch("default").unwrap().is_none());
}

#[test]
fn test_stored_file_round_trips_and_is_secure() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileProvider::new(dir.path().join("creds.toml"));

    file.store("default", &Credential::new("one")).unwrap();
    file.store("ci", &Credential::new("two")).unwrap();

    assert_eq!(file.fetch("default").unwrap(), Some(Credential::new("one")));
    assert_eq!(file.fetch("ci").unwrap(), Some(Credential::new("two")));
    assert_eq!(file.fetch("prod").unwrap(), None);
    assert!(file.is_secure());
}

#[cfg(unix)]
#[test]
fn test_world_readable_file_is_insecure() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("creds.toml");
    std::fs::write(&path, "[profiles.default]\ntoken = \"abc\"\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let manager = CredentialManager::default().push(FileProvider::new(&path));
    let resolved = manager.resolve("default").unwrap();
    assert_eq!(resolved.credential.token(), "abc");
    assert!(!resolved.secure);
}

#[test]
fn test_malformed_file_stops_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("creds.toml");
    std::fs::write(&path, "profiles = 3").unwrap();

    let manager = CredentialManager::default()
        .push(FileProvider::new(&path))
        .push(StaticProvider::new().with("default", "fallback"));

    assert!(matches!(manager.resolve("default"), Err(CredentialError::Parse { .. })));
}
