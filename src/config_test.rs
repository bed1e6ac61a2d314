use super::*;

const VARS: [&str; 4] = ["PORT", "SITE_SEED_PATH", "DEFAULT_DARK_MODE", "EDIT_MODE"];

unsafe fn clear_server_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn port_defaults_and_rejects_garbage() {
    assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
    assert_eq!(parse_port(Some("  ")).unwrap(), DEFAULT_PORT);
    assert_eq!(parse_port(Some("8080")).unwrap(), 8080);
    let err = parse_port(Some("eighty")).unwrap_err();
    assert_eq!(err.to_string(), "invalid PORT: eighty");
}

#[test]
fn bool_accepts_common_spellings() {
    for raw in ["1", "true", "TRUE", "yes", "on"] {
        assert!(parse_bool("EDIT_MODE", Some(raw)).unwrap(), "{raw}");
    }
    for raw in ["0", "false", "no", "off", ""] {
        assert!(!parse_bool("EDIT_MODE", Some(raw)).unwrap(), "{raw}");
    }
    assert!(!parse_bool("EDIT_MODE", None).unwrap());
    assert!(parse_bool("EDIT_MODE", Some("maybe")).is_err());
}

// Touches process env; run with --test-threads=1 if other tests read these vars.
#[test]
fn from_env_reads_all_settings() {
    unsafe { clear_server_env() };
    assert_eq!(ServerConfig::from_env().unwrap(), ServerConfig::default());

    unsafe {
        std::env::set_var("PORT", "4100");
        std::env::set_var("SITE_SEED_PATH", "/etc/skysite/site.yaml");
        std::env::set_var("DEFAULT_DARK_MODE", "true");
        std::env::set_var("EDIT_MODE", "1");
    }
    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 4100);
    assert_eq!(cfg.seed_path, Some(PathBuf::from("/etc/skysite/site.yaml")));
    assert!(cfg.default_dark_mode);
    assert!(cfg.edit_mode);

    unsafe { std::env::set_var("EDIT_MODE", "sometimes") };
    assert!(ServerConfig::from_env().is_err());

    unsafe { clear_server_env() };
}
