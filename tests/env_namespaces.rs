//! Integration tests for configuration loading across the three
//! environment namespaces.
//!
//! Most tests use a mocked environment; the `process_env` section touches
//! the real process environment and runs serially.

use drone_helm::config::{CoerceError, Config, ConfigError};
use drone_helm::env::Env;
use drone_helm::output::{Output, SharedBuffer};
use drone_helm::run;
use pretty_assertions::assert_eq;

fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    Config::from_env(&Env::mock(vars.iter().copied()), None, None)
}

// ---------------------------------------------------------------------------
// precedence
// ---------------------------------------------------------------------------

#[test]
fn settings_block_alone() {
    let config = load(&[("PLUGIN_HELM_COMMAND", "execute order 66")]).unwrap();
    assert_eq!(config.command, "execute order 66");
}

#[test]
fn secret_prefix_beats_environment_block() {
    let config = load(&[
        ("PLUGIN_PREFIX", "prod"),
        ("TIMEOUT", "5m0s"),
        ("PROD_TIMEOUT", "2m30s"),
    ])
    .unwrap();
    assert_eq!(config.timeout, "2m30s");
}

#[test]
fn prefixed_settings_key_is_ignored() {
    let config = load(&[
        ("PLUGIN_PREFIX", "IXFREP"),
        ("PLUGIN_HELM_COMMAND", "wake me up"),
        ("IXFREP_PLUGIN_HELM_COMMAND", "send me to sleep inside"),
    ])
    .unwrap();
    assert_eq!(config.command, "wake me up");
}

#[test]
fn full_deployment_settings() {
    let config = load(&[
        ("PLUGIN_HELM_COMMAND", "upgrade"),
        ("DRONE_BUILD_EVENT", "push"),
        ("PLUGIN_CHART", "./charts/web"),
        ("PLUGIN_RELEASE", "web"),
        ("PLUGIN_NAMESPACE", "production"),
        ("PLUGIN_WAIT", "true"),
        ("PLUGIN_REUSE_VALUES", "1"),
        ("PLUGIN_SKIP_TLS_VERIFY", "F"),
        ("PLUGIN_CHART_VERSION", "1.2.3"),
        ("PLUGIN_SERVICE_ACCOUNT", "deployer"),
        ("PLUGIN_API_SERVER", "https://k8s.example:6443"),
        ("PLUGIN_KUBERNETES_CERTIFICATE", "LS0tLS1CRUdJTg=="),
        ("PLUGIN_PREFIX", "prod"),
        ("PROD_KUBERNETES_TOKEN", "abc123"),
        ("PLUGIN_TIMEOUT", "600"),
    ])
    .unwrap();

    assert_eq!(config.command, "upgrade");
    assert_eq!(config.drone_event, "push");
    assert_eq!(config.chart, "./charts/web");
    assert_eq!(config.release, "web");
    assert_eq!(config.namespace, "production");
    assert!(config.wait);
    assert!(config.reuse_values);
    assert!(!config.skip_tls_verify);
    assert!(!config.force);
    assert!(!config.dry_run);
    assert_eq!(config.chart_version, "1.2.3");
    assert_eq!(config.service_account, "deployer");
    assert_eq!(config.api_server, "https://k8s.example:6443");
    assert_eq!(config.certificate, "LS0tLS1CRUdJTg==");
    assert_eq!(config.kube_token, "abc123");
    assert_eq!(config.timeout, "600s");
}

#[test]
fn coercion_failure_is_fatal() {
    let err = load(&[("PLUGIN_HELM_COMMAND", "upgrade"), ("WAIT", "eventually")]).unwrap_err();
    match err {
        ConfigError::Coerce { var, field, reason } => {
            assert_eq!(var, "WAIT");
            assert_eq!(field, "Wait");
            assert_eq!(reason, CoerceError::InvalidBool("eventually".to_string()));
        }
    }
}

// ---------------------------------------------------------------------------
// debug output
// ---------------------------------------------------------------------------

#[test]
fn debug_dump_hides_token_but_config_keeps_it() {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let config = Config::from_env(
        &Env::mock([
            ("PLUGIN_DEBUG", "true"),
            ("PLUGIN_HELM_COMMAND", "upgrade"),
            ("KUBERNETES_TOKEN", "do-not-leak"),
        ]),
        Some(Output::new(out.clone())),
        Some(Output::new(err.clone())),
    )
    .unwrap();

    assert_eq!(config.kube_token, "do-not-leak");
    assert_eq!(out.contents(), "");
    let logged = err.contents();
    assert!(logged.starts_with("Generated config: {Command:upgrade"));
    assert!(logged.contains("KubeToken:(redacted)"));
    assert!(!logged.contains("do-not-leak"));
}

#[test]
fn run_config_shares_plugin_sinks() {
    let stdout = Output::new(SharedBuffer::new());
    let stderr = Output::new(SharedBuffer::new());
    let config = Config::from_env(
        &Env::mock([("PLUGIN_NAMESPACE", "web")]),
        Some(stdout.clone()),
        Some(stderr.clone()),
    )
    .unwrap();
    let run_config = run::Config::from(&config);

    assert_eq!(run_config.namespace, "web");
    assert!(run_config.stdout.as_ref().unwrap().same_as(&stdout));
    assert!(run_config.stderr.as_ref().unwrap().same_as(&stderr));
}

// ---------------------------------------------------------------------------
// process_env
// ---------------------------------------------------------------------------

/// Restores every variable it touched when dropped.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn new() -> Self {
        let mut guard = Self { saved: Vec::new() };
        for &key in FLAG_VARS {
            guard.unset(key);
        }
        guard
    }

    fn set(&mut self, key: &'static str, value: &str) {
        self.saved.push((key, std::env::var(key).ok()));
        unsafe { std::env::set_var(key, value) };
    }

    fn unset(&mut self, key: &'static str) {
        self.saved.push((key, std::env::var(key).ok()));
        unsafe { std::env::remove_var(key) };
    }
}

/// Boolean variables an ambient environment might set to something
/// that does not parse as a bool.
const FLAG_VARS: &[&str] = &[
    "DEBUG",
    "UPDATE_DEPENDENCIES",
    "SKIP_TLS_VERIFY",
    "DRY_RUN",
    "WAIT",
    "REUSE_VALUES",
    "FORCE",
    "PLUGIN_DEBUG",
    "PLUGIN_UPDATE_DEPENDENCIES",
    "PLUGIN_SKIP_TLS_VERIFY",
    "PLUGIN_DRY_RUN",
    "PLUGIN_WAIT",
    "PLUGIN_REUSE_VALUES",
    "PLUGIN_FORCE",
];

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            unsafe {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[test]
#[serial_test::serial]
fn process_env_conflicting_variables() {
    let mut guard = EnvGuard::new();
    guard.set("PLUGIN_HELM_COMMAND", "execute order 66");
    guard.set("HELM_COMMAND", "defend the jedi");
    guard.set("PLUGIN_PREFIX", "prod");
    guard.set("TIMEOUT", "5m0s");
    guard.set("PROD_TIMEOUT", "2m30s");
    guard.unset("PROD_HELM_COMMAND");

    let config = Config::new(None, None).unwrap();
    assert_eq!(config.command, "defend the jedi");
    assert_eq!(config.timeout, "2m30s");
}

#[test]
#[serial_test::serial]
fn process_env_bare_prefix_is_not_a_namespace() {
    let mut guard = EnvGuard::new();
    guard.unset("PLUGIN_PREFIX");
    guard.unset("PLUGIN_HELM_COMMAND");
    guard.set("PREFIX", "refpix");
    guard.set("HELM_COMMAND", "gimme more");
    guard.set("REFPIX_HELM_COMMAND", "gimme less");

    let config = Config::new(None, None).unwrap();
    assert_eq!(config.command, "gimme more");
}
