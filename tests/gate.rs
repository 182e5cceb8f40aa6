use std::path::PathBuf;

use shot_map::error::SecretsError;
use shot_map::gate::{AccessGate, Credentials, GateState};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn log_in(gate: &mut AccessGate, username: &str, password: &str) -> bool {
    gate.open_form();
    if let Some(form) = gate.form_mut() {
        form.username = username.to_string();
        form.password = password.to_string();
    }
    gate.submit()
}

#[test]
fn secrets_fixture_opens_gate() {
    let creds = Credentials::load(&fixture("secrets.json")).expect("secrets should load");
    assert_eq!(creds.len(), 2);

    let mut gate = AccessGate::new(creds);
    assert!(!log_in(&mut gate, "coach", "catenaccio"));
    assert!(log_in(&mut gate, "coach", "tiki-taka"));
    assert!(matches!(gate.state(), GateState::Authenticated { username } if username == "coach"));
}

#[test]
fn missing_secrets_file_is_an_io_error() {
    let err = Credentials::load(&fixture("no_such_secrets.json")).unwrap_err();
    assert!(matches!(err, SecretsError::Io { .. }));
}

#[test]
fn non_json_secrets_file_is_rejected() {
    let err = Credentials::load(&fixture("bad_location.csv")).unwrap_err();
    assert!(matches!(err, SecretsError::Json { .. }));
}
