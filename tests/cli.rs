use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vader"));
    cmd.current_dir(dir)
        .args(args)
        .env_remove("VADER_PLATFORM")
        .env_remove("VADER_LOG")
        .env_remove("VADER_TEST_INPUTS")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn vader(dir: &Path, args: &[&str]) -> Output {
    command(dir, args)
        .env("VADER_TEST_INPUTS", "Ada")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run vader")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(dir: &Path, name: &str, source: &str) {
    fs::write(dir.join(name), source).expect("write fixture");
}

#[test]
fn run_prints_program_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "hola.vdr",
        "preguntar \"¿Nombre?\" guardar la respuesta en nombre\nmostrar \"Hola \" + nombre\nrepetir 2 veces\nmostrar \"x\"\nfin repetir\n",
    );
    let output = vader(dir.path(), &["run", "hola.vdr"]);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, ["Hola Ada", "x", "x"]);
}

#[test]
fn run_reads_each_piped_answer_at_its_prompt() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "preguntas.vdr",
        "preguntar \"A?\" guardar la respuesta en a\npreguntar \"B?\" guardar la respuesta en b\nmostrar a\nmostrar b\n",
    );
    let mut child = command(dir.path(), &["run", "preguntas.vdr"])
        .stdin(Stdio::piped())
        .spawn()
        .expect("failed to spawn vader");
    {
        let mut stdin = child.stdin.take().expect("stdin is piped");
        stdin.write_all(b"Ana\n20\n").expect("write answers");
    }
    let output = child.wait_with_output().expect("vader exits");
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output), "A? B? Ana\n20\n");
}

#[test]
fn run_reports_closed_stdin_and_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "leer.vdr", "leer x\nmostrar \"sigue\"\n");
    let output = command(dir.path(), &["run", "leer.vdr"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run vader");
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Error: "));
    assert_eq!(lines[1], "sigue");
}

#[test]
fn run_accepts_english_keywords() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "hello.vdr",
        "ask \"Name?\" save the answer in name\nif name is equal to \"Ada\"\nshow \"Hello \" + name\nend if\n",
    );
    let output = vader(dir.path(), &["run", "hello.vdr"]);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).lines().collect::<Vec<_>>(), ["Hello Ada"]);
}

#[test]
fn run_fails_on_unterminated_block() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "roto.vdr", "mostrar \"antes\"\nsi 2 > 1\nmostrar \"dentro\"\n");
    let output = vader(dir.path(), &["run", "roto.vdr"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fin si"));
}

#[test]
fn run_fails_on_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = vader(dir.path(), &["run", "nada.vdr"]);
    assert!(!output.status.success());
}

#[test]
fn detect_prints_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "iot.vdr", "mostrar \"sensor de temperatura\"\n");
    let output = vader(dir.path(), &["detect", "iot.vdr", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("detect output is json");
    assert_eq!(value["context"], "iot");
    assert_eq!(value["language"], "es");
}

#[test]
fn build_to_stdout_uses_requested_platform() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "app.vdr", "mostrar \"Hola\"\n");
    let output = vader(
        dir.path(),
        &["build", "app.vdr", "--platform", "flutter", "--stdout"],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Generado por Vader"));
    assert!(text.contains("Hola"));
    assert!(!dir.path().join("app.dart").exists());
}

#[test]
fn build_writes_artifact_using_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "app.vdr", "mostrar \"Hola\"\n");
    write(
        dir.path(),
        "vader.toml",
        "[build]\nplatform = \"database\"\nout_dir = \"dist\"\n",
    );
    let output = vader(dir.path(), &["build", "app.vdr"]);
    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let artifact = dir.path().join("dist").join("app.sql");
    let text = fs::read_to_string(&artifact).expect("artifact written");
    assert!(text.contains("CREATE DATABASE"));
}

#[test]
fn unknown_platform_falls_back_to_web() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "app.vdr", "mostrar \"Hola\"\n");

    let flagged = vader(
        dir.path(),
        &["build", "app.vdr", "--platform", "cobol", "--stdout"],
    );
    assert!(flagged.status.success());
    assert!(stdout(&flagged).contains("<!DOCTYPE html>"));

    write(dir.path(), "vader.toml", "[build]\nplatform = \"cobol\"\n");
    let configured = vader(dir.path(), &["build", "app.vdr"]);
    assert!(
        configured.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&configured.stderr)
    );
    let text = fs::read_to_string(dir.path().join("app.html")).expect("artifact written");
    assert!(text.contains("<!DOCTYPE html>"));
}

#[test]
fn check_reports_structural_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "ok.vdr", "repetir 2 veces\nmostrar 1\nfin repetir\n");
    write(dir.path(), "bad.vdr", "funcion f\nmostrar 1\n");
    assert!(vader(dir.path(), &["check", "ok.vdr"]).status.success());
    let bad = vader(dir.path(), &["check", "bad.vdr"]);
    assert!(!bad.status.success());
    assert!(String::from_utf8_lossy(&bad.stderr).contains("fin funcion"));
}

#[test]
fn platforms_lists_every_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = vader(dir.path(), &["platforms"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 15);
    assert!(text.contains("react-native"));
    assert!(text.contains(".sol"));
}
