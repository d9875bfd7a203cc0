use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SANTANDER_STATEMENT: &str = "\
Banco Santander Argentina S.A.
Saldo Inicial $ 125.000,00
02/01/24 123456 Compra con tarjeta de debito $ 1.500,00 $ 123.500,00
Impuesto ley 25.413 $ 9,00 $ 123.491,00
03/01/24 Transferencia Recibida $ 20.000,00 $ 143.491,00
De Juan Perez / transf - var /20240103
04/01/24 789012 Pago de servicios $ 3.491,00 $ 140.000,00
";

/// Command isolated from any user configuration.
fn extracto(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("extracto").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_statement(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, SANTANDER_STATEMENT).unwrap();
    path
}

#[test]
fn process_writes_movement_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_statement(dir.path(), "enero.txt");

    extracto(dir.path())
        .args(["process", "--bank", "santander"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Fecha,Referencia,Importe,Saldo\n"))
        .stdout(predicate::str::contains(",Saldo Inicial,,125000.00\n"))
        .stdout(predicate::str::contains(
            "02/01/24,Compra con tarjeta de debito,-1500.00,123500.00\n",
        ))
        .stdout(predicate::str::contains(
            "03/01/24,Transferencia Recibida - De Juan Perez / transf - var /20240103,20000.00,143491.00\n",
        ));
}

#[test]
fn process_accepts_bank_alias_and_writes_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_statement(dir.path(), "enero.txt");
    let summary = dir.path().join("resumen.csv");

    extracto(dir.path())
        .args(["process", "--bank", "STDR", "--summary"])
        .arg(&summary)
        .arg(&input)
        .assert()
        .success();

    let content = fs::read_to_string(&summary).unwrap();
    assert!(content.starts_with("Referencia,Sum_Importe,Cantidad,Pct_Importe,Pct_Cantidad\n"));
    assert!(content.contains("Compra con tarjeta de debito,-1500.00,1,6.0000,25.0000\n"));
    assert!(content.ends_with("TOTAL,15000.00,4,100.0000,100.0000\n"));
}

#[test]
fn process_rejects_unknown_bank() {
    let dir = TempDir::new().unwrap();
    let input = write_statement(dir.path(), "enero.txt");

    extracto(dir.path())
        .args(["process", "--bank", "banco-nacion"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown bank: banco-nacion"));
}

#[test]
fn process_reports_empty_statement() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("vacio.txt");
    fs::write(&input, "Nada que ver aqui\n").unwrap();

    extracto(dir.path())
        .args(["process"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No movements detected"));
}

#[test]
fn banks_lists_supported_grammars() {
    let dir = TempDir::new().unwrap();

    extracto(dir.path())
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("santander"))
        .stdout(predicate::str::contains("stdr, santander-rio"))
        .stdout(predicate::str::contains("hsbc"))
        .stdout(predicate::str::contains("SALDO ANTERIOR"));
}

#[test]
fn batch_writes_detail_and_summary_per_file() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    write_statement(&inputs, "enero.txt");
    write_statement(&inputs, "febrero.txt");

    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"output": {"timestamped_names": false}}"#).unwrap();

    extracto(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("batch")
        .arg(inputs.join("*.txt").to_str().unwrap())
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .success();

    for stem in ["enero", "febrero"] {
        let detail = fs::read_to_string(outputs.join(format!("{stem}_Detalle_Movimientos.csv"))).unwrap();
        assert!(detail.contains("04/01/24,Pago de servicios,-3491.00,140000.00\n"));
        assert!(outputs.join(format!("{stem}_Resumen_Referencias.csv")).exists());
    }
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    extracto(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "parse.default_bank", "hsbc"])
        .assert()
        .success();

    extracto(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "parse.default_bank"])
        .assert()
        .success()
        .stdout("\"hsbc\"\n");

    extracto(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "parse.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn batch_refuses_inputs_sharing_a_name() {
    let dir = TempDir::new().unwrap();
    let outputs = dir.path().join("out");
    for sub in ["a", "b"] {
        let inputs = dir.path().join("in").join(sub);
        fs::create_dir_all(&inputs).unwrap();
        write_statement(&inputs, "enero.txt");
    }

    extracto(dir.path())
        .arg("batch")
        .arg(dir.path().join("in/**/*.txt").to_str().unwrap())
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would write the same output files"));

    assert!(!outputs.exists());
}

#[test]
fn process_reports_broken_config() {
    let dir = TempDir::new().unwrap();
    let input = write_statement(dir.path(), "enero.txt");
    let config = dir.path().join("config.json");
    fs::write(&config, "{ not json").unwrap();

    extracto(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}
