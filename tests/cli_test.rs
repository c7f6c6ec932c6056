//! Integration tests for the swaudit binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const LISTING: &str = "\
Name                 Id                  Version        Available  Source
------------------------------------------------------------------------
\n\n\n\
AcroReaderDC x86     Adobe.Acrobat.32    22.003.20314   23.1       winget
Mozilla Firefox      Mozilla.Firefox     115.0.2                   winget
";

const CATALOG_CSV: &str = "\
SoftwareName,Version,Approved,RestrictedTo
Mozilla Firefox,115.0.2,true,
AcroReaderDC x86,22.003.20314,true,Laptop
VPN Client,4.2,true,Laptop
Legacy Viewer,1.0,false,Audi
";

/// Project whose listing command is `sh -c <script>`.
fn setup_project_with_script(script: &str, extra_config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".swaudit");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("catalog.csv"), CATALOG_CSV).unwrap();
    let config = format!(
        "listing:\n  program: sh\n  args: [\"-c\", {:?}]\n{}",
        script, extra_config
    );
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

/// Project whose listing command prints [`LISTING`].
fn setup_project(extra_config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let listing = temp.path().join("listing.txt");
    fs::write(&listing, LISTING).unwrap();
    let script = format!("cat '{}'", listing.display());

    let dir = temp.path().join(".swaudit");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("catalog.csv"), CATALOG_CSV).unwrap();
    let config = format!(
        "listing:\n  program: sh\n  args: [\"-c\", {:?}]\n{}",
        script, extra_config
    );
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

fn swaudit(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("swaudit"));
    cmd.current_dir(temp.path())
        .env_remove("SWAUDIT_CATALOG")
        .env_remove("SWAUDIT_RESTRICT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("swaudit"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("installed"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("swaudit"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("swaudit"));
    cmd.arg("frobnicate");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_catalog_validates_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("catalog.yaml");
    fs::write(
        &path,
        "software:\n  - name: 7-Zip\n    version: \"23.01\"\n    approved: true\n",
    )?;

    swaudit(&temp)
        .args(["catalog", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("7-Zip"))
        .stdout(predicate::str::contains("1 entries (1 approved, 0 restricted)"));
    Ok(())
}

#[test]
fn cli_catalog_rejects_bad_row() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("catalog.csv");
    fs::write(&path, "SoftwareName,Version,Approved\nTool,1.0,maybe\n")?;

    swaudit(&temp)
        .args(["catalog", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("swaudit"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("swaudit"));
    Ok(())
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[test]
    fn cli_no_args_runs_check() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("catalog: catalog.csv\n");
        swaudit(&temp)
            .assert()
            .success()
            .stdout(predicate::str::contains("Software"))
            .stdout(predicate::str::contains("Mozilla Firefox"))
            .stdout(predicate::str::contains(
                "2 of 4 entries installed, 2 missing (1 approved)",
            ));
        Ok(())
    }

    #[test]
    fn cli_check_json_report() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("catalog: catalog.csv\n");
        let output = swaudit(&temp).args(["check", "--json"]).output()?;
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["softwareName"], "Mozilla Firefox");
        assert_eq!(entries[0]["installed"], true);
        assert_eq!(entries[2]["installed"], false);
        assert_eq!(json["catalogLoaded"], true);
        Ok(())
    }

    #[test]
    fn cli_check_restrict_flag() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("catalog: catalog.csv\n");
        let output = swaudit(&temp)
            .args(["check", "--json", "--restrict", "Laptop"])
            .output()?;

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let names: Vec<&str> = json["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["softwareName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["AcroReaderDC x86", "VPN Client"]);
        Ok(())
    }

    #[test]
    fn cli_check_restrict_from_env() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("catalog: catalog.csv\n");
        let output = swaudit(&temp)
            .env("SWAUDIT_RESTRICT", "Audi")
            .args(["check", "--json"])
            .output()?;

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["softwareName"], "Legacy Viewer");
        Ok(())
    }

    #[test]
    fn cli_no_args_reads_catalog_from_env() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("");
        let catalog = temp.path().join(".swaudit").join("catalog.csv");
        swaudit(&temp)
            .env("SWAUDIT_CATALOG", &catalog)
            .assert()
            .success()
            .stdout(predicate::str::contains("No catalog loaded").not())
            .stdout(predicate::str::contains(
                "2 of 4 entries installed, 2 missing (1 approved)",
            ));
        Ok(())
    }

    #[test]
    fn cli_no_args_accepts_check_flags() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("catalog: catalog.csv\n");
        let output = swaudit(&temp).args(["--json", "-r", "Audi"]).output()?;
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["softwareName"], "Legacy Viewer");
        Ok(())
    }

    #[test]
    fn cli_check_strict_fails_when_missing() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("catalog: catalog.csv\n");
        swaudit(&temp).args(["check", "--strict"]).assert().code(1);
        Ok(())
    }

    #[test]
    fn cli_check_without_catalog() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("");
        swaudit(&temp)
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No catalog loaded"));
        Ok(())
    }

    #[test]
    fn cli_check_stderr_output_fails() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project_with_script(
            "echo 'Failed in attempting to update the source: winget' >&2",
            "catalog: catalog.csv\n",
        );
        swaudit(&temp)
            .arg("check")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("reported errors"))
            .stdout(predicate::str::contains("Mozilla Firefox").not());
        Ok(())
    }

    #[test]
    fn cli_check_json_error_payload() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project_with_script("exit 2", "catalog: catalog.csv\n");
        let output = swaudit(&temp).args(["check", "--json"]).output()?;
        assert_eq!(output.status.code(), Some(1));

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("exited with status 2"));
        Ok(())
    }

    #[test]
    fn cli_check_times_out() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project_with_script("sleep 5", "  timeout_secs: 1\ncatalog: catalog.csv\n");
        swaudit(&temp)
            .arg("check")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("timed out after 1s"));
        Ok(())
    }

    #[test]
    fn cli_installed_lists_packages() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("");
        swaudit(&temp)
            .arg("installed")
            .assert()
            .success()
            .stdout(predicate::str::contains("Adobe.Acrobat.32"))
            .stdout(predicate::str::contains("2 packages installed"));
        Ok(())
    }

    #[test]
    fn cli_config_override() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("");
        let alt = temp.path().join("alt.yml");
        fs::write(
            &alt,
            "listing:\n  program: sh\n  args: [\"-c\", \"exit 4\"]\n",
        )?;

        swaudit(&temp)
            .args(["--config", alt.to_str().unwrap(), "installed"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("exited with status 4"));
        Ok(())
    }

    #[test]
    fn cli_debug_enables_logging() -> Result<(), Box<dyn std::error::Error>> {
        let temp = setup_project("");
        swaudit(&temp)
            .args(["--debug", "installed", "--json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Parsed 2 installed packages"));
        Ok(())
    }
}
