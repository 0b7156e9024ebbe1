use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["translations"], "./translations");
    assert_eq!(parsed["output"]["ts"], "./src/locales");
    assert_eq!(parsed["interfaceName"], "Locale");
    assert_eq!(parsed["elzInstanceName"], "elz");
    assert_eq!(parsed["staticDefault"], true);

    // 2-space indentation
    assert!(content.contains("\n  \"translations\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "\u{2713} Created .elziirc.json\n");
    assert!(test.root().join(".elziirc.json").exists());
    assert_config_content(&test.read_file(".elziirc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".elziirc.json", "{}")?;

    let (code, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 1);
    assert_eq!(stderr, "Error: .elziirc.json already exists\n");
    assert_eq!(test.read_file(".elziirc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    test.write_file("translations/en.tm", "@default\nhello = 'Hello'\n")?;

    let (code, _, stderr) = run(test.release_command())?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(test.root().join("src/locales/en_Locale.ts").exists());

    Ok(())
}
