use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_clean_translations() -> Result<()> {
    let test = CliTest::with_translations(&[
        ("en.tm", "@default\ntitle = 'Home'\nhello = 'Hello {name}'\n"),
        ("fr.tm", "title = 'Accueil'\nhello = 'Bonjour {name}'\n"),
    ])?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "\u{2713} Checked 2 translation files - no issues found\n"
    );
    assert_eq!(stderr, "");
    // check never writes output
    assert!(!test.root().join("src/locales").exists());

    Ok(())
}

#[test]
fn test_missing_translation_is_a_warning() -> Result<()> {
    let test = CliTest::with_translations(&[
        ("en.tm", "@default\ntitle = 'Home'\nhello = 'Hello'\n"),
        ("fr.tm", "title = 'Accueil'\n"),
    ])?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "warning: \"hello\"  missing-translation\n\
         \x20 = note: missing in: fr\n\
         \n\
         \u{2718} 1 problems (0 errors, 1 warning)\n"
    );

    Ok(())
}

#[test]
fn test_parse_error_points_at_source() -> Result<()> {
    let test = CliTest::with_translations(&[
        ("en.tm", "@default\nhello = 'Hello'\n"),
        ("fr.tm", "hello = 'Bonjour\n"),
    ])?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: \"Unterminated message text\"  parse-error\n"));
    assert!(stdout.contains("  --> translations/fr.tm:1:9\n"));
    assert!(stdout.contains("1 | hello = 'Bonjour\n"));
    assert!(stderr.contains("1 file(s) could not be parsed and were left out"));

    Ok(())
}

#[test]
fn test_parameter_mismatch_fails() -> Result<()> {
    let test = CliTest::with_translations(&[
        ("en.tm", "count = '{n:number} items'\n"),
        ("fr.tm", "count = '{total} articles'\n"),
    ])?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: \"Different parameters found for message 'count'\""));
    assert!(stdout.contains("parameter-mismatch"));

    Ok(())
}

#[test]
fn test_missing_translations_directory() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.starts_with("Error: Translations directory './translations' does not exist."));

    Ok(())
}

#[test]
fn test_config_translations_and_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".elziirc.json",
        r#"{
  "translations": "./i18n",
  "ignores": ["draft-*"]
}"#,
    )?;
    test.write_file("i18n/en.tm", "@default\nhello = 'Hello'\n")?;
    test.write_file("i18n/draft-de.tm", "hello = 'Hallo\n")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "\u{2713} Checked 1 translation file - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_translations_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".elziirc.json", r#"{ "translations": "./missing" }"#)?;
    test.write_file("tm/en.tm", "hello = 'Hello'\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--translations", "tm"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, 0, "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_verbose_notes_default_config() -> Result<()> {
    let test = CliTest::with_translations(&[("en.tm", "hello = 'Hello'\n")])?;

    let mut cmd = test.check_command();
    cmd.arg("-v");
    let (_, _, stderr) = run(cmd)?;

    assert!(stderr.contains("Note: No .elziirc.json found, using default configuration"));

    Ok(())
}
