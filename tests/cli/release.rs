use anyhow::Result;

use crate::{CliTest, run};

fn bilingual() -> Result<CliTest> {
    CliTest::with_translations(&[
        (
            "en.tm",
            "@default\ntitle = 'Home'\nhello = 'Hello {name}'\n",
        ),
        ("fr.tm", "title = 'Accueil'\n"),
    ])
}

#[test]
fn test_release_generates_modules() -> Result<()> {
    let test = bilingual()?;

    let (code, stdout, stderr) = run(test.release_command())?;

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.ends_with(
        "\u{2713} en_Locale.ts\n\
         \u{2713} fr_Locale.ts [!] 1 missing translation(s)\n\
         \u{2713} index.ts\n\
         \u{2713} Generated 3 file(s) (TS)\n"
    ));

    let fr = test.read_file("src/locales/fr_Locale.ts")?;
    insta::assert_snapshot!(fr, @r"
    /* Generated by elzii-tools 0.4.0 from the following files:
     * translations/fr.tm
     */
    import { Fmt } from 'elzii';
    import { Locale } from '.';
    export default class fr_Locale implements Locale {
      private fmt: Fmt;
      public constructor(fmt: Fmt) {
        this.fmt = fmt;
      }
      public hello(name: any): string {
        return `<hello>`;
      }
      public get title(): string {
        return `Accueil`;
      }
    }
    ");

    let index = test.read_file("src/locales/index.ts")?;
    assert!(index.contains("{ id: 'en', messages: { static: en_Locale } },"));
    assert!(index.contains("{ id: 'fr', messages: () => import('./fr_Locale') },"));
    assert!(index.contains("default: 'en',"));

    Ok(())
}

#[test]
fn test_release_blocked_by_errors() -> Result<()> {
    let test = CliTest::with_translations(&[
        ("en.tm", "count = '{n:number} items'\n"),
        ("fr.tm", "count = '{total} articles'\n"),
    ])?;

    let (code, stdout, _) = run(test.release_command())?;

    assert_eq!(code, 1);
    assert!(stdout.ends_with("\u{2718} Checks failed, no file was generated\n"));
    assert!(!test.root().join("src/locales").exists());

    Ok(())
}

#[test]
fn test_release_removes_stale_modules() -> Result<()> {
    let test = bilingual()?;
    test.write_file("src/locales/de_Locale.ts", "// old")?;
    test.write_file("src/locales/helpers.js", "// not generated")?;

    let (code, _, _) = run(test.release_command())?;

    assert_eq!(code, 0);
    assert!(!test.root().join("src/locales/de_Locale.ts").exists());
    assert!(test.root().join("src/locales/helpers.js").exists());

    Ok(())
}

#[test]
fn test_release_declaration_output() -> Result<()> {
    let test = bilingual()?;
    test.write_file(
        ".elziirc.json",
        r#"{ "output": { "ts": null, "dts": "./types" } }"#,
    )?;

    let (code, stdout, stderr) = run(test.release_command())?;

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("\u{2713} Locale.d.ts\n"));
    assert!(!test.root().join("src/locales").exists());
    let declaration = test.read_file("types/Locale.d.ts")?;
    assert!(declaration.contains("export interface Locale {\n  hello(name: any): string;\n"));

    Ok(())
}

#[test]
fn test_release_without_output_is_config_error() -> Result<()> {
    let test = bilingual()?;
    test.write_file(".elziirc.json", r#"{ "output": { "ts": null } }"#)?;

    let (code, stdout, stderr) = run(test.release_command())?;

    assert_eq!(code, 2);
    assert_eq!(stdout, "");
    assert!(stderr.starts_with("Error: No output format is enabled."));

    Ok(())
}

#[test]
fn test_release_output_flag() -> Result<()> {
    let test = bilingual()?;

    let mut cmd = test.release_command();
    cmd.args(["--ts-out", "generated"]);
    let (code, _, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert!(test.root().join("generated/index.ts").exists());
    assert!(!test.root().join("src/locales").exists());

    Ok(())
}
