use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["presswatch"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["presswatch", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            output_dir: None,
            days: None,
            no_open: false
        })
    ));
}

#[test]
fn parses_run_overrides() {
    let cli = Cli::try_parse_from([
        "presswatch",
        "run",
        "--days",
        "7",
        "--output-dir",
        "reports",
        "--no-open",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            output_dir: Some(ref dir),
            days: Some(7),
            no_open: true
        }) if dir == &PathBuf::from("reports")
    ));
}

#[test]
fn run_rejects_non_numeric_days() {
    assert!(Cli::try_parse_from(["presswatch", "run", "--days", "two"]).is_err());
}

#[test]
fn parses_check_command() {
    let cli = Cli::try_parse_from(["presswatch", "check"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Check)));
}

#[test]
fn parses_plan_with_explicit_profile() {
    let cli = Cli::try_parse_from([
        "presswatch",
        "plan",
        "--profile",
        "other.yaml",
        "--company",
        "Ledesma",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Plan { ref profile, company: Some(ref c) })
            if profile == &PathBuf::from("other.yaml") && c == "Ledesma"
    ));
}

#[test]
fn render_requires_input() {
    assert!(Cli::try_parse_from(["presswatch", "render"]).is_err());
}

#[test]
fn parses_render_command() {
    let cli = Cli::try_parse_from([
        "presswatch",
        "render",
        "--input",
        "reporte.md",
        "--output",
        "out/r.html",
        "--open",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Render {
            ref input,
            output: Some(ref output),
            open: true,
            ..
        }) if input == &PathBuf::from("reporte.md") && output == &PathBuf::from("out/r.html")
    ));
}

#[test]
fn log_level_is_global() {
    let cli = Cli::try_parse_from(["presswatch", "check", "--log-level", "debug"])
        .expect("expected valid cli args");
    assert_eq!(cli.log_level, "debug");
}

#[test]
fn log_level_defaults_to_info() {
    let cli = Cli::try_parse_from(["presswatch", "plan"]).expect("expected valid cli args");
    assert_eq!(cli.log_level, "info");
}
