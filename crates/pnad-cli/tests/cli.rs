//! Argument parsing, configuration precedence and rendered listings.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use pnad_cli::cli::{Cli, Command};
use pnad_cli::commands::{
    apply_extract_args, apply_label_args, apply_neet_args, load_config, run_extract_command,
};
use pnad_cli::summary::{aggregate_table, counts_table, dictionary_table, entries_table};
use pnad_model::{AggregateTable, AggregatedRecord, GroupValue};
use pnad_standards::{DICTIONARIES, RACE};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("pnad").chain(args.iter().copied())).unwrap()
}

#[test]
fn extract_flags_override_the_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("pnad.toml");
    fs::write(
        &config_path,
        "[extract]\ninputs = [\"a.csv\"]\nage_min = 15\nage_max = 29\n",
    )
    .unwrap();

    let cli = parse(&[
        "--config",
        config_path.to_str().unwrap(),
        "extract",
        "2022.csv",
        "2023.csv",
        "--age-max",
        "24",
    ]);
    let mut config = load_config(cli.config.as_deref()).unwrap();
    let Command::Extract(args) = &cli.command else {
        panic!("expected extract");
    };
    apply_extract_args(&mut config, args).unwrap();

    assert_eq!(
        config.extract.inputs,
        vec![PathBuf::from("2022.csv"), PathBuf::from("2023.csv")]
    );
    assert_eq!((config.extract.age_min, config.extract.age_max), (15, 24));
    assert!(!config.extract.write_suppression_flags);
}

#[test]
fn inverted_age_band_is_rejected() {
    let cli = parse(&["extract", "--age-min", "30", "--age-max", "20"]);
    let mut config = load_config(None).unwrap();
    let Command::Extract(args) = &cli.command else {
        panic!("expected extract");
    };
    assert!(apply_extract_args(&mut config, args).is_err());
}

#[test]
fn neet_and_label_flags_apply() {
    let mut config = load_config(None).unwrap();

    let cli = parse(&["neet", "--period", "2023", "--scale", "1", "-o", "out.csv"]);
    let Command::Neet(args) = &cli.command else {
        panic!("expected neet");
    };
    apply_neet_args(&mut config, args);
    assert_eq!(config.neet.period, "2023");
    assert_eq!(config.neet.scale, 1.0);
    assert_eq!(config.neet.output, PathBuf::from("out.csv"));

    let cli = parse(&["label", "in.csv", "--suppression-flags"]);
    let Command::Label(args) = &cli.command else {
        panic!("expected label");
    };
    apply_label_args(&mut config, args);
    assert_eq!(config.label.input, PathBuf::from("in.csv"));
    assert_eq!(config.label.output, PathBuf::from("dados_rotulados.csv"));
    assert!(config.label.write_suppression_flags);
}

#[test]
fn global_flags_parse_after_the_subcommand() {
    let cli = parse(&["dictionaries", "race", "--log-level", "debug", "-v"]);
    assert!(cli.log_level.is_some());
    assert!(matches!(
        cli.command,
        Command::Dictionaries(ref args) if args.name.as_deref() == Some("race")
    ));
}

#[test]
fn missing_config_file_is_an_error() {
    let result = load_config(Some(std::path::Path::new("/nonexistent/pnad.toml")));
    assert!(result.is_err());
}

#[test]
fn extract_command_writes_the_band() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("2023.csv");
    fs::write(&input, "ano,V2007,V2009\n2023,1,14\n2023,2,40\n").unwrap();
    let output = dir.path().join("out").join("people.csv");

    let cli = parse(&[
        "extract",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    let mut config = load_config(None).unwrap();
    let Command::Extract(args) = &cli.command else {
        panic!("expected extract");
    };
    apply_extract_args(&mut config, args).unwrap();
    let report = run_extract_command(&config).unwrap();

    assert_eq!(report.rows_out, 1);
    assert_eq!(report.excluded, 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Year,Sex_code,Sex_label,Age\n2023,1,Male,14\n"
    );
    let counts = counts_table(&report).to_string();
    assert!(counts.contains("Excluded by filter"));
}

#[test]
fn dictionary_listings_name_every_dictionary() {
    let listing = dictionary_table(DICTIONARIES).to_string();
    for dictionary in DICTIONARIES {
        assert!(listing.contains(dictionary.name));
    }

    let race = entries_table(&RACE).to_string();
    assert!(race.contains("Pardo"));
    assert!(race.contains("Unknown"));
}

#[test]
fn aggregate_listing_ends_with_a_total() {
    let table = AggregateTable {
        key_headers: vec!["Year".into(), "Sex".into(), "Race".into()],
        measure_header: "NEET_Count".into(),
        rows: vec![
            AggregatedRecord {
                key: vec![
                    GroupValue::Int(2024),
                    GroupValue::Text("Female".into()),
                    GroupValue::Text("Pardo".into()),
                ],
                total: 1500.0,
            },
            AggregatedRecord {
                key: vec![
                    GroupValue::Int(2024),
                    GroupValue::Text("Male".into()),
                    GroupValue::Text("White".into()),
                ],
                total: 5000.0,
            },
        ],
    };
    let rendered = aggregate_table(&table).to_string();
    assert!(rendered.contains("NEET_Count"));
    assert!(rendered.contains("TOTAL"));
    assert!(rendered.contains("6500"));
}
