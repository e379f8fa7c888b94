use clap::Parser;
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;
use webapitest::cli::cli_parameters::*;

#[test]
fn test_parse_subcommand_names() {
    let params = CliParameters::try_parse_from(["webapitest", "parse2postmanfile", "cases", "--postmanfile", "deal.json"])
        .unwrap();
    assert_eq!(
        params.command,
        Command::Parse2PostmanFile {
            casedir: "cases".into(),
            postmanfile: "deal.json".into(),
            name: None,
        }
    );

    let params = CliParameters::try_parse_from(["webapitest", "runcase", "cases", "--config", "ci.json"]).unwrap();
    assert_eq!(params.command, Command::RunCase { casedir: Some("cases".into()) });
    assert_eq!(params.config.as_deref(), Some(Path::new("ci.json")));

    let params = CliParameters::try_parse_from(["webapitest", "cleandb"]).unwrap();
    assert_eq!(params.command, Command::CleanDb);
}

#[test]
fn test_parse_requires_casedir() {
    assert!(CliParameters::try_parse_from(["webapitest", "parse", "deal.json"]).is_err());
}

#[test]
fn test_validate_collection_not_found() {
    let params = CliParameters::try_parse_from(["webapitest", "parse", "nonexistent.json", "--casedir", "out"]).unwrap();

    let result = params.validate();
    assert!(matches!(result, Err(CliParameterError::FileNotFound { .. })));
}

#[test]
fn test_validate_scene_directory_not_found() {
    let params = CliParameters::try_parse_from(["webapitest", "createcsv", "/nonexistent/cases"]).unwrap();

    let result = params.validate();
    assert!(matches!(result, Err(CliParameterError::DirectoryNotFound { .. })));
}

#[test]
fn test_validate_success() {
    let dir = tempdir().unwrap();
    let collection = dir.path().join("deal.collection.json");
    File::create(&collection).unwrap();

    let output = dir.path().join("not-yet-created");
    let parse = CliParameters::try_parse_from([
        "webapitest",
        "parse",
        collection.to_str().unwrap(),
        "--casedir",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert!(parse.validate().is_ok());

    let check = CliParameters::try_parse_from(["webapitest", "checkcsv", dir.path().to_str().unwrap()]).unwrap();
    assert!(check.validate().is_ok());

    let init = CliParameters::try_parse_from(["webapitest", "initdb"]).unwrap();
    assert!(init.validate().is_ok());
}
