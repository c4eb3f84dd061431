use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_clean_args() {
    let cli = Cli::try_parse_from([
        "vt",
        "clean",
        "data.csv",
        "--remove-missing",
        "--columns",
        "a,b",
        "-o",
        "out.csv",
    ])
    .unwrap();

    match cli.command {
        Commands::Clean(args) => {
            assert_eq!(args.input, PathBuf::from("data.csv"));
            assert_eq!(args.output, Some(PathBuf::from("out.csv")));
            assert!(args.remove_missing);
            assert!(!args.remove_duplicates);
            assert_eq!(args.columns, Some(vec!["a".to_string(), "b".to_string()]));
        }
        other => panic!("expected clean, got {:?}", other),
    }
}

#[test]
fn test_parse_global_args_after_subcommand() {
    let cli = Cli::try_parse_from(["vt", "inspect", "data.csv", "-v", "-c", "vt.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config, Some(PathBuf::from("vt.yml")));
    match cli.command {
        Commands::Inspect(args) => {
            assert_eq!(args.rows, 10);
            assert_eq!(args.output, InspectOutput::Table);
        }
        other => panic!("expected inspect, got {:?}", other),
    }
}

#[test]
fn test_parse_serve_port() {
    let cli = Cli::try_parse_from(["vt", "serve", "--port", "9000"]).unwrap();
    match cli.command {
        Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
        other => panic!("expected serve, got {:?}", other),
    }
}

#[test]
fn test_clean_requires_input() {
    assert!(Cli::try_parse_from(["vt", "clean"]).is_err());
}
