use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::constants::{DEFAULT_DATA_FILE, DEFAULT_OUTPUT_DIR};
use crate::errors::{AppError, AppResult};
use crate::models::{Projection, Vocabulary};
use crate::parser::{parse_health_export, project, records_to_table};
use crate::writer::{
    write_all_records_file, write_blood_pressure_file, write_json_files, write_per_type_files,
};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Actions selected for one run, from flags or a config file.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub print_types: bool,
    pub write_json: bool,
    pub one_file: bool,
    pub separate_files: bool,
    pub reduce_output: bool,
}

impl RunOptions {
    fn any_selected(&self) -> bool {
        self.print_types
            || self.write_json
            || self.one_file
            || self.separate_files
            || self.reduce_output
    }

    /// Reduce-output alone selects no output to reduce.
    fn only_reduce_output(&self) -> bool {
        self.reduce_output
            && !self.print_types
            && !self.write_json
            && !self.one_file
            && !self.separate_files
    }
}

/// Parses command-line arguments and executes the conversion.
///
/// This function handles two subcommands:
/// - `cli`: Manual CLI with flag-selected actions and default paths
/// - `toml`: Run using a TOML configuration file
///
/// Both subcommands execute the same workflow for converting a health
/// export document:
/// 1. Parses the XML export into records and the type catalog
/// 2. Prints the type listing when requested (no files are written)
/// 3. Writes JSON/JSON Lines dumps of the raw records when requested
/// 4. Builds the record table, applies the full or reduced projection
/// 5. Writes the combined CSV, per-type CSVs, and the blood pressure
///    view as selected
///
/// # Returns
///
/// Returns `Ok(())` if all operations complete successfully. Returns an
/// error if:
/// - The config file is missing, malformed, or selects no actions
/// - The export document cannot be read or is not well-formed XML
/// - A timestamp column carries an unparsable value
/// - File I/O operations fail
///
pub fn cli() -> AppResult<()> {
    let matches = build_command().get_matches();

    match matches.subcommand() {
        Some(("cli", sub)) => {
            let mut resolved_config = ResolvedConfig::default();
            if let Some(input) = sub.get_one::<PathBuf>("input") {
                resolved_config.data_file = input.clone();
            }
            if let Some(out_dir) = sub.get_one::<PathBuf>("out_dir") {
                resolved_config.output_dir = out_dir.clone();
            }

            let options = RunOptions {
                print_types: sub.get_flag("print_types"),
                write_json: sub.get_flag("write_json"),
                one_file: sub.get_flag("one_file"),
                separate_files: sub.get_flag("separate_files"),
                reduce_output: sub.get_flag("reduce_output"),
            };

            if !options.any_selected() {
                let mut cmd = build_command();
                if let Some(sub_cmd) = cmd.find_subcommand_mut("cli") {
                    sub_cmd
                        .print_help()
                        .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
                }
                return Ok(());
            }

            run_workflow(&options, &resolved_config)?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");

            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            let options = RunOptions {
                print_types: file_config.print_types,
                write_json: file_config.write_json,
                one_file: file_config.one_file,
                separate_files: file_config.separate_files,
                reduce_output: file_config.reduce_output,
            };

            run_workflow(&options, &file_config.resolved)?;
        }
        _ => {
            build_command()
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn build_command() -> Command<'static> {
    Command::new("hke-cli")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("cli")
                .about("Convert a health export with actions given as flags")
                .after_help("Writes CSV tables under <out-dir>/csv and JSON under <out-dir>/json.\nExample:\n  hke-cli cli -i ./data/Export.xml -d ./out -o -s -r")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Path of the health export XML document")
                        .default_value(DEFAULT_DATA_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("out_dir")
                        .short('d')
                        .long("out-dir")
                        .help("Directory the output files are written under")
                        .default_value(DEFAULT_OUTPUT_DIR)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("print_types")
                        .short('p')
                        .long("print-types")
                        .help("Print the record type listing instead of writing files")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("write_json")
                        .short('j')
                        .long("write-json")
                        .help("Write all records as JSON and JSON Lines files")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("one_file")
                        .short('o')
                        .long("one-file")
                        .help("Write all records to one combined CSV file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("separate_files")
                        .short('s')
                        .long("separate-files")
                        .help("Write one CSV per record type plus the blood pressure table")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("reduce_output")
                        .short('r')
                        .long("reduce-output")
                        .help("Restrict table outputs to the reduced column set")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn run_workflow(options: &RunOptions, resolved_config: &ResolvedConfig) -> AppResult<()> {
    if options.only_reduce_output() {
        info!("Reduced output has no effect when no table files are written");
        return Ok(());
    }

    print_run_info(options, resolved_config);

    let (records, record_types) = parse_health_export(&resolved_config.data_file)?;
    let record_count = records.len();
    info!(
        records = record_count,
        record_types = record_types.len(),
        "Parsed health export"
    );

    if options.print_types {
        print_record_types(&record_types, &resolved_config.vocabulary);
        return Ok(());
    }

    if options.write_json {
        write_json_files(&records, resolved_config)?;
    }

    if options.one_file || options.separate_files {
        let projection = if options.reduce_output {
            Projection::Reduced
        } else {
            Projection::Full
        };
        info!(
            projection = projection.display_name(),
            "Building record table"
        );

        let table = records_to_table(records)?;
        let table = project(&table, projection)?;

        if options.one_file {
            write_all_records_file(&table, resolved_config)?;
        }

        if options.separate_files {
            write_blood_pressure_file(&table, resolved_config)?;
            write_per_type_files(&table, &record_types, resolved_config)?;
        }
    }

    info!(
        records = record_count,
        "All operations completed successfully"
    );

    Ok(())
}

fn print_run_info(options: &RunOptions, resolved_config: &ResolvedConfig) {
    info!(
        data_file = %resolved_config.data_file.display(),
        output_dir = %resolved_config.output_dir.display(),
        write_json = options.write_json,
        one_file = options.one_file,
        separate_files = options.separate_files,
        reduce_output = options.reduce_output,
        "Starting conversion"
    );
}

/// Prints the catalog as a numbered `raw -> normalized` listing in
/// first-seen order.
fn print_record_types(record_types: &[String], vocabulary: &Vocabulary) {
    println!("All record types:\n");
    for (index, record_type) in record_types.iter().enumerate() {
        println!(
            "{}: {} -> {}",
            index + 1,
            record_type,
            vocabulary.normalized_name(record_type)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_command_parses_action_flags() {
        let matches = build_command()
            .try_get_matches_from(vec!["hke-cli", "cli", "-o", "-s", "-r"])
            .unwrap();
        let sub = matches.subcommand_matches("cli").unwrap();

        assert!(sub.get_flag("one_file"));
        assert!(sub.get_flag("separate_files"));
        assert!(sub.get_flag("reduce_output"));
        assert!(!sub.get_flag("print_types"));
        assert!(!sub.get_flag("write_json"));
    }

    #[test]
    fn cli_command_has_default_paths() {
        let matches = build_command()
            .try_get_matches_from(vec!["hke-cli", "cli", "-p"])
            .unwrap();
        let sub = matches.subcommand_matches("cli").unwrap();

        assert_eq!(
            sub.get_one::<PathBuf>("input").unwrap(),
            &PathBuf::from("./data/Export.xml")
        );
        assert_eq!(
            sub.get_one::<PathBuf>("out_dir").unwrap(),
            &PathBuf::from("./out")
        );
    }

    #[test]
    fn cli_command_accepts_long_path_args() {
        let matches = build_command()
            .try_get_matches_from(vec![
                "hke-cli",
                "cli",
                "--input",
                "export/Export.xml",
                "--out-dir",
                "converted",
                "-j",
            ])
            .unwrap();
        let sub = matches.subcommand_matches("cli").unwrap();

        assert_eq!(
            sub.get_one::<PathBuf>("input").unwrap(),
            &PathBuf::from("export/Export.xml")
        );
        assert_eq!(
            sub.get_one::<PathBuf>("out_dir").unwrap(),
            &PathBuf::from("converted")
        );
        assert!(sub.get_flag("write_json"));
    }

    #[test]
    fn toml_command_requires_path() {
        let err = build_command().try_get_matches_from(vec!["hke-cli", "toml"]);
        assert!(err.is_err());
    }

    #[test]
    fn run_options_detect_lone_reduce_output() {
        let options = RunOptions {
            print_types: false,
            write_json: false,
            one_file: false,
            separate_files: false,
            reduce_output: true,
        };
        assert!(options.only_reduce_output());
        assert!(options.any_selected());

        let options = RunOptions {
            one_file: true,
            ..options
        };
        assert!(!options.only_reduce_output());
    }

    #[test]
    fn test_print_record_types_runs() {
        let record_types = vec![
            "HKQuantityTypeIdentifierStepCount".to_string(),
            "HKCategoryTypeIdentifierSleepAnalysis".to_string(),
        ];
        print_record_types(&record_types, &Vocabulary::default());
    }
}
