//! BMI CLI - Command-line interface for the BMI engine
//!
//! Commands:
//! - calc: Assess a single subject from flags
//! - table: Print the effective range table for a demographic
//! - batch: Process subject records from a file or stdin

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bmi_engine::{bmi, Assessment, BmiError, RangeTable, Sex, Subject, ENGINE_VERSION};

/// BMI - compute and classify a Body-Mass-Index
#[derive(Parser)]
#[command(name = "bmi")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute and classify a Body-Mass-Index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single subject
    Calc {
        /// Height in centimeters (or inches with --pounds)
        height: f64,

        /// Mass in kilograms (or pounds with --pounds)
        mass: f64,

        /// Interpret inputs as inches/pounds
        #[arg(long)]
        pounds: bool,

        /// Sex token (m, f, w, male, female, 0, 1)
        #[arg(short, long)]
        sex: Option<String>,

        /// Age in years
        #[arg(short, long, default_value = "0")]
        age: u32,

        /// Include the effective range table in the output
        #[arg(long)]
        table: bool,

        /// Output as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective range table for a demographic
    Table {
        /// Sex token (m, f, w, male, female, 0, 1)
        #[arg(short, long)]
        sex: Option<String>,

        /// Age in years
        #[arg(short, long, default_value = "0")]
        age: u32,

        /// Output as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Process subject records from a file or stdin
    Batch {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Include the effective range table in each record
        #[arg(long)]
        table: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one subject per line)
    Ndjson,
    /// JSON array of subjects
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one assessment per line)
    Ndjson,
    /// JSON array of assessments
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BmiCliError> {
    match cli.command {
        Commands::Calc {
            height,
            mass,
            pounds,
            sex,
            age,
            table,
            json,
        } => cmd_calc(height, mass, pounds, sex.as_deref(), age, table, json),

        Commands::Table { sex, age, json } => cmd_table(sex.as_deref(), age, json),

        Commands::Batch {
            input,
            output,
            input_format,
            output_format,
            table,
        } => cmd_batch(&input, &output, input_format, output_format, table),
    }
}

fn cmd_calc(
    height: f64,
    mass: f64,
    pounds: bool,
    sex: Option<&str>,
    age: u32,
    table: bool,
    json: bool,
) -> Result<(), BmiCliError> {
    let subject = bmi(height, mass)
        .use_pounds(pounds)
        .set_sex(sex.map(Sex::from).unwrap_or_default())
        .set_age(age);

    let result = if table {
        subject.calc_with_table()
    } else {
        subject.calc()
    };

    if json {
        // Pretty-print when a human is watching, compact when piped.
        if atty::is(atty::Stream::Stdout) {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", serde_json::to_string(&result)?);
        }
    } else {
        print_assessment(&result);
    }

    Ok(())
}

fn print_assessment(result: &Assessment) {
    println!("BMI:      {}", result.index);
    println!(
        "Category: {}",
        result.message.unwrap_or("(no matching band)")
    );
    println!("Sex:      {}", result.sex);
    println!("Age:      {}", result.age);
    println!("Units:    {}", result.measurement);

    if let Some(table) = &result.table {
        println!();
        print_range_rows(table);
    }
}

fn cmd_table(sex: Option<&str>, age: u32, json: bool) -> Result<(), BmiCliError> {
    let sex = sex.map(Sex::from).unwrap_or_default();
    let effective = bmi_engine::classifier::effective_table(sex, age);
    let table = bmi_engine::format::range_table(&effective);

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_range_rows(&table);
    }

    Ok(())
}

fn print_range_rows(table: &RangeTable) {
    let width = table
        .entries()
        .iter()
        .map(|entry| entry.label.len())
        .max()
        .unwrap_or(0);

    for entry in table.entries() {
        println!("{:width$}  {}", entry.label, entry.range, width = width);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    table: bool,
) -> Result<(), BmiCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let subjects = match input_format {
        InputFormat::Ndjson => Subject::parse_ndjson(&input_data)?,
        InputFormat::Json => Subject::parse_array(&input_data)?,
    };

    if subjects.is_empty() {
        return Err(BmiCliError::NoSubjects);
    }

    let assessments: Vec<Assessment> = subjects
        .iter()
        .map(|subject| {
            if table {
                subject.calc_with_table()
            } else {
                subject.calc()
            }
        })
        .collect();

    let output_data = format_output(&assessments, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn format_output(
    assessments: &[Assessment],
    format: &OutputFormat,
) -> Result<String, BmiCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut out = String::new();
            for assessment in assessments {
                out.push_str(&serde_json::to_string(assessment)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string(assessments)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(assessments)?),
    }
}

#[derive(Debug)]
enum BmiCliError {
    Io(io::Error),
    Engine(BmiError),
    Json(serde_json::Error),
    NoSubjects,
}

impl From<io::Error> for BmiCliError {
    fn from(e: io::Error) -> Self {
        BmiCliError::Io(e)
    }
}

impl From<BmiError> for BmiCliError {
    fn from(e: BmiError) -> Self {
        BmiCliError::Engine(e)
    }
}

impl From<serde_json::Error> for BmiCliError {
    fn from(e: serde_json::Error) -> Self {
        BmiCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BmiCliError> for CliError {
    fn from(e: BmiCliError) -> Self {
        match e {
            BmiCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BmiCliError::Engine(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(
                    "Records need numeric height and mass; sex and age are optional".to_string(),
                ),
            },
            BmiCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            BmiCliError::NoSubjects => CliError {
                code: "NO_SUBJECTS".to_string(),
                message: "No subject records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
        }
    }
}
