use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, ValueEnum};

use gantt_tool::persistence::tasks_to_csv_string;
use gantt_tool::render::{render_confluence, render_html, render_svg};
use gantt_tool::validation::validate_project;
use gantt_tool::{parser, resolver};

#[derive(Parser)]
#[command(name = "gantt-tool")]
#[command(version)]
#[command(about = "Generate dated Gantt charts from markdown project plans")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "svg")]
    format: OutputFormat,

    /// Input markdown file, or '-' for stdin
    input: String,

    /// Output file, or '-' for stdout
    output: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Html,
    Confluence,
    Json,
    Csv,
}

impl OutputFormat {
    fn label(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Html => "html",
            OutputFormat::Confluence => "confluence",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let input = if cli.input == "-" {
        let mut buf = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut buf) {
            fail(&format!("Error reading from stdin: {err}"));
        }
        buf
    } else {
        match fs::read_to_string(&cli.input) {
            Ok(content) => content,
            Err(err) => fail(&format!("Error reading input file: {err}")),
        }
    };

    let mut project = parser::parse(&input);

    if let Err(err) = validate_project(&project) {
        fail(&format!("Validation error: {err}"));
    }

    if let Err(err) = resolver::resolve(&mut project) {
        fail(&format!("Error resolving dependencies: {err}"));
    }

    let output = match cli.format {
        OutputFormat::Svg => render_svg(&project)
            .unwrap_or_else(|err| fail(&format!("Error rendering SVG: {err}"))),
        OutputFormat::Html => render_html(&project)
            .unwrap_or_else(|err| fail(&format!("Error rendering HTML: {err}"))),
        OutputFormat::Confluence => render_confluence(&project)
            .unwrap_or_else(|err| fail(&format!("Error rendering Confluence: {err}"))),
        OutputFormat::Json => match serde_json::to_string_pretty(&project) {
            Ok(json) => json + "\n",
            Err(err) => fail(&format!("Error exporting JSON: {err}")),
        },
        OutputFormat::Csv => tasks_to_csv_string(&project)
            .unwrap_or_else(|err| fail(&format!("Error exporting CSV: {err}"))),
    };

    if cli.output == "-" {
        if let Err(err) = io::stdout().write_all(output.as_bytes()) {
            fail(&format!("Error writing to stdout: {err}"));
        }
    } else {
        if let Err(err) = fs::write(&cli.output, &output) {
            fail(&format!("Error writing output file: {err}"));
        }
        eprintln!(
            "\u{2713} Generated Gantt chart ({}): {}",
            cli.format.label(),
            cli.output
        );
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(1);
}
