// SPDX-License-Identifier: PMPL-1.0-or-later

//! kwoon: contact-form sanitization and validation
//!
//! Checks recorded submissions against a form schema, replays scripted
//! typing sessions through the event binder, and sweeps directories of
//! submissions for recurring problems.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use kwoon::dom::Page;
use kwoon::events::replay::{load_script, replay};
use kwoon::events::FormController;
use kwoon::i18n::Lang;
use kwoon::logging::init_tracing;
use kwoon::report::{check_page, resolve_lang, ReportFormatter, ReportOutputFormat};
use kwoon::schema::FormSchema;
use kwoon::submission::Submission;
use kwoon::sweep::{self, SweepConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kwoon")]
#[command(version)]
#[command(about = "Contact-form sanitization and validation for the school site")]
#[command(long_about = None)]
struct Cli {
    /// Log each field verdict to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one recorded submission
    Check {
        /// Submission file (JSON or YAML map of field id to value)
        #[arg(value_name = "SUBMISSION")]
        submission: PathBuf,

        #[command(flatten)]
        form: FormArgs,

        /// Print the report as JSON or YAML instead of a table
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Write the report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a scripted sequence of form events
    Replay {
        /// Script file (JSON or YAML list of steps)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        #[command(flatten)]
        form: FormArgs,

        /// Emit step outcomes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every submission under a directory
    Sweep {
        #[arg(value_name = "DIRECTORY")]
        directory: PathBuf,

        #[command(flatten)]
        form: FormArgs,

        /// Only list submissions that failed
        #[arg(long)]
        invalid_only: bool,

        /// Write the sweep report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress the summary table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the validation message catalog
    Messages {
        #[arg(short, long, value_enum)]
        lang: Option<LangArg>,
    },

    /// Print the effective form schema as YAML
    Schema {
        /// Schema file to check and print (default: built-in contact form)
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FormArgs {
    /// Form schema file (default: built-in contact form)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Message language, overriding the page's lang attribute
    #[arg(short, long, value_enum)]
    lang: Option<LangArg>,

    /// Value of the page's lang attribute (e.g. "en-CA")
    #[arg(long)]
    page_lang: Option<String>,
}

impl FormArgs {
    fn load_schema(&self) -> Result<FormSchema> {
        match &self.schema {
            Some(path) => FormSchema::load(path),
            None => Ok(FormSchema::contact()),
        }
    }

    fn page(&self, schema: &FormSchema) -> Page {
        let page = Page::from_schema(schema);
        match &self.page_lang {
            Some(tag) => page.with_lang(tag.clone()),
            None => page,
        }
    }

    fn lang(&self) -> Option<Lang> {
        self.lang.map(Into::into)
    }
}

// CLI argument types
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LangArg {
    Fr,
    En,
}

impl From<LangArg> for Lang {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Fr => Lang::Fr,
            LangArg::En => Lang::En,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            submission,
            form,
            format,
            output,
        } => {
            let schema = form.load_schema()?;
            let values = Submission::load(&submission)?;

            let mut page = form.page(&schema);
            page.fill(values.entries());
            let lang = resolve_lang(&page, form.lang());
            let report = check_page(&mut page, lang);

            let formatter = ReportFormatter::new();
            if let Some(output_path) = output {
                let format = format
                    .or_else(|| ReportOutputFormat::from_path(&output_path))
                    .unwrap_or(ReportOutputFormat::Json);
                formatter.save(&report, format, &output_path)?;
                println!("Report saved to: {}", output_path.display());
            } else if let Some(format) = format {
                println!("{}", format.serialize(&report)?);
            } else {
                formatter.print(&report);
            }

            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Replay { script, form, json } => {
            let schema = form.load_schema()?;
            let steps = load_script(&script)?;

            let mut controller = FormController::new(form.page(&schema));
            if let Some(lang) = form.lang() {
                controller = controller.with_lang(lang);
            }
            let outcomes = replay(&mut controller, &steps)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            } else {
                for outcome in &outcomes {
                    let flag = |v: Option<bool>| match v {
                        Some(true) => "ok",
                        Some(false) => "invalid",
                        None => "-",
                    };
                    println!(
                        "{:>3}. {:<24} field: {:<8} form: {:<8}{}",
                        outcome.step,
                        outcome.event,
                        flag(outcome.dispatch.field_valid),
                        flag(outcome.dispatch.form_valid),
                        if outcome.dispatch.prevent_default {
                            "  (submit blocked)"
                        } else {
                            ""
                        }
                    );
                }
            }
        }

        Commands::Sweep {
            directory,
            form,
            invalid_only,
            output,
            quiet,
        } => {
            let config = SweepConfig {
                directory,
                lang: form
                    .lang()
                    .unwrap_or_else(|| Lang::from_tag(form.page_lang.as_deref())),
                schema: form.load_schema()?,
                invalid_only,
            };

            let report = sweep::run(&config)?;
            sweep::print_summary(&report, quiet);

            if let Some(output_path) = output {
                sweep::write_report(&report, &output_path)?;
                println!("Sweep report saved to: {}", output_path.display());
            }
        }

        Commands::Messages { lang } => {
            let formatter = ReportFormatter::new();
            match lang {
                Some(lang) => formatter.print_catalog(lang.into()),
                None => {
                    for lang in Lang::all() {
                        formatter.print_catalog(*lang);
                        println!();
                    }
                }
            }
        }

        Commands::Schema { schema } => {
            let schema = match schema {
                Some(path) => FormSchema::load(&path)?,
                None => FormSchema::contact(),
            };
            print!("{}", schema.to_yaml()?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
