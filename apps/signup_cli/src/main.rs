use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{config::normalize_base_url, load_settings, SignupFormController};
use shared::domain::{FormField, SubmissionStatus, PASSWORD_HINT};

#[derive(Parser, Debug)]
#[command(name = "furnest-signup", about = "Create a FurNest account")]
struct Args {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
    /// Overrides `base_url` from the config file and environment.
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn provided(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::FullName => self.full_name.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Password => self.password.as_deref(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        settings.base_url = normalize_base_url(base_url)?;
    }
    println!("API: {}", settings.signup_endpoint());

    let controller = SignupFormController::from_settings(&settings)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    for field in FormField::ALL {
        let value = match args.provided(field) {
            Some(value) => value.to_string(),
            None => prompt_field(&mut input, &mut output, field)?,
        };
        controller.set_field(field, value);
    }

    match controller.submit().await {
        SubmissionStatus::Success(message) => {
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
        SubmissionStatus::Error(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        status => {
            eprintln!("unexpected signup status: {status:?}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn prompt_field(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: FormField,
) -> Result<String> {
    if field == FormField::Password {
        writeln!(output, "{PASSWORD_HINT}")?;
    }
    write!(output, "{} ({}): ", field.label(), field.placeholder())?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("failed to read {}", field.label()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
