use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{
    domain::{service_label, ORGANIZATION, SERVICES},
    phone::PhoneNumber,
};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Formats raw input the way the order form phone field does.
    FormatPhone { raw: String },
    /// Prints the organization JSON-LD record embedded on the landing page.
    Organization {
        #[arg(long)]
        pretty: bool,
    },
    /// Lists the service chips with their indices.
    Services,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::FormatPhone { raw } => {
            let phone = PhoneNumber::from_input(&raw);
            println!("{phone}");
            if !phone.is_complete() {
                eprintln!("incomplete number: {} of 11 digits", phone.digits().len());
            }
        }
        Command::Organization { pretty } => {
            let ld = ORGANIZATION.json_ld();
            let text = if pretty {
                serde_json::to_string_pretty(&ld)
            } else {
                serde_json::to_string(&ld)
            }
            .context("failed to serialize organization record")?;
            println!("{text}");
        }
        Command::Services => {
            for index in 0..SERVICES.len() {
                let label = service_label(index).context("service index out of range")?;
                println!("{index}\t{label}");
            }
        }
    }

    Ok(())
}
