//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use ruralaudit::config::Config;
use ruralaudit::core::models::{PartyKind, PartyRole, Status};
use ruralaudit::output::OutputMode;

/// ruralaudit - Due diligence checklists for rural property transactions
#[derive(Parser, Debug)]
#[command(
    name = "ruralaudit",
    version,
    about = "Due diligence checklists for rural property transactions",
    long_about = "Track the documents and certificates checked for each property and party \
                  in a rural purchase.\n\n\
                  The audit is kept in a Supabase project. Without credentials every change \
                  stays local to the current invocation."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.config/ruralaudit/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a config template to ~/.config/ruralaudit/config.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show audit progress
    Status,

    /// Manage properties
    Property {
        #[command(subcommand)]
        action: PropertyAction,
    },

    /// Manage buyers and sellers
    Party {
        #[command(subcommand)]
        action: PartyAction,
    },

    /// Manage checklist items
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Show or replace the general notes
    Notes {
        /// New notes (omit to show the current ones)
        text: Option<String>,
    },

    /// Ask the AI service for a risk verdict
    Analyze,

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum PropertyAction {
    /// List properties
    List,

    /// Add a property seeded with the standard checklist
    Add {
        /// Property name
        name: String,

        #[command(flatten)]
        fields: PropertyFields,
    },

    /// Show a property's checklist
    Show {
        /// Property id or name (defaults to the first property)
        property: Option<String>,
    },

    /// Edit property fields
    Edit {
        /// Property id or name
        property: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: PropertyFields,
    },

    /// Remove a property and its checklist
    Remove {
        /// Property id or name
        property: String,
    },
}

/// Registry fields of a property
#[derive(Args, Debug, Default)]
pub struct PropertyFields {
    /// Registry number
    #[arg(long)]
    pub matricula: Option<String>,

    /// Registry office
    #[arg(long)]
    pub cartorio: Option<String>,

    /// Area in hectares
    #[arg(long)]
    pub area: Option<String>,

    /// Municipality
    #[arg(long)]
    pub municipio: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PartyAction {
    /// List parties
    List {
        /// Only parties whose name or document contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a party seeded with the PF or PJ checklist
    Add {
        /// pf (individual) or pj (company)
        #[arg(short, long, default_value = "pf")]
        kind: PartyKind,

        /// buyer or seller
        #[arg(short, long)]
        role: PartyRole,

        /// Name (defaults to a placeholder)
        #[arg(short, long)]
        name: Option<String>,

        /// CPF or CNPJ
        #[arg(short, long)]
        doc: Option<String>,
    },

    /// Show a party's checklist
    Show {
        /// Party id or name
        party: String,
    },

    /// Edit party fields
    Edit {
        /// Party id or name
        party: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New CPF or CNPJ
        #[arg(long)]
        doc: Option<String>,

        /// New kind (pf or pj)
        #[arg(long)]
        kind: Option<PartyKind>,

        /// New role (buyer or seller)
        #[arg(long)]
        role: Option<PartyRole>,
    },

    /// Remove a party and its checklist
    Remove {
        /// Party id or name
        party: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemAction {
    /// Add an item to a property or party
    Add {
        /// Item name
        name: String,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Guidance text
        #[arg(short, long)]
        description: Option<String>,

        /// Property id or name (defaults to the first property)
        #[arg(long, conflicts_with = "party")]
        property: Option<String>,

        /// Party id or name
        #[arg(long)]
        party: Option<String>,
    },

    /// Record progress on an item
    Set {
        /// Item id or name
        item: String,

        /// New status: pending, waiting, ok, issue, expired, waived
        #[arg(short, long)]
        status: Option<Status>,

        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove an item
    Remove {
        /// Item id or name
        item: String,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let command = match cli.command {
        Some(Command::Version) => {
            print_version(output_mode);
            return Ok(ExitCode::SUCCESS);
        },
        None => {
            print_version(output_mode);
            if output_mode == OutputMode::Human {
                println!("\nRun 'ruralaudit --help' for usage");
                println!("Run 'ruralaudit init' to configure the remote store");
            }
            return Ok(ExitCode::SUCCESS);
        },
        Some(Command::Init { force }) => {
            let path = cli.config.unwrap_or_else(Config::config_path);
            return commands::init(&path, force, output_mode).map(exit_code);
        },
        Some(command) => command,
    };

    let config = Config::load(cli.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    let succeeded = runtime.block_on(async {
        match command {
            Command::Status => commands::status(&config, output_mode).await,
            Command::Property { action } => commands::property(&config, action, output_mode).await,
            Command::Party { action } => commands::party(&config, action, output_mode).await,
            Command::Item { action } => commands::item(&config, action, output_mode).await,
            Command::Notes { text } => commands::notes(&config, text, output_mode).await,
            Command::Analyze => commands::analyze(&config, output_mode).await,
            Command::Init { .. } | Command::Version => Ok(true),
        }
    })?;

    Ok(exit_code(succeeded))
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_version(mode: OutputMode) {
    if mode == OutputMode::Json {
        println!(
            "{}",
            serde_json::json!({
                "version": ruralaudit::VERSION
            })
        );
    } else {
        println!("ruralaudit v{}", ruralaudit::VERSION);
    }
}
