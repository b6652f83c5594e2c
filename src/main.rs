// SettingsVault - main.rs
//
// Terminal host for the profile store. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Prompts (naming, overwrite confirmation, profile selection) on stdin
// 4. Rendering of store failures as user feedback

use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use settingsvault::app::dialog::{
    self, HostPrompts, LoadChoice, LoadOutcome, SaveFlow, SaveOutcome,
};
use settingsvault::app::store::{ProfileListing, ProfileStore};
use settingsvault::core::category;
use settingsvault::core::merge::{merge_payload, MergeMode, Mergeable};
use settingsvault::core::name::{CategoryName, ProfileName};
use settingsvault::core::settings::{BillList, DrugPolicy, ItemFilter, OperationQueue, Outfit};
use settingsvault::platform::config::{self, PlatformPaths};
use settingsvault::platform::fs;
use settingsvault::util::error::{Result, StoreError, VaultError};
use settingsvault::util::{constants, logging};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// SettingsVault - named profiles for storage filters, bills, drug policies
/// and operation queues.
#[derive(Parser, Debug)]
#[command(name = "settingsvault", version, about)]
struct Cli {
    /// Profile root directory (overrides config.toml and the platform default).
    #[arg(short = 'r', long = "root", global = true)]
    root: Option<PathBuf>,

    /// Config file to use instead of the platform config.toml.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the profiles stored in a category.
    List { category: String },

    /// List the categories that hold profiles.
    Categories,

    /// Save a JSON settings file as a named profile.
    Save {
        category: String,
        /// Profile name (prompted for when omitted).
        name: Option<String>,
        /// JSON file holding the settings to save.
        #[arg(long)]
        from: PathBuf,
        /// Replace an existing profile without asking.
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Load a profile: print it, or merge it into a JSON settings file.
    Load {
        category: String,
        /// Profile name (chosen from a list when omitted; requires --into).
        name: Option<String>,
        /// JSON settings file to load into (created if missing).
        #[arg(long)]
        into: Option<PathBuf>,
        /// Shape of the settings in --into.
        #[arg(long, value_enum, default_value_t = PayloadKind::Filter)]
        kind: PayloadKind,
        /// Append to the existing settings instead of replacing them.
        #[arg(short = 'a', long)]
        append: bool,
    },

    /// Delete a profile.
    Delete { category: String, name: String },

    /// Show the bill category for a crafting station definition.
    Workbench { def_name: String },
}

/// Settings shapes the CLI can merge.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PayloadKind {
    Filter,
    Outfit,
    Bills,
    Drugs,
    Operations,
}

fn main() {
    let cli = Cli::parse();

    let paths = PlatformPaths::resolve();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "SettingsVault starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config problem; using default");
    }

    // Profile root: CLI override > config.toml > platform default.
    let root = cli
        .root
        .clone()
        .or_else(|| app_config.profiles_root.clone())
        .unwrap_or_else(|| paths.profiles_dir.clone());
    tracing::debug!(root = %root.display(), "Profile root");

    let store = ProfileStore::from_config(root, &app_config);

    if let Err(e) = run(cli.command, &store) {
        tracing::warn!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(command: Command, store: &ProfileStore) -> Result<()> {
    match command {
        Command::List { category } => {
            let listing = store.list_profiles(&category)?;
            if listing.is_empty() {
                println!("No profiles in '{}'.", listing.category());
            }
            print_listing(&listing);
        }

        Command::Categories => {
            for category in store.list_categories()? {
                println!("{category}");
            }
        }

        Command::Save {
            category,
            name,
            from,
            force,
        } => {
            let payload: serde_json::Value = read_json(&from)?;
            save(store, &category, name.as_deref(), &payload, force)?;
        }

        Command::Load {
            category,
            name,
            into,
            kind,
            append,
        } => {
            let mode = if append {
                MergeMode::Append
            } else {
                MergeMode::Replace
            };
            match (into, name) {
                (Some(into), name) => match kind {
                    PayloadKind::Filter => {
                        load_into::<ItemFilter>(store, &category, name.as_deref(), &into, mode)?
                    }
                    PayloadKind::Outfit => {
                        load_into::<Outfit>(store, &category, name.as_deref(), &into, mode)?
                    }
                    PayloadKind::Bills => {
                        load_into::<BillList>(store, &category, name.as_deref(), &into, mode)?
                    }
                    PayloadKind::Drugs => {
                        load_into::<DrugPolicy>(store, &category, name.as_deref(), &into, mode)?
                    }
                    PayloadKind::Operations => load_into::<OperationQueue>(
                        store,
                        &category,
                        name.as_deref(),
                        &into,
                        mode,
                    )?,
                },
                (None, Some(name)) => {
                    let profile = store.load_profile::<serde_json::Value>(&category, &name)?;
                    let text = serde_json::to_string_pretty(profile.payload()).map_err(|e| {
                        VaultError::Payload {
                            path: PathBuf::from("<stdout>"),
                            source: e,
                        }
                    })?;
                    println!("{text}");
                }
                (None, None) => {
                    return Err(VaultError::Usage {
                        message: "give a profile name, or --into to choose one from a list",
                    });
                }
            }
        }

        Command::Delete { category, name } => {
            store.delete_profile(&category, &name)?;
            println!("Deleted '{name}' from '{category}'.");
        }

        Command::Workbench { def_name } => match category::workbench_category(&def_name) {
            Some(category) => println!("{category}"),
            None => println!("'{def_name}' has no saveable bills."),
        },
    }
    Ok(())
}

/// Save with an explicit name, or run the interactive naming flow.
fn save(
    store: &ProfileStore,
    category: &str,
    name: Option<&str>,
    payload: &serde_json::Value,
    force: bool,
) -> Result<()> {
    let mut host = TerminalHost::new();

    let Some(name) = name else {
        if !host.interactive {
            return Err(VaultError::Usage {
                message: "no profile name given and stdin is not a terminal",
            });
        }
        match SaveFlow::new(store, category, payload, "")?.run(&mut host)? {
            SaveOutcome::Saved(summary) => println!("Saved '{}'.", summary.name),
            SaveOutcome::Cancelled => println!("Cancelled."),
        }
        return Ok(());
    };

    match store.save_profile(category, name, payload, force) {
        Ok(summary) => println!("Saved '{}'.", summary.name),
        Err(StoreError::ProfileExists { .. }) if host.interactive => {
            let category = store.category(category)?;
            let name = store.profile_name(name)?;
            if host.confirm_overwrite(&category, &name) {
                store.save_profile(category.as_str(), name.as_str(), payload, true)?;
                println!("Replaced '{name}'.");
            } else {
                println!("Cancelled.");
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Merge a profile into the settings file at `into`, writing it back atomically.
fn load_into<P>(
    store: &ProfileStore,
    category: &str,
    name: Option<&str>,
    into: &Path,
    mode: MergeMode,
) -> Result<()>
where
    P: Mergeable + Default + Serialize + DeserializeOwned,
{
    let mut live: P = if into.exists() {
        read_json(into)?
    } else {
        P::default()
    };

    let loaded_name = match name {
        Some(name) => {
            let profile = store.load_profile::<P>(category, name)?;
            let name = profile.name().clone();
            live = merge_payload(live, profile.into_payload(), mode);
            name
        }
        None => {
            let mut host = TerminalHost::new();
            match dialog::run_load_flow(store, &mut host, category, &mut live, mode)? {
                LoadOutcome::Loaded(name) => name,
                LoadOutcome::Cancelled => {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
        }
    };

    let text = serde_json::to_string_pretty(&live).map_err(|e| VaultError::Payload {
        path: into.to_path_buf(),
        source: e,
    })?;
    fs::write_atomic(into, text.as_bytes()).map_err(|e| VaultError::Io {
        path: into.to_path_buf(),
        operation: "write settings",
        source: e,
    })?;

    println!("Loaded '{loaded_name}' into '{}'.", into.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| VaultError::Io {
        path: path.to_path_buf(),
        operation: "read settings",
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| VaultError::Payload {
        path: path.to_path_buf(),
        source: e,
    })
}

fn print_listing(listing: &ProfileListing) {
    for summary in listing {
        let local = summary.last_modified.with_timezone(&chrono::Local);
        println!("{:<32} {}", summary.name, local.format("%Y-%m-%d %H:%M"));
    }
}

// =============================================================================
// Terminal prompts
// =============================================================================

/// `HostPrompts` over stdin/stdout. End of input counts as cancellation.
struct TerminalHost {
    interactive: bool,
}

impl TerminalHost {
    fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }

    fn ask(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl HostPrompts for TerminalHost {
    fn prompt_name(&mut self, category: &CategoryName, suggestion: &str) -> Option<String> {
        let answer = self.ask(&format!("Profile name in '{category}' [{suggestion}]: "))?;
        if answer.is_empty() {
            Some(suggestion.to_string())
        } else {
            Some(answer)
        }
    }

    fn confirm_overwrite(&mut self, category: &CategoryName, name: &ProfileName) -> bool {
        self.ask(&format!("'{name}' already exists in '{category}'. Replace it? [y/N]: "))
            .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"))
    }

    fn choose_profile(&mut self, listing: &ProfileListing) -> LoadChoice {
        if listing.is_empty() {
            println!("No profiles in '{}'.", listing.category());
            return LoadChoice::Cancel;
        }
        for (i, summary) in listing.iter().enumerate() {
            println!("{:>3}. {}", i + 1, summary.name);
        }

        let Some(answer) = self.ask("Number or name to load, 'd <number>' to delete, empty to cancel: ")
        else {
            return LoadChoice::Cancel;
        };
        if answer.is_empty() {
            return LoadChoice::Cancel;
        }

        let resolve = |s: &str| -> String {
            s.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| listing.iter().nth(i))
                .map_or_else(|| s.to_string(), |summary| summary.name.to_string())
        };
        match answer.strip_prefix("d ") {
            Some(target) => LoadChoice::Delete(resolve(target.trim())),
            None => LoadChoice::Load(resolve(&answer)),
        }
    }

    fn report(&mut self, error: &StoreError) {
        tracing::warn!(error = %error, kind = ?error.kind(), "Profile operation failed");
        eprintln!("{error}");
    }
}
