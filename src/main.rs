use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use admin_store::utils::io::{parse_field, prompt_with_confirmation};
use admin_store::utils::logging::initialize_logging;
use admin_store::utils::time::format_timestamp;
use admin_store::{AdminProfile, AdminStore, NewAdmin, StoreConfig, ADMINS_FILE};

fn cli() -> Command {
    Command::new("admin-store")
        .about("Manage administrator accounts stored in a JSON file")
        .arg(
            Arg::new("file")
                .long("file")
                .global(true)
                .help("Path to the admins file")
                .value_name("PATH")
                .default_value(ADMINS_FILE)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("cost")
                .long("cost")
                .global(true)
                .help("bcrypt cost for new passwords [default: 10]")
                .value_name("N")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .global(true)
                .help("Append logs to this file instead of stderr")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand_required(true)
        .subcommand(Command::new("list").about("List all administrators"))
        .subcommand(
            Command::new("show")
                .about("Show a single administrator")
                .arg(Arg::new("id").long("id").help("Look up by id"))
                .arg(
                    Arg::new("username")
                        .long("username")
                        .help("Look up by username")
                        .conflicts_with("id"),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Create a new administrator")
                .arg(
                    Arg::new("username")
                        .help("Username for the new administrator")
                        .required(true),
                )
                .arg(
                    Arg::new("field")
                        .long("field")
                        .help("Extra field to store, as key=value (repeatable)")
                        .value_name("KEY=VALUE")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Check an administrator's password")
                .arg(Arg::new("username").help("Username to check").required(true)),
        )
}

fn print_profile(profile: &AdminProfile) {
    println!("Id: {}", profile.id);
    println!("Username: {}", profile.username);
    println!("Created: {}", format_timestamp(&profile.created_at));
    for (key, value) in &profile.extra {
        println!("{}: {}", key, value);
    }
    println!();
}

fn read_new_password() -> Result<String, String> {
    loop {
        println!("Enter password:");
        let password =
            rpassword::read_password().map_err(|e| format!("Failed to read password: {}", e))?;
        if password.is_empty() {
            println!("Password must not be empty.");
            continue;
        }

        println!("Confirm password:");
        let confirm =
            rpassword::read_password().map_err(|e| format!("Failed to read password: {}", e))?;
        if password != confirm {
            println!("Passwords don't match. Please try again.");
            continue;
        }

        break Ok(password);
    }
}

async fn run(store: &AdminStore, matches: &ArgMatches) -> Result<(), String> {
    match matches.subcommand() {
        Some(("list", _)) => {
            let admins = store.list_all().await;
            if admins.is_empty() {
                println!("No administrators found.");
            }
            for admin in admins {
                print_profile(&admin.into_profile());
            }
            Ok(())
        }
        Some(("show", sub)) => {
            let admin = if let Some(id) = sub.get_one::<String>("id") {
                store.find_by_id(id).await
            } else if let Some(username) = sub.get_one::<String>("username") {
                store.find_by_username(username).await
            } else {
                return Err("Provide --id or --username".to_string());
            };

            match admin {
                Some(admin) => {
                    print_profile(&admin.into_profile());
                    Ok(())
                }
                None => Err("Administrator not found".to_string()),
            }
        }
        Some(("create", sub)) => {
            let username = sub
                .get_one::<String>("username")
                .ok_or("Username is required")?;

            if store.find_by_username(username).await.is_some() {
                let proceed = prompt_with_confirmation(
                    &format!("An administrator named '{}' already exists.", username),
                    "Create another one anyway?",
                    false,
                )
                .map_err(|e| format!("Failed to read input: {}", e))?;
                if !proceed {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let mut data = NewAdmin::new(username.as_str(), read_new_password()?);
            for raw in sub.get_many::<String>("field").into_iter().flatten() {
                let (key, value) = parse_field(raw)
                    .ok_or_else(|| format!("Invalid field '{}', expected key=value", raw))?;
                data = data.with_field(key, value);
            }

            let profile = store.create(data).await.map_err(|e| e.to_string())?;
            println!("Administrator created.");
            print_profile(&profile);
            Ok(())
        }
        Some(("login", sub)) => {
            let username = sub
                .get_one::<String>("username")
                .ok_or("Username is required")?;
            println!("Enter password:");
            let password =
                rpassword::read_password().map_err(|e| format!("Failed to read password: {}", e))?;

            match store.authenticate(username, &password).await {
                Some(profile) => {
                    println!("Credentials valid.");
                    print_profile(&profile);
                    Ok(())
                }
                None => Err("Invalid username or password".to_string()),
            }
        }
        _ => Err("Unknown command".to_string()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();

    let log_file = matches.get_one::<PathBuf>("log-file");
    if let Err(e) = initialize_logging(log_file.map(PathBuf::as_path)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let mut config = StoreConfig::default();
    if let Some(file) = matches.get_one::<PathBuf>("file") {
        config.data_file = file.clone();
    }
    if let Some(cost) = matches.get_one::<u32>("cost") {
        config.hash_cost = *cost;
    }

    let store = match AdminStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open admin store: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&store, &matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
