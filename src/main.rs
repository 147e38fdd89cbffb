use clap::Parser;
use teldir::shell::{menu, Session};
use teldir::utils::error::ErrorSeverity;
use teldir::utils::logger;
use teldir::{CliConfig, Command, Directory, DirectoryError, FileStore};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(cli.verbose, config.logging.level.as_deref());
    tracing::debug!("Resolved config: {:?}", config);

    let store = FileStore::new(config.store_path());
    let directory = Directory::open(store, config.options());
    tracing::info!(
        "Loaded {} subscribers from {}",
        directory.len(),
        config.store_path()
    );

    let mut session = Session::new(directory);

    let command = cli.command();
    if command == Command::Menu {
        return menu::run_menu(&mut session, &mut menu::Terminal);
    }

    let outcome = session.execute(&command);
    session.finish()?;

    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(error: &DirectoryError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 3,
        ErrorSeverity::High => 1,
    }
}
