use anyhow::Context;
use clap::Parser;
use pye::config::cli::Command;
use pye::domain::model::{DocumentId, EngineOption, Preferences};
use pye::utils::error::{ErrorSeverity, PyeError};
use pye::utils::{logger, validation::Validate};
use pye::{CliConfig, EngineFactory, EngineSettings, EnvConfig, Session};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Err(e) = logger::init_logger(cli.log_format, cli.verbose) {
        exit_with(e);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let env = EnvConfig::from_env();
    let settings = match EngineSettings::load(&cli.overrides(), cli.config.as_deref(), &env) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    match &cli.command {
        Command::Probe { document, settings: extra } => {
            if let Err(e) = probe(&settings, *document, extra) {
                exit_with(e);
            }
        }
        Command::Header { output } => {
            let header = pye::header::render_header();
            match output {
                Some(path) => {
                    std::fs::write(path, header)
                        .with_context(|| format!("writing header to {}", path))?;
                    tracing::info!("📁 Header written to {}", path);
                }
                None => print!("{}", header),
            }
        }
        Command::Options { prefs } => {
            let mut preferences = settings.preferences.unwrap_or_default();
            for (key, value) in prefs {
                if let Err(e) = preferences.set_pref(key, value) {
                    exit_with(e);
                }
            }
            print_options(&preferences);
        }
    }

    Ok(())
}

fn probe(
    settings: &EngineSettings,
    document: Option<i32>,
    extra: &[(EngineOption, i32)],
) -> pye::Result<()> {
    settings.validate()?;

    let engine = EngineFactory::from_config(settings)?;
    let session = Session::new(engine);

    session.start(&settings.data_dir)?;
    if let Some(id) = document {
        session.open_document(DocumentId(id));
    }
    if let Some(preferences) = &settings.preferences {
        session.apply(preferences)?;
    }
    for (option, value) in extra {
        session.set(*option, *value);
    }

    println!("engine: {}", session.engine().kind());
    println!("data_dir: {}", settings.data_dir);
    println!("option: {}", session.option());
    Ok(())
}

fn print_options(preferences: &Preferences) {
    for (key, value) in preferences.entries() {
        println!("{:<22} {}", key, value);
    }
    for (option, value) in preferences.settings() {
        println!("set_option({}, {})  # {}", option.id(), value, option);
    }
}

fn exit_with(e: PyeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
