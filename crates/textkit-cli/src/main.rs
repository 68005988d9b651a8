use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use textkit_config::Config;
use textkit_files::Files;
use tracing_subscriber::EnvFilter;

pub mod app;

use self::app::App;

#[derive(Parser, Debug)]
#[command(name = "textkit", about = "Tokenize, normalize and lemmatize text")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model to load (defaults to en_core_web_sm)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Directory holding installed model packages
    #[arg(long, global = true)]
    models_dir: Option<PathBuf>,

    /// Only use the packages bundled with this binary
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lowercase tokens with whitespace removed
    Preprocess(TextArgs),

    /// Lemmas without punctuation or stop words
    Deep(TextArgs),

    /// One JSON object per token
    Tokens(TextArgs),

    /// Install a model package
    Download {
        name: Option<String>,
        /// Reinstall even if already present
        #[arg(long)]
        force: bool,
    },

    /// List installed models
    Models,

    /// Uninstall a model package
    Remove { name: String },
}

#[derive(clap::Args, Debug)]
struct TextArgs {
    /// Text to process; read from stdin when omitted
    text: Option<String>,

    /// Read the text from a file instead
    #[arg(long, conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TextArgs {
    fn read(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input {
            return Files::read_to_string(path);
        }

        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    }

    fn emit(&self, result: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => Files::write_string(path, &format!("{result}\n")),
            None => {
                println!("{result}");
                Ok(())
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if std::env::var("TEXTKIT_LOG_JSON").is_ok_and(|v| v == "1") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };

    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if let Some(dir) = &cli.models_dir {
        config.model.models_dir = dir.display().to_string();
    }
    if cli.offline {
        config.registry.offline = true;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring .env: {e}");
        }
    }
    init_logging();

    let cli = Cli::parse();
    let app = App::new(load_config(&cli)?)?;

    match &cli.command {
        Commands::Preprocess(args) => {
            let text = args.read()?;
            args.emit(&app.preprocess(&text).await?)?;
        }
        Commands::Deep(args) => {
            let text = args.read()?;
            args.emit(&app.deep_preprocess(&text).await?)?;
        }
        Commands::Tokens(args) => {
            let text = args.read()?;
            args.emit(&app.tokens_jsonl(&text).await?)?;
        }
        Commands::Download { name, force } => {
            let name = name.as_deref().unwrap_or(&app.config().model.name);
            let path = app.download(name, *force).await?;
            println!("{}", path.display());
        }
        Commands::Models => {
            for name in app.installed_models().await? {
                println!("{name}");
            }
        }
        Commands::Remove { name } => {
            app.remove(name).await?;
        }
    }

    Ok(())
}
