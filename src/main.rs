use clap::Parser;

#[derive(clap::Parser)]
struct Opts {
    /// TOML file with `base_address` and `timeout_secs`.
    #[clap(long)]
    config: Option<std::path::PathBuf>,

    /// Overrides the base address from the config file.
    #[clap(long)]
    base_address: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Fetch an access token.
    Token { app_id: String },

    /// Reset the access token.
    Refresh { app_id: String },

    /// Screen a piece of text.
    Text { text: String },

    /// Screen a local image.
    Image { path: std::path::PathBuf },

    /// Screen an image by URL.
    ImageUrl { url: String },
}

fn load_config(opts: &Opts) -> Result<content_sdk::Config, anyhow::Error> {
    let mut config = match &opts.config {
        Some(path) => toml::from_str::<content_sdk::Config>(std::str::from_utf8(&std::fs::read(path)?)?)?,
        None => content_sdk::Config::default(),
    };
    if let Some(base_address) = &opts.base_address {
        config.base_address = base_address.clone();
    }
    Ok(config)
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "pass"
    } else {
        "reject"
    }
}

fn print_result(result: &content_sdk::ModerationResult) {
    println!("{}\t{}", verdict(result.passed), result.message);
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("content_sdk=info")).init();

    let opts = Opts::parse();
    let config = load_config(&opts)?;
    log::info!("using {}", config.base_address);

    let client = content_sdk::Client::from_config(&config)?;

    match opts.command {
        Command::Token { app_id } => {
            let token = client.access_token(&app_id).await?;
            println!("{}", token.token);
        }
        Command::Refresh { app_id } => {
            client.refresh_access_token(&app_id).await?;
            log::info!("access token for {} reset", app_id);
        }
        Command::Text { text } => {
            println!("{}", verdict(client.text_security_check(&text).await));
        }
        Command::Image { path } => {
            print_result(&client.image_security_check_from_path(&path).await?);
        }
        Command::ImageUrl { url } => {
            print_result(&client.image_security_check_from_url(&url).await?);
        }
    }

    Ok(())
}
