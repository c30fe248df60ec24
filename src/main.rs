use std::path::PathBuf;

use clap::Parser;

use studyhub_lib::config::AppConfig;

#[derive(Parser)]
#[command(name = "studyhub", about = "StudyHub local API server", version)]
struct Args {
    /// Config file (default: studyhub.toml in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the config
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,

    /// Data directory, overriding the config
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = Some(data_dir);
    }

    studyhub_lib::run(config).await
}
