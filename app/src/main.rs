use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cinerank_app::init_tracing();

    // Optional explicit config file; otherwise the XDG location is used.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    cinerank_app::run(config_path).await
}
