fn main() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taxonomy_sunburst=info")),
        )
        .init();

    if let Err(err) = taxonomy_sunburst::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
