use clap::Parser;

mod args;
mod svg;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match args::Args::parse().command {
        args::Commands::Svg(svg_args) => svg::svg_command(svg_args),
    }
}
