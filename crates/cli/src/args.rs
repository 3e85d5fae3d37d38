use clap::{Parser, Subcommand};

#[derive(clap::Args, Debug)]
pub struct SvgArgs {
    pub stl_path: String,

    /// Output path for the svg file.
    #[arg(short, long)]
    pub output: String,

    /// Distance between cutting planes.
    #[arg(short, long, default_value_t = 0.2)]
    pub layer_height: f32,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Svg(SvgArgs),
}
