mod canvas;
mod config;
mod curve;
mod knot;
mod settings;
mod terminal;

use clap::Parser;
use config::{KnotConfig, StyleSpec};
use settings::Settings;
use std::io;
use terminal::Terminal;

const DEFAULT_STYLE: &str = "192,92,32,0.9,0.5,0.6";

#[derive(Parser)]
#[command(name = "trefoil")]
#[command(version = "0.2.0")]
#[command(about = "Terminal-based animated trefoil knot effect", long_about = None)]
struct Cli {
    /// Number of phase-offset strands tracing the knot
    #[arg(short = 'n', long)]
    strands: Option<usize>,

    /// Stroke style: six comma-separated numbers "R,G,B,A1,A2,A3"
    /// (base color plus one opacity per stroke pass)
    #[arg(short, long)]
    style: Option<String>,

    /// Frame delay in seconds
    #[arg(short, long)]
    time: Option<f32>,

    /// Render one full revolution and print the final frame to stdout
    #[arg(short, long)]
    print: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load();

    let strands = cli
        .strands
        .or(settings.knot.strands)
        .unwrap_or(6)
        .max(1);
    let time_step = cli.time.or(settings.knot.time).unwrap_or(0.012).max(0.0);

    let style_spec = cli
        .style
        .or(settings.knot.style)
        .unwrap_or_else(|| DEFAULT_STYLE.to_string());
    let style = StyleSpec::parse(&style_spec);
    if !style.is_valid() {
        eprintln!("Malformed style '{}': expected \"R,G,B,A1,A2,A3\".", style_spec);
        eprintln!("Bad components will render as black.");
    }

    let config = KnotConfig {
        strands,
        style,
        time_step,
        print: cli.print,
    };

    if config.print {
        knot::print_frame(&config)?;
    } else {
        let mut term = Terminal::new(true)?;
        knot::run(&mut term, &config)?;
    }

    Ok(())
}
