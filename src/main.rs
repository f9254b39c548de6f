use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;

use slab_compiler::{Canvas, Color, ColorState, CompileOptions, compile_with, expand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented outline of rows and cells
    Outline,
    /// JSON, with colors as lowercase #rrggbb
    Json,
    /// Colored blocks in the terminal
    Paint,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program to compile (read from stdin if omitted)
    #[arg(value_name = "PROGRAM")]
    program: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// Do not expand `i` into copies of the program
    #[arg(short = 'n', long)]
    no_expand: bool,

    /// Starting base color, as #rgb or #rrggbb
    #[arg(short = 'c', long, value_name = "HEX")]
    color: Option<Color>,

    /// Starting lightness multiplier
    #[arg(short = 'l', long, default_value_t = 1.0)]
    lightness: f64,

    /// Width of the painted area (defaults to the terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Height of the painted area (defaults to the terminal height)
    #[arg(long)]
    height: Option<u16>,

    /// Print the expanded program instead of compiling it
    #[arg(short = 'e', long)]
    expanded: bool,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().filter_or("SLAB_LOG", "warn");
    env_logger::init_from_env(env);

    let args = Args::parse();
    if !args.lightness.is_finite() || args.lightness < 1.0 {
        bail!("Lightness must be a number no less than 1.0.");
    }

    let program = match args.program {
        Some(program) => program,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read program from stdin")?;
            buf.trim_end_matches(['\n', '\r']).to_string()
        }
    };

    if args.expanded {
        let expansion = expand(&program);
        info!(
            "{} round(s), {} chars, budget {}",
            expansion.rounds,
            expansion.program.len(),
            expansion.budget
        );
        println!("{}", expansion.program);
        return Ok(());
    }

    let options = CompileOptions {
        allow_expansion: !args.no_expand,
        inherited: ColorState::new(args.color, args.lightness),
    };
    let grid = compile_with(&program, options);
    info!("{} row(s), {} cell(s)", grid.rows.len(), grid.cell_count());

    let mut stdout = io::stdout().lock();
    match args.format {
        Format::Outline => write!(stdout, "{}", grid)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut stdout, &grid)?;
            writeln!(stdout)?;
        }
        Format::Paint => {
            let (term_width, term_height) = crossterm::terminal::size().unwrap_or((80, 24));
            let width = args.width.unwrap_or(term_width);
            // Leave a line for the prompt.
            let height = args.height.unwrap_or(term_height.saturating_sub(1));
            let mut canvas = Canvas::new(usize::from(width), usize::from(height));
            canvas.draw(&grid);
            canvas.paint(&mut stdout)?;
        }
    }
    Ok(())
}
