use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mondrian::{
    CanvasSize, Sketch, SketchConfig, Surface, ThreadRandom, Typography, fit_square_extent,
    save_png,
};

#[derive(Parser, Debug)]
#[command(name = "mondrian", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate compositions and export them as PNGs.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Square canvas extent in pixels.
    #[arg(long, default_value_t = 1000)]
    size: u32,

    /// Fit the canvas to a viewport (width height) instead of --size.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    viewport: Option<Vec<u32>>,

    /// Number of compositions to generate.
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Sketch configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Title font file; conventional font directories are scanned when
    /// omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SketchConfig::from_path(path)?,
        None => SketchConfig::default(),
    };
    let size = match args.viewport.as_deref() {
        Some([w, h]) => fit_square_extent(*w, *h),
        _ => args.size,
    };

    let mut rng = ThreadRandom::new();
    let mut typography = Typography::discover(args.font.as_deref())?;
    if typography.is_none() {
        eprintln!("no usable font found; compositions will have no title");
    }

    let mut sketch = Sketch::new(CanvasSize::square(size), config, &mut rng)?;
    for i in 0..args.count {
        if i > 0 {
            sketch.reset(&mut rng)?;
        }

        let mut surface = Surface::new(sketch.canvas())?;
        sketch.draw(&mut surface, typography.as_mut(), &mut rng)?;
        surface.render();

        let out = args.out_dir.join(sketch.export_file_name());
        save_png(&surface.frame(), &out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
