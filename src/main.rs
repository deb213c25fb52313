use std::{fs, path::PathBuf, str::FromStr};

#[cfg(feature = "png")]
use anyhow::anyhow;
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
#[cfg(feature = "png")]
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "png")]
use word_salad::word_search::WordSearch;
use word_salad::{generator::{WordSearchGenerator, WordSearchGeneratorSettings}, render, word_list::read_words};

#[derive(Parser)]
#[command(version, about)]
struct Opts
{
    /// Path to the word list, words are separated by whitespace or commas
    #[arg(long, default_value = "words")]
    words: PathBuf,

    /// Size of the grid as WIDTH:HEIGHT, defaults to 30:30
    #[arg(long)]
    size: Option<GridSize>,

    /// JSON file with generator settings, the other flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random positions tried per word before starting over
    #[arg(long)]
    tries_per_word: Option<u32>,

    /// Fresh grids tried before giving up
    #[arg(long)]
    attempts: Option<u32>,

    /// Seed to regenerate a puzzle
    #[arg(long)]
    seed: Option<u64>,

    /// Output type printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to the font used for the image
    #[cfg(feature = "png")]
    #[arg(long, default_value = "RobotoMono-Medium.ttf")]
    font: PathBuf,

    /// Where to write the puzzle image
    #[cfg(feature = "png")]
    #[arg(long, default_value = "out.png")]
    output: PathBuf,

    /// Also write an image with the hidden words highlighted
    #[cfg(feature = "png")]
    #[arg(long)]
    solution: Option<PathBuf>,

    /// Don't write any image
    #[cfg(feature = "png")]
    #[arg(long)]
    no_image: bool,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat
{
    #[default]
    Text,
    Solution,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GridSize
{
    width: usize,
    height: usize,
}

impl FromStr for GridSize
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self>
    {
        let Some((w, h)) = s.split_once(':') else { bail!("\"{s}\" is not in the WIDTH:HEIGHT format") };
        let width: usize = w.trim().parse().with_context(|| format!("invalid width \"{w}\""))?;
        let height: usize = h.trim().parse().with_context(|| format!("invalid height \"{h}\""))?;
        if width == 0 || height == 0 { bail!("grid size can't be 0"); }
        Ok(GridSize { width, height })
    }
}

fn settings(opts: &Opts) -> Result<WordSearchGeneratorSettings>
{
    let mut settings = match &opts.config
    {
        Some(path) =>
        {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => WordSearchGeneratorSettings::default(),
    };

    if let Some(size) = opts.size
    {
        settings.width = size.width;
        settings.height = size.height;
    }
    if let Some(tries) = opts.tries_per_word { settings.tries_per_word = tries; }
    if let Some(attempts) = opts.attempts { settings.max_attempts = attempts; }

    Ok(settings)
}

/// Generates the puzzle, writes the images and returns the text for stdout
///
/// Nothing is written and no text is returned unless every step succeeds.
fn run(opts: &Opts) -> Result<String>
{
    let generator = WordSearchGenerator
    {
        words: read_words(&opts.words).with_context(|| format!("reading words from {}", opts.words.display()))?,
        settings: settings(opts)?,
    };

    #[cfg(feature = "png")]
    if !opts.no_image && !opts.font.exists() { bail!("Font file \"{}\" does not exist", opts.font.display()); }

    let seed = opts.seed.unwrap_or_else(rand::random);
    info!(seed, words = generator.words.len(), width = generator.settings.width, height = generator.settings.height, "generating word search");

    let ws = generator.generate(&mut StdRng::seed_from_u64(seed)).with_context(|| format!("no word search generated (seed {seed})"))?;

    let text = match opts.format
    {
        OutputFormat::Text => render::spaced_text(&ws.grid),
        OutputFormat::Solution => format!("{}\n{}", render::solution_text(&ws), render::word_key(&ws)),
        OutputFormat::Json => serde_json::to_string_pretty(&ws)? + "\n",
    };

    #[cfg(feature = "png")]
    if !opts.no_image { write_images(&ws, opts)?; }

    Ok(text)
}

/// Paints every requested image before writing any, and removes the written ones if a later write fails
#[cfg(feature = "png")]
fn write_images(ws: &WordSearch, opts: &Opts) -> Result<()>
{
    use render::png::{load_font, paint_image, write_png, ImageStyle};

    let font = load_font(&opts.font).with_context(|| format!("loading font {}", opts.font.display()))?;

    let mut images = vec![(paint_image(ws, &font, &ImageStyle::default())?, &opts.output)];
    if let Some(path) = &opts.solution
    {
        images.push((paint_image(ws, &font, &ImageStyle { show_solution: true, ..Default::default() })?, path));
    }

    for (i, (img, path)) in images.iter().enumerate()
    {
        if let Err(err) = write_png(img, path)
        {
            for (_, written) in &images[..i]
            {
                if let Err(rm_err) = fs::remove_file(written) { warn!(path = %written.display(), error = %rm_err, "failed to remove image"); }
            }
            return Err(anyhow!(err).context(format!("writing image {}", path.display())));
        }
    }

    Ok(())
}

fn main() -> Result<()>
{
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opts = Opts::parse();
    print!("{}", run(&opts)?);

    Ok(())
}
