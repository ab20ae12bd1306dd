use {
    anyhow::{Context, Result as Anyhow},
    camino::Utf8PathBuf as PathBuf,
    clap::Parser,
    sprite::{Config, Form, Label, Threshold},
    std::{io::Write, process::ExitCode},
};

/// Convert an image to a 0/1 sprite pixel array.
///
/// Pixels darker than the threshold become 1, the rest 0.
#[derive(Debug, Parser)]
#[command(name = "convert", version)]
struct Args {
    /// Image to convert (PNG, JPEG, BMP, GIF, TGA)
    image_path: PathBuf,

    /// Brightness threshold, 0-255; pixels darker than this become 1
    #[arg(default_value_t = 128, allow_negative_numbers = true)]
    threshold: i32,

    /// Resize to this width before converting, keeping aspect ratio
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    target_width: Option<u32>,

    /// Emit a bare nested array instead of a named constant
    #[arg(long, conflicts_with = "label")]
    compact: bool,

    /// Name of the emitted constant
    #[arg(long, default_value = Label::DEFAULT)]
    label: Label,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Config {
        let form = if self.compact {Form::Compact} else {Form::Named(self.label)};
        Config {
            path: self.image_path,
            threshold: Threshold(self.threshold),
            target_wide: self.target_width,
            form,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {ExitCode::FAILURE} else {ExitCode::SUCCESS};
        }
    };

    log_init(if args.verbose {log::LevelFilter::Debug} else {log::LevelFilter::Info});

    let config = args.into_config();
    if !config.path.exists() {
        eprintln!("Error: File not found: {}", config.path);
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Anyhow<()> {
    log::debug!("threshold {:?}, target width {:?}", config.threshold, config.target_wide);

    let converted = sprite::convert(config)
        .with_context(|| format!("converting {}", config.path))?;

    // the literal is fully rendered before anything reaches stdout
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", converted.text)
        .and_then(|()| stdout.flush())
        .context("writing output")?;

    eprintln!("{}", converted.summary);
    Ok(())
}

fn log_init(level: log::LevelFilter) {
    use simplelog::*;
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Never);
}
