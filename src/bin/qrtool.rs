use card_qr::encoder::config;
use card_qr::render::{self, RenderOptions, parse_hex_color};
use card_qr::{ECLevel, Error, MaskPattern, QRCode, QrEncoder, Result, Version};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Offline QR code generator")]
struct Cli {
    /// Log generation details (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a QR code PNG
    Generate {
        #[command(flatten)]
        symbol: SymbolArgs,
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,
        /// Image side in pixels
        #[arg(long)]
        size: Option<u32>,
        /// Quiet zone in modules
        #[arg(long)]
        quiet_zone: Option<u32>,
        /// Dark colour (RRGGBB)
        #[arg(long, default_value = "000000")]
        dark: String,
        /// Light colour (RRGGBB)
        #[arg(long, default_value = "ffffff")]
        light: String,
    },
    /// Print a QR code to the terminal
    Print {
        #[command(flatten)]
        symbol: SymbolArgs,
    },
    /// Show byte capacity for versions 1-10
    Capacity {
        /// Error correction level (L, M, Q, H)
        #[arg(long)]
        level: Option<String>,
    },
}

#[derive(Args)]
struct SymbolArgs {
    /// Text to encode, typically the card URL
    #[arg(long)]
    text: String,
    /// Version 1-10 (smallest fitting version when omitted)
    #[arg(long = "qr-version", value_name = "N")]
    version: Option<u8>,
    /// Error correction level (L, M, Q, H)
    #[arg(long)]
    level: Option<String>,
    /// Mask pattern 0-7 (lowest penalty when omitted)
    #[arg(long)]
    mask: Option<u8>,
}

impl SymbolArgs {
    fn encode(&self) -> Result<QRCode> {
        let mut encoder = QrEncoder::new(parse_level(self.level.as_deref())?);
        if let Some(v) = self.version {
            encoder = encoder.version(Version::new(v)?);
        }
        if let Some(m) = self.mask {
            let mask = MaskPattern::from_bits(m)
                .ok_or_else(|| Error::InvalidArgument(format!("mask {m} is not in 0-7")))?;
            encoder = encoder.mask(mask);
        }
        encoder.encode(&self.text)
    }
}

fn parse_level(level: Option<&str>) -> Result<ECLevel> {
    match level {
        Some(letter) => ECLevel::from_letter(letter),
        None => Ok(config::default_ec_level()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("qrtool: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Generate {
            symbol,
            out,
            size,
            quiet_zone,
            dark,
            light,
        } => {
            let code = symbol.encode()?;
            let defaults = RenderOptions::default();
            let options = RenderOptions {
                size: size.unwrap_or(defaults.size),
                quiet_zone: quiet_zone.unwrap_or(defaults.quiet_zone),
                dark: parse_hex_color(&dark)?,
                light: parse_hex_color(&light)?,
            };
            render::save_png(&code, &out, &options)?;
            info!(path = %out.display(), "saved");
            println!(
                "Wrote {} (version {}, level {:?}, mask {}, {}x{} modules)",
                out.display(),
                code.version.number(),
                code.error_correction,
                code.mask_pattern.bits(),
                code.module_count(),
                code.module_count()
            );
        }
        Command::Print { symbol } => {
            let code = symbol.encode()?;
            print!("{}", render::to_text(&code, 2));
            println!(
                "version {}, level {:?}, mask {}",
                code.version.number(),
                code.error_correction,
                code.mask_pattern.bits()
            );
        }
        Command::Capacity { level } => {
            let levels = match level {
                Some(letter) => vec![ECLevel::from_letter(&letter)?],
                None => ECLevel::ALL.to_vec(),
            };
            print!("version  modules");
            for level in &levels {
                print!("  {:>5}", format!("{level:?}"));
            }
            println!();
            for version in Version::all() {
                print!("{:>7}  {:>7}", version.number(), version.size());
                for &level in &levels {
                    print!("  {:>5}", card_qr::capacity(version.number(), level)?);
                }
                println!();
            }
        }
    }
    Ok(())
}
