use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use miqat_core::{
    CalculationConfig, CalculationMethod, GeoLocation, LatitudeAdjustment, MethodParams,
    MidnightMode, PrayerRequest, School, Shafaq, TimeFormat, TuneOffsets, compute,
    list_method_codes, list_methods,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "miqat", about = "Islamic prayer times calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times for one date and place
    Times {
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Height above sea level in meters
        #[arg(long, default_value = "0")]
        elevation: f64,
        /// Calculation method code (unknown codes fall back to MWL)
        #[arg(long, default_value = "MWL")]
        method: String,
        /// Asr school: STANDARD or HANAFI
        #[arg(long, default_value = "STANDARD")]
        school: String,
        /// Explicit Asr shadow factor, overrides the school
        #[arg(long)]
        asr_factor: Option<f64>,
        /// Moonsighting Isha twilight: general, ahmer, abyad
        #[arg(long, default_value = "general")]
        shafaq: String,
        /// High-latitude rule: MIDDLE_OF_THE_NIGHT, ANGLE_BASED, ONE_SEVENTH, NONE
        #[arg(long, default_value = "ANGLE_BASED")]
        adjustment: String,
        /// Night definition override: STANDARD or JAFARI
        #[arg(long)]
        midnight: Option<String>,
        /// Output format: 24h, 12h, 12hNS, Float, iso8601
        #[arg(long, default_value = "24h")]
        format: String,
        /// IANA timezone (default: system zone)
        #[arg(long)]
        timezone: Option<String>,
        /// Per-prayer minute offsets, e.g. Fajr=2,Isha=-3
        #[arg(long, allow_hyphen_values = true)]
        tune: Option<String>,
        /// Print times and metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Calculation method catalog
    Methods {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Method codes in catalog order
    Codes,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MIQAT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a code or exit with the parser's message.
fn require<T>(value: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e} (expected YYYY-MM-DD)");
        std::process::exit(1);
    })
}

fn describe_params(params: &MethodParams) -> String {
    let mut parts = Vec::new();
    let named = [
        ("Imsak", params.imsak),
        ("Fajr", params.fajr),
        ("Dhuhr", params.dhuhr),
        ("Maghrib", params.maghrib),
        ("Isha", params.isha),
    ];
    for (name, param) in named {
        if let Some(p) = param {
            parts.push(format!("{name}={p}"));
        }
    }
    if let Some(mode) = params.midnight {
        parts.push(format!("Midnight={}", mode.code()));
    }
    if let Some(shafaq) = params.shafaq {
        parts.push(format!("shafaq={}", shafaq.code()));
    }
    parts.join(", ")
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Times {
            date,
            lat,
            lon,
            elevation,
            method,
            school,
            asr_factor,
            shafaq,
            adjustment,
            midnight,
            format,
            timezone,
            tune,
            json,
        } => {
            let tune = tune
                .as_deref()
                .map(require::<TuneOffsets>)
                .unwrap_or_default();
            let config = CalculationConfig::new(
                CalculationMethod::from_code_or_default(&method),
                require::<School>(&school),
                asr_factor,
            )
            .with_shafaq(require::<Shafaq>(&shafaq))
            .with_tune(tune);

            let mut request = PrayerRequest::new(
                parse_date(&date),
                GeoLocation::new(lat, lon).with_elevation(elevation),
            )
            .with_latitude_adjustment(require::<LatitudeAdjustment>(&adjustment))
            .with_format(require::<TimeFormat>(&format));
            if let Some(mode) = midnight.as_deref() {
                request = request.with_midnight_mode(require::<MidnightMode>(mode));
            }
            if let Some(zone) = timezone {
                request = request.with_timezone(zone);
            }

            let out = compute(&config, &request).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });

            if json {
                print_json(&out);
            } else {
                println!(
                    "{} ({:.4}, {:.4}) {} - {}",
                    date,
                    lat,
                    lon,
                    out.meta.timezone,
                    out.meta.method.name
                );
                for (prayer, value) in out.times.iter() {
                    println!("  {:<11} {value}", prayer.name());
                }
            }
        }

        Commands::Methods { json } => {
            let methods = list_methods();
            if json {
                print_json(&methods);
            } else {
                for (code, method) in &methods {
                    println!("{:>3}  {:<13} {}", method.id, code.code(), method.name);
                    println!("       {}", describe_params(&method.params));
                    if let Some(loc) = method.location {
                        println!("       seat: {:.4}, {:.4}", loc.latitude, loc.longitude);
                    }
                }
            }
        }

        Commands::Codes => {
            for code in list_method_codes() {
                println!("{code}");
            }
        }
    }
}
