//! Entry point for the `lanczos` demonstration CLI.
//!
//! Each command synthesizes a signal, resamples it and writes the source and
//! the result as gnuplot-friendly `.dat` files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lanczos_resample::config::{self, AppSettings, LoggingSettings};
use lanczos_resample::export::{self, ExportError};
use lanczos_resample::resample::{self, ResampleError};
use lanczos_resample::{logging, signal};
use rand::SeedableRng;
use rand::rngs::StdRng;

const USAGE: &str = "\
usage: lanczos [--out <dir>] <command>

commands:
  pair                                   resample the reference signal up to 20 and down to 5
  sine <a> <src_w> <dst_w>               resample one sine period
  irregular-sine <a> <count> <dst_w> [seed]
                                         resample scattered sine samples";

const PAIR_UP: usize = 20;
const PAIR_DOWN: usize = 5;
const DEFAULT_SEED: u64 = 1;

#[derive(Debug, PartialEq)]
enum Command {
    Pair,
    Sine {
        a: u32,
        src_w: usize,
        dst_w: usize,
    },
    IrregularSine {
        a: u32,
        count: usize,
        dst_w: usize,
        seed: u64,
    },
}

#[derive(Debug, PartialEq)]
struct Cli {
    command: Command,
    out: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Resample(#[from] ResampleError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Failed to create output directory {path}: {source}")]
    OutDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let loaded = config::load_or_default();
    let logging_settings = match &loaded {
        Ok(settings) => settings.logging.clone(),
        Err(_) => LoggingSettings::default(),
    };
    if let Err(err) = logging::init(&logging_settings) {
        eprintln!("Logging disabled: {err}");
    }
    let settings = loaded.unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        AppSettings::default()
    });

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args<I>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = PathBuf::from(".");
    let mut positional = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let dir = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--out needs a directory".into()))?;
                out = PathBuf::from(dir);
            }
            "--help" | "-h" => return Err(CliError::Usage("help requested".into())),
            _ => positional.push(arg),
        }
    }

    let Some((name, rest)) = positional.split_first() else {
        return Err(CliError::Usage("missing command".into()));
    };
    let command = match (name.as_str(), rest) {
        ("pair", []) => Command::Pair,
        ("sine", [a, src_w, dst_w]) => Command::Sine {
            a: number(a, "a")?,
            src_w: number(src_w, "src_w")?,
            dst_w: number(dst_w, "dst_w")?,
        },
        ("irregular-sine", [a, count, dst_w, seed @ ..]) if seed.len() <= 1 => {
            Command::IrregularSine {
                a: number(a, "a")?,
                count: number(count, "count")?,
                dst_w: number(dst_w, "dst_w")?,
                seed: match seed.first() {
                    Some(seed) => number(seed, "seed")?,
                    None => DEFAULT_SEED,
                },
            }
        }
        ("pair" | "sine" | "irregular-sine", _) => {
            return Err(CliError::Usage(format!("wrong arguments for `{name}`")));
        }
        _ => return Err(CliError::Usage(format!("unknown command `{name}`"))),
    };
    Ok(Cli { command, out })
}

fn number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, CliError> {
    value
        .parse()
        .map_err(|_| CliError::Usage(format!("`{value}` is not a valid {name}")))
}

fn run(cli: &Cli, settings: &AppSettings) -> Result<(), CliError> {
    std::fs::create_dir_all(&cli.out).map_err(|source| CliError::OutDir {
        path: cli.out.clone(),
        source,
    })?;
    let options = settings.resample;
    tracing::info!(command = ?cli.command, out = %cli.out.display(), "Running");

    match cli.command {
        Command::Pair => {
            let a = settings.a;
            let src = &signal::PAIR_SOURCE;
            let up = resample::resample_regular(src, 1, PAIR_UP, a, options)?;
            let down = resample::resample_regular(src, 1, PAIR_DOWN, a, options)?;
            write_regular(&cli.out, "s1", src, src.len(), settings)?;
            write_regular(&cli.out, "s2u", &up, src.len(), settings)?;
            write_regular(&cli.out, "s2d", &down, src.len(), settings)?;
        }
        Command::Sine { a, src_w, dst_w } => {
            let src = signal::sine_grid(src_w);
            let dst = resample::resample_regular(&src, 1, dst_w, a, options)?;
            write_regular(&cli.out, &format!("sine-{a}-{src_w}"), &src, src_w, settings)?;
            write_regular(
                &cli.out,
                &format!("sine-{a}-{src_w}-{dst_w}"),
                &dst,
                src_w,
                settings,
            )?;
        }
        Command::IrregularSine {
            a,
            count,
            dst_w,
            seed,
        } => {
            let (x0, x1) = (0.0, std::f32::consts::TAU);
            let mut rng = StdRng::seed_from_u64(seed);
            let src = signal::scattered_sine(&mut rng, count);
            let dst = resample::resample_irregular(&src, 1, x0, x1, dst_w, a, options)?;
            let stem = format!("irregular-sine-{a}-{count}");
            let records = src.chunks_exact(2).map(|record| (record[0], record[1]));
            export::write_dat(&cli.out.join(format!("{stem}.dat")), records)?;
            let points = export::domain_positions(x0, x1, dst_w).zip(dst.iter().copied());
            write_points(&cli.out, &format!("{stem}-{dst_w}"), points, &dst, settings)?;
        }
    }
    Ok(())
}

/// Write a regular-grid signal with positions in source-index space.
fn write_regular(
    out: &Path,
    stem: &str,
    values: &[f32],
    src_w: usize,
    settings: &AppSettings,
) -> Result<(), CliError> {
    let points = export::regular_positions(src_w, values.len()).zip(values.iter().copied());
    write_points(out, stem, points, values, settings)
}

fn write_points<I>(
    out: &Path,
    stem: &str,
    points: I,
    values: &[f32],
    settings: &AppSettings,
) -> Result<(), CliError>
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let path = out.join(format!("{stem}.dat"));
    export::write_dat(&path, points)?;
    tracing::info!(path = %path.display(), samples = values.len(), "Wrote signal");
    if settings.export.wav {
        let wav = out.join(format!("{stem}.wav"));
        export::write_wav(&wav, values, 1, settings.export.sample_rate)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_each_command() {
        let cli = parse_args(args(&["pair"])).unwrap();
        assert_eq!(cli.command, Command::Pair);
        assert_eq!(cli.out, PathBuf::from("."));

        let cli = parse_args(args(&["sine", "3", "64", "256"])).unwrap();
        assert_eq!(
            cli.command,
            Command::Sine {
                a: 3,
                src_w: 64,
                dst_w: 256
            }
        );

        let cli = parse_args(args(&["--out", "plots", "irregular-sine", "2", "500", "32"])).unwrap();
        assert_eq!(cli.out, PathBuf::from("plots"));
        assert_eq!(
            cli.command,
            Command::IrregularSine {
                a: 2,
                count: 500,
                dst_w: 32,
                seed: DEFAULT_SEED
            }
        );
    }

    #[test]
    fn accepts_explicit_seed() {
        let cli = parse_args(args(&["irregular-sine", "2", "10", "4", "99"])).unwrap();
        assert!(matches!(cli.command, Command::IrregularSine { seed: 99, .. }));
    }

    #[test]
    fn rejects_bad_arguments() {
        for bad in [
            &[][..],
            &["bogus"][..],
            &["sine", "3", "64"][..],
            &["sine", "x", "64", "128"][..],
            &["pair", "extra"][..],
            &["irregular-sine", "2", "10", "4", "1", "2"][..],
            &["--out"][..],
        ] {
            let err = parse_args(args(bad)).unwrap_err();
            assert!(matches!(err, CliError::Usage(_)), "{bad:?}");
        }
    }

    #[test]
    fn pair_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            command: Command::Pair,
            out: dir.path().to_path_buf(),
        };
        run(&cli, &AppSettings::default()).unwrap();
        let s1 = std::fs::read_to_string(dir.path().join("s1.dat")).unwrap();
        assert_eq!(s1.lines().next(), Some("0.000000 0.100000"));
        assert_eq!(s1.lines().count(), 10);
        let up = std::fs::read_to_string(dir.path().join("s2u.dat")).unwrap();
        assert_eq!(up.lines().count(), PAIR_UP);
        assert!(up.starts_with("-0.250000 "));
        let down = std::fs::read_to_string(dir.path().join("s2d.dat")).unwrap();
        assert_eq!(down.lines().count(), PAIR_DOWN);
        assert!(down.starts_with("0.500000 "));
    }

    #[test]
    fn wav_export_follows_settings() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            command: Command::Sine {
                a: 2,
                src_w: 16,
                dst_w: 32,
            },
            out: dir.path().to_path_buf(),
        };
        let mut settings = AppSettings::default();
        settings.export.wav = true;
        run(&cli, &settings).unwrap();
        assert!(dir.path().join("sine-2-16.dat").exists());
        assert!(dir.path().join("sine-2-16-32.dat").exists());
        assert!(dir.path().join("sine-2-16-32.wav").exists());
    }

    #[test]
    fn irregular_sine_writes_source_and_result() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            command: Command::IrregularSine {
                a: 2,
                count: 200,
                dst_w: 16,
                seed: 7,
            },
            out: dir.path().to_path_buf(),
        };
        run(&cli, &AppSettings::default()).unwrap();
        let src = std::fs::read_to_string(dir.path().join("irregular-sine-2-200.dat")).unwrap();
        assert_eq!(src.lines().count(), 200);
        let dst = std::fs::read_to_string(dir.path().join("irregular-sine-2-200-16.dat")).unwrap();
        assert_eq!(dst.lines().count(), 16);
    }
}
