use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use anyhow::Context;
use quizgen::quiz::{meets_passing_threshold, render_certificate, CertificateRequest};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_INSTRUCTOR: &str = "Instructor";

struct Config {
    name: String,
    score: usize,
    total: usize,
    instructor: String,
    output_dir: String,
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let name = args.next().context("recipient name is required")?;
    let score = args
        .next()
        .context("score is required")?
        .parse::<usize>()
        .context("score must be a non-negative number")?;
    let total = args
        .next()
        .context("total is required")?
        .parse::<usize>()
        .context("total must be a non-negative number")?;
    let instructor = args.next().unwrap_or(DEFAULT_INSTRUCTOR.to_string());
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());

    Ok(Config {
        name,
        score,
        total,
        instructor,
        output_dir,
    })
}

/// Renders one sample certificate so an instructor can inspect the layout
/// their students will receive.
fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = env::args().skip(1);

    let config = match parse_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: preview_cert <name> <score> <total> [instructor] [output_dir]");
            return Err(e);
        }
    };

    let request = CertificateRequest {
        name: config.name,
        score: config.score,
        total: config.total,
        instructor: config.instructor,
    };
    let certificate = render_certificate(&request).context("failed to render certificate")?;

    if fs::metadata(&config.output_dir).is_err() {
        fs::create_dir_all(&config.output_dir).context("failed to create output directory")?;
    }

    let path = format!("{}/{}", config.output_dir, certificate.filename);
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&path)
        .context(format!("failed to open file for {}", path))?;
    file.write_all(&certificate.bytes)
        .context("failed to write certificate")?;

    println!("wrote {BOLD}{}{RESET}", &path);
    if meets_passing_threshold(request.score, request.total) {
        println!(
            "a score of {} / {} earns a certificate in the student app",
            request.score, request.total
        );
    } else {
        println!(
            "note: the student app would not issue a certificate for {} / {}, 80% is required",
            request.score, request.total
        );
    }

    Ok(())
}
