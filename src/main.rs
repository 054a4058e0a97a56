use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use anyhow::Context;
use quizgen::quiz::{parse_questions, render_student_script, QuizConfig, QuizRequest};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output";

pub struct Config {
    pub request_path: String,
    pub output_dir: String,
}

impl Config {
    pub fn new(request_path: String, output_dir: &str) -> Self {
        Self {
            request_path,
            output_dir: output_dir.to_string(),
        }
    }
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let request_path = args.next().context(
        "request file is required, a YAML file with title, instructor, quiz_type and questions",
    )?;
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());

    Ok(Config::new(request_path, &output_dir))
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = env::args().skip(1);

    let config = match parse_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: quizgen <request.yaml> [output_dir]");
            return Err(e);
        }
    };

    let raw = fs::read_to_string(&config.request_path).context(format!(
        "failed to read request file {}",
        config.request_path
    ))?;
    let request: QuizRequest =
        serde_yaml_ng::from_str(&raw).context("request file is not a valid quiz request")?;
    request
        .validate()
        .context("fill in all fields to generate the quiz")?;

    let parsed = parse_questions(request.quiz_type, &request.questions);
    if parsed.skipped > 0 {
        log::warn!(
            "skipped {} malformed question line(s), run with RUST_LOG=debug for details",
            parsed.skipped
        );
    }

    let quiz = QuizConfig {
        title: request.title,
        instructor: request.instructor,
        quiz_type: request.quiz_type,
        questions: parsed.records,
    };
    let script = render_student_script(&quiz).context("failed to render the student app")?;

    create_output_dir(&config.output_dir).context("failed to create output directory")?;

    let mut slugger = github_slugger::Slugger::default();
    let path = format!("{}/{}.py", config.output_dir, slugger.slug(&quiz.title));
    write_script(&path, &script)?;

    println!("Generated student app\n");
    println!("---");
    println!("{}", script);
    println!("---\n");

    println!(
        "embedded {BOLD}{}{RESET} question(s) in {BOLD}{}{RESET}",
        quiz.questions.len(),
        &path
    );
    println!("paste the file contents into a single Google Colab cell and run it");

    Ok(())
}

fn write_script(path: &str, script: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .context(format!("failed to open file for {}", path))?;

    write!(file, "{}", script).context("failed to write generated script")?;

    Ok(())
}

fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    if fs::metadata(output_dir).is_err() {
        fs::create_dir_all(output_dir)?;
    }

    Ok(())
}
