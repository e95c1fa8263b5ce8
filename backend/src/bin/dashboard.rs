//! Terminal dashboard
//!
//! Asks questions through the same chat service the HTTP API uses, with a
//! profile fixed for the session. Every turn is written to the record store;
//! the `:history` view only shows turns from this session.

use anyhow::Result;
use clap::Parser;
use health_coach_backend::{config, db, services::ChatService, state::AppState};
use health_coach_shared::{
    bmi_status, calculate_bmi, display_number, ChatInput, ChatRequest, ChatResponse, Profile,
};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Chat with the health coach from a terminal
#[derive(Debug, Parser)]
#[command(name = "health-coach-dashboard", version, about)]
struct Args {
    /// Your name (defaults to the login name)
    #[arg(long)]
    name: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<String>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<String>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<String>,

    /// Record store location; overrides the configured one
    #[arg(long)]
    database_url: Option<String>,
}

impl Args {
    /// Coerce the raw flags the same way `POST /chat` coerces its body
    fn profile(&self, login_name: Option<&str>) -> Profile {
        let raw = |v: &Option<String>| v.clone().map(Value::String);
        ChatRequest {
            name: raw(&self.name),
            age: raw(&self.age),
            weight: raw(&self.weight),
            height: raw(&self.height),
            message: None,
        }
        .normalize(login_name)
        .profile
    }
}

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Ask(&'a str),
    History,
    Profile,
    Quit,
    Empty,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            ":history" => Command::History,
            ":profile" => Command::Profile,
            ":quit" | ":q" | ":exit" => Command::Quit,
            question => Command::Ask(question),
        }
    }
}

/// One question and the reply it got
struct Turn {
    question: String,
    response: ChatResponse,
}

fn render_profile(profile: &Profile) -> String {
    let bmi = calculate_bmi(profile.weight_kg, profile.height_cm);
    format!(
        "{} | age {} | {} kg | {} cm | BMI {} ({})",
        profile.greeting_name(),
        profile.age,
        display_number(profile.weight_kg),
        display_number(profile.height_cm),
        bmi.map(display_number).unwrap_or_else(|| "unavailable".to_string()),
        bmi_status(bmi),
    )
}

fn render_response(response: &ChatResponse) -> String {
    let kcal = f64::from(response.steps_today) * 0.04;
    format!(
        "{}\n\n  steps today: {} (~{:.0} kcal)\n  reminder: {}",
        response.reply, response.steps_today, kcal, response.reminder
    )
}

fn render_history(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return "No questions asked yet.".to_string();
    }
    turns
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            format!(
                "[{}] you: {}\n    coach: {}",
                i + 1,
                turn.question,
                turn.response.reply
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "health_coach_backend=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut config = config::AppConfig::load()?;
    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }

    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;
    db::run_migrations(&pool).await?;

    let login_name = std::env::var("USER").ok();
    let profile = args.profile(login_name.as_deref());
    let state = AppState::new(pool.clone(), config);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut turns: Vec<Turn> = Vec::new();

    stdout
        .write_all(
            format!(
                "Health coach ready for {}.\nCommands: :history, :profile, :quit\n",
                render_profile(&profile)
            )
            .as_bytes(),
        )
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::History => render_history(&turns),
            Command::Profile => render_profile(&profile),
            Command::Ask(question) => {
                let input = ChatInput {
                    profile: profile.clone(),
                    question: question.to_string(),
                };
                let response = ChatService::respond(&state, &input).await;
                let rendered = render_response(&response);
                turns.push(Turn {
                    question: input.question,
                    response,
                });
                rendered
            }
        };

        stdout.write_all(format!("{}\n", output).as_bytes()).await?;
    }

    db::close(&pool).await;
    Ok(())
}
