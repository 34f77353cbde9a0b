use crate::application::{MoodApp, run_doctor, swatch};
use crate::domain::Mood;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "moodweek")]
#[command(about = "A terminal widget for logging a daily mood")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the week widget
    Week {
        /// Any date in the week to show (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Record a mood without opening the widget
    Set {
        /// One of: good, loved, rough, calm, social, focused, meh, awesome
        mood: String,
        /// Specific date (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List every recorded mood, oldest first
    Log,
    /// Show the current theme, or switch to another one
    Theme {
        /// One of: pink, green, lavender, blue
        name: Option<String>,
    },
    /// Forget every recorded mood
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Check terminal support and show where data is stored
    Doctor,
}

fn parse_date(date: Option<String>) -> anyhow::Result<NaiveDate> {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", date_str)),
        None => Ok(Local::now().date_naive()),
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let mut app = MoodApp::new()?;

        match cli.command {
            Some(Commands::Week { date }) => {
                app.run_widget(parse_date(date)?)?;
            }
            Some(Commands::Set { mood, date }) => {
                let mood: Mood = mood.parse()?;
                let key = app.record_mood(parse_date(date)?, mood)?;
                println!("{} {}", key, swatch(mood.color(), mood.label()));
            }
            Some(Commands::Log) => {
                let entries = app.entries();
                if entries.is_empty() {
                    println!("No moods recorded yet");
                }
                for (key, record) in entries {
                    println!(
                        "{}  {}  {}",
                        key,
                        swatch(&record.color, &format!(" {:<8}", record.label)),
                        record.color
                    );
                }
            }
            Some(Commands::Theme { name: None }) => {
                println!("{}", swatch(app.theme().accent(), app.theme().as_str()));
            }
            Some(Commands::Theme { name: Some(name) }) => {
                let theme = app.set_theme(&name)?;
                println!("Theme set to {}", swatch(theme.accent(), theme.as_str()));
            }
            Some(Commands::Reset { yes }) => {
                if yes || confirm("Clear every recorded mood?")? {
                    let cleared = app.reset()?;
                    println!("Cleared {} moods", cleared);
                } else {
                    println!("Nothing changed");
                }
            }
            Some(Commands::Doctor) => {
                println!("Storage: {}", app.store().backend_info());
                run_doctor(app.config())?;
            }
            None => {
                app.run_widget(Local::now().date_naive())?;
            }
        }

        Ok(())
    }
}
