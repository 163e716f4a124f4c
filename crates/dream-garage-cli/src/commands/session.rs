//! Interactive session: one command per stdin line, one JSON value per
//! result on stdout. The ledger lives for the duration of the loop only.

use std::io::BufRead;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use dream_garage_core::{achievements, leaderboard, Config, GarageSession, Underglow, View};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Award points to the active account
    Award {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Buy an item at its catalog price
    Buy {
        item: String,
        /// Charge this instead of the catalog price
        #[arg(long)]
        cost: Option<u64>,
    },
    /// Check ownership of an item
    Owned { item: String },
    /// Call clock
    Call {
        #[command(subcommand)]
        action: CallAction,
    },
    /// Count finished activity (pays configured points)
    Log {
        #[command(subcommand)]
        activity: Activity,
    },
    /// Choose the displayed car or theme
    Select {
        #[command(subcommand)]
        target: SelectTarget,
    },
    /// Set the underglow colour (#rrggbb, cyan, magenta, yellow)
    Underglow { color: String },
    /// Shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or switch the current view
    View { name: Option<String> },
    /// Active account, selection and call state
    Status,
    /// Applied mutations so far
    Events,
    /// Team standings
    Leaderboard,
    /// Badge progress
    Achievements,
    /// Debug-only commands, enabled by admin.enabled
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum CallAction {
    Start,
    End,
    Status,
}

#[derive(Subcommand)]
enum Activity {
    Call,
    #[command(alias = "appointment")]
    Appt,
}

#[derive(Subcommand)]
enum SelectTarget {
    Car { id: String },
    Theme { id: String },
}

#[derive(Subcommand)]
enum CartAction {
    Add { id: String },
    Remove { id: String },
    List,
    Checkout,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Award points to any account
    Award {
        account: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// `MM:SS`, with hours folded into the minutes.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

type CommandResult = Result<Value, Box<dyn std::error::Error>>;

fn status(session: &GarageSession) -> Value {
    let ledger = session.ledger();
    let now = Utc::now();
    json!({
        "account": ledger.active_account(),
        "rank": leaderboard::rank_of(ledger, ledger.active_id().as_str()),
        "view": session.view(),
        "selection": ledger.selection(),
        "owned": ledger.owned().collect::<Vec<_>>(),
        "on_call": ledger.is_on_call(),
        "call_started_at": ledger.call().map(|c| c.started_at()),
        "call_elapsed": ledger.call_elapsed(now).map(format_elapsed),
    })
}

fn execute(session: &mut GarageSession, command: SessionCommand) -> CommandResult {
    let value = match command {
        SessionCommand::Award { amount } => {
            session.ledger_mut().award_points(amount);
            json!({ "points": session.ledger().active_account().points })
        }
        SessionCommand::Buy { item, cost } => {
            let ledger = session.ledger_mut();
            let outcome = match cost {
                Some(cost) => ledger.attempt_purchase_at(&item, cost),
                None => ledger.attempt_purchase(&item),
            };
            serde_json::to_value(outcome)?
        }
        SessionCommand::Owned { item } => {
            json!({ "item": item, "owned": session.ledger().is_owned(&item) })
        }
        SessionCommand::Call { action } => {
            let ledger = session.ledger_mut();
            match action {
                CallAction::Start => {
                    ledger.start_call();
                    json!({ "on_call": true, "call_elapsed": format_elapsed(Duration::zero()) })
                }
                CallAction::End => {
                    let duration = ledger.end_call();
                    json!({ "on_call": false, "duration": duration.map(format_elapsed) })
                }
                CallAction::Status => json!({
                    "on_call": ledger.is_on_call(),
                    "started_at": ledger.call().map(|c| c.started_at()),
                    "call_elapsed": ledger.call_elapsed(Utc::now()).map(format_elapsed),
                }),
            }
        }
        SessionCommand::Log { activity } => {
            let awarded = match activity {
                Activity::Call => session.log_call(),
                Activity::Appt => session.log_appointment(),
            };
            json!({ "awarded": awarded, "account": session.ledger().active_account() })
        }
        SessionCommand::Select { target } => {
            let ledger = session.ledger_mut();
            match target {
                SelectTarget::Car { id } => ledger.select_car(&id)?,
                SelectTarget::Theme { id } => ledger.select_theme(&id)?,
            }
            serde_json::to_value(ledger.selection())?
        }
        SessionCommand::Underglow { color } => {
            let underglow: Underglow = color.parse()?;
            session.ledger_mut().set_underglow(underglow);
            serde_json::to_value(session.ledger().selection())?
        }
        SessionCommand::Cart { action } => match action {
            CartAction::Add { id } => {
                session.add_to_cart(&id)?;
                cart_summary(session)
            }
            CartAction::Remove { id } => {
                session.remove_from_cart(&id);
                cart_summary(session)
            }
            CartAction::List => cart_summary(session),
            CartAction::Checkout => {
                let outcomes = session.checkout();
                json!({
                    "outcomes": outcomes,
                    "points": session.ledger().active_account().points,
                })
            }
        },
        SessionCommand::View { name } => {
            if let Some(name) = name {
                let view: View = name.parse()?;
                session.navigate(view);
            }
            json!({ "view": session.view(), "title": session.view().title() })
        }
        SessionCommand::Status => status(session),
        SessionCommand::Events => serde_json::to_value(session.ledger().events())?,
        SessionCommand::Leaderboard => {
            serde_json::to_value(leaderboard::standings(session.ledger()))?
        }
        SessionCommand::Achievements => {
            serde_json::to_value(achievements::evaluate_all(session.ledger()))?
        }
        SessionCommand::Admin { action } => match action {
            AdminAction::Award { account, amount } => {
                session.admin_award(&account, amount)?;
                json!({ "account": session.ledger().account(&account) })
            }
        },
        SessionCommand::Quit => Value::Null,
    };
    Ok(value)
}

fn cart_summary(session: &GarageSession) -> Value {
    json!({
        "items": session.cart().items(),
        "total": session.cart().total(session.ledger()),
    })
}

/// Handle one input line. Returns None for blank lines and comments, and
/// `Some(Err)` for parse or command errors.
fn handle_line(session: &mut GarageSession, line: &str) -> Option<Result<(bool, Value), String>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.first().map_or(true, |w| w.starts_with('#')) {
        return None;
    }
    let parsed = match SessionLine::try_parse_from(words.iter().copied()) {
        Ok(parsed) => parsed,
        Err(e) => return Some(Err(e.to_string())),
    };
    let quit = matches!(parsed.command, SessionCommand::Quit);
    Some(
        execute(session, parsed.command)
            .map(|value| (quit, value))
            .map_err(|e| e.to_string()),
    )
}

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = GarageSession::from_config(config)?;
    tracing::info!(
        "session started for {}",
        session.ledger().active_account().name
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match handle_line(&mut session, &line?) {
            None => continue,
            Some(Ok((true, _))) => break,
            Some(Ok((false, value))) => println!("{}", serde_json::to_string(&value)?),
            Some(Err(message)) => eprintln!("error: {}", message.trim_end()),
        }
    }

    tracing::info!("session ended, {} events applied", session.ledger().events().len());
    Ok(())
}
