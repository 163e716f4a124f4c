use dream_garage_core::{leaderboard, Config, GarageSession};

pub fn run(top: Option<usize>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = GarageSession::from_config(config)?;
    let standings = match top {
        Some(n) => leaderboard::top(session.ledger(), n),
        None => leaderboard::standings(session.ledger()),
    };
    println!("{}", serde_json::to_string_pretty(&standings)?);
    Ok(())
}
