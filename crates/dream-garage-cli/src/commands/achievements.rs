use dream_garage_core::{achievements, Config, GarageSession};

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = GarageSession::from_config(config)?;
    let progress = achievements::evaluate_all(session.ledger());
    println!("{}", serde_json::to_string_pretty(&progress)?);
    Ok(())
}
