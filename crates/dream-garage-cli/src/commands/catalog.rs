use clap::Subcommand;
use dream_garage_core::{Category, Config, GarageSession, ItemKind, Rarity};
use serde_json::json;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List items with price and starting ownership
    List {
        /// Only "car" or "theme"
        #[arg(long)]
        category: Option<String>,
        /// Only cars of this rarity (common, rare, legendary)
        #[arg(long)]
        rarity: Option<String>,
    },
    /// Show one item, including its resolved asset path
    Show {
        /// Item id (e.g. "lexus-lc")
        id: String,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "car" | "cars" => Ok(Category::Car),
        "theme" | "themes" => Ok(Category::Theme),
        other => Err(format!("unknown category: {other}")),
    }
}

pub fn run(action: CatalogAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = GarageSession::from_config(config)?;
    let ledger = session.ledger();

    match action {
        CatalogAction::List { category, rarity } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let rarity = match rarity.as_deref() {
                Some(r) => Some(Rarity::from_str_loose(r).ok_or_else(|| format!("unknown rarity: {r}"))?),
                None => None,
            };

            let items: Vec<_> = ledger
                .catalog()
                .iter()
                .filter(|i| category.map_or(true, |c| i.category() == c))
                .filter(|i| rarity.is_none() || i.rarity() == rarity)
                .map(|i| {
                    let color = match &i.kind {
                        ItemKind::Car { rarity, .. } => rarity.color().to_string(),
                        ItemKind::Theme { accent_color } => accent_color.clone(),
                    };
                    json!({
                        "id": i.id,
                        "name": i.name,
                        "category": i.category(),
                        "price": i.price,
                        "color": color,
                        "owned": ledger.is_owned(i.id.as_str()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        CatalogAction::Show { id } => {
            let item = ledger
                .catalog()
                .get(&id)
                .ok_or_else(|| format!("unknown item: {id}"))?;
            let asset = item.resolve_asset(&config.assets.root, &config.assets.placeholder);
            let mut value = serde_json::to_value(item)?;
            value["asset_path"] = json!(asset.display().to_string());
            value["owned"] = json!(ledger.is_owned(&id));
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_accept_plurals() {
        assert_eq!(parse_category("Cars").unwrap(), Category::Car);
        assert_eq!(parse_category("theme").unwrap(), Category::Theme);
        assert!(parse_category("boats").is_err());
    }
}
