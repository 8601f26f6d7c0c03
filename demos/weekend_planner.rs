use chicago_planner::{Category, ItineraryPlanner, TripPreferences};

fn label(category: Option<&Category>) -> &str {
    category.map(Category::as_str).unwrap_or("unlabelled")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::try_init().ok();

    let planner = ItineraryPlanner::from_env()?;
    let preferences = TripPreferences::new(
        3,
        "Wicker Park",
        "Mexican",
        "Moderate",
        1200.0,
        "two friends",
        "tourist traps",
    )
    .with_radius(4.0);

    println!("=== Chicago Weekend Planner ===\n");

    let result = match planner.get_recommendations(&preferences).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Itinerary unavailable right now: {err}");
            return Err(err.into());
        }
    };

    for day in 1..=preferences.stay_length {
        println!("Day {day}");
        let mut items: Vec<_> = result.items_for_day(day).collect();
        items.sort_by_key(|item| item.order);
        for item in items {
            println!(
                "  {}. {} ({}, {}) - {}",
                item.order.unwrap_or_default(),
                item.name,
                label(item.category.as_ref()),
                item.neighborhood,
                item.explanation
            );
        }
    }

    println!("\nAlternates:");
    for rec in result.recommendations() {
        println!(
            "  • {} ({}, {})",
            rec.name,
            label(rec.category.as_ref()),
            rec.neighborhood
        );
    }

    let violations = result.audit(&preferences);
    if !violations.is_empty() {
        println!("\nThe model did not follow every rule:");
        for violation in violations {
            println!("  - {violation}");
        }
    }

    Ok(())
}
