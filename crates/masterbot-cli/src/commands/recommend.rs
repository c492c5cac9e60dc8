use chrono::Utc;
use clap::Args;
use masterbot_core::{
    build_service, sample_events, EnrichmentOutcome, Recommendation, RecommendationEngine,
    Schedule, UserConfig,
};
use std::path::{Path, PathBuf};

use super::{format_local, read_events, write_events};

#[derive(Args)]
pub struct RecommendArgs {
    /// JSON file with candidate events (built-in sample events if omitted)
    #[arg(long)]
    events: Option<PathBuf>,
    /// JSON file with committed events; created on --attend if missing
    #[arg(long)]
    schedule: Option<PathBuf>,
    /// Maximum number of recommendations (default: engine.max_recommendations)
    #[arg(long)]
    max: Option<usize>,
    /// Attend recommendation N (1-based): commit it and reinforce its tags
    #[arg(long)]
    attend: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(config_path: &Path, args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = UserConfig::load_from(config_path)?;
    config.validate()?;

    let engine = RecommendationEngine::new(build_service(&config.ai_services)?)
        .with_enrichment_timeout(config.engine.enrichment_timeout())
        .with_enrichment_scope(config.engine.enrichment_scope);

    let candidates = match &args.events {
        Some(path) => read_events(path)?,
        None => sample_events(Utc::now()),
    };
    let mut schedule = match &args.schedule {
        Some(path) if path.exists() => Schedule::from(read_events(path)?),
        _ => Schedule::new(),
    };

    let mut user = config.to_user();
    let max = args.max.unwrap_or(config.engine.max_recommendations);
    let set = engine
        .recommend_events(&user, &candidates, &schedule, max)
        .await;

    let threshold = config.engine.min_recommendation_score;
    let shown: Vec<&Recommendation> = set.iter().filter(|r| r.score >= threshold).collect();

    if args.json {
        let enrichment = match &set.enrichment {
            EnrichmentOutcome::Applied { excerpt } => {
                serde_json::json!({ "applied": true, "excerpt": excerpt })
            }
            EnrichmentOutcome::Unavailable(err) => {
                serde_json::json!({ "applied": false, "error": err.to_string() })
            }
        };
        let out = serde_json::json!({ "recommendations": shown, "enrichment": enrichment });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_recommendations(&shown, &set.enrichment);
    }

    let Some(n) = args.attend else {
        return Ok(());
    };
    let chosen = n
        .checked_sub(1)
        .and_then(|i| shown.get(i))
        .ok_or_else(|| format!("no recommendation #{n} (1-{})", shown.len()))?;

    schedule.add_event(chosen.event.clone());
    engine.update_user_interests(&mut user, std::slice::from_ref(&chosen.event));
    config.absorb_interests(user.preferences());
    config.save_to(config_path)?;
    if let Some(path) = &args.schedule {
        write_events(path, schedule.events())?;
    }

    tracing::info!(event = chosen.event.name(), "attended recommendation");
    if !args.json {
        println!("Added '{}' to your schedule.", chosen.event.name());
        println!("Preferences updated based on selection.");
    }
    Ok(())
}

fn print_recommendations(recommendations: &[&Recommendation], enrichment: &EnrichmentOutcome) {
    if recommendations.is_empty() {
        println!("No recommendations.");
        return;
    }

    println!("=== Event Recommendations ===");
    for (i, rec) in recommendations.iter().enumerate() {
        println!("{}. {} (Score: {:.2})", i + 1, rec.event.name(), rec.score);
        println!("   When: {}", format_local(rec.event.start()));
        println!("   Description: {}", rec.event.description());
        println!("   Location: {}", rec.event.location());
        println!("   Reasoning: {}", rec.reasoning);
    }

    if let EnrichmentOutcome::Unavailable(err) = enrichment {
        println!();
        println!("(AI reasoning unavailable: {err})");
    }
}
