use crate::infra::{build_seeded_service, seed_candidates};
use chrono::Utc;
use clap::Args;
use rozgar_match::error::AppError;
use rozgar_match::matching::CandidateId;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Candidate to generate recommendations for. Defaults to every seeded
    /// candidate.
    #[arg(long)]
    pub(crate) candidate: Option<String>,
    /// Cap on the number of recommendations shown per candidate.
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Skip the interaction portion of the demo.
    #[arg(long)]
    pub(crate) skip_interactions: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        candidate,
        limit,
        skip_interactions,
    } = args;

    let now = Utc::now();
    let service = build_seeded_service(now);

    let candidate_ids: Vec<CandidateId> = match candidate {
        Some(raw) => vec![CandidateId(raw)],
        None => seed_candidates().into_iter().map(|c| c.id).collect(),
    };

    println!("Rozgar recommendation demo");

    for candidate_id in &candidate_ids {
        let dashboard = service.dashboard(candidate_id, limit, now)?;

        println!(
            "\nCandidate {} | {} newly generated, {} active",
            dashboard.candidate_id,
            dashboard.newly_generated,
            dashboard.recommendations.len()
        );

        if dashboard.recommendations.is_empty() {
            println!("  No qualifying postings in the current window.");
            continue;
        }

        for card in &dashboard.recommendations {
            println!(
                "- [{}] {} at {} | score {} | {}",
                card.recommendation_id, card.job_title, card.company, card.match_score, card.reason
            );
            println!(
                "    factors: skill {} / location {} / experience {} / recency {}",
                card.match_factors.skill,
                card.match_factors.location,
                card.match_factors.experience,
                card.match_factors.recency
            );
            if !card.match_factors.matched_skills.is_empty() {
                println!(
                    "    matched skills: {}",
                    card.match_factors.matched_skills.join(", ")
                );
            }
            if !card.match_factors.missing_skills.is_empty() {
                println!(
                    "    missing skills: {}",
                    card.match_factors.missing_skills.join(", ")
                );
            }
            if let Some(salary) = &card.salary {
                println!("    {} | {}", card.job_type, salary);
            }
        }

        if skip_interactions {
            continue;
        }

        // Walk the top card through the interaction lifecycle.
        let top = dashboard.recommendations[0].recommendation_id.clone();
        let viewed = service.mark_viewed(candidate_id, &top, Utc::now())?;
        println!(
            "  Marked {} viewed -> status {}",
            viewed.recommendation_id, viewed.status
        );
        let clicked = service.mark_clicked(candidate_id, &top, Utc::now())?;
        println!(
            "  Marked {} clicked -> viewed={} clicked={}",
            clicked.recommendation_id, clicked.viewed, clicked.clicked
        );
        let saved = service.mark_saved(candidate_id, &top, Utc::now())?;
        println!(
            "  Saved {} -> status {}",
            saved.recommendation_id, saved.status
        );

        match serde_json::to_string_pretty(&saved) {
            Ok(json) => println!("  Interaction payload:\n{json}"),
            Err(err) => println!("  Interaction payload unavailable: {err}"),
        }
    }

    Ok(())
}
