//! Factor scorers: pure functions mapping one dimension of (candidate, job)
//! compatibility to a 0-100 score.
//!
//! Each scorer evaluates an explicit ordered rule table, first match wins.
//! Absent data resolves to a documented neutral default rather than zero, so
//! a posting that states no requirement never penalizes the candidate.

use chrono::{DateTime, Utc};

/// Outcome of one factor scorer, labelled with the rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorVerdict {
    pub rule: &'static str,
    pub score: u8,
}

/// Skill factor outcome, carrying the per-skill diff behind the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub rule: &'static str,
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Neutral-favorable default when a posting lists no required skills.
const NO_REQUIRED_SKILLS_SCORE: u8 = 70;

/// Score required-skill coverage. Case-insensitive substring containment in
/// either direction counts as a match; the diff lists keep the posting's
/// original spelling.
pub fn skill_match(candidate_skills: &[String], required_skills: &[String]) -> SkillMatch {
    let required: Vec<&String> = required_skills
        .iter()
        .filter(|skill| !skill.trim().is_empty())
        .collect();

    if required.is_empty() {
        return SkillMatch {
            rule: "no-required-skills",
            score: NO_REQUIRED_SKILLS_SCORE,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let candidate: Vec<String> = candidate_skills
        .iter()
        .map(|skill| normalize(skill))
        .filter(|skill| !skill.is_empty())
        .collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in &required {
        let needle = normalize(skill);
        let covered = candidate
            .iter()
            .any(|have| have.contains(&needle) || needle.contains(have.as_str()));
        if covered {
            matched.push((*skill).clone());
        } else {
            missing.push((*skill).clone());
        }
    }

    let ratio = matched.len() as f64 / required.len() as f64;
    let score = (ratio * 100.0).round().min(100.0) as u8;

    SkillMatch {
        rule: "required-skill-coverage",
        score,
        matched,
        missing,
    }
}

struct LocationContext {
    candidate: Option<String>,
    job: Option<String>,
}

struct LocationRule {
    rule: &'static str,
    score: u8,
    applies: fn(&LocationContext) -> bool,
}

fn job_location_unspecified(ctx: &LocationContext) -> bool {
    ctx.job.is_none()
}

fn remote_friendly(ctx: &LocationContext) -> bool {
    ctx.job.as_deref().is_some_and(|job| job.contains("remote"))
}

fn candidate_location_unspecified(ctx: &LocationContext) -> bool {
    ctx.candidate.is_none()
}

fn same_location(ctx: &LocationContext) -> bool {
    match (&ctx.candidate, &ctx.job) {
        (Some(candidate), Some(job)) => candidate == job,
        _ => false,
    }
}

fn location_containment(ctx: &LocationContext) -> bool {
    match (&ctx.candidate, &ctx.job) {
        (Some(candidate), Some(job)) => candidate.contains(job.as_str()) || job.contains(candidate.as_str()),
        _ => false,
    }
}

fn shared_region_part(ctx: &LocationContext) -> bool {
    let (Some(candidate), Some(job)) = (&ctx.candidate, &ctx.job) else {
        return false;
    };
    let candidate_parts: Vec<&str> = candidate
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    job.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .any(|part| candidate_parts.contains(&part))
}

/// Priority cascade for the location factor, evaluated top to bottom. The
/// remote check outranks a missing candidate location: a remote posting is a
/// full match no matter where the candidate sits.
const LOCATION_RULES: &[LocationRule] = &[
    LocationRule {
        rule: "job-location-unspecified",
        score: 80,
        applies: job_location_unspecified,
    },
    LocationRule {
        rule: "remote-friendly",
        score: 100,
        applies: remote_friendly,
    },
    LocationRule {
        rule: "candidate-location-unspecified",
        score: 60,
        applies: candidate_location_unspecified,
    },
    LocationRule {
        rule: "same-location",
        score: 100,
        applies: same_location,
    },
    LocationRule {
        rule: "location-containment",
        score: 80,
        applies: location_containment,
    },
    LocationRule {
        rule: "shared-region-part",
        score: 60,
        applies: shared_region_part,
    },
];

const LOCATION_FALLBACK: FactorVerdict = FactorVerdict {
    rule: "different-markets",
    score: 30,
};

/// Score location compatibility. A pure string heuristic, no geocoding.
pub fn location_match(candidate_location: Option<&str>, job_location: Option<&str>) -> FactorVerdict {
    let ctx = LocationContext {
        candidate: normalize_optional(candidate_location),
        job: normalize_optional(job_location),
    };

    for rule in LOCATION_RULES {
        if (rule.applies)(&ctx) {
            return FactorVerdict {
                rule: rule.rule,
                score: rule.score,
            };
        }
    }
    LOCATION_FALLBACK
}

struct ExperienceContext {
    candidate: Option<String>,
    job: Option<String>,
}

struct ExperienceRule {
    rule: &'static str,
    score: u8,
    applies: fn(&ExperienceContext) -> bool,
}

/// Seniority tiers rewarded when both sides name the same one. Coarse by
/// intent: free-text year ranges are not parsed.
const TIER_KEYWORDS: &[&str] = &["senior", "junior", "mid"];

fn job_experience_unspecified(ctx: &ExperienceContext) -> bool {
    ctx.job.is_none()
}

fn candidate_experience_unspecified(ctx: &ExperienceContext) -> bool {
    ctx.candidate.is_none()
}

fn shared_seniority_tier(ctx: &ExperienceContext) -> bool {
    let (Some(candidate), Some(job)) = (&ctx.candidate, &ctx.job) else {
        return false;
    };
    TIER_KEYWORDS
        .iter()
        .any(|tier| candidate.contains(tier) && job.contains(tier))
}

const EXPERIENCE_RULES: &[ExperienceRule] = &[
    ExperienceRule {
        rule: "job-experience-unspecified",
        score: 75,
        applies: job_experience_unspecified,
    },
    ExperienceRule {
        rule: "candidate-experience-unspecified",
        score: 50,
        applies: candidate_experience_unspecified,
    },
    ExperienceRule {
        rule: "shared-seniority-tier",
        score: 95,
        applies: shared_seniority_tier,
    },
];

const EXPERIENCE_FALLBACK: FactorVerdict = FactorVerdict {
    rule: "unrelated-experience-text",
    score: 70,
};

/// Score experience compatibility via tier-keyword co-occurrence.
pub fn experience_match(
    candidate_experience: Option<&str>,
    required_experience: Option<&str>,
) -> FactorVerdict {
    let ctx = ExperienceContext {
        candidate: normalize_optional(candidate_experience),
        job: normalize_optional(required_experience),
    };

    for rule in EXPERIENCE_RULES {
        if (rule.applies)(&ctx) {
            return FactorVerdict {
                rule: rule.rule,
                score: rule.score,
            };
        }
    }
    EXPERIENCE_FALLBACK
}

/// Freshness steps: (max age in days, rule label, score), monotonically
/// decreasing. Rewards recency, not posting quality.
const RECENCY_STEPS: &[(f64, &'static str, u8)] = &[
    (1.0, "posted-within-1-day", 100),
    (3.0, "posted-within-3-days", 90),
    (7.0, "posted-within-1-week", 80),
    (14.0, "posted-within-2-weeks", 70),
];

const RECENCY_FALLBACK: FactorVerdict = FactorVerdict {
    rule: "posted-over-2-weeks",
    score: 60,
};

/// Score posting freshness as a step function of age in fractional days.
pub fn recency_match(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> FactorVerdict {
    let age_days = now.signed_duration_since(posted_at).num_seconds() as f64 / 86_400.0;

    for (max_age, rule, score) in RECENCY_STEPS.iter().copied() {
        if age_days <= max_age {
            return FactorVerdict { rule, score };
        }
    }
    RECENCY_FALLBACK
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Blank strings carry no signal; treat them like absent fields.
fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(normalize)
        .filter(|normalized| !normalized.is_empty())
}
