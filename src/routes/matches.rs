use std::collections::HashMap;

use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::models::{
    AllMatchesResponse, CompareQuery, EnrichedMatch, HealthResponse, MatchRecord, Participant, ParticipantId,
    TopMatchesQuery, TopMatchesResponse,
};
use crate::routes::{error_response, AppState};

/// Configure health and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/all", web::get().to(all_matches))
        .route("/matches/stats", web::get().to(match_stats))
        .route("/matches/user/{id}", web::get().to(user_matches))
        .route("/matches/compare", web::get().to(compare));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn enrich(
    record: MatchRecord,
    by_id: &HashMap<ParticipantId, &Participant>,
    with_subject_name: bool,
) -> EnrichedMatch {
    let partner = by_id.get(&record.partner_id);
    EnrichedMatch {
        user_name: with_subject_name
            .then(|| by_id.get(&record.subject_id).map(|p| p.name.clone()))
            .flatten(),
        matched_with_name: partner.map(|p| p.name.clone()),
        matched_with_bio: partner.map(|p| p.about.clone()),
        record,
    }
}

fn index(snapshot: &[Participant]) -> HashMap<ParticipantId, &Participant> {
    snapshot.iter().map(|p| (p.id, p)).collect()
}

/// Population-wide optimal assignment
///
/// GET /api/v1/matches/all
async fn all_matches(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.roster.snapshot().await;

    let summary = match state.matcher.compute_assignment(&snapshot) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Failed to compute assignment over {} participants: {}", snapshot.len(), e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e.to_string());
        }
    };

    let by_id = index(&snapshot);
    HttpResponse::Ok().json(AllMatchesResponse {
        total_cost: summary.total_cost,
        average_compatibility: summary.average_compatibility,
        matches: summary.matches.into_iter().map(|m| enrich(m, &by_id, true)).collect(),
        unmatched: summary.unmatched,
    })
}

/// Aggregate figures for the current roster
///
/// GET /api/v1/matches/stats
async fn match_stats(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.roster.snapshot().await;

    match state.matcher.compute_assignment(&snapshot) {
        Ok(summary) => HttpResponse::Ok().json(summary.stats(snapshot.len())),
        Err(e) => {
            tracing::error!("Failed to compute stats: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e.to_string())
        }
    }
}

/// Best matches for one participant
///
/// GET /api/v1/matches/user/{id}?limit=10
///
/// An unknown id returns an empty list.
async fn user_matches(
    state: web::Data<AppState>,
    path: web::Path<ParticipantId>,
    query: web::Query<TopMatchesQuery>,
) -> impl Responder {
    let user_id = path.into_inner();
    let limit = state.matching.ranking_limit(query.limit);
    let snapshot = state.roster.snapshot().await;

    let ranked = state.matcher.top_matches(user_id, &snapshot, Some(limit));
    tracing::debug!("Ranked {} candidates for user {} (limit {})", ranked.len(), user_id, limit);

    let by_id = index(&snapshot);
    HttpResponse::Ok().json(TopMatchesResponse {
        matches: ranked.into_iter().map(|m| enrich(m, &by_id, false)).collect(),
    })
}

/// Ad hoc comparison of two participants
///
/// GET /api/v1/matches/compare?a={id}&b={id}
async fn compare(state: web::Data<AppState>, query: web::Query<CompareQuery>) -> impl Responder {
    let (Some(a), Some(b)) = (state.roster.get(query.a).await, state.roster.get(query.b).await) else {
        return error_response(
            StatusCode::NOT_FOUND,
            "User not found",
            format!("No participant for one of {} and {}", query.a, query.b),
        );
    };

    HttpResponse::Ok().json(state.matcher.compare(&a.preferences, &b.preferences))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PreferenceProfile, ScoreBreakdown};

    fn participant(id: ParticipantId, name: &str) -> Participant {
        Participant {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            about: format!("About {}", name),
            preferences: PreferenceProfile {
                cleanliness: "Very tidy".to_string(),
                sleep_schedule: "Flexible".to_string(),
                noise_tolerance: "Prefer quiet environment".to_string(),
                guests: "Rarely".to_string(),
                lifestyle: "Homebody".to_string(),
                study_work: "Morning person".to_string(),
                ac_preference: "No preference".to_string(),
                roommate_count: "1 roommate".to_string(),
            },
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_enrich_names() {
        let snapshot = vec![participant(1, "Ana"), participant(2, "Ben")];
        let by_id = index(&snapshot);
        let record = MatchRecord {
            subject_id: 1,
            partner_id: 2,
            compatibility_percentage: 100,
            breakdown: ScoreBreakdown::from_fn(|_| 100),
        };

        let enriched = enrich(record.clone(), &by_id, true);
        assert_eq!(enriched.user_name.as_deref(), Some("Ana"));
        assert_eq!(enriched.matched_with_name.as_deref(), Some("Ben"));
        assert_eq!(enriched.matched_with_bio.as_deref(), Some("About Ben"));

        let ranked = enrich(record, &by_id, false);
        assert!(ranked.user_name.is_none());
        let json = serde_json::to_value(&ranked).unwrap();
        assert!(json.get("userName").is_none());
        assert_eq!(json["partnerId"], 2);
    }
}
