use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use folio_api_types::SearchResults;

use crate::query_engine::QueryEngine;
use crate::render;

use super::models::SearchParams;

pub async fn search_handler(
    State(query_engine): State<Arc<QueryEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, (StatusCode, String)> {
    let start = Instant::now();

    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "missing search query in URL params".to_string(),
        ));
    }

    let outcome = query_engine.query(&query).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search error: {}", e),
        )
    })?;

    let query_terms: HashSet<String> = outcome.terms.iter().cloned().collect();
    let html = render::results_fragment(query_engine.corpus(), &outcome.hits, &query_terms);
    let num_results = outcome.hits.len() as u32;

    tracing::info!(
        query = %query,
        num_results,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search served"
    );

    Ok(Json(SearchResults { html, num_results }))
}
