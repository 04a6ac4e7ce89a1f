use crate::peer::outcome::PeerOutcome;
use crate::shared::wire::{MultiPeerResponse, Row};

const ALL_FAILED: &str = "All peer queries failed";

/// The merged answer to a multi-peer query. `outcomes` always holds one
/// entry per requested peer, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub success: bool,
    pub outcomes: Vec<PeerOutcome>,
    pub merged_rows: Vec<Row>,
    pub merged_columns: Vec<String>,
    pub total_rows: usize,
    pub error: Option<String>,
}

/// Folds ordered per-peer outcomes into one result.
///
/// The columns come from the first successful outcome; rows of every
/// successful outcome are concatenated in request order without checking
/// that their columns agree. If nothing succeeded the error quotes the
/// first outcome's error, whichever peer that was.
pub fn aggregate(outcomes: Vec<PeerOutcome>) -> AggregateResult {
    let Some(first_success) = outcomes.iter().find(|o| o.is_success()) else {
        let error = match outcomes.first().and_then(|o| o.error()) {
            Some(first) => format!("{ALL_FAILED}. First error: {first}"),
            None => ALL_FAILED.to_string(),
        };
        return AggregateResult {
            success: false,
            outcomes,
            merged_rows: Vec::new(),
            merged_columns: Vec::new(),
            total_rows: 0,
            error: Some(error),
        };
    };

    let merged_columns = first_success.columns().to_vec();
    let merged_rows: Vec<Row> = outcomes
        .iter()
        .filter(|o| o.is_success())
        .flat_map(|o| o.rows().iter().cloned())
        .collect();
    let total_rows = outcomes
        .iter()
        .filter(|o| o.is_success())
        .map(PeerOutcome::row_count)
        .sum();

    AggregateResult {
        success: true,
        outcomes,
        merged_rows,
        merged_columns,
        total_rows,
        error: None,
    }
}

impl From<AggregateResult> for MultiPeerResponse {
    fn from(result: AggregateResult) -> Self {
        MultiPeerResponse {
            success: result.success,
            results: result.outcomes.into_iter().map(Into::into).collect(),
            aggregated_data: result.merged_rows,
            columns: result.merged_columns,
            total_rows: result.total_rows,
            error: result.error,
        }
    }
}
