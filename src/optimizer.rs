use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    codec::{JsonPlanCodec, PlanCodec},
    error::TuneError,
    estimate::{estimate_ef, EfEstimate},
    hook::QueryHook,
    parameters::{extract_search_params, resolve_level},
    plan::PlanKind,
    rewrite::rewrite_query_info,
    types::CollectionId,
};

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub collection_id: CollectionId,
    /// Shard fan-out of the search. Values below one are read as one.
    pub total_channel_num: i64,
    pub serialized_expr_plan: Option<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The plan was rewritten with the given parameters.
    Tuned(EfEstimate),
    /// The plan is not a vector search and was left byte-for-byte as it was.
    Unsupported,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchParamOptimizer<C: PlanCodec = JsonPlanCodec> {
    codec: C,
}

impl<C: PlanCodec> SearchParamOptimizer<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Tunes `ef` and topK of a vector search plan for the estimated number of
    /// segments the search fans out to.
    ///
    /// `num_segments` is the per-shard segment estimate. On error the request
    /// is left as it was.
    pub fn optimize(
        &self,
        req: &mut SearchRequest,
        hook: Option<&dyn QueryHook>,
        num_segments: usize,
    ) -> Result<Outcome, TuneError> {
        let collection = req.collection_id;
        let Some(serialized_plan) = req
            .serialized_expr_plan
            .as_deref()
            .filter(|plan| !plan.is_empty())
        else {
            warn!(%collection, "serialized plan not found");
            return Err(TuneError::parameter_invalid("serialized search plan", "nil"));
        };
        if hook.is_some() {
            debug!(%collection, "query hook present, tuning with built-in curves");
        }

        let channel_num = req.total_channel_num.max(1) as usize;

        let mut plan = self.codec.decode(serialized_plan).map_err(|e| {
            warn!(%collection, error = %e, "failed to unmarshal plan");
            TuneError::parameter_invalid_with(
                "valid serialized search plan",
                "no unmarshalable one",
                e,
            )
        })?;

        let node_type = plan.node_type();
        let Some(PlanKind::VectorAnns(anns)) = plan.node.as_mut() else {
            warn!(%collection, node_type, "not supported node type");
            return Ok(Outcome::Unsupported);
        };

        let est_segment_num = num_segments.saturating_mul(channel_num);
        let has_filter = anns.has_filter();
        let query_info = &mut anns.query_info;

        let params = extract_search_params(&query_info.search_params)?;
        let level = resolve_level(&params);
        let estimate = estimate_ef(query_info.topk, est_segment_num, level, has_filter);

        rewrite_query_info(query_info, params, estimate).map_err(|e| {
            warn!(%collection, error = %e, "failed to execute queryHook");
            e
        })?;
        debug!(
            %collection,
            est_segment_num,
            level,
            has_filter,
            ef = estimate.ef,
            topk = query_info.topk,
            search_params = %query_info.search_params,
            "optimized search params done"
        );

        let encoded = self.codec.encode(&plan).map_err(|e| {
            warn!(%collection, error = %e, "failed to marshal optimized plan");
            TuneError::parameter_invalid_with("marshalable search plan", "plan with marshal error", e)
        })?;
        req.serialized_expr_plan = Some(encoded);

        Ok(Outcome::Tuned(estimate))
    }

    /// Optimizes every request independently. Results are in request order and
    /// a failing request does not affect the others.
    pub fn optimize_all(
        &self,
        requests: &mut [SearchRequest],
        num_segments: usize,
    ) -> Vec<Result<Outcome, TuneError>> {
        requests
            .par_iter_mut()
            .map(|req| self.optimize(req, None, num_segments))
            .collect()
    }
}

pub fn optimize_search_params(
    req: &mut SearchRequest,
    hook: Option<&dyn QueryHook>,
    num_segments: usize,
) -> Result<Outcome, TuneError> {
    SearchParamOptimizer::<JsonPlanCodec>::default().optimize(req, hook, num_segments)
}
