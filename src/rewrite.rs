use serde_json::Value;

use crate::{
    error::TuneError,
    estimate::EfEstimate,
    parameters::{encode_search_params, SearchParamMap, EF_KEY},
    plan::QueryInfo,
};

/// Writes the tuned ef into the params and the adjusted topK into the query
/// info. `query_info` is left untouched if the params cannot be encoded.
pub fn rewrite_query_info(
    query_info: &mut QueryInfo,
    mut params: SearchParamMap,
    estimate: EfEstimate,
) -> Result<(), TuneError> {
    params.insert(EF_KEY.to_string(), Value::from(estimate.ef));
    let search_params = encode_search_params(&params)?;

    query_info.topk = estimate.topk;
    query_info.search_params = search_params;
    Ok(())
}
