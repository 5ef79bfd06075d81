use thiserror::Error;

use crate::plan::PlanNode;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("empty plan payload")]
    Empty,
}

/// Converts between serialized plan bytes and the plan tree.
pub trait PlanCodec: Sync {
    fn decode(&self, bytes: &[u8]) -> Result<PlanNode, CodecError>;
    fn encode(&self, plan: &PlanNode) -> Result<Vec<u8>, CodecError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonPlanCodec;

impl PlanCodec for JsonPlanCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PlanNode, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::Empty);
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, plan: &PlanNode) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(plan)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Expr, PlanKind, QueryInfo, QueryNode, VectorAnnsNode};

    fn sample_plan() -> PlanNode {
        PlanNode::vector_anns(VectorAnnsNode {
            predicates: Some(Expr(serde_json::json!({"term": {"field": "age", "values": [1, 2]}}))),
            query_info: QueryInfo {
                topk: 10,
                metric_type: "L2".to_string(),
                search_params: r#"{"level":2}"#.to_string(),
                round_decimal: -1,
            },
            placeholder_tag: "$0".to_string(),
            field_id: 101,
            ..Default::default()
        })
    }

    #[test]
    fn decode_encoded_plan() {
        let codec = JsonPlanCodec;
        let plan = sample_plan();
        let bytes = codec.encode(&plan).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), plan);
    }

    #[test]
    fn decode_minimal_vector_anns() {
        let codec = JsonPlanCodec;
        let plan = codec
            .decode(br#"{"node":{"vector_anns":{"query_info":{"topk":5}}}}"#)
            .unwrap();
        let anns = match plan.node {
            Some(PlanKind::VectorAnns(anns)) => anns,
            other => panic!("expected vector_anns, got {other:?}"),
        };
        assert!(!anns.has_filter());
        assert_eq!(anns.query_info.topk, 5);
        assert_eq!(anns.query_info.search_params, "");
        assert_eq!(anns.query_info.round_decimal, -1);
    }

    #[test]
    fn decode_query_node() {
        let codec = JsonPlanCodec;
        let plan = codec
            .decode(br#"{"node":{"query":{"is_count":true}}}"#)
            .unwrap();
        assert_eq!(
            plan.node,
            Some(PlanKind::Query(QueryNode {
                predicates: None,
                is_count: true,
                limit: 0
            }))
        );
        assert_eq!(plan.node_type(), "query");
    }

    #[test]
    fn decode_rejects_garbage() {
        let codec = JsonPlanCodec;
        assert!(matches!(codec.decode(b""), Err(CodecError::Empty)));
        assert!(matches!(
            codec.decode(b"\x08\x01\x12"),
            Err(CodecError::Serde(_))
        ));
        assert!(matches!(
            codec.decode(br#"{"node":{"unknown_kind":{}}}"#),
            Err(CodecError::Serde(_))
        ));
    }
}
