use serde::{Deserialize, Serialize};

/// Opaque filter expression. Only its presence matters to the tuner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expr(pub serde_json::Value);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorType {
    #[default]
    FloatVector,
    BinaryVector,
    Float16Vector,
    BFloat16Vector,
    SparseFloatVector,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryInfo {
    pub topk: i64,
    #[serde(default)]
    pub metric_type: String,
    /// JSON-encoded engine parameters such as `level` and `ef`.
    #[serde(default)]
    pub search_params: String,
    #[serde(default = "default_round_decimal")]
    pub round_decimal: i64,
}

fn default_round_decimal() -> i64 {
    -1
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorAnnsNode {
    #[serde(default)]
    pub vector_type: VectorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Expr>,
    pub query_info: QueryInfo,
    #[serde(default)]
    pub placeholder_tag: String,
    #[serde(default)]
    pub field_id: i64,
}

impl VectorAnnsNode {
    pub fn has_filter(&self) -> bool {
        self.predicates.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Expr>,
    #[serde(default)]
    pub is_count: bool,
    #[serde(default)]
    pub limit: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    VectorAnns(VectorAnnsNode),
    Predicates(Expr),
    Query(QueryNode),
}

impl PlanKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::VectorAnns(_) => "vector_anns",
            Self::Predicates(_) => "predicates",
            Self::Query(_) => "query",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanNode {
    #[serde(default)]
    pub node: Option<PlanKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_field_ids: Vec<i64>,
}

impl PlanNode {
    pub fn vector_anns(node: VectorAnnsNode) -> Self {
        Self {
            node: Some(PlanKind::VectorAnns(node)),
            output_field_ids: Vec::new(),
        }
    }

    pub fn node_type(&self) -> &'static str {
        self.node.as_ref().map(PlanKind::name).unwrap_or("none")
    }
}
