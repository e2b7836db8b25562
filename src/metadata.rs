//! Token metadata documents for stored trees.

use crate::store::TreeRecord;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProperties {
    pub score: u32,
    pub age: u32,
    pub branches: u32,
    pub foliage: u32,
    pub growth_steps: u64,
    pub can_grow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub token_id: u64,
    pub name: String,
    pub description: String,
    /// `data:` URI of the cached SVG
    pub image: String,
    pub properties: TokenProperties,
}

impl From<&TreeRecord> for TokenMetadata {
    fn from(record: &TreeRecord) -> Self {
        let score = record.state.score();
        Self {
            token_id: record.token_id,
            name: format!("Bonsai #{}", record.token_id),
            description: format!(
                "A procedurally grown pixel bonsai. Seed {}, {} growth steps.",
                record.state.seed,
                record.growth_steps()
            ),
            image: svg_data_uri(&record.cached_svg),
            properties: TokenProperties {
                score: score.total,
                age: score.age,
                branches: score.branches,
                foliage: score.foliage,
                growth_steps: record.growth_steps(),
                can_grow: record.state.can_grow(),
            },
        }
    }
}

pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
