pub mod metrics;
pub mod recommend;
pub mod resilience;

pub use metrics::{
    betweenness_centrality, centrality, degree_centrality, summarize, top_central,
    CentralityEntry, NetworkSummary,
};
pub use recommend::{recommendations, Recommendation};
pub use resilience::{simulate_removal, RemovalImpact};
