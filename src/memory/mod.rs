pub mod admission;
pub mod diversity;
pub mod recency;
pub mod retrieval;
pub mod similarity;
pub mod summary;
pub mod types;

pub use admission::{filter_for_admission, is_actionable, is_stable};
pub use diversity::select_diverse;
pub use recency::{freshness, recency_boost, RecencyWeights};
pub use retrieval::{rank_candidates, retrieve, retrieve_at};
pub use similarity::cosine_similarity;
pub use summary::update_summary;
pub use types::{AdmittedStatement, Exchange, Fact, FactKind, RetrievalCandidate, RetrievedFact};
