use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge names a node that was never added to the builder
    #[error("Dangling edge {head} -[{relation}]-> {tail}: node '{missing}' is not in the graph")]
    DanglingEdge {
        head: String,
        tail: String,
        relation: String,
        missing: String,
    },

    #[error("Conflicting definitions for node '{0}'")]
    ConflictingNode(String),

    #[error("Relation '{name}' already registered with reverse name '{existing}'")]
    ConflictingRelation { name: String, existing: String },

    #[error("Unknown relation: {0}")]
    UnknownRelation(String),

    #[error("Unknown relation set: {0}")]
    UnknownRelationSet(String),

    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),
}
