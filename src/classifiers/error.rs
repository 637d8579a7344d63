use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Training data violates the learner's capability set (attribute or
    /// class types, label codes). `fit` never partially succeeds.
    #[error("incompatible training data: {0}")]
    IncompatibleData(String),

    /// Schema has no usable (non-class nominal/numeric) attributes, so
    /// distances are undefined.
    #[error("schema has no usable attributes")]
    EmptySchema,

    /// `predict` called before any successful `fit`.
    #[error("predict called before fit")]
    NotFitted,

    /// `predict` against an empty training set (every row was dropped for a
    /// missing class label).
    #[error("training set is empty, no neighbors available")]
    EmptyNeighborhood,

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
