mod headers;

pub use headers::{
    dataset_of, header_numeric_features, header_numeric_target, query_of, regression_dataset_of,
};
