mod clusters;

pub use clusters::ClustersGenerator;
