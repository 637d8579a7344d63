use crate::streams::ClustersGenerator;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::ClustersParameters;

impl TryFrom<ClustersParameters> for ClustersGenerator {
    type Error = BuildError;

    fn try_from(p: ClustersParameters) -> Result<Self, Self::Error> {
        ClustersGenerator::new(
            p.num_classes,
            p.num_features,
            p.spread,
            p.max_instances,
            p.seed,
        )
        .map_err(BuildError::from)
    }
}
