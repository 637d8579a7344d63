use std::any::Any;
use std::sync::Arc;

/// Shared handle to a schema attribute. `Send + Sync` so headers can be
/// shared with worker threads during validity computation.
pub type AttributeRef = Arc<dyn Attribute + Send + Sync>;

pub trait Attribute: Any + std::fmt::Debug {
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    /// True for nominal (finite label set) attributes.
    fn is_nominal(&self) -> bool;

    /// True for real-valued attributes.
    fn is_numeric(&self) -> bool;

    fn arff_representation(&self) -> String;
}
