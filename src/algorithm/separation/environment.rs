//! # Collaborators
//!
//! The separation storage reads the LP solution and the current variable bounds, and writes rows
//! into the LP and bound changes into the search tree. It does nothing else with either of them.
use crate::algorithm::separation::error::SeparationResult;
use crate::data::linear_program::domain::Domains;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::linear_program::row::Row;

/// Identifies a node of the search tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// The LP relaxation that cuts get added to.
pub trait Lp<R: Row> {
    /// Solution of the last solved relaxation, indexed by variable.
    fn primal_solution(&self) -> &[f64];
    /// Add a row to the relaxation.
    ///
    /// # Arguments
    ///
    /// * `row`: Not yet in the LP. The LP captures it.
    /// * `depth`: Depth of the node at which the row is added, used to remove it when the search
    /// leaves the subtree.
    fn add_row(&mut self, row: R, depth: usize) -> SeparationResult<()>;
}

/// The search tree that bound changes are applied to.
pub trait Tree {
    /// The node currently being processed.
    fn current_node(&self) -> NodeId;
    /// Number of ancestors of a node, zero at the root.
    fn node_depth(&self, node: NodeId) -> usize;
    /// Bounds of the variables as currently enforced at the focus node.
    fn domains(&self) -> &Domains;

    /// Change a bound of a variable at a node.
    ///
    /// # Return value
    ///
    /// Whether the node became infeasible: the new bound crosses the opposite bound.
    fn apply_bound_change(
        &mut self,
        node: NodeId,
        variable: usize,
        value: f64,
        direction: BoundDirection,
    ) -> bool;
}
