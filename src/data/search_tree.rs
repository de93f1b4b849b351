//! # Search tree
//!
//! Nodes of the branch-and-bound tree with their local variable bounds. Only the parts that the
//! separation storage interacts with are modelled: there is no node selection.
use crate::algorithm::separation::environment::{NodeId, Tree};
use crate::data::linear_program::domain::Domains;
use crate::data::linear_program::elements::BoundDirection;

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    depth: usize,
    /// Bounds valid within the subtree of this node.
    domains: Domains,
    infeasible: bool,
}

/// Nodes of a branch-and-bound search, one of which is in focus.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    focus: NodeId,
}

impl SearchTree {
    /// Create a tree with only a root node, which gets the focus.
    ///
    /// # Arguments
    ///
    /// * `domains`: Global bounds of the variables.
    #[must_use]
    pub fn new(domains: Domains) -> Self {
        Self {
            nodes: vec![Node { parent: None, depth: 0, domains, infeasible: false }],
            focus: NodeId(0),
        }
    }

    /// The node the search started at.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a node below another one.
    ///
    /// The child starts out with the bounds of its parent.
    pub fn create_child(&mut self, parent: NodeId) -> NodeId {
        let node = Node {
            parent: Some(parent),
            depth: self.nodes[parent.0].depth + 1,
            domains: self.nodes[parent.0].domains.clone(),
            infeasible: false,
        };
        self.nodes.push(node);

        NodeId(self.nodes.len() - 1)
    }

    /// Move the focus to another node.
    pub fn focus(&mut self, node: NodeId) {
        debug_assert!(node.0 < self.nodes.len());

        self.focus = node;
    }

    /// `None` for the root.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Bounds of the variables at a node.
    #[must_use]
    pub fn node_domains(&self, node: NodeId) -> &Domains {
        &self.nodes[node.0].domains
    }

    /// Whether a bound change made this node infeasible.
    #[must_use]
    pub fn is_infeasible(&self, node: NodeId) -> bool {
        self.nodes[node.0].infeasible
    }
}

impl Tree for SearchTree {
    fn current_node(&self) -> NodeId {
        self.focus
    }

    fn node_depth(&self, node: NodeId) -> usize {
        self.nodes[node.0].depth
    }

    fn domains(&self) -> &Domains {
        &self.nodes[self.focus.0].domains
    }

    fn apply_bound_change(
        &mut self,
        node: NodeId,
        variable: usize,
        value: f64,
        direction: BoundDirection,
    ) -> bool {
        let node = &mut self.nodes[node.0];
        let domain = &mut node.domains[variable];

        let crosses = domain.bound(!direction).is_some_and(|opposite| match direction {
            BoundDirection::Lower => value > opposite,
            BoundDirection::Upper => value < opposite,
        });
        if crosses {
            node.infeasible = true;
        } else {
            domain.set_bound(direction, value);
        }

        crosses
    }
}
