//! Recipe dependency graph.
//!
//! Provides the `RecipeGraph` type, which represents which materials are
//! consumed by which recipes as a directed graph. Used to validate a
//! catalog up front (no recipe may transitively consume its own output)
//! and to list materials in production order.

use crate::error::CraftError;
use crate::material_id::MaterialId;
use crate::model::Material;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed graph of recipe dependencies.
///
/// Nodes are `MaterialId`s. If material A's recipe consumes B, there is an
/// edge B -> A: B must be produced before A.
///
/// # Examples
///
/// ```rust
/// use craftcalc::graph::RecipeGraph;
/// use craftcalc::MaterialId;
///
/// let mut graph = RecipeGraph::new();
/// let ore = MaterialId::from_str("Iron Ore");
/// let ingot = MaterialId::from_str("Iron Ingot");
///
/// // Ingot consumes ore
/// graph.add_edge(ingot.clone(), ore.clone());
///
/// let order = graph.production_order().unwrap();
/// assert_eq!(order, vec![ore, ingot]);
/// ```
pub struct RecipeGraph {
    graph: DiGraph<MaterialId, ()>,
    node_map: HashMap<MaterialId, NodeIndex>,
}

impl RecipeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build the graph for a set of materials.
    ///
    /// Every material becomes a node and every recipe input an edge.
    /// Inputs that name unknown materials still get a node, so
    /// [`contains_node`](Self::contains_node) alone cannot tell them apart.
    pub fn from_materials<'a>(materials: impl IntoIterator<Item = &'a Material>) -> Self {
        let mut graph = Self::new();
        for material in materials {
            graph.add_node(material.name.clone());
            for input in material.method.inputs() {
                graph.add_edge(material.name.clone(), input.material.clone());
            }
        }
        graph
    }

    /// Add a node to the graph if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `material` - The material to add as a node
    ///
    /// # Returns
    ///
    /// The node index for this material, existing or newly created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::graph::RecipeGraph;
    /// use craftcalc::MaterialId;
    ///
    /// let mut graph = RecipeGraph::new();
    /// let first = graph.add_node(MaterialId::from_str("Coal"));
    /// let again = graph.add_node(MaterialId::from_str("Coal"));
    ///
    /// assert_eq!(first, again);
    /// assert_eq!(graph.node_count(), 1);
    /// ```
    pub fn add_node(&mut self, material: MaterialId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&material) {
            idx
        } else {
            let idx = self.graph.add_node(material.clone());
            self.node_map.insert(material, idx);
            idx
        }
    }

    /// Record that `product` consumes `input`.
    ///
    /// Both nodes are added if missing. Repeated inputs add parallel edges,
    /// which do not affect ordering or cycle detection.
    ///
    /// # Arguments
    ///
    /// * `product` - The material whose recipe consumes `input`
    /// * `input` - The material consumed, produced before `product`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::graph::RecipeGraph;
    /// use craftcalc::MaterialId;
    ///
    /// let mut graph = RecipeGraph::new();
    /// let grip = MaterialId::from_str("Grip");
    /// let leather = MaterialId::from_str("Leather");
    ///
    /// // Grip consumes leather
    /// graph.add_edge(grip.clone(), leather.clone());
    ///
    /// assert!(graph.contains_node(&leather));
    /// assert_eq!(graph.production_order().unwrap(), vec![leather, grip]);
    /// ```
    pub fn add_edge(&mut self, product: MaterialId, input: MaterialId) {
        let product_idx = self.add_node(product);
        let input_idx = self.add_node(input);
        self.graph.add_edge(input_idx, product_idx, ());
    }

    /// Fail with the offending path if any recipe consumes its own output.
    ///
    /// The path is reported in consumption order and closed, e.g. if A
    /// consumes B and B consumes A the error carries `[A, B, A]`.
    ///
    /// ```rust
    /// use craftcalc::graph::RecipeGraph;
    /// use craftcalc::MaterialId;
    ///
    /// let mut graph = RecipeGraph::new();
    /// let a = MaterialId::from_str("A");
    /// let b = MaterialId::from_str("B");
    ///
    /// graph.add_edge(a.clone(), b.clone());
    /// assert!(graph.detect_cycles().is_ok());
    ///
    /// graph.add_edge(b.clone(), a.clone());
    /// assert!(graph.detect_cycles().is_err());
    /// ```
    pub fn detect_cycles(&self) -> Result<(), CraftError> {
        let mut visited = HashSet::new();
        let mut on_path = HashSet::new();

        for node_idx in self.graph.node_indices() {
            if !visited.contains(&node_idx) {
                let mut path = Vec::new();
                if let Some(cycle) =
                    self.dfs_cycle_detect(node_idx, &mut visited, &mut on_path, &mut path)
                {
                    return Err(cycle);
                }
            }
        }

        Ok(())
    }

    // Walks from a product towards its inputs (incoming edges).
    fn dfs_cycle_detect(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_path: &mut HashSet<NodeIndex>,
        path: &mut Vec<MaterialId>,
    ) -> Option<CraftError> {
        visited.insert(node);
        on_path.insert(node);
        path.push(self.graph[node].clone());

        for input in self.graph.neighbors_directed(node, Direction::Incoming) {
            if !visited.contains(&input) {
                if let Some(cycle) = self.dfs_cycle_detect(input, visited, on_path, path) {
                    return Some(cycle);
                }
            } else if on_path.contains(&input) {
                let repeated = self.graph[input].clone();
                let start = path.iter().position(|id| id == &repeated).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(repeated);
                return Some(CraftError::Cycle { path: cycle });
            }
        }

        on_path.remove(&node);
        path.pop();
        None
    }

    /// All materials ordered so that inputs come before what consumes them.
    pub fn production_order(&self) -> Result<Vec<MaterialId>, CraftError> {
        self.detect_cycles()?;

        match toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .into_iter()
                .map(|idx| self.graph[idx].clone())
                .collect()),
            Err(cycle) => Err(CraftError::Cycle {
                path: vec![self.graph[cycle.node_id()].clone()],
            }),
        }
    }

    /// Check if a node exists in the graph.
    ///
    /// # Arguments
    ///
    /// * `material` - The material to check
    ///
    /// # Returns
    ///
    /// `true` if the node exists, `false` otherwise.
    pub fn contains_node(&self, material: &MaterialId) -> bool {
        self.node_map.contains_key(material)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Default for RecipeGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, Recipe};

    fn id(s: &str) -> MaterialId {
        MaterialId::from_str(s)
    }

    #[test]
    fn test_from_materials() {
        let ore = Material::new("Ore", "Mining").with_activity(Activity::new(1));
        let ingot = Material::new("Ingot", "Smithing")
            .with_recipe(Recipe::new(1).with_input("Ore", 2).with_input("Coal", 1));
        let graph = RecipeGraph::from_materials([&ore, &ingot]);

        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains_node(&id("Coal")));
    }

    #[test]
    fn test_production_order_puts_inputs_first() {
        let mut graph = RecipeGraph::new();
        graph.add_edge(id("Sword"), id("Ingot"));
        graph.add_edge(id("Sword"), id("Leather"));
        graph.add_edge(id("Ingot"), id("Ore"));

        let order = graph.production_order().unwrap();
        let pos = |name: &str| order.iter().position(|m| m.as_str() == name).unwrap();
        assert!(pos("Ore") < pos("Ingot"));
        assert!(pos("Ingot") < pos("Sword"));
        assert!(pos("Leather") < pos("Sword"));
    }

    #[test]
    fn test_cycle_path_is_closed() {
        let mut graph = RecipeGraph::new();
        graph.add_edge(id("A"), id("B"));
        graph.add_edge(id("B"), id("C"));
        graph.add_edge(id("C"), id("A"));

        match graph.detect_cycles() {
            Err(CraftError::Cycle { path }) => {
                assert_eq!(path.len(), 4);
                assert_eq!(path.first(), path.last());
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_consuming_recipe() {
        let mut graph = RecipeGraph::new();
        graph.add_edge(id("Seed"), id("Seed"));
        assert!(matches!(
            graph.production_order(),
            Err(CraftError::Cycle { .. })
        ));
    }

    #[test]
    fn test_shared_input_is_not_a_cycle() {
        let mut graph = RecipeGraph::new();
        graph.add_edge(id("Sword"), id("Ingot"));
        graph.add_edge(id("Shield"), id("Ingot"));
        graph.add_edge(id("Kit"), id("Sword"));
        graph.add_edge(id("Kit"), id("Shield"));
        assert!(graph.detect_cycles().is_ok());
    }
}
