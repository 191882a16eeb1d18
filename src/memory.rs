//! [crate::memory] is an in-process implementation of [crate::tree::TreeNode].
//!
//! Nodes live in an arena shared by every handle of the same [MemoryTree]; handles are an
//! index into that arena, so they are cheap to clone and compare equal when they refer to the
//! same node. Removed nodes leave a hole in the arena and any handle still pointing at them
//! reports [TreeError::NotFound]. Holes are never reused, so a stale handle can not come back to
//! life as an unrelated node; the arena only grows for the lifetime of the tree.
use parking_lot::RwLock;
use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    namespace::{NamespaceRegistry, NamespaceTable},
    naming::split_prefix,
    tree::{TreeItem, TreeNode},
    TreeError,
};

/// Characters the memory store refuses in item names.
const ILLEGAL_NAME_CHARS: [char; 5] = ['/', '[', ']', '|', '*'];

const ROOT: usize = 0;

#[derive(Debug)]
struct NodeData {
    name: String,
    parent: Option<usize>,
    // Insertion order is the iteration order.
    children: Vec<(String, usize)>,
    properties: BTreeMap<String, String>,
}

impl NodeData {
    fn new(name: String, parent: Option<usize>) -> Self {
        NodeData {
            name,
            parent,
            children: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    fn child(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .find(|(child_name, _)| child_name == name)
            .map(|(_, id)| *id)
    }
}

#[derive(Debug)]
struct Arena {
    nodes: Vec<Option<NodeData>>,
    // Occupied slots in `nodes`.
    live: usize,
    namespaces: Option<NamespaceTable>,
}

impl Arena {
    fn node(&self, id: usize) -> Result<&NodeData, TreeError> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or_else(|| TreeError::NotFound(format!("node #{id} has been removed")))
    }

    fn node_mut(&mut self, id: usize) -> Result<&mut NodeData, TreeError> {
        self.nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or_else(|| TreeError::NotFound(format!("node #{id} has been removed")))
    }

    fn check_name(&self, name: &str) -> Result<(), TreeError> {
        if name.is_empty() || name == "." || name == ".." || name.trim() != name {
            return Err(TreeError::InvalidName(format!("'{name}'")));
        }
        if let Some(c) = name.chars().find(|c| ILLEGAL_NAME_CHARS.contains(c)) {
            return Err(TreeError::InvalidName(format!(
                "'{name}' contains illegal character '{c}'"
            )));
        }
        if let (Some(prefix), local) = split_prefix(name) {
            if prefix.is_empty() || local.is_empty() || local.contains(':') {
                return Err(TreeError::InvalidName(format!(
                    "'{name}' is not a well formed qualified name"
                )));
            }
            if let Some(namespaces) = &self.namespaces {
                if !namespaces.has_prefix(prefix) {
                    return Err(TreeError::InvalidName(format!(
                        "'{name}' uses unregistered prefix '{prefix}', known: {namespaces}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn path(&self, id: usize) -> Result<String, TreeError> {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            if node.parent.is_some() {
                segments.push(node.name.as_str());
            }
            cursor = node.parent;
        }
        segments.reverse();
        Ok(format!("/{}", segments.join("/")))
    }
}

/// An in-memory tree with a single, nameless root.
#[derive(Clone)]
pub struct MemoryTree {
    arena: Arc<RwLock<Arena>>,
}

impl MemoryTree {
    /// A tree that accepts any prefix in qualified names.
    pub fn new() -> Self {
        MemoryTree::build(None)
    }

    /// A tree that rejects qualified names whose prefix is not in `namespaces`.
    pub fn with_namespaces(namespaces: NamespaceTable) -> Self {
        MemoryTree::build(Some(namespaces))
    }

    fn build(namespaces: Option<NamespaceTable>) -> Self {
        MemoryTree {
            arena: Arc::new(RwLock::new(Arena {
                nodes: vec![Some(NodeData::new(String::new(), None))],
                live: 1,
                namespaces,
            })),
        }
    }

    pub fn root(&self) -> MemoryNode {
        MemoryNode {
            arena: self.arena.clone(),
            id: ROOT,
        }
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.read().live
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        MemoryTree::new()
    }
}

impl fmt::Debug for MemoryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTree")
            .field("nodes", &self.node_count())
            .finish()
    }
}

/// Handle to a node of a [MemoryTree].
#[derive(Clone)]
pub struct MemoryNode {
    arena: Arc<RwLock<Arena>>,
    id: usize,
}

impl MemoryNode {
    fn handle(&self, id: usize) -> MemoryNode {
        MemoryNode {
            arena: self.arena.clone(),
            id,
        }
    }

    /// Absolute path of this node, `/` for the root.
    pub fn path(&self) -> Result<String, TreeError> {
        self.arena.read().path(self.id)
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// Set (or overwrite) the property `name`.
    pub fn set_property(&self, name: &str, value: &str) -> Result<MemoryProperty, TreeError> {
        let mut arena = self.arena.write();
        arena.check_name(name)?;
        let node = arena.node_mut(self.id)?;
        node.properties.insert(name.to_string(), value.to_string());
        Ok(MemoryProperty {
            arena: self.arena.clone(),
            node: self.id,
            name: name.to_string(),
        })
    }

    pub fn property(&self, name: &str) -> Result<Option<String>, TreeError> {
        Ok(self.arena.read().node(self.id)?.properties.get(name).cloned())
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.arena, &other.arena) && self.id == other.id
    }
}

impl Eq for MemoryNode {}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Ok(path) => write!(f, "MemoryNode({path})"),
            Err(_) => write!(f, "MemoryNode(#{} removed)", self.id),
        }
    }
}

impl TreeItem for MemoryNode {
    fn name(&self) -> Result<String, TreeError> {
        Ok(self.arena.read().node(self.id)?.name.clone())
    }

    fn remove(&self) -> Result<(), TreeError> {
        if self.is_root() {
            return Err(TreeError::Repository(
                "the root node cannot be removed".to_string(),
            ));
        }
        let mut arena = self.arena.write();
        let parent = arena.node(self.id)?.parent;
        if let Some(parent) = parent {
            arena
                .node_mut(parent)?
                .children
                .retain(|(_, child)| *child != self.id);
        }
        let mut pending = vec![self.id];
        while let Some(id) = pending.pop() {
            if let Some(node) = arena.nodes.get_mut(id).and_then(Option::take) {
                arena.live -= 1;
                pending.extend(node.children.iter().map(|(_, child)| *child));
            }
        }
        Ok(())
    }
}

impl TreeNode for MemoryNode {
    type Property = MemoryProperty;

    fn has_child(&self, name: &str) -> Result<bool, TreeError> {
        Ok(self.arena.read().node(self.id)?.child(name).is_some())
    }

    fn get_child(&self, name: &str) -> Result<Self, TreeError> {
        let arena = self.arena.read();
        match arena.node(self.id)?.child(name) {
            Some(id) => Ok(self.handle(id)),
            None => Err(TreeError::NotFound(format!(
                "{}/{name}",
                arena.path(self.id)?.trim_end_matches('/')
            ))),
        }
    }

    fn add_child(&self, name: &str) -> Result<Self, TreeError> {
        let mut arena = self.arena.write();
        arena.check_name(name)?;
        if arena.node(self.id)?.child(name).is_some() {
            return Err(TreeError::ItemExists(format!(
                "{}/{name}",
                arena.path(self.id)?.trim_end_matches('/')
            )));
        }
        let id = arena.nodes.len();
        arena
            .nodes
            .push(Some(NodeData::new(name.to_string(), Some(self.id))));
        arena.node_mut(self.id)?.children.push((name.to_string(), id));
        arena.live += 1;
        Ok(self.handle(id))
    }

    fn children(&self) -> Result<Vec<Self>, TreeError> {
        Ok(self
            .arena
            .read()
            .node(self.id)?
            .children
            .iter()
            .map(|(_, id)| self.handle(*id))
            .collect())
    }

    fn properties(&self) -> Result<Vec<MemoryProperty>, TreeError> {
        Ok(self
            .arena
            .read()
            .node(self.id)?
            .properties
            .keys()
            .map(|name| MemoryProperty {
                arena: self.arena.clone(),
                node: self.id,
                name: name.clone(),
            })
            .collect())
    }
}

/// Handle to a property of a [MemoryNode].
#[derive(Clone)]
pub struct MemoryProperty {
    arena: Arc<RwLock<Arena>>,
    node: usize,
    name: String,
}

impl MemoryProperty {
    pub fn value(&self) -> Result<String, TreeError> {
        self.arena
            .read()
            .node(self.node)?
            .properties
            .get(&self.name)
            .cloned()
            .ok_or_else(|| TreeError::NotFound(format!("property '{}'", self.name)))
    }
}

impl fmt::Debug for MemoryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryProperty(#{}/{})", self.node, self.name)
    }
}

impl TreeItem for MemoryProperty {
    fn name(&self) -> Result<String, TreeError> {
        Ok(self.name.clone())
    }

    fn remove(&self) -> Result<(), TreeError> {
        let mut arena = self.arena.write();
        match arena.node_mut(self.node)?.properties.remove(&self.name) {
            Some(_) => Ok(()),
            None => Err(TreeError::NotFound(format!("property '{}'", self.name))),
        }
    }
}
