#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    Document,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

/// Directory structure of the content root, stored as an arena. Children are
/// kept in walk order.
#[derive(Debug, Clone)]
pub struct SiteTree {
    nodes: Vec<TreeNode>,
}

impl SiteTree {
    pub fn new(root_name: &str) -> Self {
        SiteTree {
            nodes: vec![TreeNode {
                name: root_name.to_string(),
                kind: NodeKind::Directory,
                children: vec![],
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            name: name.to_string(),
            kind,
            children: vec![],
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Indented outline, one entry per line, directories suffixed with `/`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(self.root(), 0, &mut out);
        out
    }

    fn write_outline(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.get(id);
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.name);
        if node.kind == NodeKind::Directory {
            out.push('/');
        }
        out.push('\n');
        for child in &node.children {
            self.write_outline(*child, depth + 1, out);
        }
    }
}
