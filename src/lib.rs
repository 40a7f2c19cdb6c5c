pub mod node;

pub use node::*;

impl QuadtreeNode {
	/// Counts every node in the tree, this one included.
	pub fn node_count(&self) -> usize {
		match &self.kind {
			NodeKind::Leaf(_) => 1,
			NodeKind::Branch(sections) =>
				1 + sections.iter().map(QuadtreeNode::node_count).sum::<usize>(),
		}
	}

	/// Counts the leaf nodes in the tree.
	///
	/// Each leaf is one flat square in the rendered output, so this is
	/// the effective "cell count" of the compressed image.
	pub fn leaf_count(&self) -> usize {
		match &self.kind {
			NodeKind::Leaf(_) => 1,
			NodeKind::Branch(sections) =>
				sections.iter().map(QuadtreeNode::leaf_count).sum(),
		}
	}

	/// Number of subdivision levels below this node; a lone leaf is zero
	/// levels deep.
	pub fn depth(&self) -> usize {
		match &self.kind {
			NodeKind::Leaf(_) => 0,
			NodeKind::Branch(sections) =>
				1 + sections.iter().map(QuadtreeNode::depth).max().unwrap_or(0),
		}
	}
}
