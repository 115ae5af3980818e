//! Block ancestry *model*.
//! Not for production use.
//!
//! Looks blocks up by scanning, and follows predecessors recursively. Used to
//! check the indexed ancestry walkers against.
use ion_common::block::{BlockKind, BlockSummary, Height};

#[derive(Debug, Clone)]
pub struct Model {
    pub blocks: Vec<BlockSummary>,
}

impl Model {
    pub fn new(blocks: impl IntoIterator<Item = BlockSummary>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }

    pub fn predecessor(&self, block: &BlockSummary) -> Option<&BlockSummary> {
        if block.height == 0 {
            return None;
        }
        self.blocks.iter().find(|b| b.height + 1 == block.height)
    }

    pub fn walk_back(&self, block: &BlockSummary, n: Height) -> Option<&BlockSummary> {
        if n == 0 {
            return self.blocks.iter().find(|b| b.height == block.height);
        }
        let prev = self.predecessor(block)?;

        self.walk_back(prev, n - 1)
    }

    pub fn hybrid_predecessor(
        &self,
        block: &BlockSummary,
        kind: BlockKind,
        min_height: Height,
    ) -> Option<&BlockSummary> {
        let prev = self.predecessor(block)?;

        if prev.height < min_height {
            None
        } else if prev.kind == kind {
            Some(prev)
        } else {
            self.hybrid_predecessor(prev, kind, min_height)
        }
    }
}
