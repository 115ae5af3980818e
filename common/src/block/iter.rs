//! Backward iterator over a chain of block summaries.
use super::tree::BlockReader;
use super::BlockSummary;

/// An iterator over a block and its ancestors, newest first.
#[derive(Debug)]
pub struct Ancestors<'a, R: ?Sized> {
    reader: &'a R,
    next: Option<&'a BlockSummary>,
}

impl<'a, R: BlockReader + ?Sized> Ancestors<'a, R> {
    /// Create a new iterator, starting at the given block.
    pub fn new(reader: &'a R, block: &'a BlockSummary) -> Self {
        Self {
            reader,
            next: Some(block),
        }
    }
}

impl<'a, R: BlockReader + ?Sized> Iterator for Ancestors<'a, R> {
    type Item = &'a BlockSummary;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.next?;
        self.next = self.reader.predecessor(block);

        Some(block)
    }
}
