//! Text rendering of a trie for debugging

use super::{Node, TrieLevel};
use std::fmt::Debug;
use std::io::{self, Write};

const INDENT: &str = "  ";

/// Write `level` and everything below it, one entry per line
///
/// Interior entries print as `+ key:` and leaves as `- key: (a, b)`, indented
/// two spaces per depth.
pub fn dump_level<A, B, W>(level: &TrieLevel<A, B>, indent: usize, out: &mut W) -> io::Result<()>
where
    A: Debug,
    B: Debug,
    W: Write + ?Sized,
{
    let pad = INDENT.repeat(indent);

    for entry in level.entries() {
        match &entry.node {
            Node::Leaf(leaf) => {
                writeln!(out, "{}- {}: ({:?}, {:?})", pad, entry.key, leaf.a, leaf.b)?;
            }
            Node::Interior(child) => {
                writeln!(out, "{}+ {}:", pad, entry.key)?;
                dump_level(&**child, indent + 1, out)?;
            }
        }
    }

    Ok(())
}
