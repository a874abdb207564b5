//! Navigation state over a document.
//!
//! The cursor is a stack of open frames. The root frame is held apart from the
//! stack, so the cursor can never be empty and the root can never be closed.
//! Each frame records its own addressing mode when it is pushed:
//!
//! - [`FrameMode::Object`]: named operations address members by name
//! - [`FrameMode::Array`]: names are ignored; writes append and reads address
//!   the element at `position`

use crate::document::NodeId;
use crate::{Error, Result};

/// Addressing mode of an open frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameMode {
    Object,
    Array { position: usize },
}

/// One open container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) node: NodeId,
    pub(crate) mode: FrameMode,
}

impl Frame {
    fn object(node: NodeId) -> Self {
        Frame {
            node,
            mode: FrameMode::Object,
        }
    }

    fn array(node: NodeId) -> Self {
        Frame {
            node,
            mode: FrameMode::Array { position: 0 },
        }
    }

    #[must_use]
    pub(crate) fn is_array(&self) -> bool {
        matches!(self.mode, FrameMode::Array { .. })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Cursor {
    root: Frame,
    stack: Vec<Frame>,
}

impl Cursor {
    pub(crate) fn new(root: NodeId) -> Self {
        Cursor {
            root: Frame::object(root),
            stack: Vec::new(),
        }
    }

    pub(crate) fn reset(&mut self, root: NodeId) {
        self.root = Frame::object(root);
        self.stack.clear();
    }

    pub(crate) fn top(&self) -> Frame {
        self.stack.last().copied().unwrap_or(self.root)
    }

    /// Number of frames open above the root.
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn push_object(&mut self, node: NodeId) {
        self.stack.push(Frame::object(node));
    }

    pub(crate) fn push_array(&mut self, node: NodeId) {
        self.stack.push(Frame::array(node));
    }

    pub(crate) fn pop_object(&mut self) -> Result<Frame> {
        match self.stack.last().map(Frame::is_array) {
            None => Err(misuse("close_entry called with no open entry")),
            Some(true) => Err(misuse("close_entry called while an array is open")),
            Some(false) => self
                .stack
                .pop()
                .ok_or_else(|| misuse("close_entry called with no open entry")),
        }
    }

    pub(crate) fn pop_array(&mut self) -> Result<Frame> {
        match self.stack.last().map(Frame::is_array) {
            Some(true) => self
                .stack
                .pop()
                .ok_or_else(|| misuse("close_array called with no open array")),
            Some(false) => Err(misuse("close_array called while an entry is open")),
            None => Err(misuse("close_array called with no open array")),
        }
    }

    /// Moves the innermost array frame to `position`. The top frame must be
    /// an array frame.
    pub(crate) fn set_position(&mut self, position: usize) -> bool {
        match self.stack.last_mut() {
            Some(Frame {
                mode: FrameMode::Array { position: current },
                ..
            }) => {
                *current = position;
                true
            }
            _ => false,
        }
    }
}

fn misuse(msg: &str) -> Error {
    log::debug!("rejected cursor operation: {msg}");
    Error::structural(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (NodeId, NodeId, NodeId) {
        let mut document = crate::document::Document::new();
        let root = document.root();
        let a = document.alloc(crate::document::Node::Null);
        let b = document.alloc(crate::document::Node::Null);
        (root, a, b)
    }

    #[test]
    fn test_root_is_never_popped() {
        let (root, _, _) = ids();
        let mut cursor = Cursor::new(root);
        assert!(cursor.pop_object().is_err());
        assert!(cursor.pop_array().is_err());
        assert_eq!(cursor.depth(), 0);
        assert_eq!(cursor.top().node, root);
    }

    #[test]
    fn test_close_kind_must_match() {
        let (root, entry, array) = ids();
        let mut cursor = Cursor::new(root);
        cursor.push_object(entry);
        cursor.push_array(array);

        assert!(matches!(cursor.pop_object(), Err(Error::Structural(_))));
        assert_eq!(cursor.depth(), 2);
        assert_eq!(cursor.pop_array().unwrap().node, array);

        assert!(matches!(cursor.pop_array(), Err(Error::Structural(_))));
        assert_eq!(cursor.pop_object().unwrap().node, entry);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_position_only_moves_array_frames() {
        let (root, entry, array) = ids();
        let mut cursor = Cursor::new(root);
        assert!(!cursor.set_position(1));

        cursor.push_array(array);
        assert!(cursor.set_position(3));
        assert_eq!(cursor.top().mode, FrameMode::Array { position: 3 });

        cursor.push_object(entry);
        assert!(!cursor.set_position(4));

        cursor.reset(root);
        assert_eq!(cursor.depth(), 0);
        assert_eq!(cursor.top().mode, FrameMode::Object);
    }
}
