//! Generational storage for engine nodes.
//!
//! Every allocation is addressed by a [Handle] carrying the slot index and the generation the
//! slot had when the node was inserted. Removing a node bumps the slot's generation, so any
//! handle still pointing at it fails with [GeoHandleError::Lifetime] instead of reading
//! whatever is stored there next.

use crate::coord::CoordBuffer;
use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoHandleError, Result};

/// Opaque reference to one engine allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// What a node stores: its own coordinates, or the handles of its members.
#[derive(Debug, Clone)]
pub enum Payload {
    Coords(CoordBuffer),
    Children(Vec<Handle>),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub geom_type: GeometryType,
    pub srid: Option<i32>,
    pub dim: Dimension,
    /// The node whose payload lists this one. Never keeps the node alive.
    pub parent: Option<Handle>,
    pub payload: Payload,
}

impl Node {
    pub fn children(&self) -> &[Handle] {
        match &self.payload {
            Payload::Children(children) => children,
            Payload::Coords(_) => &[],
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Node) -> Handle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            Handle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            Handle {
                index,
                generation: 0,
            }
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_ok()
    }

    pub fn get(&self, handle: Handle) -> Result<&Node> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or_else(|| stale(handle))
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut Node> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| stale(handle))
    }

    /// Remove `handle` and every node below it, returning how many nodes were freed.
    ///
    /// The caller is responsible for unlinking `handle` from its parent's payload.
    pub fn remove_tree(&mut self, handle: Handle) -> Result<usize> {
        let mut pending = vec![handle];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            let slot = self
                .slots
                .get_mut(next.index as usize)
                .filter(|slot| slot.generation == next.generation)
                .ok_or_else(|| stale(next))?;
            let node = slot.node.take().ok_or_else(|| stale(next))?;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(next.index);
            self.live -= 1;
            removed += 1;
            if let Payload::Children(children) = node.payload {
                pending.extend(children);
            }
        }
        Ok(removed)
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.live
    }
}

fn stale(handle: Handle) -> GeoHandleError {
    GeoHandleError::Lifetime(format!(
        "handle {handle} was released or its slot was overwritten"
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf() -> Node {
        Node {
            geom_type: GeometryType::Point,
            srid: None,
            dim: Dimension::XY,
            parent: None,
            payload: Payload::Coords(CoordBuffer::new(Dimension::XY)),
        }
    }

    #[test]
    fn stale_handles_fail() {
        let mut arena = Arena::new();
        let a = arena.insert(leaf());
        assert!(arena.contains(a));
        arena.remove_tree(a).unwrap();
        assert!(arena.get(a).unwrap_err().is_lifetime());

        // The slot is reused under a new generation.
        let b = arena.insert(leaf());
        assert_ne!(a, b);
        assert!(arena.get(a).is_err());
        assert!(arena.get(b).is_ok());
        assert!(arena.remove_tree(a).is_err());
    }

    #[test]
    fn remove_tree_frees_descendants() {
        let mut arena = Arena::new();
        let c1 = arena.insert(leaf());
        let c2 = arena.insert(leaf());
        let parent = arena.insert(Node {
            geom_type: GeometryType::MultiPoint,
            payload: Payload::Children(vec![c1, c2]),
            ..leaf()
        });
        assert_eq!(arena.live(), 3);
        assert_eq!(arena.remove_tree(parent).unwrap(), 3);
        assert_eq!(arena.live(), 0);
        assert!(!arena.contains(c1));
        assert!(!arena.contains(c2));
    }
}
