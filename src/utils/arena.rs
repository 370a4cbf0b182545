use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-owning handle to a scene node. Carries a generation so that a handle to a
/// removed node stops resolving instead of aliasing whatever reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

struct Slot<N> {
    generation: u32,
    node: Option<N>,
}

/// Generational storage for scene nodes addressed by [`NodeId`].
pub struct NodeArena<N> {
    slots: Vec<Slot<N>>,
    free: Vec<u32>,
    live: usize,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub fn insert(&mut self, node: N) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(index, 0)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: NodeId) -> Option<N> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node
                .as_ref()
                .map(|_| NodeId::new(index as u32, slot.generation))
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_id_never_resolves_again() {
        let mut arena = NodeArena::new();
        let first = arena.insert("a");
        assert_eq!(arena.remove(first), Some("a"));

        let second = arena.insert("b");
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());
        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second), Some(&"b"));
    }

    #[test]
    fn len_tracks_live_nodes() {
        let mut arena = NodeArena::new();
        let a = arena.insert(1);
        let _b = arena.insert(2);
        assert_eq!(arena.len(), 2);

        arena.remove(a);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.ids().count(), 1);
    }
}
