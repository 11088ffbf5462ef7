//! Arena-backed red-black tree used by [`OrderedMap`](super::OrderedMap).
//!
//! Nodes live in a slot arena and refer to each other by index. A node never
//! moves to another slot while it is in the tree: rebalancing relinks nodes
//! instead of swapping their contents. That is what keeps
//! [`Position`](super::Position) handles valid across unrelated inserts and
//! erasures.
//!
//! Every slot carries a generation counter that is bumped when its node is
//! released, so a stale handle can be told apart from a recycled slot. A slot
//! whose generation cannot be bumped any further is retired instead of being
//! reused.
//!
//! The tree itself knows nothing about comparators. Callers search with
//! closures and link new nodes at the vacant spot the search reports.
//!
//! # Invariants
//!
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. Missing children count as black
//! 4. Red nodes have only black children
//! 5. Every path from a node to a missing child crosses the same number of
//!    black nodes

use std::cmp::Ordering;

/// Index of a slot in the arena.
pub(crate) type NodeId = usize;

// =============================================================================
// Node Definition
// =============================================================================

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

/// Which child link of a parent a new node hangs from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Outcome of a search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Search {
    /// A node equivalent to the probe exists.
    Found(NodeId),
    /// No equivalent node; a new one belongs under `parent` on `side`
    /// (`parent == None` means the tree is empty).
    Vacant {
        parent: Option<NodeId>,
        side: Side,
    },
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

#[derive(Clone)]
struct Slot<K, V> {
    generation: u64,
    node: Option<Node<K, V>>,
}

// =============================================================================
// Tree Definition
// =============================================================================

#[derive(Clone)]
pub(crate) struct Tree<K, V> {
    slots: Vec<Slot<K, V>>,
    /// Vacant slots, reused before the arena grows.
    free: Vec<NodeId>,
    root: Option<NodeId>,
    /// Leftmost node, kept up to date so `begin` and end-of-map hints are O(1).
    first: Option<NodeId>,
    /// Rightmost node.
    last: Option<NodeId>,
    length: usize,
    /// Generation given to newly pushed slots; never below the generation of
    /// an existing slot.
    fresh_generation: u64,
}

impl<K, V> Tree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            first: None,
            last: None,
            length: 0,
            fresh_generation: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub(crate) const fn first(&self) -> Option<NodeId> {
        self.first
    }

    #[inline]
    pub(crate) const fn last(&self) -> Option<NodeId> {
        self.last
    }

    /// Upper bound on the number of nodes the arena can address.
    pub(crate) const fn max_nodes() -> usize {
        let slot_size = std::mem::size_of::<Slot<K, V>>();
        if slot_size == 0 {
            usize::MAX
        } else {
            isize::MAX.unsigned_abs() / slot_size
        }
    }

    // -------------------------------------------------------------------------
    // Slot access
    // -------------------------------------------------------------------------

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        match self.slots.get(id).and_then(|slot| slot.node.as_ref()) {
            Some(node) => node,
            None => unreachable!("node id {id} does not name a live node"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots.get_mut(id).and_then(|slot| slot.node.as_mut()) {
            Some(node) => node,
            None => unreachable!("node id {id} does not name a live node"),
        }
    }

    /// Current generation of a slot, or `None` if the slot does not exist.
    pub(crate) fn generation(&self, id: NodeId) -> Option<u64> {
        self.slots.get(id).map(|slot| slot.generation)
    }

    /// Returns `true` if `id` holds a node and the slot has not been
    /// recycled since `generation` was observed.
    pub(crate) fn is_live(&self, id: NodeId, generation: u64) -> bool {
        self.slots
            .get(id)
            .is_some_and(|slot| slot.generation == generation && slot.node.is_some())
    }

    fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free.pop()
            && let Some(slot) = self.slots.get_mut(id)
        {
            debug_assert!(slot.node.is_none(), "free list names an occupied slot");
            slot.node = Some(node);
            return id;
        }
        self.slots.push(Slot {
            generation: self.fresh_generation,
            node: Some(node),
        });
        self.slots.len() - 1
    }

    fn release(&mut self, id: NodeId) -> Node<K, V> {
        let Some(slot) = self.slots.get_mut(id) else {
            unreachable!("released node id {id} is out of range")
        };
        let Some(node) = slot.node.take() else {
            unreachable!("released node id {id} was already vacant")
        };
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.fresh_generation = self.fresh_generation.max(next);
                self.free.push(id);
            }
            // Retired: the slot stays vacant for good.
            None => self.fresh_generation = u64::MAX,
        }
        node
    }

    fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.node(id).color)
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        self.color(id) == Color::Red
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    fn minimum(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn maximum(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// In-order successor.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.minimum(right));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).left == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        None
    }

    /// In-order predecessor.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.maximum(left));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).right == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        None
    }

    /// Predecessor of a bound that may be the end sentinel (`None`).
    pub(crate) fn before(&self, bound: Option<NodeId>) -> Option<NodeId> {
        bound.map_or(self.last, |id| self.predecessor(id))
    }

    /// Node ids in ascending order.
    pub(crate) fn in_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.length);
        let mut cursor = self.first;
        while let Some(id) = cursor {
            order.push(id);
            cursor = self.successor(id);
        }
        order
    }

    // -------------------------------------------------------------------------
    // Searching
    // -------------------------------------------------------------------------

    /// Descends from the root. `probe_against` reports how the probe orders
    /// relative to a stored key.
    pub(crate) fn locate<F>(&self, mut probe_against: F) -> Search
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            parent = Some(id);
            match probe_against(&node.key) {
                Ordering::Less => {
                    side = Side::Left;
                    current = node.left;
                }
                Ordering::Greater => {
                    side = Side::Right;
                    current = node.right;
                }
                Ordering::Equal => return Search::Found(id),
            }
        }
        Search::Vacant { parent, side }
    }

    /// First node whose key does not precede the probe.
    pub(crate) fn lower_bound<F>(&self, mut key_precedes_probe: F) -> Option<NodeId>
    where
        F: FnMut(&K) -> bool,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            if key_precedes_probe(&node.key) {
                current = node.right;
            } else {
                candidate = Some(id);
                current = node.left;
            }
        }
        candidate
    }

    /// First node whose key the probe precedes.
    pub(crate) fn upper_bound<F>(&self, mut probe_precedes_key: F) -> Option<NodeId>
    where
        F: FnMut(&K) -> bool,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            if probe_precedes_key(&node.key) {
                candidate = Some(id);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        candidate
    }

    /// Vacant link directly before `id` in key order.
    pub(crate) fn vacancy_before(&self, id: NodeId) -> (NodeId, Side) {
        match self.node(id).left {
            None => (id, Side::Left),
            // The predecessor is the maximum of the left subtree, so its
            // right link is free.
            Some(left) => (self.maximum(left), Side::Right),
        }
    }

    /// Vacant link directly after `id` in key order.
    pub(crate) fn vacancy_after(&self, id: NodeId) -> (NodeId, Side) {
        match self.node(id).right {
            None => (id, Side::Right),
            Some(right) => (self.minimum(right), Side::Left),
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Links a new red node at a vacant spot and rebalances.
    ///
    /// `parent`/`side` must come from [`Search::Vacant`], [`Self::vacancy_before`]
    /// or [`Self::vacancy_after`] with no mutation in between.
    pub(crate) fn attach(&mut self, parent: Option<NodeId>, side: Side, key: K, value: V) -> NodeId {
        let id = self.allocate(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });

        match parent {
            None => {
                debug_assert!(self.root.is_none(), "attaching a second root");
                self.root = Some(id);
                self.first = Some(id);
                self.last = Some(id);
            }
            Some(parent_id) => match side {
                Side::Left => {
                    debug_assert!(self.node(parent_id).left.is_none(), "left link occupied");
                    self.node_mut(parent_id).left = Some(id);
                    if self.first == Some(parent_id) {
                        self.first = Some(id);
                    }
                }
                Side::Right => {
                    debug_assert!(self.node(parent_id).right.is_none(), "right link occupied");
                    self.node_mut(parent_id).right = Some(id);
                    if self.last == Some(parent_id) {
                        self.last = Some(id);
                    }
                }
            },
        }

        self.length += 1;
        self.insert_fixup(id);
        id
    }

    /// Unlinks a node, rebalances, and hands back its entry.
    pub(crate) fn detach(&mut self, target: NodeId) -> (K, V) {
        if self.first == Some(target) {
            self.first = self.successor(target);
        }
        if self.last == Some(target) {
            self.last = self.predecessor(target);
        }

        let target_left = self.node(target).left;
        let target_right = self.node(target).right;
        let mut removed_color = self.node(target).color;

        // `child` takes the place of the node that physically leaves its
        // position; `child_parent` is tracked separately because `child` may
        // be a missing leaf.
        let (child, child_parent) = match (target_left, target_right) {
            (None, _) => {
                let parent = self.node(target).parent;
                self.transplant(target, target_right);
                (target_right, parent)
            }
            (Some(_), None) => {
                let parent = self.node(target).parent;
                self.transplant(target, target_left);
                (target_left, parent)
            }
            (Some(left), Some(right)) => {
                let heir = self.minimum(right);
                removed_color = self.node(heir).color;
                let heir_right = self.node(heir).right;
                let heir_parent = if self.node(heir).parent == Some(target) {
                    Some(heir)
                } else {
                    let parent = self.node(heir).parent;
                    self.transplant(heir, heir_right);
                    self.node_mut(heir).right = Some(right);
                    self.node_mut(right).parent = Some(heir);
                    parent
                };
                self.transplant(target, Some(heir));
                self.node_mut(heir).left = Some(left);
                self.node_mut(left).parent = Some(heir);
                let target_color = self.node(target).color;
                self.set_color(heir, target_color);
                (heir_right, heir_parent)
            }
        };

        if removed_color == Color::Black {
            self.delete_fixup(child, child_parent);
        }

        self.length -= 1;
        let node = self.release(target);
        (node.key, node.value)
    }

    /// Drops every node and hands the arena back to the allocator.
    ///
    /// Slots pushed afterwards start at a generation above any handle taken
    /// before the clear, so those handles read as stale. Once generations
    /// have saturated the arena is kept instead, with every slot vacant.
    pub(crate) fn clear(&mut self) {
        for id in self.in_order() {
            self.release(id);
        }
        if self.fresh_generation < u64::MAX {
            self.slots = Vec::new();
            self.free = Vec::new();
        }
        self.root = None;
        self.first = None;
        self.last = None;
        self.length = 0;
    }

    /// Mutable views of every entry, in ascending order.
    ///
    /// Runs in O(n log n) for n live entries, however many vacant slots the
    /// arena holds: live slots are peeled off the arena front to back and the
    /// borrows are then sorted back into key order.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let mut ranked: Vec<(NodeId, usize)> = Vec::with_capacity(self.length);
        let mut cursor = self.first;
        while let Some(id) = cursor {
            ranked.push((id, ranked.len()));
            cursor = self.successor(id);
        }
        ranked.sort_unstable_by_key(|&(id, _)| id);

        let mut entries: Vec<(usize, &K, &mut V)> = Vec::with_capacity(ranked.len());
        let mut rest = self.slots.as_mut_slice();
        let mut offset = 0;
        for (id, rank) in ranked {
            let Some((slot, tail)) = std::mem::take(&mut rest)
                .get_mut(id - offset..)
                .and_then(<[Slot<K, V>]>::split_first_mut)
            else {
                break;
            };
            rest = tail;
            offset = id + 1;
            if let Some(node) = slot.node.as_mut() {
                entries.push((rank, &node.key, &mut node.value));
            }
        }
        entries.sort_unstable_by_key(|&(rank, _, _)| rank);
        entries
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect()
    }

    /// Consumes the tree, returning its entries in ascending order.
    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        let order = self.in_order();
        let mut slots = self.slots;
        order
            .into_iter()
            .filter_map(|id| slots.get_mut(id).and_then(|slot| slot.node.take()))
            .map(|node| (node.key, node.value))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Balancing
    // -------------------------------------------------------------------------

    /// Points `parent`'s link to `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent_id) => {
                let parent_node = self.node_mut(parent_id);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
    }

    /// Puts the subtree `replacement` where `old` hangs.
    fn transplant(&mut self, old: NodeId, replacement: Option<NodeId>) {
        let parent = self.node(old).parent;
        self.replace_child(parent, old, replacement);
        if let Some(replacement_id) = replacement {
            self.node_mut(replacement_id).parent = parent;
        }
    }

    fn rotate_left(&mut self, pivot: NodeId) {
        let Some(riser) = self.node(pivot).right else {
            return;
        };
        let inner = self.node(riser).left;
        self.node_mut(pivot).right = inner;
        if let Some(inner_id) = inner {
            self.node_mut(inner_id).parent = Some(pivot);
        }
        let parent = self.node(pivot).parent;
        self.node_mut(riser).parent = parent;
        self.replace_child(parent, pivot, Some(riser));
        self.node_mut(riser).left = Some(pivot);
        self.node_mut(pivot).parent = Some(riser);
    }

    fn rotate_right(&mut self, pivot: NodeId) {
        let Some(riser) = self.node(pivot).left else {
            return;
        };
        let inner = self.node(riser).right;
        self.node_mut(pivot).left = inner;
        if let Some(inner_id) = inner {
            self.node_mut(inner_id).parent = Some(pivot);
        }
        let parent = self.node(pivot).parent;
        self.node_mut(riser).parent = parent;
        self.replace_child(parent, pivot, Some(riser));
        self.node_mut(riser).right = Some(pivot);
        self.node_mut(pivot).parent = Some(riser);
    }

    /// Restores the red-black invariants after linking the red node `node`.
    fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let Some(parent) = self.node(node).parent else {
                break;
            };
            if !self.is_red(Some(parent)) {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.node(parent).parent else {
                break;
            };

            if self.node(grandparent).left == Some(parent) {
                let uncle = self.node(grandparent).right;
                if let Some(uncle_id) = uncle.filter(|&id| self.is_red(Some(id))) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle_id, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    let mut parent = parent;
                    if self.node(parent).right == Some(node) {
                        self.rotate_left(parent);
                        (node, parent) = (parent, node);
                    }
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                    debug_assert!(self.node(node).parent == Some(parent));
                }
            } else {
                let uncle = self.node(grandparent).left;
                if let Some(uncle_id) = uncle.filter(|&id| self.is_red(Some(id))) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle_id, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    let mut parent = parent;
                    if self.node(parent).left == Some(node) {
                        self.rotate_right(parent);
                        (node, parent) = (parent, node);
                    }
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                    debug_assert!(self.node(node).parent == Some(parent));
                }
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Restores the red-black invariants after a black node left the tree.
    ///
    /// `node` carries an extra black; it may be a missing leaf, hence the
    /// explicit `parent`.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.root && !self.is_red(node) {
            let Some(parent_id) = parent else {
                break;
            };

            if self.node(parent_id).left == node {
                // The sibling subtree holds at least one black node, so it exists.
                let Some(mut sibling) = self.node(parent_id).right else {
                    break;
                };
                if self.is_red(Some(sibling)) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent_id, Color::Red);
                    self.rotate_left(parent_id);
                    let Some(next_sibling) = self.node(parent_id).right else {
                        break;
                    };
                    sibling = next_sibling;
                }
                let near = self.node(sibling).left;
                let far = self.node(sibling).right;
                if !self.is_red(near) && !self.is_red(far) {
                    self.set_color(sibling, Color::Red);
                    node = Some(parent_id);
                    parent = self.node(parent_id).parent;
                } else {
                    if !self.is_red(far) {
                        if let Some(near_id) = near {
                            self.set_color(near_id, Color::Black);
                        }
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        let Some(next_sibling) = self.node(parent_id).right else {
                            break;
                        };
                        sibling = next_sibling;
                    }
                    let parent_color = self.node(parent_id).color;
                    self.set_color(sibling, parent_color);
                    self.set_color(parent_id, Color::Black);
                    if let Some(far_id) = self.node(sibling).right {
                        self.set_color(far_id, Color::Black);
                    }
                    self.rotate_left(parent_id);
                    node = self.root;
                    parent = None;
                }
            } else {
                let Some(mut sibling) = self.node(parent_id).left else {
                    break;
                };
                if self.is_red(Some(sibling)) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent_id, Color::Red);
                    self.rotate_right(parent_id);
                    let Some(next_sibling) = self.node(parent_id).left else {
                        break;
                    };
                    sibling = next_sibling;
                }
                let near = self.node(sibling).right;
                let far = self.node(sibling).left;
                if !self.is_red(near) && !self.is_red(far) {
                    self.set_color(sibling, Color::Red);
                    node = Some(parent_id);
                    parent = self.node(parent_id).parent;
                } else {
                    if !self.is_red(far) {
                        if let Some(near_id) = near {
                            self.set_color(near_id, Color::Black);
                        }
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        let Some(next_sibling) = self.node(parent_id).left else {
                            break;
                        };
                        sibling = next_sibling;
                    }
                    let parent_color = self.node(parent_id).color;
                    self.set_color(sibling, parent_color);
                    self.set_color(parent_id, Color::Black);
                    if let Some(far_id) = self.node(sibling).left {
                        self.set_color(far_id, Color::Black);
                    }
                    self.rotate_right(parent_id);
                    node = self.root;
                    parent = None;
                }
            }
        }

        if let Some(node_id) = node {
            self.set_color(node_id, Color::Black);
        }
    }

    // -------------------------------------------------------------------------
    // Auditing
    // -------------------------------------------------------------------------

    /// Checks every structural invariant plus strict ascending order under
    /// `less`. Returns a description of the first violation found.
    pub(crate) fn audit<F>(&self, mut less: F) -> Result<(), String>
    where
        F: FnMut(&K, &K) -> bool,
    {
        let Some(root) = self.root else {
            return if self.length == 0 && self.first.is_none() && self.last.is_none() {
                Ok(())
            } else {
                Err(format!("empty tree reports length {}", self.length))
            };
        };

        if self.node(root).parent.is_some() {
            return Err(format!("root {root} has a parent link"));
        }
        if self.is_red(Some(root)) {
            return Err(format!("root {root} is red"));
        }

        self.black_height(root)?;

        let order = self.in_order();
        if order.len() != self.length {
            return Err(format!(
                "in-order walk visits {} nodes but length is {}",
                order.len(),
                self.length
            ));
        }
        if self.first != Some(self.minimum(root)) {
            return Err("cached first node is not the minimum".to_string());
        }
        if self.last != Some(self.maximum(root)) {
            return Err("cached last node is not the maximum".to_string());
        }
        for pair in order.windows(2) {
            if let &[earlier, later] = pair
                && !less(&self.node(earlier).key, &self.node(later).key)
            {
                return Err(format!(
                    "node {earlier} does not strictly precede its successor {later}"
                ));
            }
        }
        Ok(())
    }

    /// Black height of the subtree at `id`, checking colors and parent links.
    fn black_height(&self, id: NodeId) -> Result<usize, String> {
        let node = self.node(id);
        let mut heights = [0_usize; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            if let Some(child_id) = child {
                if self.node(child_id).parent != Some(id) {
                    return Err(format!("node {child_id} does not link back to parent {id}"));
                }
                if node.color == Color::Red && self.is_red(Some(child_id)) {
                    return Err(format!("red node {id} has a red child {child_id}"));
                }
                heights[slot] = self.black_height(child_id)?;
            }
        }
        if heights[0] != heights[1] {
            return Err(format!(
                "node {id} has black heights {} (left) and {} (right)",
                heights[0], heights[1]
            ));
        }
        Ok(heights[0] + usize::from(node.color == Color::Black))
    }
}
