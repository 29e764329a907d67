/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

const MIN_SLOTS: usize = 16;

/// A slot arena for the XML nodes and attributes.
///
/// Values are addressed by an [Index] which carries the generation of
/// the slot at insertion time. Removing a value bumps the generation of
/// its slot, so an old index never resolves to a value stored later in
/// the same recycled slot.
///
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    nr_live: usize,
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

/// A generation checked position in an [Arena].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Index {
    slot: u32,
    generation: u32,
}

/// Slot usage of an [Arena].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// Number of values currently stored.
    pub nr_live: usize,
    /// Number of slots ever allocated, occupied or not.
    pub nr_slots: usize,
    /// Number of vacant slots waiting to be recycled.
    pub nr_free: usize,
}

impl Display for ArenaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "live: {}, slots: {}, free: {}",
            self.nr_live, self.nr_slots, self.nr_free
        )
    }
}

impl<T> Arena<T> {
    pub fn new() -> Arena<T> {
        Arena {
            slots: Vec::with_capacity(MIN_SLOTS),
            free: Vec::new(),
            nr_live: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> Index {
        self.nr_live += 1;
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            let generation = match entry {
                Slot::Vacant { generation } => *generation,
                // Free list only holds vacant slots
                Slot::Occupied { .. } => unreachable!(),
            };
            *entry = Slot::Occupied { generation, value };
            return Index { slot, generation };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        Index {
            slot,
            generation: 0,
        }
    }

    pub fn remove(&mut self, index: Index) -> Option<T> {
        let entry = self.slots.get_mut(index.slot as usize)?;
        let generation = match entry {
            Slot::Occupied { generation, .. } if *generation == index.generation => *generation,
            _ => return None,
        };
        let next = Slot::Vacant {
            generation: generation.wrapping_add(1),
        };
        let old = std::mem::replace(entry, next);
        self.free.push(index.slot);
        self.nr_live -= 1;
        match old {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    pub fn get(&self, index: Index) -> Option<&T> {
        match self.slots.get(index.slot as usize)? {
            Slot::Occupied { generation, value } if *generation == index.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        match self.slots.get_mut(index.slot as usize)? {
            Slot::Occupied { generation, value } if *generation == index.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, index: Index) -> bool {
        self.get(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.nr_live
    }

    pub fn is_empty(&self) -> bool {
        self.nr_live == 0
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nr_live: self.nr_live,
            nr_slots: self.slots.len(),
            nr_free: self.free.len(),
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
