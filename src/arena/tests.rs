/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

const CHARS: &str = "1234567890abcdefghijklmnopqrstuv";

#[test]
fn it_works() {
    let mut arena = Arena::new();
    assert!(arena.is_empty());

    let a = arena.insert("test".to_string());
    let b = arena.insert("moretest".to_string());
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(a).map(String::as_str), Some("test"));
    assert_eq!(arena.get(b).map(String::as_str), Some("moretest"));

    arena.get_mut(a).unwrap().push_str("ing");
    assert_eq!(arena.get(a).map(String::as_str), Some("testing"));
}

#[test]
fn stale_index() {
    let mut arena = Arena::new();
    let a = arena.insert(1);
    assert_eq!(arena.remove(a), Some(1));
    assert_eq!(arena.remove(a), None);
    assert!(!arena.contains(a));
    assert!(arena.get(a).is_none());
    assert!(arena.get_mut(a).is_none());

    // Same slot, new generation
    let b = arena.insert(2);
    assert_ne!(a, b);
    assert!(arena.get(a).is_none());
    assert_eq!(arena.get(b), Some(&2));
}

#[test]
fn slots_are_recycled() {
    let mut arena = Arena::new();
    let indices: Vec<Index> = CHARS.chars().map(|c| arena.insert(c)).collect();
    assert_eq!(arena.stats().nr_slots, CHARS.len());

    for index in indices.iter().step_by(2) {
        arena.remove(*index);
    }
    let stats = arena.stats();
    assert_eq!(stats.nr_live, CHARS.len() / 2);
    assert_eq!(stats.nr_free, CHARS.len() / 2);

    for c in CHARS.chars().take(CHARS.len() / 2) {
        arena.insert(c);
    }
    let stats = arena.stats();
    assert_eq!(stats.nr_live, CHARS.len());
    assert_eq!(stats.nr_slots, CHARS.len());
    assert_eq!(stats.nr_free, 0);
}

#[test]
fn many_inserts() {
    let mut arena = Arena::new();
    for _ in 0..1000 {
        for j in 0..CHARS.len() {
            arena.insert(&CHARS[..j]);
        }
    }
    assert_eq!(arena.len(), 1000 * CHARS.len());
    assert_eq!(
        format!("{}", arena.stats()),
        "live: 32000, slots: 32000, free: 0"
    );
}
