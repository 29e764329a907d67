/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod document;
mod entities;
mod parser;

pub use arena::Arena;
pub use arena::ArenaStats;
pub use arena::Index;

pub use entities::decode_reference;
pub use entities::encode_text;

pub use parser::DocumentParser;
pub use parser::Location;
pub use parser::ParseError;

pub use document::AttributeId;
pub use document::Attributes;
pub use document::ChildPosition;
pub use document::Children;
pub use document::Cursor;
pub use document::DescendantOrSelf;
pub use document::Document;
pub use document::DocumentStats;
pub use document::InsertPosition;
pub use document::NodeId;
pub use document::NodeKind;
pub use document::PrintOptions;
pub use document::SiblingPosition;
