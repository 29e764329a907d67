/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;

use super::AttributeId;
use super::NodeId;

/// Structural category of a node.
///
/// The kind decides which of the name, value, children, and attributes
/// fields a node has:
///
/// | kind | name | value | children | attributes |
/// |---|---|---|---|---|
/// | `Document` | - | - | yes | - |
/// | `Doctype` | - | yes | - | - |
/// | `Comment` | - | yes | - | - |
/// | `Normal` | yes | yes | yes | yes |
/// | `ProcessingInstruction` | yes | yes | - | yes |
///
/// Value of a processing instruction is only set at creation, it cannot
/// be changed afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Document,
    Doctype,
    Comment,
    Normal,
    ProcessingInstruction,
}

impl NodeKind {
    pub fn has_children(self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Normal)
    }

    pub fn has_name(self) -> bool {
        matches!(self, NodeKind::Normal | NodeKind::ProcessingInstruction)
    }

    pub fn has_attributes(self) -> bool {
        matches!(self, NodeKind::Normal | NodeKind::ProcessingInstruction)
    }

    pub fn has_mutable_value(self) -> bool {
        matches!(
            self,
            NodeKind::Normal | NodeKind::Comment | NodeKind::Doctype
        )
    }
}

pub(super) type AttributeMap = BTreeMap<String, AttributeId>;

pub(super) enum Payload {
    Document {
        children: Vec<NodeId>,
    },
    Doctype {
        text: String,
    },
    Comment {
        text: String,
    },
    Normal {
        name: String,
        value: String,
        children: Vec<NodeId>,
        attributes: AttributeMap,
    },
    ProcessingInstruction {
        name: String,
        text: String,
        attributes: AttributeMap,
    },
}

pub(super) struct NodeData {
    pub(super) parent: Option<NodeId>,
    pub(super) payload: Payload,
}

pub(super) struct AttributeData {
    pub(super) name: String,
    pub(super) value: String,
    pub(super) owner: Option<NodeId>,
}

/// Everything a payload can hold, used when the kind changes.
struct Parts {
    name: String,
    value: String,
    children: Vec<NodeId>,
    attributes: AttributeMap,
}

impl Payload {
    pub(super) fn new(kind: NodeKind, name: &str, value: &str) -> Payload {
        match kind {
            NodeKind::Document => Payload::Document {
                children: Vec::new(),
            },
            NodeKind::Doctype => Payload::Doctype {
                text: value.to_string(),
            },
            NodeKind::Comment => Payload::Comment {
                text: value.to_string(),
            },
            NodeKind::Normal => Payload::Normal {
                name: name.to_string(),
                value: value.to_string(),
                children: Vec::new(),
                attributes: AttributeMap::new(),
            },
            // Instruction body is the whole text, name is only set later
            NodeKind::ProcessingInstruction => Payload::ProcessingInstruction {
                name: String::new(),
                text: value.to_string(),
                attributes: AttributeMap::new(),
            },
        }
    }

    pub(super) fn kind(&self) -> NodeKind {
        match self {
            Payload::Document { .. } => NodeKind::Document,
            Payload::Doctype { .. } => NodeKind::Doctype,
            Payload::Comment { .. } => NodeKind::Comment,
            Payload::Normal { .. } => NodeKind::Normal,
            Payload::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
        }
    }

    pub(super) fn name(&self) -> &str {
        match self {
            Payload::Normal { name, .. } | Payload::ProcessingInstruction { name, .. } => name,
            _ => "",
        }
    }

    pub(super) fn value(&self) -> &str {
        match self {
            Payload::Document { .. } => "",
            Payload::Doctype { text }
            | Payload::Comment { text }
            | Payload::ProcessingInstruction { text, .. } => text,
            Payload::Normal { value, .. } => value,
        }
    }

    pub(super) fn name_mut(&mut self) -> Option<&mut String> {
        match self {
            Payload::Normal { name, .. } | Payload::ProcessingInstruction { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Value storage of the kinds which allow changing it.
    pub(super) fn value_mut(&mut self) -> Option<&mut String> {
        match self {
            Payload::Doctype { text } | Payload::Comment { text } => Some(text),
            Payload::Normal { value, .. } => Some(value),
            _ => None,
        }
    }

    pub(super) fn children(&self) -> &[NodeId] {
        match self {
            Payload::Document { children } | Payload::Normal { children, .. } => children,
            _ => &[],
        }
    }

    pub(super) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Payload::Document { children } | Payload::Normal { children, .. } => Some(children),
            _ => None,
        }
    }

    pub(super) fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Payload::Normal { attributes, .. }
            | Payload::ProcessingInstruction { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub(super) fn attributes_mut(&mut self) -> Option<&mut AttributeMap> {
        match self {
            Payload::Normal { attributes, .. }
            | Payload::ProcessingInstruction { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    fn into_parts(self) -> Parts {
        let mut parts = Parts {
            name: String::new(),
            value: String::new(),
            children: Vec::new(),
            attributes: AttributeMap::new(),
        };
        match self {
            Payload::Document { children } => parts.children = children,
            Payload::Doctype { text } | Payload::Comment { text } => parts.value = text,
            Payload::Normal {
                name,
                value,
                children,
                attributes,
            } => {
                parts.name = name;
                parts.value = value;
                parts.children = children;
                parts.attributes = attributes;
            }
            Payload::ProcessingInstruction {
                name,
                text,
                attributes,
            } => {
                parts.name = name;
                parts.value = text;
                parts.attributes = attributes;
            }
        }
        parts
    }

    /// Takes the children and the attributes out of a freed payload.
    pub(super) fn into_links(self) -> (Vec<NodeId>, AttributeMap) {
        let parts = self.into_parts();
        (parts.children, parts.attributes)
    }

    /// Converts the payload to another kind.
    ///
    /// Fields the new kind can hold are carried over. Children and
    /// attributes which do not fit are returned so the caller can
    /// destroy them.
    pub(super) fn convert(self, kind: NodeKind) -> (Payload, Vec<NodeId>, AttributeMap) {
        let Parts {
            name,
            value,
            children,
            attributes,
        } = self.into_parts();
        match kind {
            NodeKind::Document => (Payload::Document { children }, Vec::new(), attributes),
            NodeKind::Doctype => (Payload::Doctype { text: value }, children, attributes),
            NodeKind::Comment => (Payload::Comment { text: value }, children, attributes),
            NodeKind::Normal => (
                Payload::Normal {
                    name,
                    value,
                    children,
                    attributes,
                },
                Vec::new(),
                AttributeMap::new(),
            ),
            NodeKind::ProcessingInstruction => (
                Payload::ProcessingInstruction {
                    name,
                    text: value,
                    attributes,
                },
                children,
                AttributeMap::new(),
            ),
        }
    }
}
