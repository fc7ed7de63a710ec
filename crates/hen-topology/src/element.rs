//! Typed view over the three kinds of canvas element, and the fields each
//! one exposes in its property panel.

use crate::model::{EDGE_TYPE, Edge, INTERFACE_TYPE, Interface, NODE_TYPE, Node};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Computer,
    Interface,
    Edge,
}

impl ElementKind {
    /// The `type` attribute used in saved documents.
    pub fn type_name(self) -> &'static str {
        match self {
            ElementKind::Computer => NODE_TYPE,
            ElementKind::Interface => INTERFACE_TYPE,
            ElementKind::Edge => EDGE_TYPE,
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            NODE_TYPE => Some(ElementKind::Computer),
            INTERFACE_TYPE => Some(ElementKind::Interface),
            EDGE_TYPE => Some(ElementKind::Edge),
            _ => None,
        }
    }

    pub fn deletable(self) -> bool {
        match self {
            ElementKind::Computer | ElementKind::Edge => true,
            ElementKind::Interface => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub editable: bool,
}

impl Field {
    fn shown(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            editable: false,
        }
    }

    fn edited(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            editable: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Computer(&'a Node),
    Interface(&'a Interface),
    Edge(&'a Edge),
}

impl<'a> Element<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Computer(_) => ElementKind::Computer,
            Element::Interface(_) => ElementKind::Interface,
            Element::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            Element::Computer(n) => &n.id,
            Element::Interface(i) => &i.id,
            Element::Edge(e) => &e.id,
        }
    }

    pub fn deletable(&self) -> bool {
        self.kind().deletable()
    }

    /// Property panel rows, in display order.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Element::Computer(n) => vec![
                Field::shown("Node ID", &n.id),
                Field::shown("Motherboard", &n.hardware.motherboard),
                Field::shown("CPU Type", &n.hardware.cputype),
                Field::shown("CPU Speed", &n.hardware.cpuspeed),
                Field::shown("Multi Processors", &n.hardware.mpu),
                Field::shown("Memory", &n.hardware.memory),
                Field::edited("loader", &n.netboot.loader),
                Field::edited("filesystem", &n.netboot.filesystem),
                Field::edited("kernel", &n.netboot.kernel),
            ],
            Element::Interface(i) => vec![
                Field::shown("Interface ID", &i.id),
                Field::shown("mac", &i.mac),
                Field::shown("model", &i.model),
                Field::shown("port", &i.port),
                Field::shown("switch", &i.switch),
                Field::edited("ip", &i.ip),
                Field::edited("subnet", &i.subnet),
            ],
            Element::Edge(e) => vec![Field::shown("VLAN Name", &e.vlan)],
        }
    }
}
