//! Parsers for the two inventory lookups the editor issues: the hardware
//! profile of one host and the list of all placeable hosts.

use crate::profile::{HardwareProfile, InterfaceSlot};
use crate::{Error, Result};

/// One `<interface>` of a profile reply, as the inventory reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportedInterface {
    pub mac: String,
    pub model: String,
    pub port: String,
    pub switch: String,
    pub ip: String,
    pub subnet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileReply {
    pub ident: String,
    pub profile: HardwareProfile,
    pub interfaces: Vec<ReportedInterface>,
}

impl ProfileReply {
    /// Interface slots for node creation. The address is left for the user
    /// to fill in, the inventory's own address is informational only.
    pub fn slots(&self) -> Vec<InterfaceSlot> {
        self.interfaces
            .iter()
            .map(|i| InterfaceSlot {
                mac: i.mac.clone(),
                model: i.model.clone(),
                port: i.port.clone(),
                switch: i.switch.clone(),
                cidr: String::new(),
            })
            .collect()
    }
}

/// `<node ident= motherboard= cputype= cpuspeed= multiproc= memory=>` with
/// nested `<interface mac= port= model= switch= ip= subnet=/>`.
pub fn parse_profile_reply(text: &str) -> Result<ProfileReply> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("node") {
        return Err(Error::document(format!(
            "expected <node> reply, found <{}>",
            root.tag_name().name()
        )));
    }
    let profile = HardwareProfile {
        motherboard: get(root, "motherboard"),
        cputype: get(root, "cputype"),
        cpuspeed: get(root, "cpuspeed"),
        mpu: get(root, "multiproc"),
        memory: get(root, "memory"),
    };
    let interfaces = root
        .children()
        .filter(|n| n.has_tag_name("interface"))
        .map(|el| ReportedInterface {
            mac: get(el, "mac"),
            model: get(el, "model"),
            port: get(el, "port"),
            switch: get(el, "switch"),
            ip: get(el, "ip"),
            subnet: get(el, "subnet"),
        })
        .collect();

    Ok(ProfileReply {
        ident: get(root, "ident"),
        profile,
        interfaces,
    })
}

fn get(el: roxmltree::Node<'_, '_>, name: &str) -> String {
    el.attribute(name).unwrap_or_default().to_string()
}

/// `<nodes><node id=/>...</nodes>`, in document order.
pub fn parse_node_list(text: &str) -> Result<Vec<String>> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("nodes") {
        return Err(Error::document(format!(
            "expected <nodes> reply, found <{}>",
            root.tag_name().name()
        )));
    }
    Ok(root
        .children()
        .filter(|n| n.has_tag_name("node"))
        .filter_map(|n| n.attribute("id"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect())
}
