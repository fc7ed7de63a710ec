mod element;
mod xml;

use crate::*;

pub(super) fn slots(n: usize) -> Vec<InterfaceSlot> {
    (0..n)
        .map(|i| InterfaceSlot {
            mac: format!("00:11:22:33:44:{i:02x}"),
            model: format!("e1000-{i}"),
            port: format!("GigabitEthernet0/{i}"),
            switch: "switch1".to_string(),
            cidr: String::new(),
        })
        .collect()
}

pub(super) fn profile() -> HardwareProfile {
    HardwareProfile {
        motherboard: "X".to_string(),
        cputype: "Y".to_string(),
        cpuspeed: "2.4GHz".to_string(),
        mpu: "2".to_string(),
        memory: "1024".to_string(),
    }
}

pub(super) fn topology_with(ids: &[&str], slot_count: usize) -> Topology {
    let config = EditorConfig {
        candidates: vec![
            "computer1".to_string(),
            "computer2".to_string(),
            "computer3".to_string(),
        ],
        ..Default::default()
    };
    let mut topo = Topology::new(config);
    for id in ids {
        topo.create_node(id, &profile(), NetbootInfo::default(), &slots(slot_count))
            .unwrap();
    }
    topo
}
