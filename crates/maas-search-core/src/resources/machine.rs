// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Machine pseudo-fields.

use serde_json::Value;

use super::{domain_name, mac_addresses, tag_names, zone_name, NodeAuxData, NODE_PRIMARY_KEY};
use crate::extract::{direct_value, pointer_value, MappingTable};
use crate::handlers::PrefixedFilter;
use crate::items::FilterItems;
use crate::value::{FilterValue, Resolved};

pub const SEARCHABLE_FIELDS: &[&str] = &["hostname", "fqdn", "status", "owner", "pool", "zone", "tags"];

pub fn mapping_table() -> MappingTable<NodeAuxData> {
	MappingTable::new()
		.with("arch", arch)
		.with("cores", cpu_count)
		.with("cpu", cpu_count)
		.with("domain", domain_name)
		.with("ip", ip_addresses)
		.with("mac", macs)
		.with("pod", pod_name)
		.with("pod-id", pod_id)
		.with("pool", pool_name)
		.with("power", power_state)
		.with("ram", memory)
		.with("release", release)
		.with("tags", tag_names)
		.with("zone", zone_name)
}

pub fn filter_items() -> FilterItems<NodeAuxData> {
	FilterItems::new(mapping_table(), SEARCHABLE_FIELDS.iter().copied())
		.with_primary_key(NODE_PRIMARY_KEY)
		.with_prefixed_filters(vec![PrefixedFilter::workload()])
}

fn arch(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	direct_value(machine, "architecture")
}

fn cpu_count(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	direct_value(machine, "cpu_count")
}

fn memory(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	direct_value(machine, "memory")
}

fn ip_addresses(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	let ips: Vec<FilterValue> = machine
		.get("ip_addresses")?
		.as_array()?
		.iter()
		.filter_map(|address| address.get("ip")?.as_str())
		.map(FilterValue::from)
		.collect();
	Some(Resolved::Many(ips))
}

fn macs(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	mac_addresses(machine, "pxe_mac", "extra_macs")
}

fn pod_name(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	pointer_value(machine, "/pod/name")
}

fn pod_id(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	pointer_value(machine, "/pod/id")
}

fn pool_name(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	pointer_value(machine, "/pool/name")
}

fn power_state(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	direct_value(machine, "power_state")
}

/// `<osystem>/<distro_series>`, e.g. `ubuntu/jammy`.
fn release(machine: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	let osystem = machine.get("osystem")?.as_str()?;
	let series = machine.get("distro_series")?.as_str()?;
	if osystem.is_empty() || series.is_empty() {
		return None;
	}
	Some(Resolved::from(format!("{osystem}/{series}")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resources::Tag;
	use serde_json::json;

	fn machine() -> Value {
		json!({
			"system_id": "abc123",
			"hostname": "koala",
			"fqdn": "koala.maas",
			"architecture": "amd64/generic",
			"cpu_count": 4,
			"memory": 16,
			"status": "Deployed",
			"owner": "admin",
			"power_state": "on",
			"osystem": "ubuntu",
			"distro_series": "jammy",
			"pxe_mac": "aa:bb:cc:dd:ee:ff",
			"extra_macs": ["11:22:33:44:55:66"],
			"ip_addresses": [{"ip": "10.0.0.2", "is_boot": true}],
			"domain": {"id": 0, "name": "maas"},
			"zone": {"id": 1, "name": "danger"},
			"pool": {"id": 2, "name": "pool1"},
			"pod": {"id": 1, "name": "pod1"},
			"tags": [1, 3],
			"workload_annotations": {"team": "storage"},
		})
	}

	#[test]
	fn test_pseudo_fields() {
		let items = filter_items();
		let machine = machine();
		assert_eq!(items.get_value(&machine, "zone", None), Some(Resolved::from("danger")));
		assert_eq!(items.get_value(&machine, "pool", None), Some(Resolved::from("pool1")));
		assert_eq!(items.get_value(&machine, "pod", None), Some(Resolved::from("pod1")));
		assert_eq!(
			items.get_value(&machine, "pod-id", None),
			Some(Resolved::One(FilterValue::from(1u64)))
		);
		assert_eq!(items.get_value(&machine, "domain", None), Some(Resolved::from("maas")));
		assert_eq!(items.get_value(&machine, "release", None), Some(Resolved::from("ubuntu/jammy")));
		assert_eq!(items.get_value(&machine, "arch", None), Some(Resolved::from("amd64/generic")));
		assert_eq!(items.get_value(&machine, "power", None), Some(Resolved::from("on")));
		assert_eq!(
			items.get_value(&machine, "mac", None),
			Some(Resolved::texts(["aa:bb:cc:dd:ee:ff", "11:22:33:44:55:66"]))
		);
		assert_eq!(items.get_value(&machine, "ip", None), Some(Resolved::texts(["10.0.0.2"])));
		assert_eq!(
			items.get_value(&machine, "workload-team", None),
			Some(Resolved::from("storage"))
		);
	}

	#[test]
	fn test_null_relations_resolve_to_none() {
		let items = filter_items();
		let machine = json!({"pod": null, "pool": null, "zone": {}, "osystem": "", "distro_series": ""});
		for field in ["pod", "pod-id", "pool", "zone", "domain", "release", "tags", "mac", "ip"] {
			assert_eq!(items.get_value(&machine, field, None), None, "{field}");
		}
	}

	#[test]
	fn test_machine_filtering() {
		let items = filter_items();
		let machines = vec![
			machine(),
			json!({
				"hostname": "wombat",
				"status": "New",
				"cpu_count": 2,
				"power_state": "off",
				"zone": {"id": 2, "name": "safe"},
				"tags": [],
			}),
		];
		let aux = NodeAuxData::with_tags(vec![Tag {
			id: 1,
			name: "virtual".to_string(),
			definition: String::new(),
			comment: String::new(),
		}]);

		let found = items.search(&machines, "power:(on) zone:(danger)", Some(&aux));
		assert_eq!(found, vec![&machines[0]]);

		let found = items.search(&machines, "cpu:(2,4)", Some(&aux));
		assert_eq!(found.len(), 2);

		let found = items.search(&machines, "tags:(!virtual)", Some(&aux));
		assert_eq!(found, vec![&machines[1]]);

		let found = items.search(&machines, "wom", Some(&aux));
		assert_eq!(found, vec![&machines[1]]);

		let found = items.search(&machines, "danger", Some(&aux));
		assert_eq!(found, vec![&machines[0]]);

		let found = items.search(&machines, "virt", Some(&aux));
		assert_eq!(found, vec![&machines[0]]);
	}
}
