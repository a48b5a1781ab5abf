// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use maas_search_core::resources::{machine, NodeAuxData, ResourceKind, Tag};
use maas_search_core::{
	get_current_filters, to_query_string, FilterItems, Filters, MappingTable, Resolved,
};
use serde_json::{json, Value};

fn filters(entries: &[(&str, &[&str])]) -> Filters {
	entries
		.iter()
		.map(|(field, values)| (*field, values.iter().map(|v| v.to_string()).collect::<Vec<_>>()))
		.collect()
}

fn tag(id: u64, name: &str) -> Tag {
	Tag {
		id,
		name: name.to_string(),
		definition: String::new(),
		comment: String::new(),
	}
}

#[test]
fn test_free_text_only() {
	assert_eq!(get_current_filters("free-text"), filters(&[("q", &["free-text"])]));
}

#[test]
fn test_single_field_filter() {
	assert_eq!(
		get_current_filters("hostname:(miami)"),
		filters(&[("q", &[]), ("hostname", &["miami"])])
	);
}

#[test]
fn test_multi_value_field_filter() {
	assert_eq!(
		get_current_filters("tags:(tag1,tag2)"),
		filters(&[("q", &[]), ("tags", &["tag1", "tag2"])])
	);
}

#[test]
fn test_mixed_query() {
	let parsed = get_current_filters("free-text hostname:(miami) tags:(tag1,tag2)");
	assert_eq!(
		parsed,
		filters(&[
			("q", &["free-text"]),
			("hostname", &["miami"]),
			("tags", &["tag1", "tag2"]),
		])
	);
	assert_eq!(
		to_query_string(&parsed),
		"free-text hostname:(miami) tags:(tag1,tag2)"
	);
}

#[test]
fn test_zone_pseudo_field() {
	let object = json!({"zone": {"id": 1, "name": "danger"}});
	let items = machine::filter_items();
	assert_eq!(items.get_value(&object, "zone", None), Some(Resolved::from("danger")));
}

#[test]
fn test_tag_ids_resolve_through_aux_data() {
	let object = json!({"tags": [1, 2]});
	let aux = NodeAuxData::with_tags(vec![tag(1, "tag1"), tag(2, "tag2"), tag(3, "tag3")]);
	let items = machine::filter_items();
	assert_eq!(
		items.get_value(&object, "tags", Some(&aux)),
		Some(Resolved::texts(["tag1", "tag2"]))
	);
}

#[test]
fn test_or_within_field_and_across_fields() {
	let items: FilterItems<()> = FilterItems::new(MappingTable::new(), ["hostname"]);
	let object = json!({"hostname": "y", "tags": ["a", "b"]});
	assert!(items.matches(&object, &filters(&[("tags", &["b", "c"])]), None));
	assert!(!items.matches(&object, &filters(&[("tags", &["c"])]), None));
	assert!(!items.matches(
		&object,
		&filters(&[("tags", &["b"]), ("hostname", &["x"])]),
		None
	));
}

#[test]
fn test_unknown_field_never_matches() {
	for kind in ResourceKind::ALL {
		let items = kind.filter_items();
		for object in [json!({}), json!({"hostname": "a"}), json!(null), json!([1, 2])] {
			assert!(!items.matches(&object, &filters(&[("nonexistent_field", &["v"])]), None));
		}
	}
}

#[test]
fn test_list_view_search() {
	let machines: Vec<Value> = vec![
		json!({
			"hostname": "name",
			"status": "New",
			"owner": "admin",
			"zone": {"id": 1, "name": "first"},
			"pool": {"id": 1, "name": "pool1"},
			"tags": [1, 2],
		}),
		json!({
			"hostname": "name2",
			"status": "Failed deployment",
			"owner": "other",
			"zone": {"id": 2, "name": "second"},
			"pool": {"id": 2, "name": "pool2"},
			"tags": [2, 3],
		}),
	];
	let aux = NodeAuxData::with_tags(vec![tag(1, "first"), tag(2, "second"), tag(3, "third")]);
	let items = ResourceKind::Machine.filter_items();

	let search = |query: &str| items.search(&machines, query, Some(&aux));

	assert_eq!(search("tags:(first)"), vec![&machines[0]]);
	assert_eq!(search("tags:(!third)"), vec![&machines[0]]);
	assert_eq!(search("tags:(second)").len(), 2);
	assert_eq!(search("status:(New,Failed)"), vec![&machines[0]]);
	assert_eq!(search("name status:(!New)"), vec![&machines[1]]);
	assert_eq!(search("failed !name2"), Vec::<&Value>::new());
	assert_eq!(search("pool:(pool2) owner:(other)"), vec![&machines[1]]);
	assert_eq!(search("hostname:(=name)"), vec![&machines[0]]);
	assert_eq!(search("zone:(first) hostname:(name2)"), Vec::<&Value>::new());
}

#[test]
fn test_url_and_search_string_agree() {
	let from_search = get_current_filters("moon status:(new,deployed) zone:(!south)");
	let url = from_search.to_url_query();
	assert_eq!(url, "?q=moon&status=new%2Cdeployed&zone=%21south");
	assert_eq!(Filters::from_url_query(&url), from_search);
}

#[test]
fn test_selection_filter_on_machines() {
	let machines = vec![
		json!({"system_id": "abc123", "hostname": "koala"}),
		json!({"system_id": "def456", "hostname": "wombat"}),
	];
	let selected = vec!["def456".to_string()];
	let items = ResourceKind::Machine.filter_items();
	assert_eq!(
		items.search_selected(&machines, "in:(selected)", &selected, None),
		vec![&machines[1]]
	);
	assert_eq!(
		items.search_selected(&machines, "in:(!selected)", &selected, None),
		vec![&machines[0]]
	);
	assert_eq!(
		items.search_selected(&machines, "in:(selected) koala", &selected, None),
		Vec::<&Value>::new()
	);
}

#[test]
fn test_free_text_key_stays_free_text() {
	let parsed = get_current_filters("q:(hostname:(x))");
	assert_eq!(parsed, filters(&[("q", &["q:(hostname:(x))"])]));
	assert_eq!(to_query_string(&parsed), "q:(hostname:(x))");
}
