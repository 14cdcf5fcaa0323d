use notable_model::derive_enabled_actions;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn action_map() -> impl Strategy<Value = Value> {
	(
		proptest::option::of(any::<bool>()),
		any::<bool>(),
		any::<bool>(),
		proptest::option::of(any::<bool>()),
	)
		.prop_map(|(approve, reply, spam, like)| {
			let mut map = Map::new();
			if let Some(v) = approve {
				map.insert("approve-comment".to_string(), Value::Bool(v));
			}
			if reply {
				map.insert("replyto-comment".to_string(), Value::Bool(true));
			}
			if spam {
				map.insert("spam-comment".to_string(), Value::Bool(true));
			}
			if let Some(v) = like {
				map.insert("like-comment".to_string(), Value::Bool(v));
			}
			Value::Object(map)
		})
}

fn junk_block() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::from),
		"[a-z]{0,8}".prop_map(Value::from),
		Just(json!({ "type": "comment" })),
		Just(json!({ "type": "comment", "meta": { "ids": { "comment": 3 } } })),
		Just(json!({ "type": "comment", "meta": { "ids": { "comment": 3 } }, "actions": 9 })),
		Just(json!({ "type": "comment", "meta": "broken", "actions": {} })),
	]
}

fn body_for(comment_id: i64, actions: &Value) -> Vec<Value> {
	vec![json!({
		"type": "comment",
		"meta": { "ids": { "comment": comment_id } },
		"actions": actions
	})]
}

proptest! {
	#[test]
	fn approve_key_enables_exactly_one_moderation_flag(actions in action_map(), comment_id in 0i64..1000) {
		let body = body_for(comment_id, &actions);
		let derived = derive_enabled_actions(&body, comment_id);

		if actions.get("approve-comment").is_some() {
			prop_assert!(derived.approve ^ derived.unapprove);
		} else {
			prop_assert!(!derived.approve && !derived.unapprove);
		}
	}

	#[test]
	fn derivation_is_idempotent(actions in action_map(), comment_id in 0i64..1000) {
		let body = body_for(comment_id, &actions);
		prop_assert_eq!(derive_enabled_actions(&body, comment_id), derive_enabled_actions(&body, comment_id));
	}

	#[test]
	fn derivation_never_panics_on_junk(blocks in proptest::collection::vec(junk_block(), 0..8), comment_id in any::<i64>()) {
		let _ = derive_enabled_actions(&blocks, comment_id);
	}
}
