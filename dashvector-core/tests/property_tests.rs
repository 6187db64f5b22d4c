use std::collections::HashMap;

use dashvector_core::{codec, Doc, Fields, ReadResponse, SparseVector, WriteOp, WriteRequest};
use proptest::prelude::*;
use serde_json::{json, Value};

proptest! {
    #[test]
    fn test_sparse_vector_survives_wire(
        entries in proptest::collection::hash_map(
            any::<i32>(),
            (-1024i32..1024).prop_map(|n| n as f32 / 8.0),
            0..50,
        )
    ) {
        let sparse: SparseVector = entries.clone().into_iter().collect();
        let bytes = codec::encode(&sparse).unwrap();

        // keys travel as decimal strings
        let wire: HashMap<String, f32> = serde_json::from_slice(&bytes).unwrap();
        prop_assert!(wire.keys().all(|k| k.parse::<i32>().is_ok()));

        let decoded: SparseVector = codec::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.into_inner(), entries);
    }

    #[test]
    fn test_fields_survive_wire(
        ints in proptest::collection::hash_map("[a-z]{1,8}", any::<i64>(), 0..10),
        strings in proptest::collection::hash_map("[A-Z]{1,8}", ".{0,16}", 0..10)
    ) {
        let mut fields = Fields::new();
        for (k, v) in &ints {
            fields.set(k.clone(), *v);
        }
        for (k, v) in &strings {
            fields.set(k.clone(), v.clone());
        }

        let decoded: Fields = codec::decode(&codec::encode(&fields).unwrap()).unwrap();
        for (k, v) in &ints {
            prop_assert_eq!(decoded.get_i64(k), Some(*v));
        }
        for (k, v) in &strings {
            prop_assert_eq!(decoded.get_str(k), Some(v.as_str()));
        }
    }

    #[test]
    fn test_write_request_keeps_only_admitted(
        shapes in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..20)
    ) {
        let docs: Vec<Doc> = shapes
            .iter()
            .enumerate()
            .map(|(i, &(has_id, has_vector))| {
                let mut doc = Doc::new().with_field("n", i as i64);
                if has_id {
                    doc = doc.with_id(i.to_string());
                }
                if has_vector {
                    doc = doc.with_vector(vec![0.5, 0.25]);
                }
                doc
            })
            .collect();

        for op in [WriteOp::Insert, WriteOp::Update, WriteOp::Upsert] {
            let request = WriteRequest::build(op, "default", docs.clone());
            let expected = docs.iter().filter(|d| op.admits(d)).count();
            prop_assert_eq!(request.docs().len(), expected);
            prop_assert!(request.docs().iter().all(|d| op.admits(d)));
        }
    }

    #[test]
    fn test_decode_never_fails_on_object_envelopes(
        code in prop_oneof![Just(Value::Null), any::<i32>().prop_map(Value::from)],
        output in prop_oneof![Just(Value::Null), Just(json!({})), Just(json!({"1": {"id": 1}}))],
        usage in prop_oneof![Just(None), Just(Some(json!({"read_units": "3"})))]
    ) {
        let mut envelope = json!({"code": code, "output": output});
        if let Some(usage) = &usage {
            envelope["usage"] = usage.clone();
        }
        let resp: ReadResponse = codec::decode(&serde_json::to_vec(&envelope).unwrap()).unwrap();
        prop_assert_eq!(resp.usage.is_some(), usage.is_some());
    }
}
