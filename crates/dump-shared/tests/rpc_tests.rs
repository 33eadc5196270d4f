//! Tests for rpc.rs

use dump_shared::{dumpable_record, Dump, Normalizer, RpcResponse};

struct PeerStats {
    peer: String,
    latency_ms: u32,
    key: [u8; 4],
}

dumpable_record!(PeerStats { peer, latency_ms, key });

#[test]
fn test_document_result_is_embedded_verbatim() {
    let stats = PeerStats {
        peer: "12D3KooW".into(),
        latency_ms: 42,
        key: [0xDE, 0xAD, 0xBE, 0xEF],
    };
    let resp = RpcResponse::dumped("1", &Normalizer::default(), &stats);
    assert_eq!(
        resp.to_json().unwrap(),
        r#"{"jsonrpc":"2.0","result":{"peer":"12D3KooW","latency_ms":42,"key":"0xdeadbeef"},"id":"1"}"#
    );
}

#[test]
fn test_null_result_is_kept() {
    let resp = RpcResponse::dumped("2", &Normalizer::default(), &None::<u8>);
    assert_eq!(resp.result, Some(Dump::Null));
    assert_eq!(
        resp.to_json().unwrap(),
        r#"{"jsonrpc":"2.0","result":null,"id":"2"}"#
    );
}

#[test]
fn test_pretty_envelope_parses_back() {
    let resp = RpcResponse::dumped("3", &Normalizer::default(), &vec!["a", "b"]);
    let pretty = resp.to_json_pretty().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(parsed["result"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_non_finite_result_fails_to_serialize() {
    let resp = RpcResponse::success("4", Dump::from(f32::INFINITY));
    assert!(resp.to_json().is_err());
}
