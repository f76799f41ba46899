//! # Command Shim
//!
//! JSON lines through a full `NodeRuntime`.

#[cfg(test)]
mod tests {
    use ct_node::{run_shim, CommandResponse, NodeConfig, NodeRuntime};
    use serde_json::json;
    use shared_bus::EventFilter;
    use shared_types::Identity;

    const OWNER: &str = "0x0101010101010101010101010101010101010101";
    const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn script() -> String {
        [
            format!(r#"{{"op":"create","caller":"{ALICE}","sender":"{ALICE}","receiver":"{BOB}","weight":1000}}"#),
            format!(r#"{{"op":"mark_in_transit","caller":"{OWNER}","cargo_id":1}}"#),
            r#"{"op":"get","cargo_id":1}"#.to_string(),
            format!(r#"{{"op":"mark_delivered","caller":"{OWNER}","cargo_id":1}}"#),
            r#"{"op":"get","cargo_id":1}"#.to_string(),
        ]
        .join("\n")
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let runtime = NodeRuntime::new(NodeConfig::new(Identity::repeat(0x01)));
        let mut sub = runtime.bus().subscribe(EventFilter::all());
        let handler = runtime.handler();

        let input = script();
        let mut output = Vec::new();
        let served = run_shim(&handler, input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(served, 5);

        let responses: Vec<CommandResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses[0].result, Some(json!({ "cargo_id": 1 })));
        assert_eq!(
            responses[1].result,
            Some(json!({
                "cargo_id": 1,
                "shipping_status": "IN_TRANSIT",
                "shipping_status_code": 2,
            }))
        );
        assert_eq!(
            responses[2].result.as_ref().unwrap()["shipping_status"],
            "IN_TRANSIT"
        );
        assert_eq!(
            responses[3].result.as_ref().unwrap()["shipping_status_code"],
            3
        );
        assert_eq!(responses[4].error.as_ref().unwrap().code, "NotFound");

        let mut names = Vec::new();
        while let Ok(Some(message)) = sub.try_recv() {
            names.push(message.event.name());
        }
        assert_eq!(
            names,
            vec!["CargoReceived", "ShippingStatusUpdated", "ShippingStatusUpdated"]
        );
    }
}
