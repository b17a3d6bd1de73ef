use orderstore_core::{Order, OrderValidationError};

#[test]
fn order_new_sets_defaults() {
    let order = Order::new("NEW");

    assert_eq!(order.id, None);
    assert_eq!(order.description, None);
    assert_eq!(order.status, "NEW");
    assert!(order.validate().is_ok());
}

#[test]
fn with_id_keeps_the_caller_id() {
    let order = Order::with_id(7, "NEW");
    assert_eq!(order.id, Some(7));
}

#[test]
fn validate_rejects_blank_status() {
    for status in ["", "   ", "\t\n"] {
        let err = Order::new(status).validate().unwrap_err();
        assert_eq!(err, OrderValidationError::BlankStatus);
    }
}

#[test]
fn order_serialization_uses_expected_wire_fields() {
    let mut order = Order::with_id(1, "SHIPPED");
    order.description = Some("test".to_string());

    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["description"], "test");
    assert_eq!(json["status"], "SHIPPED");

    let decoded: Order = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, order);
}
