use serde_json::json;
use userbase_core::{Admin, Customer, User};

#[test]
fn user_serializes_with_column_names() {
    let user = User {
        id: 1,
        username: "sultan".to_string(),
        email: "sultan@gmail.com".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&user).unwrap(),
        json!({ "id": 1, "username": "sultan", "email": "sultan@gmail.com" })
    );
}

#[test]
fn admin_and_customer_parse_from_json() {
    let admin: Admin =
        serde_json::from_value(json!({ "id": 1, "user_id": 1, "admin_rights": "full" })).unwrap();
    assert_eq!(admin.admin_rights, "full");

    let customer: Customer =
        serde_json::from_value(json!({ "id": 1, "user_id": 2, "loyalty_points": 100 })).unwrap();
    assert_eq!(customer.user_id, 2);
    assert_eq!(customer.loyalty_points, 100);
}
