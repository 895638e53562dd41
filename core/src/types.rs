//! Domain DTOs for the bookstore API.
//!
//! # Design
//! These types mirror the backend's camelCase JSON but are defined
//! independently from the mock-server crate; integration tests catch any
//! schema drift between the two. Records are plain owned data — nothing
//! here is kept alive by this layer beyond the current call.
//!
//! Fields the backend may omit are `Option` (or default to empty
//! collections), and optional fields are skipped on serialization so
//! partial payloads stay partial on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Closed enumeration, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Staff,
    Admin,
}

/// Account status. Closed enumeration, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Locked,
}

/// Direction of an inventory ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A book as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub book_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<BookImage>,
}

/// One image attached to a book. The backend intends exactly one primary
/// image per book; this layer does not enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookImage {
    pub image_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}

/// Append-only inventory ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<i64>,
    pub book_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub price: f64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// One line of a shopping cart, denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub user_id: i64,
    pub book_id: i64,
    pub book_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_description: Option<String>,
    pub book_price: f64,
    pub stock_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
    pub status: String,
    pub shipping_address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_details: Vec<OrderDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_detail_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    pub book_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_author: Option<String>,
    pub quantity: i64,
    pub price_at_order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<i64>,
    pub order_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Checkout request submitted by the cart page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: i64,
    pub items: Vec<CheckoutItem>,
    pub total_amount: f64,
    pub shipping_address: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub book_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
}

/// Dashboard overview counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_users: i64,
    pub total_products: i64,
    pub total_orders: i64,
}

/// The universal response envelope: every `/api/admin/book-images` and
/// `/api/user/book-images` endpoint wraps its payload in this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_uses_lowercase_wire_values() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        let role: Role = serde_json::from_str(r#""customer""#).unwrap();
        assert_eq!(role, Role::Customer);
    }

    #[test]
    fn user_status_roundtrips() {
        let status: UserStatus = serde_json::from_str(r#""locked""#).unwrap();
        assert_eq!(status, UserStatus::Locked);
        assert_eq!(
            serde_json::to_string(&UserStatus::Active).unwrap(),
            r#""active""#
        );
    }

    #[test]
    fn book_image_uses_camel_case_fields() {
        let image = BookImage {
            image_id: 7,
            book_id: Some(3),
            book_title: None,
            image_url: "uploads/cover.jpg".to_string(),
            description: None,
            is_primary: true,
            uploaded_at: None,
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["imageId"], 7);
        assert_eq!(json["bookId"], 3);
        assert_eq!(json["imageUrl"], "uploads/cover.jpg");
        assert_eq!(json["isPrimary"], true);
        assert!(json.get("bookTitle").is_none());
        assert!(json.get("uploadedAt").is_none());
    }

    #[test]
    fn product_defaults_collections_to_empty() {
        let product: Product =
            serde_json::from_str(r#"{"bookId":1,"title":"Dune","price":9.5}"#).unwrap();
        assert!(product.categories.is_empty());
        assert!(product.images.is_empty());
        assert_eq!(product.stock_quantity, None);
    }

    #[test]
    fn envelope_with_data() {
        let envelope: ApiResponse<Vec<Category>> = serde_json::from_str(
            r#"{"success":true,"data":[{"categoryId":1,"categoryName":"Sci-fi"}],"message":"ok"}"#,
        )
        .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap()[0].category_name, "Sci-fi");
    }

    #[test]
    fn envelope_without_data() {
        let envelope: ApiResponse<Vec<Category>> =
            serde_json::from_str(r#"{"success":false,"message":"boom"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message, "boom");
    }

    #[test]
    fn overview_stats_wire_format() {
        let stats: OverviewStats = serde_json::from_str(
            r#"{"totalUsers":12,"totalProducts":40,"totalOrders":7}"#,
        )
        .unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.total_products, 40);
        assert_eq!(stats.total_orders, 7);
    }

    #[test]
    fn user_roundtrips_through_json() {
        let user = User {
            user_id: 5,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            full_name: Some("Ana B".to_string()),
            phone: None,
            address: None,
            role: Role::Staff,
            status: UserStatus::Active,
            created_at: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
