use mongodb::{
    bson::{Bson, Document, oid::ObjectId},
    results::{DeleteResult, InsertOneResult},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A wishlist entry.
///
/// `blog_id` and `email` are the only fields the service reads; anything
/// else the client sends is carried through `extra` untouched. Neither
/// field is validated against existing blogs or an email format.
#[derive(Debug, Serialize, Deserialize)]
pub struct Wish {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "blogId")]
    pub blog_id: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Deserialize)]
pub struct WishlistQuery {
    pub email: String,
}

/// Insert acknowledgment echoed back to the client, shaped like the
/// driver's own result metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Bson,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: result.inserted_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

/// Parses a path segment into an `ObjectId`, rejecting malformed input
/// before any database call is made.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::MalformedId)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wish_keeps_unknown_fields() {
        let wish: Wish = serde_json::from_value(json!({
            "blogId": "6569c08b9b3f2d1a4c000001",
            "email": "x@y.com",
            "note": "read later"
        }))
        .unwrap();

        assert_eq!(wish.blog_id, "6569c08b9b3f2d1a4c000001");
        assert_eq!(wish.email, "x@y.com");
        assert_eq!(wish.extra.get_str("note").unwrap(), "read later");
        assert!(wish.id.is_none());
    }

    #[test]
    fn wish_rejects_missing_email() {
        let result: Result<Wish, _> =
            serde_json::from_value(json!({ "blogId": "6569c08b9b3f2d1a4c000001" }));

        assert!(result.is_err());
    }

    #[test]
    fn wish_serializes_with_renamed_fields() {
        let wish = Wish {
            id: None,
            blog_id: "b1".to_string(),
            email: "x@y.com".to_string(),
            extra: Document::new(),
        };

        let value = serde_json::to_value(&wish).unwrap();
        assert_eq!(value, json!({ "blogId": "b1", "email": "x@y.com" }));
    }

    #[test]
    fn parse_object_id_accepts_valid_hex() {
        assert!(parse_object_id("6569c08b9b3f2d1a4c000001").is_ok());
    }

    #[test]
    fn parse_object_id_rejects_garbage() {
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(AppError::MalformedId)
        ));
        assert!(matches!(parse_object_id(""), Err(AppError::MalformedId)));
    }
}
