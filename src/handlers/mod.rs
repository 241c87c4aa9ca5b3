// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (Authenticate only) → Protected (session or account owner) → Elevated (admin)
// The tier decides which stage layers the router wraps around each handler.
pub mod elevated;
pub mod protected;
pub mod public;

use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use std::collections::HashMap;

use crate::database::models::PatchFields;
use crate::error::ApiError;

/// Deserialize a JSON body into `T` and run its field validation.
pub(crate) fn parse_body<T>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let Json(body) = payload?;
    let parsed: T = serde_json::from_value(body)?;
    parsed.validate()?;
    Ok(parsed)
}

/// Validate a partial update against `T`, returning the body's own ordered
/// object for the update builder. `null` is only accepted for `T::NULLABLE` fields.
pub(crate) fn parse_patch<T>(payload: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError>
where
    T: DeserializeOwned + Validate + PatchFields,
{
    let Json(body) = payload?;
    let Value::Object(fields) = body else {
        return Err(ApiError::bad_request("Request body must be a JSON object"));
    };

    let parsed: T = serde_json::from_value(Value::Object(fields.clone()))?;
    parsed.validate()?;

    let null_fields: HashMap<String, String> = fields
        .iter()
        .filter(|(field, value)| value.is_null() && !T::NULLABLE.contains(&field.as_str()))
        .map(|(field, _)| (field.clone(), "must not be null".to_string()))
        .collect();
    if !null_fields.is_empty() {
        return Err(ApiError::validation_error("Invalid request body", Some(null_fields)));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{CompanyUpdate, JobUpdate, NewCompany, UserUpdate};
    use serde_json::json;

    #[test]
    fn patch_keeps_key_order() {
        let body = json!({"numEmployees": 10, "name": "New", "description": "D"});
        let fields = parse_patch::<CompanyUpdate>(Ok(Json(body))).unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["numEmployees", "name", "description"]);
    }

    #[test]
    fn patch_rejects_non_objects_and_unknown_keys() {
        assert_eq!(parse_patch::<CompanyUpdate>(Ok(Json(json!([1])))).unwrap_err().status_code(), 400);
        let err = parse_patch::<CompanyUpdate>(Ok(Json(json!({"handle": "c1-new"})))).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn null_for_required_column_is_rejected() {
        let err = parse_patch::<CompanyUpdate>(Ok(Json(json!({"name": null})))).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json()["field_errors"]["name"], "must not be null");

        let err = parse_patch::<UserUpdate>(Ok(Json(json!({"firstName": "F", "password": null})))).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.to_json()["field_errors"]["password"], "must not be null");
        assert!(err.to_json()["field_errors"].get("firstName").is_none());

        assert!(parse_patch::<JobUpdate>(Ok(Json(json!({"title": null})))).is_err());
        assert!(parse_patch::<UserUpdate>(Ok(Json(json!({"email": null})))).is_err());
    }

    #[test]
    fn null_clears_optional_columns() {
        let fields = parse_patch::<CompanyUpdate>(Ok(Json(json!({"description": null, "logoUrl": null})))).unwrap();
        assert_eq!(fields["description"], Value::Null);

        let fields = parse_patch::<JobUpdate>(Ok(Json(json!({"equity": null})))).unwrap();
        assert_eq!(fields["equity"], Value::Null);
    }

    #[test]
    fn empty_patch_passes_through_for_the_builder_to_reject() {
        let fields = parse_patch::<CompanyUpdate>(Ok(Json(json!({})))).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn body_missing_required_field_is_invalid() {
        let err = parse_body::<NewCompany>(Ok(Json(json!({"handle": "new"})))).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
